//! Parser for the generated public path initializer.
//!
//! The bundler emits the initializer as a single simple assignment statement,
//! e.g. `__webpack_require__.p = "/";`. This module accepts exactly that shape:
//! an identifier or member chain on the left, one plain `=`, an expression,
//! and an optional terminating `;`. Everything else is a [`ParseError`].

use std::ops::Range;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("generated code is empty")]
    Empty,

    #[error("expected '=' after assignment target at offset {offset}")]
    MissingOperator { offset: usize },

    #[error("unsupported operator '{operator}' at offset {offset}, expected '='")]
    UnsupportedOperator { operator: String, offset: usize },

    #[error("invalid assignment target: unexpected {found:?} at offset {offset}")]
    InvalidTarget { found: char, offset: usize },

    #[error("assignment has no value at offset {offset}")]
    EmptyValue { offset: usize },

    #[error("chained assignment at offset {offset}")]
    ChainedAssignment { offset: usize },

    #[error("unterminated {quote} literal starting at offset {offset}")]
    UnterminatedLiteral { quote: char, offset: usize },

    #[error("unbalanced '{delimiter}' at offset {offset}")]
    UnbalancedDelimiter { delimiter: char, offset: usize },

    #[error("unexpected code after the statement at offset {offset}")]
    TrailingCode { offset: usize },
}

/// A parsed `<target> = <value>;` statement, borrowing from the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment<'a> {
    /// Assignment target, exactly as written (surrounding whitespace trimmed)
    pub target: &'a str,
    /// Right-hand side expression, trimmed
    pub value: &'a str,
    /// Byte range of `target` in the source
    pub target_span: Range<usize>,
    /// Byte range of `value` in the source
    pub value_span: Range<usize>,
}

/// Parse a single simple assignment statement
pub fn parse_assignment(source: &str) -> Result<Assignment<'_>, ParseError> {
    let mut cursor = Cursor::new(source);
    cursor.skip_whitespace();
    if cursor.is_eof() {
        return Err(ParseError::Empty);
    }

    let target_start = cursor.pos;
    cursor.member_chain()?;
    let target_end = cursor.pos;

    cursor.skip_whitespace();
    cursor.assignment_operator()?;

    let value_span = cursor.expression()?;
    let value = source[value_span.clone()].trim();
    if value.is_empty() {
        return Err(ParseError::EmptyValue {
            offset: value_span.start,
        });
    }
    let leading = source[value_span.clone()].len() - source[value_span.clone()].trim_start().len();
    let value_start = value_span.start + leading;

    Ok(Assignment {
        target: &source[target_start..target_end],
        value,
        target_span: target_start..target_end,
        value_span: value_start..value_start + value.len(),
    })
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

const OPERATOR_CHARS: &str = "+-*/%&|^<>!?~";

/// Whether a `/` following `prev` begins a regular expression rather than a division
fn starts_operand(prev: char) -> bool {
    "=(,[!&|?:{};+-*/%<>~^".contains(prev)
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.bump();
        }
    }

    fn unexpected(&self) -> ParseError {
        match self.peek() {
            Some(found) => ParseError::InvalidTarget {
                found,
                offset: self.pos,
            },
            None => ParseError::MissingOperator { offset: self.pos },
        }
    }

    fn identifier(&mut self) -> Result<(), ParseError> {
        match self.peek() {
            Some(c) if is_ident_start(c) => {
                self.bump();
            }
            _ => return Err(self.unexpected()),
        }
        while matches!(self.peek(), Some(c) if is_ident_continue(c)) {
            self.bump();
        }
        Ok(())
    }

    /// `ident ( '.' ident | '[' literal ']' )*`
    fn member_chain(&mut self) -> Result<(), ParseError> {
        self.identifier()?;
        loop {
            let checkpoint = self.pos;
            self.skip_whitespace();
            match self.peek() {
                Some('.') => {
                    self.bump();
                    self.skip_whitespace();
                    self.identifier()?;
                }
                Some('[') => {
                    self.bump();
                    self.skip_whitespace();
                    self.computed_key()?;
                    self.skip_whitespace();
                    if self.peek() != Some(']') {
                        return Err(self.unexpected());
                    }
                    self.bump();
                }
                _ => {
                    self.pos = checkpoint;
                    return Ok(());
                }
            }
        }
    }

    fn computed_key(&mut self) -> Result<(), ParseError> {
        match self.peek() {
            Some(q @ ('"' | '\'')) => self.string_literal(q),
            Some(c) if c.is_ascii_digit() => {
                while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                    self.bump();
                }
                Ok(())
            }
            _ => Err(self.unexpected()),
        }
    }

    fn string_literal(&mut self, quote: char) -> Result<(), ParseError> {
        let start = self.pos;
        self.bump();
        while let Some(c) = self.bump() {
            match c {
                '\\' => {
                    self.bump();
                }
                c if c == quote => return Ok(()),
                '\n' if quote != '`' => break,
                _ => {}
            }
        }
        Err(ParseError::UnterminatedLiteral {
            quote,
            offset: start,
        })
    }

    fn assignment_operator(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        match self.peek() {
            None => Err(ParseError::MissingOperator { offset: start }),
            Some('=') => match self.peek_nth(1) {
                Some(next @ ('=' | '>')) => Err(ParseError::UnsupportedOperator {
                    operator: format!("={}", next),
                    offset: start,
                }),
                _ => {
                    self.bump();
                    Ok(())
                }
            },
            Some(c) if OPERATOR_CHARS.contains(c) => {
                while matches!(self.peek(), Some(c) if OPERATOR_CHARS.contains(c)) {
                    self.bump();
                }
                if self.peek() == Some('=') {
                    self.bump();
                }
                Err(ParseError::UnsupportedOperator {
                    operator: self.src[start..self.pos].to_string(),
                    offset: start,
                })
            }
            Some(found) => Err(ParseError::InvalidTarget {
                found,
                offset: start,
            }),
        }
    }

    fn skip_comment(&mut self) -> Result<bool, ParseError> {
        match (self.peek(), self.peek_nth(1)) {
            (Some('/'), Some('/')) => {
                while let Some(c) = self.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.bump();
                }
                Ok(true)
            }
            (Some('/'), Some('*')) => {
                let start = self.pos;
                self.pos += 2;
                match self.src[self.pos..].find("*/") {
                    Some(end) => {
                        self.pos += end + 2;
                        Ok(true)
                    }
                    None => Err(ParseError::UnterminatedLiteral {
                        quote: '*',
                        offset: start,
                    }),
                }
            }
            _ => Ok(false),
        }
    }

    /// Scan the right-hand side up to the statement terminator and return its range
    fn expression(&mut self) -> Result<Range<usize>, ParseError> {
        let start = self.pos;
        let mut open: Vec<(char, usize)> = Vec::new();
        let mut prev = '=';
        let mut last_significant = '=';

        while let Some(c) = self.peek() {
            if self.skip_comment()? {
                continue;
            }
            if !c.is_whitespace() {
                if c == '/' && starts_operand(last_significant) {
                    self.regex_literal()?;
                    prev = '/';
                    last_significant = ')';
                    continue;
                }
                last_significant = c;
            }
            match c {
                '"' | '\'' | '`' => {
                    self.string_literal(c)?;
                    prev = c;
                    continue;
                }
                '(' | '[' | '{' => open.push((c, self.pos)),
                ')' | ']' | '}' => {
                    let expected = match c {
                        ')' => '(',
                        ']' => '[',
                        _ => '{',
                    };
                    match open.pop() {
                        Some((opener, _)) if opener == expected => {}
                        _ => {
                            return Err(ParseError::UnbalancedDelimiter {
                                delimiter: c,
                                offset: self.pos,
                            })
                        }
                    }
                }
                ';' if open.is_empty() => {
                    let end = self.pos;
                    self.bump();
                    self.trailing()?;
                    return Ok(start..end);
                }
                '=' if open.is_empty()
                    && !"=!<>".contains(prev)
                    && !matches!(self.peek_nth(1), Some('=' | '>')) =>
                {
                    return Err(ParseError::ChainedAssignment { offset: self.pos });
                }
                _ => {}
            }
            prev = c;
            self.bump();
        }

        if let Some((delimiter, offset)) = open.pop() {
            return Err(ParseError::UnbalancedDelimiter { delimiter, offset });
        }
        Ok(start..self.pos)
    }

    /// `/body/flags`; `/` inside a character class does not terminate the body
    fn regex_literal(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        self.bump();
        let mut in_class = false;
        while let Some(c) = self.bump() {
            match c {
                '\\' => {
                    self.bump();
                }
                '[' => in_class = true,
                ']' => in_class = false,
                '/' if !in_class => {
                    while matches!(self.peek(), Some(c) if is_ident_continue(c)) {
                        self.bump();
                    }
                    return Ok(());
                }
                '\n' => break,
                _ => {}
            }
        }
        Err(ParseError::UnterminatedLiteral {
            quote: '/',
            offset: start,
        })
    }

    fn trailing(&mut self) -> Result<(), ParseError> {
        loop {
            self.skip_whitespace();
            if self.is_eof() {
                return Ok(());
            }
            if !self.skip_comment()? {
                return Err(ParseError::TrailingCode { offset: self.pos });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webpack_public_path() {
        let a = parse_assignment(r#"__webpack_require__.p = "/";"#).unwrap();
        assert_eq!(a.target, "__webpack_require__.p");
        assert_eq!(a.value, r#""/""#);
        assert_eq!(a.target_span, 0..21);
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        let src = "\n  __webpack_require__.p   =  \"/assets/\"  ;\n";
        let a = parse_assignment(src).unwrap();
        assert_eq!(a.target, "__webpack_require__.p");
        assert_eq!(a.value, "\"/assets/\"");
        assert_eq!(&src[a.value_span.clone()], a.value);
    }

    #[test]
    fn test_semicolon_optional() {
        let a = parse_assignment("p = '/'").unwrap();
        assert_eq!(a.value, "'/'");
    }

    #[test]
    fn test_computed_member_target() {
        let a = parse_assignment(r#"self["webpackChunk"].p = "/";"#).unwrap();
        assert_eq!(a.target, r#"self["webpackChunk"].p"#);
    }

    #[test]
    fn test_value_with_nested_statements() {
        let a = parse_assignment("r.p = (() => { var a = 1; return a; })();").unwrap();
        assert_eq!(a.value, "(() => { var a = 1; return a; })()");
    }

    #[test]
    fn test_string_with_equals_and_semicolon() {
        let a = parse_assignment(r#"r.p = "a=b;c";"#).unwrap();
        assert_eq!(a.value, r#""a=b;c""#);
    }

    #[test]
    fn test_trailing_comment_allowed() {
        assert!(parse_assignment("r.p = \"/\"; // public path\n").is_ok());
    }

    #[test]
    fn test_comparison_in_value_allowed() {
        let a = parse_assignment("r.p = a === b ? '/' : '/x';").unwrap();
        assert_eq!(a.value, "a === b ? '/' : '/x'");
    }

    #[test]
    fn test_empty() {
        assert_eq!(parse_assignment("   "), Err(ParseError::Empty));
    }

    #[test]
    fn test_missing_operator() {
        assert_eq!(
            parse_assignment("__webpack_require__.p"),
            Err(ParseError::MissingOperator { offset: 21 })
        );
    }

    #[test]
    fn test_compound_operator() {
        assert_eq!(
            parse_assignment("r.p += '/';"),
            Err(ParseError::UnsupportedOperator {
                operator: "+=".to_string(),
                offset: 4
            })
        );
    }

    #[test]
    fn test_equality_is_not_assignment() {
        assert!(matches!(
            parse_assignment("r.p == '/';"),
            Err(ParseError::UnsupportedOperator { .. })
        ));
    }

    #[test]
    fn test_declaration_rejected() {
        assert_eq!(
            parse_assignment("var p = '/';"),
            Err(ParseError::InvalidTarget {
                found: 'p',
                offset: 4
            })
        );
    }

    #[test]
    fn test_call_target_rejected() {
        assert!(matches!(
            parse_assignment("f() = 1;"),
            Err(ParseError::InvalidTarget { found: '(', .. })
        ));
    }

    #[test]
    fn test_empty_value() {
        assert!(matches!(
            parse_assignment("r.p = ;"),
            Err(ParseError::EmptyValue { .. })
        ));
    }

    #[test]
    fn test_chained_assignment() {
        assert!(matches!(
            parse_assignment("a = b = '/';"),
            Err(ParseError::ChainedAssignment { offset: 6 })
        ));
    }

    #[test]
    fn test_second_statement() {
        assert!(matches!(
            parse_assignment("r.p = '/'; r.x = 1;"),
            Err(ParseError::TrailingCode { offset: 11 })
        ));
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(
            parse_assignment("r.p = \"/;"),
            Err(ParseError::UnterminatedLiteral {
                quote: '"',
                offset: 6
            })
        );
    }

    #[test]
    fn test_unbalanced_delimiter() {
        assert!(matches!(
            parse_assignment("r.p = f(\"/\";"),
            Err(ParseError::UnbalancedDelimiter { delimiter: '(', .. })
        ));
    }

    #[test]
    fn test_regex_value_with_quote() {
        let a = parse_assignment(r#"__webpack_require__.p = /'/.source;"#).unwrap();
        assert_eq!(a.value, "/'/.source");
    }

    #[test]
    fn test_regex_value_with_equals() {
        let a = parse_assignment("r.p = /=/.test(x) ? '/' : '/a/';").unwrap();
        assert_eq!(a.value, "/=/.test(x) ? '/' : '/a/'");
    }

    #[test]
    fn test_regex_class_and_flags() {
        let a = parse_assignment(r"r.p = s.replace(/[/;]+$/gi, '');").unwrap();
        assert_eq!(a.value, r"s.replace(/[/;]+$/gi, '')");
    }

    #[test]
    fn test_division_is_not_regex() {
        let a = parse_assignment("r.p = total / 2 / count;").unwrap();
        assert_eq!(a.value, "total / 2 / count");
    }

    #[test]
    fn test_unterminated_regex() {
        assert_eq!(
            parse_assignment("r.p = /abc;"),
            Err(ParseError::UnterminatedLiteral {
                quote: '/',
                offset: 6
            })
        );
    }
}
