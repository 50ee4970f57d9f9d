//! Emission of the replacement public path statement

/// Quote `value` as a single-quoted JavaScript string literal
pub fn single_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// `<target> = <initializer>('<entry_name>');`
pub fn initializer_call(target: &str, initializer: &str, entry_name: &str) -> String {
    format!(
        "{} = {}({});",
        target,
        initializer,
        single_quoted(entry_name)
    )
}
