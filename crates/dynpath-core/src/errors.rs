use crate::assignment::ParseError;
use crate::pipeline::ChunkRef;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A single way an options object can fail the fixed schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    NotAnObject {
        found: &'static str,
    },
    MissingField {
        field: &'static str,
    },
    WrongType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    UnknownField {
        field: String,
    },
}

impl SchemaViolation {
    /// Name of the offending field, if the violation concerns one
    pub fn field(&self) -> Option<&str> {
        match self {
            SchemaViolation::NotAnObject { .. } => None,
            SchemaViolation::MissingField { field } => Some(field),
            SchemaViolation::WrongType { field, .. } => Some(field),
            SchemaViolation::UnknownField { field } => Some(field),
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaViolation::NotAnObject { found } => {
                write!(f, "options should be an object, found {}", found)
            }
            SchemaViolation::MissingField { field } => {
                write!(f, "missing required property '{}'", field)
            }
            SchemaViolation::WrongType {
                field,
                expected,
                found,
            } => write!(f, "property '{}' should be a {}, found {}", field, expected, found),
            SchemaViolation::UnknownField { field } => {
                write!(f, "unknown property '{}'", field)
            }
        }
    }
}

fn join_violations(violations: &[SchemaViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported configuration format: {path} (expected .json, .yaml or .yml)")]
    UnsupportedFormat { path: PathBuf },

    #[error("Invalid {context} options: {}", join_violations(.violations))]
    Schema {
        context: &'static str,
        violations: Vec<SchemaViolation>,
    },
}

impl ConfigError {
    /// Schema violations carried by this error (empty for I/O and syntax errors)
    pub fn violations(&self) -> &[SchemaViolation] {
        match self {
            ConfigError::Schema { violations, .. } => violations,
            _ => &[],
        }
    }
}

/// Failure to rewrite the public path runtime module of one chunk
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("Cannot rewrite publicPath for chunk {chunk}: {source}")]
    UnexpectedShape {
        chunk: ChunkRef,
        #[source]
        source: ParseError,
    },
}

impl RewriteError {
    pub fn chunk(&self) -> &ChunkRef {
        match self {
            RewriteError::UnexpectedShape { chunk, .. } => chunk,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Runtime global '{name}' is not defined")]
    MissingGlobal { name: &'static str },

    #[error("Runtime global '{name}' should be {expected}")]
    InvalidGlobal {
        name: &'static str,
        expected: &'static str,
    },

    #[error("Cannot read properties of undefined: no entry '{entry}' in the runtime map")]
    UnknownEntry { entry: String },

    #[error("Cannot read properties of undefined: entry '{entry}' has no environment '{environment}'")]
    UnknownEnvironment { entry: String, environment: String },

    #[error("Endpoint '{entry}.{environment}' has no 'href'")]
    MissingHref { entry: String, environment: String },
}
