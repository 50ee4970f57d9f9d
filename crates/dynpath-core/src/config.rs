use crate::errors::{ConfigError, SchemaViolation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Primitive type a schema property must hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
}

impl FieldType {
    fn name(self) -> &'static str {
        match self {
            FieldType::String => "string",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            FieldType::String => value.is_string(),
        }
    }
}

/// One property of a fixed options schema
#[derive(Debug, Clone, Copy)]
pub struct SchemaField {
    pub name: &'static str,
    pub ty: FieldType,
    pub required: bool,
}

/// Fixed schema for the rewriter options: both properties required, nothing else allowed
pub const REWRITE_SCHEMA: &[SchemaField] = &[
    SchemaField {
        name: "initializer",
        ty: FieldType::String,
        required: true,
    },
    SchemaField {
        name: "entryName",
        ty: FieldType::String,
        required: true,
    },
];

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Check an options value against a schema, collecting every violation
pub fn validate_schema(
    schema: &[SchemaField],
    value: &Value,
) -> Result<(), Vec<SchemaViolation>> {
    let Some(object) = value.as_object() else {
        return Err(vec![SchemaViolation::NotAnObject {
            found: json_type_name(value),
        }]);
    };

    let mut violations = Vec::new();

    for field in schema {
        match object.get(field.name) {
            None if field.required => {
                violations.push(SchemaViolation::MissingField { field: field.name })
            }
            None => {}
            Some(found) if !field.ty.matches(found) => {
                violations.push(SchemaViolation::WrongType {
                    field: field.name,
                    expected: field.ty.name(),
                    found: json_type_name(found),
                })
            }
            Some(_) => {}
        }
    }

    for key in object.keys() {
        if !schema.iter().any(|f| f.name == key) {
            violations.push(SchemaViolation::UnknownField { field: key.clone() });
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Options for the public path rewriter.
///
/// Fields are private: a `RewriteConfig` only exists after passing
/// [`REWRITE_SCHEMA`], and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "Value")]
pub struct RewriteConfig {
    initializer: String,
    entry_name: String,
}

impl RewriteConfig {
    pub fn new(initializer: impl Into<String>, entry_name: impl Into<String>) -> Self {
        Self {
            initializer: initializer.into(),
            entry_name: entry_name.into(),
        }
    }

    /// Validate a loosely-typed options object and build the configuration
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        validate_schema(REWRITE_SCHEMA, value).map_err(|violations| ConfigError::Schema {
            context: "rewriter",
            violations,
        })?;

        let field = |name: &str| {
            value
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        Ok(Self {
            initializer: field("initializer"),
            entry_name: field("entryName"),
        })
    }

    /// Load rewriter options from a JSON or YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let value = read_value(path)?;
        Self::from_value(&value)
    }

    /// Name of the start-up function called by the rewritten statement
    pub fn initializer(&self) -> &str {
        &self.initializer
    }

    /// Entry point passed to the initializer
    pub fn entry_name(&self) -> &str {
        &self.entry_name
    }

    fn to_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("initializer".into(), Value::String(self.initializer.clone()));
        fields.insert("entryName".into(), Value::String(self.entry_name.clone()));
        fields
    }
}

impl TryFrom<Value> for RewriteConfig {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(&value)
    }
}

fn read_value(path: &Path) -> Result<Value, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(serde_json::from_str(&content)?),
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
        _ => Err(ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Project configuration file (`dynpath.yaml` or `dynpath.json`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Rewriter options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewrite: Option<RewriteConfig>,

    /// Output directory for rewritten runtime modules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<String>,

    /// Pretty-print diagnostics (default: true)
    #[serde(default = "default_true")]
    pub pretty: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            rewrite: None,
            out_dir: None,
            pretty: true,
        }
    }
}

/// Command-line values that take precedence over the project file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub initializer: Option<String>,
    pub entry_name: Option<String>,
    pub out_dir: Option<String>,
    pub pretty: Option<bool>,
}

impl ProjectConfig {
    /// Load configuration from a JSON or YAML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let value = read_value(path)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Sample configuration written by `dynpath init`
    pub fn sample() -> Self {
        Self {
            rewrite: Some(RewriteConfig::new("setPath", "app")),
            out_dir: Some("dist".to_string()),
            pretty: true,
        }
    }

    /// Write this configuration as YAML
    pub fn write_yaml(&self, path: &Path) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Merge CLI overrides into this configuration.
    ///
    /// Overridden rewriter fields are combined with the ones from the file and
    /// the result is validated again.
    pub fn merge(&mut self, overrides: &CliOverrides) -> Result<(), ConfigError> {
        if let Some(ref out_dir) = overrides.out_dir {
            self.out_dir = Some(out_dir.clone());
        }
        if let Some(pretty) = overrides.pretty {
            self.pretty = pretty;
        }

        if overrides.initializer.is_none() && overrides.entry_name.is_none() {
            return Ok(());
        }

        let mut fields = self
            .rewrite
            .as_ref()
            .map(RewriteConfig::to_fields)
            .unwrap_or_default();
        if let Some(ref initializer) = overrides.initializer {
            fields.insert("initializer".into(), Value::String(initializer.clone()));
        }
        if let Some(ref entry_name) = overrides.entry_name {
            fields.insert("entryName".into(), Value::String(entry_name.clone()));
        }

        self.rewrite = Some(RewriteConfig::from_value(&Value::Object(fields))?);
        Ok(())
    }

    /// The rewriter options, or the schema error for a project that has none
    pub fn rewrite_config(&self) -> Result<&RewriteConfig, ConfigError> {
        self.rewrite.as_ref().ok_or_else(|| ConfigError::Schema {
            context: "rewriter",
            violations: REWRITE_SCHEMA
                .iter()
                .filter(|f| f.required)
                .map(|f| SchemaViolation::MissingField { field: f.name })
                .collect(),
        })
    }
}
