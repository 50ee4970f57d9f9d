//! Start-up resolution of an entry's base path.
//!
//! The host page publishes two globals: `__MAP__` (entry → environment →
//! endpoint record) and `__ENVIRONMENT__` (active environment name). They are
//! read once into a [`RuntimeConfig`] and every lookup goes through that value.

use crate::errors::{ConfigError, ResolveError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// Global holding the endpoint map
pub const MAP_GLOBAL: &str = "__MAP__";

/// Global holding the active environment name
pub const ENVIRONMENT_GLOBAL: &str = "__ENVIRONMENT__";

/// Endpoint record for one entry in one environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    /// Any further fields the host configuration carries
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Endpoint {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            extra: Map::new(),
        }
    }
}

/// Entry name → environment name → endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuntimeMap(pub IndexMap<String, IndexMap<String, Endpoint>>);

impl RuntimeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        entry: impl Into<String>,
        environment: impl Into<String>,
        endpoint: Endpoint,
    ) {
        self.0
            .entry(entry.into())
            .or_default()
            .insert(environment.into(), endpoint);
    }

    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// The runtime map together with the active environment
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    pub map: RuntimeMap,
    pub environment: String,
}

impl RuntimeConfig {
    pub fn new(map: RuntimeMap, environment: impl Into<String>) -> Self {
        Self {
            map,
            environment: environment.into(),
        }
    }

    /// Read `__MAP__` and `__ENVIRONMENT__` from a global object snapshot
    pub fn from_globals(globals: &Value) -> Result<Self, ResolveError> {
        let map = globals.get(MAP_GLOBAL).ok_or(ResolveError::MissingGlobal {
            name: MAP_GLOBAL,
        })?;
        let map: RuntimeMap =
            serde_json::from_value(map.clone()).map_err(|_| ResolveError::InvalidGlobal {
                name: MAP_GLOBAL,
                expected: "an object of entries to environments to endpoint records",
            })?;

        let environment = globals
            .get(ENVIRONMENT_GLOBAL)
            .ok_or(ResolveError::MissingGlobal {
                name: ENVIRONMENT_GLOBAL,
            })?
            .as_str()
            .ok_or(ResolveError::InvalidGlobal {
                name: ENVIRONMENT_GLOBAL,
                expected: "a string",
            })?;

        Ok(Self::new(map, environment))
    }

    /// Load the runtime map from a JSON file and pair it with `environment`
    pub fn from_map_file(
        path: &Path,
        environment: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let map: RuntimeMap = serde_json::from_str(&content)?;
        Ok(Self::new(map, environment))
    }

    /// Base path for `entry` in the active environment
    pub fn resolve(&self, entry: &str) -> Result<String, ResolveError> {
        resolve(self, entry)
    }
}

/// `map[entry][environment].href + "/"`.
///
/// The separator is appended unconditionally, so an `href` that already ends
/// in `/` yields a double separator.
pub fn resolve(config: &RuntimeConfig, entry: &str) -> Result<String, ResolveError> {
    let environments = config
        .map
        .0
        .get(entry)
        .ok_or_else(|| ResolveError::UnknownEntry {
            entry: entry.to_string(),
        })?;

    let endpoint = environments
        .get(&config.environment)
        .ok_or_else(|| ResolveError::UnknownEnvironment {
            entry: entry.to_string(),
            environment: config.environment.clone(),
        })?;

    let href = endpoint
        .href
        .as_deref()
        .ok_or_else(|| ResolveError::MissingHref {
            entry: entry.to_string(),
            environment: config.environment.clone(),
        })?;

    Ok(format!("{}/", href))
}
