use std::fmt;

/// Version of the host-name → kind mapping in [`RuntimeModuleKind::from_host_name`].
///
/// Bump when the mapping changes so a host adapter built against an older
/// table can be detected.
pub const DISCRIMINATOR_VERSION: u32 = 1;

/// Structural identity of a runtime-support module.
///
/// Matching on this tag replaces checks against a module's type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum RuntimeModuleKind {
    /// Assigns the configured, static public path
    PublicPath,
    /// Derives the public path from the executing script's URL
    AutoPublicPath,
    GetChunkFilename,
    LoadScript,
    JsonpChunkLoading,
    EnsureChunk,
    DefinePropertyGetters,
    HasOwnProperty,
    MakeNamespaceObject,
    Global,
    /// Any runtime module without a dedicated tag
    Other(String),
}

impl RuntimeModuleKind {
    /// Map a host runtime-module name (`webpack/runtime/<name>` or the bare name)
    pub fn from_host_name(name: &str) -> Self {
        let bare = name.strip_prefix("webpack/runtime/").unwrap_or(name);
        match bare {
            "publicPath" => RuntimeModuleKind::PublicPath,
            "auto publicPath" => RuntimeModuleKind::AutoPublicPath,
            "get javascript chunk filename" => RuntimeModuleKind::GetChunkFilename,
            "load script" => RuntimeModuleKind::LoadScript,
            "jsonp chunk loading" => RuntimeModuleKind::JsonpChunkLoading,
            "ensure chunk" => RuntimeModuleKind::EnsureChunk,
            "define property getters" => RuntimeModuleKind::DefinePropertyGetters,
            "hasOwnProperty shorthand" => RuntimeModuleKind::HasOwnProperty,
            "make namespace object" => RuntimeModuleKind::MakeNamespaceObject,
            "global" => RuntimeModuleKind::Global,
            other => RuntimeModuleKind::Other(other.to_string()),
        }
    }

    /// Host name of this kind, without the `webpack/runtime/` prefix
    pub fn host_name(&self) -> &str {
        match self {
            RuntimeModuleKind::PublicPath => "publicPath",
            RuntimeModuleKind::AutoPublicPath => "auto publicPath",
            RuntimeModuleKind::GetChunkFilename => "get javascript chunk filename",
            RuntimeModuleKind::LoadScript => "load script",
            RuntimeModuleKind::JsonpChunkLoading => "jsonp chunk loading",
            RuntimeModuleKind::EnsureChunk => "ensure chunk",
            RuntimeModuleKind::DefinePropertyGetters => "define property getters",
            RuntimeModuleKind::HasOwnProperty => "hasOwnProperty shorthand",
            RuntimeModuleKind::MakeNamespaceObject => "make namespace object",
            RuntimeModuleKind::Global => "global",
            RuntimeModuleKind::Other(name) => name,
        }
    }

    /// True only for the module that assigns the static public path
    pub fn is_public_path(&self) -> bool {
        matches!(self, RuntimeModuleKind::PublicPath)
    }
}

impl fmt::Display for RuntimeModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "webpack/runtime/{}", self.host_name())
    }
}

/// A runtime-support module synthesized by the pipeline for one chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeModule {
    kind: RuntimeModuleKind,
    generated_code: String,
}

impl RuntimeModule {
    pub fn new(kind: RuntimeModuleKind, generated_code: impl Into<String>) -> Self {
        Self {
            kind,
            generated_code: generated_code.into(),
        }
    }

    /// Build a module from the name the host reports for it
    pub fn from_host_name(name: &str, generated_code: impl Into<String>) -> Self {
        Self::new(RuntimeModuleKind::from_host_name(name), generated_code)
    }

    /// Static public path module as the bundler generates it
    pub fn public_path(path: &str) -> Self {
        let literal = serde_json::Value::String(path.to_string()).to_string();
        Self::new(
            RuntimeModuleKind::PublicPath,
            format!("__webpack_require__.p = {};", literal),
        )
    }

    pub fn kind(&self) -> &RuntimeModuleKind {
        &self.kind
    }

    pub fn generated_code(&self) -> &str {
        &self.generated_code
    }

    /// Replace the generated code that will be serialized for this module
    pub fn set_generated_code(&mut self, code: impl Into<String>) {
        self.generated_code = code.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_host_name() {
        assert_eq!(
            RuntimeModuleKind::from_host_name("webpack/runtime/publicPath"),
            RuntimeModuleKind::PublicPath
        );
        assert_eq!(
            RuntimeModuleKind::from_host_name("publicPath"),
            RuntimeModuleKind::PublicPath
        );
        assert_eq!(
            RuntimeModuleKind::from_host_name("webpack/runtime/auto publicPath"),
            RuntimeModuleKind::AutoPublicPath
        );
    }

    #[test]
    fn test_only_static_public_path_matches() {
        assert!(RuntimeModuleKind::PublicPath.is_public_path());
        assert!(!RuntimeModuleKind::AutoPublicPath.is_public_path());
        assert!(!RuntimeModuleKind::Other("PublicPathRuntimeModule".into()).is_public_path());
    }

    #[test]
    fn test_host_name_round_trip() {
        let kind = RuntimeModuleKind::from_host_name("webpack/runtime/load script");
        assert_eq!(kind.to_string(), "webpack/runtime/load script");
    }

    #[test]
    fn test_public_path_constructor() {
        let module = RuntimeModule::public_path("/");
        assert_eq!(module.generated_code(), r#"__webpack_require__.p = "/";"#);
        assert!(module.kind().is_public_path());
    }
}
