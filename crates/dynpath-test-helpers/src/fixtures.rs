//! Test fixtures - generated runtime code and runtime configuration

use dynpath_core::pipeline::{Chunk, ChunkEntry, RuntimeModule, RuntimeModuleKind};
use serde_json::{json, Value};

/// Public path module exactly as webpack 5 generates it
pub fn webpack_public_path() -> &'static str {
    r#"__webpack_require__.p = "/";"#
}

/// Public path configured to a CDN location
pub fn cdn_public_path() -> &'static str {
    r#"__webpack_require__.p = "https://cdn.example.com/static/";"#
}

/// Generated code that no longer has the simple assignment shape
pub fn malformed_public_path() -> &'static str {
    "__webpack_require__.p"
}

/// Runtime modules of a typical entry chunk, public path in the middle
pub fn entry_chunk(id: u32, name: &str) -> ChunkEntry {
    ChunkEntry::new(Chunk::named(id, name))
        .with_runtime_module(RuntimeModule::new(
            RuntimeModuleKind::DefinePropertyGetters,
            "__webpack_require__.d = (exports, definition) => { for (var key in definition) {} };",
        ))
        .with_runtime_module(RuntimeModule::from_host_name(
            "webpack/runtime/publicPath",
            webpack_public_path(),
        ))
        .with_runtime_module(RuntimeModule::new(
            RuntimeModuleKind::JsonpChunkLoading,
            "var installedChunks = { 0: 0 };",
        ))
}

/// Chunk whose only runtime module derives the path from the script URL
pub fn auto_public_path_chunk(id: u32, name: &str) -> ChunkEntry {
    ChunkEntry::new(Chunk::named(id, name)).with_runtime_module(RuntimeModule::from_host_name(
        "webpack/runtime/auto publicPath",
        "__webpack_require__.p = scriptUrl;",
    ))
}

/// Rewriter options in their JSON form
pub fn rewrite_options(initializer: &str, entry_name: &str) -> Value {
    json!({ "initializer": initializer, "entryName": entry_name })
}

/// Host page globals with a two-environment map for `app1` and `checkout`
pub fn host_globals(environment: &str) -> Value {
    json!({
        "__MAP__": {
            "app1": {
                "prod": { "href": "https://cdn.example.com/app1" },
                "staging": { "href": "https://staging.example.com/app1" }
            },
            "checkout": {
                "prod": { "href": "https://cdn.example.com/checkout" },
                "staging": { "href": "https://staging.example.com/checkout" }
            }
        },
        "__ENVIRONMENT__": environment
    })
}
