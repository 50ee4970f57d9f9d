pub mod assignment;
pub mod codegen;
pub mod config;
pub mod di;
pub mod diagnostics;
pub mod errors;
pub mod pipeline;
pub mod resolver;
pub mod rewriter;

pub use assignment::{parse_assignment, Assignment, ParseError};
pub use config::{CliOverrides, ProjectConfig, RewriteConfig};
pub use di::Container;
pub use diagnostics::{
    CollectingDiagnosticHandler, ConsoleDiagnosticHandler, Diagnostic, DiagnosticHandler,
    DiagnosticLevel, Location,
};
pub use errors::{ConfigError, ResolveError, RewriteError, SchemaViolation};
pub use pipeline::{
    Chunk, ChunkEntry, Compilation, Compiler, Observation, Plugin, RuntimeModule,
    RuntimeModuleKind,
};
pub use resolver::{Endpoint, RuntimeConfig, RuntimeMap};
pub use rewriter::{PathRewriter, PLUGIN_NAME};
