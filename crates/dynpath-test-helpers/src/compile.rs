//! Compilation helpers for dynpath tests
//!
//! Build a compiler with the rewriter registered and run chunks through it.

use crate::mocks::MockDiagnosticHandler;
use dynpath_core::pipeline::{ChunkEntry, Compilation, Compiler};
use dynpath_core::{PathRewriter, RewriteConfig};
use std::sync::Arc;

/// Compiler with a rewriter for `initializer` / `entry_name`, plus its diagnostics
pub fn compiler_with_rewriter(
    initializer: &str,
    entry_name: &str,
) -> (Compiler, Arc<MockDiagnosticHandler>) {
    let handler = MockDiagnosticHandler::new();
    let mut compiler = Compiler::new(handler.clone());
    let rewriter = Arc::new(PathRewriter::from_config(RewriteConfig::new(
        initializer,
        entry_name,
    )));
    rewriter.register(&mut compiler);
    (compiler, handler)
}

/// Run a single compilation over `entries`
pub fn compile(initializer: &str, entry_name: &str, entries: Vec<ChunkEntry>) -> Compilation {
    let (compiler, _) = compiler_with_rewriter(initializer, entry_name);
    compiler.run(entries)
}

/// Generated code of the first public path module in the compilation
pub fn public_path_code(compilation: &Compilation) -> Option<String> {
    compilation
        .entries()
        .iter()
        .flat_map(|e| e.runtime_modules.iter())
        .find(|m| m.kind().is_public_path())
        .map(|m| m.generated_code().to_string())
}
