use super::chunk::{Chunk, ChunkEntry};
use super::compilation::Compilation;
use super::hooks::{CompilerHooks, Observation};
use super::runtime_module::RuntimeModule;
use crate::diagnostics::DiagnosticHandler;
use crate::errors::RewriteError;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Extension attached to the compiler through two callbacks.
///
/// `on_compilation_start` runs once per compilation; `on_runtime_module_generated`
/// runs for every runtime module of every chunk in that compilation.
pub trait Plugin: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    fn on_compilation_start(&self, _compilation: &Compilation) {}

    fn on_runtime_module_generated(
        &self,
        module: &mut RuntimeModule,
        chunk: &Chunk,
    ) -> Result<Observation, RewriteError>;
}

/// In-memory build pipeline: owns the compiler hooks and creates compilations
pub struct Compiler {
    pub hooks: CompilerHooks,
    handler: Arc<dyn DiagnosticHandler>,
    next_compilation: AtomicU64,
}

impl Compiler {
    pub fn new(handler: Arc<dyn DiagnosticHandler>) -> Self {
        Self {
            hooks: CompilerHooks::default(),
            handler,
            next_compilation: AtomicU64::new(0),
        }
    }

    /// Translate the compiler's hooks into the plugin's two callbacks.
    ///
    /// The plugin taps `make`; inside every new compilation it taps that
    /// compilation's `runtime_module` hook, so taps never outlive a build.
    pub fn apply(&mut self, plugin: Arc<dyn Plugin>) {
        let name = plugin.name();
        self.hooks.make.tap(
            name,
            Box::new(move |compilation: &mut Compilation| {
                plugin.on_compilation_start(compilation);
                let plugin = Arc::clone(&plugin);
                compilation.hooks.runtime_module.tap(
                    name,
                    Box::new(move |module: &mut RuntimeModule, chunk: &Chunk| {
                        plugin.on_runtime_module_generated(module, chunk)
                    }),
                );
            }),
        );
    }

    /// Run one compilation over the given chunks
    pub fn run(&self, entries: Vec<ChunkEntry>) -> Compilation {
        let id = self.next_compilation.fetch_add(1, Ordering::Relaxed);
        debug!("Starting compilation {} ({} chunk(s))", id, entries.len());

        let mut compilation = Compilation::new(id, entries, self.handler.clone());
        for tap in self.hooks.make.taps() {
            (tap.callback)(&mut compilation);
        }
        compilation.process_runtime_modules();
        compilation
    }

    pub fn diagnostics(&self) -> &Arc<dyn DiagnosticHandler> {
        &self.handler
    }
}
