use super::chunk::{Chunk, ChunkEntry, ChunkId, ChunkRef};
use super::hooks::{CompilationHooks, Observation};
use super::runtime_module::RuntimeModule;
use crate::diagnostics::{DiagnosticHandler, Location};
use crate::errors::RewriteError;
use rustc_hash::FxHashSet;
use std::sync::Arc;
use tracing::debug;

/// Chunk output after runtime modules have been processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedChunk {
    pub chunk: ChunkRef,
    pub code: String,
}

/// One build of the chunk set.
///
/// Everything here (chunks, modules, hooks, visited set) belongs to this
/// compilation alone; nothing is carried into the next one.
pub struct Compilation {
    id: u64,
    pub hooks: CompilationHooks,
    entries: Vec<ChunkEntry>,
    visited: FxHashSet<(ChunkId, usize)>,
    mutated: Vec<ChunkRef>,
    errors: Vec<RewriteError>,
    handler: Arc<dyn DiagnosticHandler>,
}

impl Compilation {
    pub(crate) fn new(
        id: u64,
        entries: Vec<ChunkEntry>,
        handler: Arc<dyn DiagnosticHandler>,
    ) -> Self {
        Self {
            id,
            hooks: CompilationHooks::default(),
            entries,
            visited: FxHashSet::default(),
            mutated: Vec::new(),
            errors: Vec::new(),
            handler,
        }
    }

    /// Sequence number of this compilation within its compiler
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.entries.iter().map(|e| &e.chunk)
    }

    pub fn entries(&self) -> &[ChunkEntry] {
        &self.entries
    }

    pub fn runtime_modules(&self, chunk: ChunkId) -> Option<&[RuntimeModule]> {
        self.entries
            .iter()
            .find(|e| e.chunk.id == chunk)
            .map(|e| e.runtime_modules.as_slice())
    }

    pub fn diagnostics(&self) -> &Arc<dyn DiagnosticHandler> {
        &self.handler
    }

    /// Show every runtime module to the `runtime_module` taps.
    ///
    /// Each module is observed at most once per compilation; calling this again
    /// only visits modules added since the previous call.
    pub fn process_runtime_modules(&mut self) {
        let Compilation {
            hooks,
            entries,
            visited,
            mutated,
            errors,
            handler,
            ..
        } = self;

        for entry in entries.iter_mut() {
            let ChunkEntry {
                chunk,
                runtime_modules,
            } = entry;
            let chunk: &Chunk = chunk;

            for (index, module) in runtime_modules.iter_mut().enumerate() {
                if !visited.insert((chunk.id, index)) {
                    continue;
                }
                debug!("Runtime module {} in chunk {}", module.kind(), chunk);

                for tap in hooks.runtime_module.taps() {
                    match (tap.callback)(&mut *module, chunk) {
                        Ok(Observation::Mutated) => mutated.push(chunk.to_ref()),
                        Ok(Observation::Untouched) => {}
                        Err(err) => {
                            handler.error(
                                Location::Chunk(err.chunk().clone()),
                                &err.to_string(),
                            );
                            errors.push(err);
                        }
                    }
                }
            }
        }
    }

    /// Chunks whose runtime code was changed by a tap
    pub fn mutated_chunks(&self) -> &[ChunkRef] {
        &self.mutated
    }

    pub fn errors(&self) -> &[RewriteError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Serialize the runtime modules of every chunk
    pub fn render(&self) -> Vec<RenderedChunk> {
        self.entries
            .iter()
            .map(|entry| {
                let mut code = String::new();
                for module in &entry.runtime_modules {
                    code.push_str(&format!("// {}\n", module.kind()));
                    code.push_str(module.generated_code());
                    code.push('\n');
                }
                RenderedChunk {
                    chunk: entry.chunk.to_ref(),
                    code,
                }
            })
            .collect()
    }
}
