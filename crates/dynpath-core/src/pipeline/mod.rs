//! Host build pipeline model.
//!
//! A thin in-memory stand-in for the bundler lifecycle the rewriter plugs
//! into: a [`Compiler`] with a `make` hook, and per-build [`Compilation`]s
//! with a `runtime_module` hook that fires with `(module, chunk)`.

mod chunk;
mod compilation;
mod compiler;
mod hooks;
mod runtime_module;

pub use chunk::{Chunk, ChunkEntry, ChunkId, ChunkRef};
pub use compilation::{Compilation, RenderedChunk};
pub use compiler::{Compiler, Plugin};
pub use hooks::{
    CompilationHooks, CompilerHooks, MakeCallback, Observation, RuntimeModuleCallback, SyncHook,
    Tap,
};
pub use runtime_module::{RuntimeModule, RuntimeModuleKind, DISCRIMINATOR_VERSION};
