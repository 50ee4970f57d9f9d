use super::chunk::Chunk;
use super::compilation::Compilation;
use super::runtime_module::RuntimeModule;
use crate::errors::RewriteError;

/// A named callback registered on a hook
pub struct Tap<F: ?Sized> {
    pub name: &'static str,
    pub callback: Box<F>,
}

/// Synchronous hook: taps run in registration order
pub struct SyncHook<F: ?Sized> {
    taps: Vec<Tap<F>>,
}

impl<F: ?Sized> SyncHook<F> {
    pub fn new() -> Self {
        Self { taps: Vec::new() }
    }

    pub fn tap(&mut self, name: &'static str, callback: Box<F>) {
        self.taps.push(Tap { name, callback });
    }

    pub fn taps(&self) -> &[Tap<F>] {
        &self.taps
    }

    pub fn tap_names(&self) -> Vec<&'static str> {
        self.taps.iter().map(|t| t.name).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }
}

impl<F: ?Sized> Default for SyncHook<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// What a runtime-module tap did with the module it was shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// Not a module this tap cares about; left untouched
    Untouched,
    /// Generated code was replaced
    Mutated,
}

pub type MakeCallback = dyn Fn(&mut Compilation) + Send + Sync;

pub type RuntimeModuleCallback =
    dyn Fn(&mut RuntimeModule, &Chunk) -> Result<Observation, RewriteError> + Send + Sync;

/// Hooks exposed by the compiler, shared by every compilation it creates
#[derive(Default)]
pub struct CompilerHooks {
    /// Fires once for each new compilation, before runtime modules are processed
    pub make: SyncHook<MakeCallback>,
}

/// Hooks owned by a single compilation
#[derive(Default)]
pub struct CompilationHooks {
    /// Fires once per runtime module per chunk
    pub runtime_module: SyncHook<RuntimeModuleCallback>,
}
