use super::runtime_module::RuntimeModule;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkId(pub u32);

/// An output chunk as seen by runtime-module hooks
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    pub id: ChunkId,
    pub name: Option<String>,
}

impl Chunk {
    pub fn new(id: u32, name: Option<String>) -> Self {
        Self {
            id: ChunkId(id),
            name,
        }
    }

    pub fn named(id: u32, name: impl Into<String>) -> Self {
        Self::new(id, Some(name.into()))
    }

    pub fn to_ref(&self) -> ChunkRef {
        ChunkRef {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

/// Owned reference to a chunk, used in errors and diagnostics
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChunkRef {
    pub id: ChunkId,
    pub name: Option<String>,
}

impl fmt::Display for ChunkRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "#{}", self.id.0),
        }
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_ref().fmt(f)
    }
}

/// A chunk together with the runtime modules the pipeline generated for it
#[derive(Clone, Debug)]
pub struct ChunkEntry {
    pub chunk: Chunk,
    pub runtime_modules: Vec<RuntimeModule>,
}

impl ChunkEntry {
    pub fn new(chunk: Chunk) -> Self {
        Self {
            chunk,
            runtime_modules: Vec::new(),
        }
    }

    pub fn with_runtime_module(mut self, module: RuntimeModule) -> Self {
        self.runtime_modules.push(module);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_display() {
        assert_eq!(Chunk::named(0, "main").to_string(), "main");
        assert_eq!(Chunk::new(7, None).to_string(), "#7");
    }
}
