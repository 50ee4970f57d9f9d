//! Public path rewriter.
//!
//! Replaces the statically generated public path assignment of every chunk
//! with a call to a start-up initializer:
//!
//! ```text
//! __webpack_require__.p = "/";            // as generated
//! __webpack_require__.p = setPath('app'); // after rewriting
//! ```

use crate::assignment::{parse_assignment, ParseError};
use crate::codegen::initializer_call;
use crate::config::RewriteConfig;
use crate::errors::{ConfigError, RewriteError};
use crate::pipeline::{Chunk, Compiler, Observation, Plugin, RuntimeModule};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Tap name used on both compiler and compilation hooks
pub const PLUGIN_NAME: &str = "MutateRuntime";

pub struct PathRewriter {
    config: RewriteConfig,
}

impl PathRewriter {
    /// Validate loosely-typed options and build the rewriter
    pub fn new(options: &Value) -> Result<Self, ConfigError> {
        Ok(Self::from_config(RewriteConfig::from_value(options)?))
    }

    pub fn from_config(config: RewriteConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RewriteConfig {
        &self.config
    }

    /// Attach to the compiler; every later compilation gets its own runtime-module tap
    pub fn register(self: &Arc<Self>, compiler: &mut Compiler) {
        compiler.apply(self.clone());
    }

    /// Whether `module` is the runtime module that assigns the static public path
    pub fn is_public_path_module(module: &RuntimeModule) -> bool {
        module.kind().is_public_path()
    }

    /// Replace the value of a generated public path assignment
    pub fn rewrite_code(&self, code: &str) -> Result<String, ParseError> {
        let assignment = parse_assignment(code)?;
        Ok(initializer_call(
            assignment.target,
            self.config.initializer(),
            self.config.entry_name(),
        ))
    }

    /// Rewrite `module` in place if it is the public path module of `chunk`.
    ///
    /// Modules of any other kind are left untouched. On a parse failure the
    /// module keeps its generated code.
    pub fn observe(
        &self,
        module: &mut RuntimeModule,
        chunk: &Chunk,
    ) -> Result<Observation, RewriteError> {
        if !Self::is_public_path_module(module) {
            debug!("Skipping {} in chunk {}", module.kind(), chunk);
            return Ok(Observation::Untouched);
        }

        let rewritten = self
            .rewrite_code(module.generated_code())
            .map_err(|source| RewriteError::UnexpectedShape {
                chunk: chunk.to_ref(),
                source,
            })?;

        info!("Changing static publicPath for chunk: {}", chunk);
        module.set_generated_code(rewritten);
        Ok(Observation::Mutated)
    }
}

impl Plugin for PathRewriter {
    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    fn on_runtime_module_generated(
        &self,
        module: &mut RuntimeModule,
        chunk: &Chunk,
    ) -> Result<Observation, RewriteError> {
        self.observe(module, chunk)
    }
}
