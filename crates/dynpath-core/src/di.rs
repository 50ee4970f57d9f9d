use crate::config::ProjectConfig;
use crate::diagnostics::{ConsoleDiagnosticHandler, DiagnosticHandler};
use crate::errors::ConfigError;
use crate::pipeline::Compiler;
use crate::rewriter::PathRewriter;
use std::sync::Arc;

/// Dependency injection container
/// Manages all shared dependencies and creates instances with proper wiring
pub struct Container {
    config: Arc<ProjectConfig>,
    diagnostic_handler: Arc<dyn DiagnosticHandler>,
}

impl Container {
    /// Create a new container with production dependencies
    pub fn new(config: ProjectConfig) -> Self {
        let diagnostic_handler = Arc::new(ConsoleDiagnosticHandler::new(config.pretty));

        Container {
            config: Arc::new(config),
            diagnostic_handler,
        }
    }

    /// Create a container with custom dependencies (for testing)
    pub fn with_dependencies(
        config: ProjectConfig,
        diagnostic_handler: Arc<dyn DiagnosticHandler>,
    ) -> Self {
        Container {
            config: Arc::new(config),
            diagnostic_handler,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Arc<ProjectConfig> {
        &self.config
    }

    /// Get the diagnostic handler
    pub fn diagnostic_handler(&self) -> &Arc<dyn DiagnosticHandler> {
        &self.diagnostic_handler
    }

    /// Build the rewriter from the project's `rewrite` section
    pub fn rewriter(&self) -> Result<Arc<PathRewriter>, ConfigError> {
        let config = self.config.rewrite_config()?;
        Ok(Arc::new(PathRewriter::from_config(config.clone())))
    }

    /// A compiler with the rewriter already registered
    pub fn compiler(&self) -> Result<Compiler, ConfigError> {
        let rewriter = self.rewriter()?;
        let mut compiler = Compiler::new(self.diagnostic_handler.clone());
        rewriter.register(&mut compiler);
        Ok(compiler)
    }

    /// Check if any errors have been reported
    pub fn has_errors(&self) -> bool {
        self.diagnostic_handler.has_errors()
    }

    /// Get the error count
    pub fn error_count(&self) -> usize {
        self.diagnostic_handler.error_count()
    }
}
