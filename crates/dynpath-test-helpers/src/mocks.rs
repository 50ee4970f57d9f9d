//! Mock implementations for testing

use dynpath_core::diagnostics::{CollectingDiagnosticHandler, Diagnostic, DiagnosticHandler};
use std::sync::Arc;

/// A mock diagnostic handler that collects diagnostics
#[derive(Default)]
pub struct MockDiagnosticHandler {
    inner: CollectingDiagnosticHandler,
}

impl MockDiagnosticHandler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Messages of every reported diagnostic, in order
    pub fn messages(&self) -> Vec<String> {
        self.get_diagnostics()
            .into_iter()
            .map(|d| d.message)
            .collect()
    }
}

impl DiagnosticHandler for MockDiagnosticHandler {
    fn report(&self, diagnostic: Diagnostic) {
        self.inner.report(diagnostic);
    }

    fn has_errors(&self) -> bool {
        self.inner.has_errors()
    }

    fn error_count(&self) -> usize {
        self.inner.error_count()
    }

    fn warning_count(&self) -> usize {
        self.inner.warning_count()
    }

    fn get_diagnostics(&self) -> Vec<Diagnostic> {
        self.inner.get_diagnostics()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynpath_core::diagnostics::Location;

    #[test]
    fn test_mock_counts_by_level() {
        let handler = MockDiagnosticHandler::new();
        handler.warning(Location::Build, "first");
        handler.error(Location::Build, "second");

        assert!(handler.has_errors());
        assert_eq!(handler.error_count(), 1);
        assert_eq!(handler.warning_count(), 1);
        assert_eq!(handler.messages(), vec!["first", "second"]);
    }
}
