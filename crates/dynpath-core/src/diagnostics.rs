use crate::pipeline::ChunkRef;
use std::fmt;
use std::sync::Mutex;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLevel {
    Error,
    Warning,
    Info,
}

/// Where a diagnostic applies
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// The build as a whole (configuration, inputs)
    Build,
    Chunk(ChunkRef),
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Build => write!(f, "build"),
            Location::Chunk(chunk) => write!(f, "chunk {}", chunk),
        }
    }
}

/// A diagnostic message with location and severity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub location: Location,
    pub message: String,
}

impl Diagnostic {
    pub fn error(location: Location, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Error,
            location,
            message: message.into(),
        }
    }

    pub fn warning(location: Location, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            location,
            message: message.into(),
        }
    }

    pub fn info(location: Location, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Info,
            location,
            message: message.into(),
        }
    }
}

/// Trait for handling diagnostics
/// This allows for dependency injection and testing with mock handlers
pub trait DiagnosticHandler: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);

    fn error(&self, location: Location, message: &str) {
        self.report(Diagnostic::error(location, message));
    }

    fn warning(&self, location: Location, message: &str) {
        self.report(Diagnostic::warning(location, message));
    }

    fn info(&self, location: Location, message: &str) {
        self.report(Diagnostic::info(location, message));
    }

    fn has_errors(&self) -> bool;
    fn error_count(&self) -> usize;
    fn warning_count(&self) -> usize;
    fn get_diagnostics(&self) -> Vec<Diagnostic>;
}

fn count_level(diagnostics: &Mutex<Vec<Diagnostic>>, level: DiagnosticLevel) -> usize {
    diagnostics
        .lock()
        .map(|d| d.iter().filter(|d| d.level == level).count())
        .unwrap_or_default()
}

fn snapshot(diagnostics: &Mutex<Vec<Diagnostic>>) -> Vec<Diagnostic> {
    diagnostics.lock().map(|d| d.clone()).unwrap_or_default()
}

/// Console-based diagnostic handler that prints to stderr
pub struct ConsoleDiagnosticHandler {
    diagnostics: Mutex<Vec<Diagnostic>>,
    pretty: bool,
}

impl ConsoleDiagnosticHandler {
    pub fn new(pretty: bool) -> Self {
        Self {
            diagnostics: Mutex::new(Vec::new()),
            pretty,
        }
    }
}

impl DiagnosticHandler for ConsoleDiagnosticHandler {
    fn report(&self, diagnostic: Diagnostic) {
        let level_str = match diagnostic.level {
            DiagnosticLevel::Error => "error",
            DiagnosticLevel::Warning => "warning",
            DiagnosticLevel::Info => "info",
        };

        if self.pretty {
            let color = match diagnostic.level {
                DiagnosticLevel::Error => "31",
                DiagnosticLevel::Warning => "33",
                DiagnosticLevel::Info => "34",
            };
            eprintln!(
                "\x1b[1;{}m{}\x1b[0m [{}]: {}",
                color, level_str, diagnostic.location, diagnostic.message
            );
        } else {
            eprintln!(
                "{} [{}]: {}",
                level_str, diagnostic.location, diagnostic.message
            );
        }

        if let Ok(mut diagnostics) = self.diagnostics.lock() {
            diagnostics.push(diagnostic);
        }
    }

    fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    fn error_count(&self) -> usize {
        count_level(&self.diagnostics, DiagnosticLevel::Error)
    }

    fn warning_count(&self) -> usize {
        count_level(&self.diagnostics, DiagnosticLevel::Warning)
    }

    fn get_diagnostics(&self) -> Vec<Diagnostic> {
        snapshot(&self.diagnostics)
    }
}

/// Collecting diagnostic handler for testing
/// Collects all diagnostics without printing
pub struct CollectingDiagnosticHandler {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingDiagnosticHandler {
    pub fn new() -> Self {
        Self {
            diagnostics: Mutex::new(Vec::new()),
        }
    }
}

impl Default for CollectingDiagnosticHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticHandler for CollectingDiagnosticHandler {
    fn report(&self, diagnostic: Diagnostic) {
        if let Ok(mut diagnostics) = self.diagnostics.lock() {
            diagnostics.push(diagnostic);
        }
    }

    fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    fn error_count(&self) -> usize {
        count_level(&self.diagnostics, DiagnosticLevel::Error)
    }

    fn warning_count(&self) -> usize {
        count_level(&self.diagnostics, DiagnosticLevel::Warning)
    }

    fn get_diagnostics(&self) -> Vec<Diagnostic> {
        snapshot(&self.diagnostics)
    }
}
