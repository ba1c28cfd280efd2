//! Diagnostic types and the collector used during a compilation pass
//!
//! Nothing in the evaluator aborts on a bad declaration. Every problem is
//! reported here with the source position and filename of the offending
//! node, and the orchestrator decides afterwards whether the pass failed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a diagnostic message produced while evaluating a stylesheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// What kind of problem this is
    pub code: DiagnosticCode,
    /// Severity level of the diagnostic
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// Location in the source file
    pub location: Location,
    /// Optional suggestions for fixing the issue
    pub suggestions: Vec<Suggestion>,
}

/// Severity levels for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Warnings never affect output validity
    Warning,
    /// Errors suppress the affected fragment
    Error,
}

/// Stable identifiers for every diagnostic the core can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticCode {
    UndefinedVariable,
    CircularVariable,
    UnrecognizedRule,
    UnstableProperty,
    InvalidValue,
    UnknownFont,
    InvalidFilterOperand,
    InvalidFilterKeyword,
}

/// Source position of a node: the filename it came from and the character
/// index the parser recorded for it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// File name, if the parser knew it
    pub file: Option<String>,
    /// Character index in the file
    pub index: usize,
}

/// Suggestion for fixing a diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Description of the suggested fix
    pub message: String,
    /// The replacement text
    pub replacement: String,
    /// Whether this fix is safe to apply automatically
    pub is_safe: bool,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(
        code: DiagnosticCode,
        severity: Severity,
        message: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            code,
            severity,
            message: message.into(),
            location,
            suggestions: Vec::new(),
        }
    }

    /// Create an error diagnostic
    pub fn error(code: DiagnosticCode, message: impl Into<String>, location: Location) -> Self {
        Self::new(code, Severity::Error, message, location)
    }

    /// Create a warning diagnostic
    pub fn warning(code: DiagnosticCode, message: impl Into<String>, location: Location) -> Self {
        Self::new(code, Severity::Warning, message, location)
    }

    /// Add a suggestion to this diagnostic
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestions.push(suggestion);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl Location {
    pub fn new(file: Option<&str>, index: usize) -> Self {
        Self {
            file: file.map(str::to_string),
            index,
        }
    }
}

impl Suggestion {
    /// Create a new suggestion
    pub fn new(message: impl Into<String>, replacement: impl Into<String>, is_safe: bool) -> Self {
        Self {
            message: message.into(),
            replacement: replacement.into(),
            is_safe,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiagnosticCode::UndefinedVariable => "undefined-variable",
            DiagnosticCode::CircularVariable => "circular-variable",
            DiagnosticCode::UnrecognizedRule => "unrecognized-rule",
            DiagnosticCode::UnstableProperty => "unstable-property",
            DiagnosticCode::InvalidValue => "invalid-value",
            DiagnosticCode::UnknownFont => "unknown-font",
            DiagnosticCode::InvalidFilterOperand => "invalid-filter-operand",
            DiagnosticCode::InvalidFilterKeyword => "invalid-filter-keyword",
        };
        f.write_str(name)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}", file, self.index),
            None => write!(f, "<input>:{}", self.index),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]: {} ({})",
            self.severity, self.code, self.message, self.location
        )
    }
}

/// Shared sink for one compilation pass
///
/// Reporting never fails and never aborts. When `quiet` is set, warnings are
/// dropped on the floor.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    quiet: bool,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// A collector that drops warnings
    pub fn quiet() -> Self {
        Self {
            diagnostics: Vec::new(),
            quiet: true,
        }
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        if self.quiet && diagnostic.severity == Severity::Warning {
            tracing::trace!("Suppressed warning: {}", diagnostic);
            return;
        }
        tracing::debug!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_error())
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
