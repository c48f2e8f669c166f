use super::schema::InteractionKind;
use thiserror::Error;

/// The reason a single line of a parameter library was rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ErrorKind {
    #[error("Unknown section '{name}'{}", format_modifiers(.modifiers))]
    UnknownSection { name: String, modifiers: Vec<String> },

    #[error("Unknown species '{symbol}'")]
    UnknownSpecies { symbol: String },

    #[error("Wrong number of parameters: expected {expected}, found {found}")]
    FieldCountMismatch { expected: usize, found: usize },

    #[error("Species number out of bounds in {kind} parameters! (expected {expected}, found {found})")]
    ArityMismatch {
        kind: InteractionKind,
        expected: usize,
        found: usize,
    },

    #[error("Duplicate entry for key '{key}' (first defined on line {first_line})")]
    DuplicateKey { key: String, first_line: usize },

    #[error("Data line appears before any section header")]
    NoActiveSection,

    #[error("Wildcard species is not allowed at position {position} in {kind} parameters")]
    MisplacedWildcard { kind: InteractionKind, position: usize },

    #[error("Invalid number '{token}'")]
    InvalidNumber { token: String },

    #[error("Unsupported site type '{tag}' for species '{symbol}' (ReaxFF only uses core sites)")]
    UnsupportedSiteType { symbol: String, tag: String },
}

fn format_modifiers(modifiers: &[String]) -> String {
    if modifiers.is_empty() {
        String::new()
    } else {
        format!(" with modifiers '{}'", modifiers.join(" "))
    }
}

/// A structural violation, located at a 1-based line of the input.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("Parse error on line {line}{}: {kind}\n    {content}", format_section(.section))]
pub struct ParameterError {
    pub section: Option<String>,
    pub line: usize,
    pub content: String,
    pub kind: ErrorKind,
}

fn format_section(section: &Option<String>) -> String {
    section
        .as_deref()
        .map(|name| format!(" in section '{}'", name))
        .unwrap_or_default()
}

impl ParameterError {
    pub(crate) fn new(
        section: Option<&str>,
        line: usize,
        content: &str,
        kind: ErrorKind,
    ) -> Self {
        Self {
            section: section.map(str::to_string),
            line,
            content: content.to_string(),
            kind,
        }
    }
}

/// Every violation found in one pass over a library, in input order.
#[derive(Debug, Error, Clone, PartialEq, Default)]
#[error("{} error(s) in parameter library{}", .errors.len(), format_report(.errors))]
pub struct ErrorReport {
    pub errors: Vec<ParameterError>,
}

impl ErrorReport {
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParameterError> {
        self.errors.iter()
    }
}

fn format_report(errors: &[ParameterError]) -> String {
    errors
        .iter()
        .map(|error| format!("\n  {}", error))
        .collect()
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Read(#[from] std::io::Error),

    #[error(transparent)]
    Invalid(#[from] ParameterError),

    #[error(transparent)]
    Report(#[from] ErrorReport),
}

impl LoadError {
    /// All structural errors carried by this failure; empty for I/O errors.
    pub fn parameter_errors(&self) -> &[ParameterError] {
        match self {
            LoadError::Io { .. } | LoadError::Read(_) => &[],
            LoadError::Invalid(error) => std::slice::from_ref(error),
            LoadError::Report(report) => &report.errors,
        }
    }
}
