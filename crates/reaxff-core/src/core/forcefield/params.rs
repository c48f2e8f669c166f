use super::error::LoadError;
use super::options::LoadOptions;
use super::species::ElementSymbol;
use super::table::{GlobalEntry, ParameterRecord, ParameterTable};
use crate::core::io::library::ReaxffLibrary;
use crate::core::io::traits::ParameterFormat;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

/// A non-fatal observation made while building a parameter set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// A later row replaced an earlier one with the same key.
    DuplicateKey {
        section: &'static str,
        key: String,
        line: usize,
        previous_line: usize,
    },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadWarning::DuplicateKey {
                section,
                key,
                line,
                previous_line,
            } => write!(
                f,
                "Duplicate key '{}' in section '{}' on line {} overrides the definition on line {}",
                key, section, line, previous_line
            ),
        }
    }
}

/// The complete, immutable set of ReaxFF parameters read from one library.
///
/// A set is built once and never mutated afterwards; share it between
/// evaluator threads behind an `Arc`. Equality compares the parameters only;
/// load warnings are not part of a set's content.
#[derive(Debug, Clone, Default)]
pub struct ParameterSet {
    pub(crate) globals: BTreeMap<&'static str, GlobalEntry>,
    pub(crate) tables: BTreeMap<&'static str, ParameterTable>,
    pub(crate) elements: BTreeSet<ElementSymbol>,
    pub(crate) warnings: Vec<LoadWarning>,
}

impl PartialEq for ParameterSet {
    fn eq(&self, other: &Self) -> bool {
        self.globals == other.globals
            && self.tables == other.tables
            && self.elements == other.elements
    }
}

impl ParameterSet {
    /// Reads and validates a library file.
    pub fn load(path: &Path, options: &LoadOptions) -> Result<Self, LoadError> {
        ReaxffLibrary::new(options.clone()).read_from_path(path)
    }

    /// Parses and validates library text already held in memory.
    pub fn from_text(text: &str, options: &LoadOptions) -> Result<Self, LoadError> {
        ReaxffLibrary::new(options.clone()).read_from_str(text)
    }

    /// The values of a global section such as `reaxFFvdwcutoff`.
    pub fn scalar(&self, name: &str) -> Option<&[f64]> {
        self.globals.get(name).map(|entry| &*entry.values)
    }

    pub fn global(&self, name: &str) -> Option<&GlobalEntry> {
        self.globals.get(name)
    }

    pub fn table(&self, name: &str) -> Option<&ParameterTable> {
        self.tables.get(name)
    }

    /// Looks up a keyed section by element symbols, applying the section's
    /// symmetry and wildcard rules.
    pub fn lookup<S: AsRef<str>>(&self, section: &str, symbols: &[S]) -> Option<&[f64]> {
        self.table(section)?.lookup(symbols)
    }

    pub fn lookup_record<S: AsRef<str>>(
        &self,
        section: &str,
        symbols: &[S],
    ) -> Option<&ParameterRecord> {
        self.table(section)?.lookup_record(symbols)
    }

    pub fn lookup_element(&self, section: &str, symbol: &str) -> Option<&[f64]> {
        self.table(section)?.lookup_element(symbol)
    }

    pub fn globals(&self) -> impl Iterator<Item = (&'static str, &GlobalEntry)> {
        self.globals.iter().map(|(name, entry)| (*name, entry))
    }

    pub fn tables(&self) -> impl Iterator<Item = &ParameterTable> {
        self.tables.values()
    }

    /// The elements this set knows about: those declared by the per-element
    /// sections, or, when the library has none, those used by any key.
    pub fn elements(&self) -> &BTreeSet<ElementSymbol> {
        &self.elements
    }

    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.globals.is_empty() && self.tables.is_empty()
    }
}
