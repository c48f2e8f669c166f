use super::schema::{EnergyUnit, SectionSchema, Symmetry};
use super::species::{ElementSymbol, TupleKey};
use std::collections::HashMap;

/// One stored row: its values plus the schema variant and line it came from.
///
/// Equality compares the parameter content only. The source line is
/// provenance and does not take part.
#[derive(Debug, Clone)]
pub struct ParameterRecord {
    pub values: Box<[f64]>,
    pub schema: &'static SectionSchema,
    pub unit: Option<EnergyUnit>,
    pub line: usize,
}

impl ParameterRecord {
    /// Reads a value by its field label, e.g. `"r_sigma"`.
    pub fn field(&self, label: &str) -> Option<f64> {
        let index = self.schema.fields.iter().position(|f| *f == label)?;
        self.values.get(index).copied()
    }
}

impl PartialEq for ParameterRecord {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values && self.schema == other.schema && self.unit == other.unit
    }
}

/// A single global (keyless) section.
#[derive(Debug, Clone)]
pub struct GlobalEntry {
    pub values: Box<[f64]>,
    pub schema: &'static SectionSchema,
    pub unit: Option<EnergyUnit>,
    pub line: usize,
}

impl PartialEq for GlobalEntry {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values && self.schema == other.schema && self.unit == other.unit
    }
}

/// The result of inserting a row: the line of the row it replaced, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Insertion {
    New,
    Replaced { previous_line: usize },
}

/// All rows of one keyed section, frozen once the library is built.
///
/// Symmetric relations are stored under both the given and the reversed key,
/// so lookup is a single map access per relaxation rule. Torsion keys are stored
/// literally, wildcards included; wildcard matching happens in [`lookup`].
///
/// [`lookup`]: ParameterTable::lookup
#[derive(Debug, Clone)]
pub struct ParameterTable {
    name: &'static str,
    arity: usize,
    relaxations: &'static [&'static [usize]],
    entries: HashMap<TupleKey, ParameterRecord>,
    rows: Vec<TupleKey>,
}

/// Two tables are equal when they resolve the same keys to the same content,
/// regardless of row order.
impl PartialEq for ParameterTable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.arity == other.arity && self.entries == other.entries
    }
}

impl ParameterTable {
    pub(crate) fn new(schema: &'static SectionSchema) -> Self {
        Self {
            name: schema.name,
            arity: schema.arity,
            relaxations: schema.relaxations,
            entries: HashMap::new(),
            rows: Vec::new(),
        }
    }

    pub(crate) fn insert(&mut self, key: TupleKey, record: ParameterRecord) -> Insertion {
        let reversed = match record.schema.symmetry {
            Symmetry::Reversible => Some(key.reversed()).filter(|reversed| *reversed != key),
            Symmetry::Directional => None,
        };

        let previous = self.entries.insert(key.clone(), record.clone());
        if let Some(reversed) = &reversed {
            self.entries.insert(reversed.clone(), record);
        }

        match previous {
            Some(previous) => {
                self.rows
                    .retain(|row| *row != key && Some(row) != reversed.as_ref());
                self.rows.push(key);
                Insertion::Replaced {
                    previous_line: previous.line,
                }
            }
            None => {
                self.rows.push(key);
                Insertion::New
            }
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Number of distinct rows. Mirrored keys of symmetric relations are not
    /// counted twice.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in the order they were defined, each under the key it was written with.
    pub fn rows(&self) -> impl Iterator<Item = (&TupleKey, &ParameterRecord)> {
        self.rows
            .iter()
            .filter_map(|key| self.entries.get(key).map(|record| (key, record)))
    }

    /// Exact lookup without wildcard relaxation.
    pub fn get(&self, key: &TupleKey) -> Option<&ParameterRecord> {
        self.entries.get(key)
    }

    /// Resolves a key through the section's relaxation rules, returning the
    /// first match. For torsions the order is: exact, first outer position
    /// wildcarded, last outer position wildcarded, both outer positions
    /// wildcarded.
    pub fn resolve(&self, key: &TupleKey) -> Option<&ParameterRecord> {
        if key.arity() != self.arity {
            return None;
        }
        self.relaxations.iter().find_map(|rule| {
            if rule.is_empty() {
                self.entries.get(key)
            } else {
                self.entries.get(&key.relaxed(rule))
            }
        })
    }

    /// Like [`resolve`](Self::resolve), taking element symbols as strings.
    pub fn lookup_record<S: AsRef<str>>(&self, symbols: &[S]) -> Option<&ParameterRecord> {
        self.resolve(&TupleKey::parse(symbols)?)
    }

    pub fn lookup<S: AsRef<str>>(&self, symbols: &[S]) -> Option<&[f64]> {
        self.lookup_record(symbols).map(|record| &*record.values)
    }

    pub fn lookup_element(&self, symbol: &str) -> Option<&[f64]> {
        self.lookup(&[symbol])
    }

    /// Elements that have a row in a per-element table.
    pub fn elements(&self) -> impl Iterator<Item = ElementSymbol> + '_ {
        self.rows
            .iter()
            .filter_map(|key| key.species().first().and_then(|s| s.element()))
    }
}
