use super::error::{ErrorKind, ErrorReport, LoadError, ParameterError};
use super::options::{DuplicatePolicy, ErrorPolicy, LoadOptions};
use super::params::{LoadWarning, ParameterSet};
use super::schema::{self, EnergyUnit, HeaderModifiers, SectionSchema};
use super::species::{ElementSymbol, Species, TupleKey, WILDCARD_TOKEN};
use super::table::{GlobalEntry, Insertion, ParameterRecord, ParameterTable};
use crate::core::io::lexer::{DataLine, SectionRecord};
use crate::core::utils::elements::{self, SiteType};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Turns lexed section records into a validated [`ParameterSet`].
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    options: LoadOptions,
}

impl TableBuilder {
    pub fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Builds the parameter set.
    ///
    /// # Errors
    ///
    /// With [`ErrorPolicy::FailFast`] the first violation is returned as
    /// [`LoadError::Invalid`]. With [`ErrorPolicy::CollectAll`] every
    /// violation is gathered and returned as [`LoadError::Report`]. No
    /// partially built set is ever returned.
    pub fn build(&self, records: &[SectionRecord]) -> Result<ParameterSet, LoadError> {
        let mut state = BuildState::new(&self.options, records);
        for record in records {
            state.section(record)?;
        }
        state.finish()
    }

    /// Validates every record and returns all violations, in input order.
    /// An empty list means the records build cleanly under these options.
    pub fn lint(&self, records: &[SectionRecord]) -> Vec<ParameterError> {
        let options = LoadOptions {
            error_policy: ErrorPolicy::CollectAll,
            ..self.options.clone()
        };
        match TableBuilder::new(options).build(records) {
            Ok(_) => Vec::new(),
            Err(error) => error.parameter_errors().to_vec(),
        }
    }
}

/// Which species a keyed row may reference.
#[derive(Debug)]
enum KnownElements {
    /// The library has no per-element section: any periodic-table element.
    Any,
    /// Only the elements declared in per-element sections.
    Declared(BTreeSet<ElementSymbol>),
}

impl KnownElements {
    fn scan(records: &[SectionRecord]) -> Self {
        let mut has_element_sections = false;
        let mut declared = BTreeSet::new();
        for record in records {
            let modifiers = HeaderModifiers::classify(&record.modifiers);
            let is_element_section = schema::resolve(&record.name, &modifiers.schema)
                .is_some_and(|schema| schema.arity == 1);
            if !is_element_section {
                continue;
            }
            has_element_sections = true;
            declared.extend(
                record
                    .lines
                    .iter()
                    .filter_map(|line| line.tokens().next())
                    .filter_map(ElementSymbol::new),
            );
        }
        if has_element_sections {
            KnownElements::Declared(declared)
        } else {
            KnownElements::Any
        }
    }

    fn contains(&self, element: ElementSymbol) -> bool {
        match self {
            KnownElements::Any => true,
            KnownElements::Declared(declared) => declared.contains(&element),
        }
    }
}

struct BuildState<'a> {
    options: &'a LoadOptions,
    known: KnownElements,
    set: ParameterSet,
    errors: Vec<ParameterError>,
}

impl<'a> BuildState<'a> {
    fn new(options: &'a LoadOptions, records: &[SectionRecord]) -> Self {
        Self {
            options,
            known: KnownElements::scan(records),
            set: ParameterSet::default(),
            errors: Vec::new(),
        }
    }

    /// Records a violation. Fails immediately in fail-fast mode.
    fn report(&mut self, error: ParameterError) -> Result<(), ParameterError> {
        match self.options.error_policy {
            ErrorPolicy::FailFast => Err(error),
            ErrorPolicy::CollectAll => {
                self.errors.push(error);
                Ok(())
            }
        }
    }

    fn section(&mut self, record: &SectionRecord) -> Result<(), ParameterError> {
        let modifiers = HeaderModifiers::classify(&record.modifiers);
        let Some(schema) = schema::resolve(&record.name, &modifiers.schema) else {
            return self.report(ParameterError::new(
                Some(&record.name),
                record.header_line,
                &record.header_text,
                ErrorKind::UnknownSection {
                    name: record.name.clone(),
                    modifiers: modifiers.schema,
                },
            ));
        };

        debug!(
            "Reading section '{}' ({} data line(s)) from line {}.",
            schema.header(),
            record.lines.len(),
            record.header_line
        );

        if schema.is_global() && record.lines.is_empty() {
            return self.report(ParameterError::new(
                Some(schema.name),
                record.header_line,
                &record.header_text,
                ErrorKind::FieldCountMismatch {
                    expected: schema.field_count(),
                    found: 0,
                },
            ));
        }

        for line in &record.lines {
            match parse_row(schema, &self.known, line) {
                Ok((key, values)) => self.store(schema, modifiers.unit, line, key, values)?,
                Err(kind) => {
                    self.report(ParameterError::new(
                        Some(schema.name),
                        line.number,
                        &line.text,
                        kind,
                    ))?;
                }
            }
        }
        Ok(())
    }

    fn store(
        &mut self,
        schema: &'static SectionSchema,
        unit: Option<EnergyUnit>,
        line: &DataLine,
        key: TupleKey,
        values: Box<[f64]>,
    ) -> Result<(), ParameterError> {
        let key_text = display_key(schema, &key);

        if self.options.duplicate_policy == DuplicatePolicy::Reject {
            let existing = if schema.is_global() {
                self.set.globals.get(schema.name).map(|entry| entry.line)
            } else {
                self.set
                    .tables
                    .get(schema.name)
                    .and_then(|table| table.get(&key))
                    .map(|record| record.line)
            };
            if let Some(first_line) = existing {
                return self.report(ParameterError::new(
                    Some(schema.name),
                    line.number,
                    &line.text,
                    ErrorKind::DuplicateKey {
                        key: key_text,
                        first_line,
                    },
                ));
            }
        }

        let replaced = if schema.is_global() {
            let entry = GlobalEntry {
                values,
                schema,
                unit,
                line: line.number,
            };
            self.set
                .globals
                .insert(schema.name, entry)
                .map(|previous| previous.line)
        } else {
            let record = ParameterRecord {
                values,
                schema,
                unit,
                line: line.number,
            };
            let table = self
                .set
                .tables
                .entry(schema.name)
                .or_insert_with(|| ParameterTable::new(schema));
            match table.insert(key, record) {
                Insertion::New => None,
                Insertion::Replaced { previous_line } => Some(previous_line),
            }
        };

        if let Some(previous_line) = replaced {
            warn!(
                "Duplicate key '{}' in section '{}' on line {} overrides line {}.",
                key_text, schema.name, line.number, previous_line
            );
            self.set.warnings.push(LoadWarning::DuplicateKey {
                section: schema.name,
                key: key_text,
                line: line.number,
                previous_line,
            });
        }
        Ok(())
    }

    fn finish(mut self) -> Result<ParameterSet, LoadError> {
        if !self.errors.is_empty() {
            return Err(LoadError::Report(ErrorReport {
                errors: self.errors,
            }));
        }

        self.set.elements = match self.known {
            KnownElements::Declared(declared) => declared,
            KnownElements::Any => {
                let mut used = BTreeSet::new();
                for table in self.set.tables.values() {
                    for (key, _) in table.rows() {
                        used.extend(key.species().iter().filter_map(Species::element));
                    }
                }
                used
            }
        };
        Ok(self.set)
    }
}

fn display_key(schema: &SectionSchema, key: &TupleKey) -> String {
    if schema.is_global() {
        schema.name.to_string()
    } else {
        key.to_string()
    }
}

fn parse_number(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parses one data line into its key and values.
fn parse_row(
    schema: &SectionSchema,
    known: &KnownElements,
    line: &DataLine,
) -> Result<(TupleKey, Box<[f64]>), ErrorKind> {
    let tokens: Vec<&str> = line.tokens().collect();
    let numeric_start = tokens
        .iter()
        .position(|token| token.parse::<f64>().is_ok())
        .unwrap_or(tokens.len());
    let (head, tail) = tokens.split_at(numeric_start);

    // Species tokens, each optionally followed by a site type tag.
    let mut species_tokens: Vec<(&str, Option<&str>)> = Vec::with_capacity(schema.arity);
    for &token in head {
        let is_tag = elements::site_type(token).is_some();
        match species_tokens.last_mut() {
            Some((_, tag @ None)) if is_tag => *tag = Some(token),
            _ => species_tokens.push((token, None)),
        }
    }

    if species_tokens.len() != schema.arity {
        return Err(ErrorKind::ArityMismatch {
            kind: schema.kind,
            expected: schema.arity,
            found: species_tokens.len(),
        });
    }

    let mut key = Vec::with_capacity(schema.arity);
    for (position, (symbol, tag)) in species_tokens.into_iter().enumerate() {
        if let Some(tag) = tag {
            if elements::site_type(tag) != Some(SiteType::Core) {
                return Err(ErrorKind::UnsupportedSiteType {
                    symbol: symbol.to_string(),
                    tag: tag.to_string(),
                });
            }
        }

        if symbol == WILDCARD_TOKEN {
            if !schema.allows_wildcard_at(position) {
                return Err(ErrorKind::MisplacedWildcard {
                    kind: schema.kind,
                    position,
                });
            }
            key.push(Species::Wildcard);
            continue;
        }

        match ElementSymbol::new(symbol) {
            Some(element) if known.contains(element) => key.push(Species::Element(element)),
            _ => {
                return Err(ErrorKind::UnknownSpecies {
                    symbol: symbol.to_string(),
                });
            }
        }
    }

    let values = tail
        .iter()
        .map(|token| {
            parse_number(token).ok_or_else(|| ErrorKind::InvalidNumber {
                token: token.to_string(),
            })
        })
        .collect::<Result<Vec<f64>, _>>()?;

    if values.len() != schema.field_count() {
        return Err(ErrorKind::FieldCountMismatch {
            expected: schema.field_count(),
            found: values.len(),
        });
    }

    Ok((TupleKey::new(key), values.into_boxed_slice()))
}
