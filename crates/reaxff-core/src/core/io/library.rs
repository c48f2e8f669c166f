use super::lexer::{self, SectionRecord};
use super::traits::ParameterFormat;
use crate::core::forcefield::builder::TableBuilder;
use crate::core::forcefield::error::{ErrorReport, LoadError, ParameterError};
use crate::core::forcefield::options::{ErrorPolicy, LoadOptions};
use crate::core::forcefield::params::ParameterSet;
use crate::core::forcefield::schema::{EnergyUnit, SCHEMAS, SectionSchema};
use crate::core::forcefield::species::{Species, TupleKey, WILDCARD_TOKEN};
use crate::core::utils::elements::SiteType;
use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;

/// The GULP-style ReaxFF library text format.
#[derive(Debug, Clone, Default)]
pub struct ReaxffLibrary {
    options: LoadOptions,
}

impl ReaxffLibrary {
    pub fn new(options: LoadOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    pub fn read_from_str(&self, text: &str) -> Result<ParameterSet, LoadError> {
        self.read_lines(text.lines())
    }

    /// Validates library text and returns every violation in input order.
    pub fn lint_str(&self, text: &str) -> Vec<ParameterError> {
        let (records, mut errors) = lexer::split_lenient(text.lines());
        errors.extend(TableBuilder::new(self.options.clone()).lint(&records));
        errors.sort_by_key(|error| error.line);
        errors
    }

    fn read_lines<I, S>(&self, lines: I) -> Result<ParameterSet, LoadError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let builder = TableBuilder::new(self.options.clone());
        match self.options.error_policy {
            ErrorPolicy::FailFast => {
                let records = lexer::split_lines(lines)?;
                builder.build(&records)
            }
            ErrorPolicy::CollectAll => {
                let (records, errors) = lexer::split_lenient(lines);
                collect_report(errors, &records, &builder)
            }
        }
    }
}

fn collect_report(
    mut errors: Vec<ParameterError>,
    records: &[SectionRecord],
    builder: &TableBuilder,
) -> Result<ParameterSet, LoadError> {
    match builder.build(records) {
        Ok(set) if errors.is_empty() => Ok(set),
        Ok(_) => Err(LoadError::Report(ErrorReport { errors })),
        Err(LoadError::Report(report)) => {
            errors.extend(report.errors);
            errors.sort_by_key(|error| error.line);
            Err(LoadError::Report(ErrorReport { errors }))
        }
        Err(other) => Err(other),
    }
}

fn unit_suffix(unit: Option<EnergyUnit>) -> String {
    unit.map(|unit| format!(" {}", unit.token()))
        .unwrap_or_default()
}

fn format_values(values: &[f64]) -> String {
    values
        .iter()
        .map(|value| format!("{:>10}", value))
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_key(key: &TupleKey) -> String {
    key.species()
        .iter()
        .map(|species| {
            let symbol = match species {
                Species::Element(element) => element.as_str(),
                Species::Wildcard => WILDCARD_TOKEN,
            };
            format!("{:<2} {} ", symbol, SiteType::Core.tag())
        })
        .collect()
}

fn write_section(
    set: &ParameterSet,
    schema: &'static SectionSchema,
    writer: &mut impl Write,
) -> std::io::Result<()> {
    if schema.is_global() {
        if let Some(entry) = set
            .global(schema.name)
            .filter(|entry| std::ptr::eq(entry.schema, schema))
        {
            writeln!(
                writer,
                "{}{} {}",
                schema.header(),
                unit_suffix(entry.unit),
                format_values(&entry.values)
            )?;
        }
        return Ok(());
    }

    let Some(table) = set.table(schema.name) else {
        return Ok(());
    };
    let rows: Vec<_> = table
        .rows()
        .filter(|(_, record)| std::ptr::eq(record.schema, schema))
        .collect();

    // One header per unit, in the order units first appear.
    let mut units: Vec<Option<EnergyUnit>> = Vec::new();
    for (_, record) in &rows {
        if !units.contains(&record.unit) {
            units.push(record.unit);
        }
    }

    for unit in units {
        writeln!(writer, "{}{}", schema.header(), unit_suffix(unit))?;
        for (key, record) in rows.iter().filter(|(_, record)| record.unit == unit) {
            writeln!(writer, "{}{}", format_key(key), format_values(&record.values))?;
        }
    }
    Ok(())
}

impl ParameterFormat for ReaxffLibrary {
    type Output = ParameterSet;
    type Error = LoadError;

    fn read_from(&self, reader: &mut impl BufRead) -> Result<ParameterSet, LoadError> {
        let lines = reader.lines().collect::<Result<Vec<String>, _>>()?;
        self.read_lines(lines)
    }

    /// Writes every section in vocabulary order. Values are printed in their
    /// shortest round-trip form, so reading the output back gives an equal set.
    fn write_to(&self, set: &ParameterSet, writer: &mut impl Write) -> Result<(), LoadError> {
        for schema in SCHEMAS {
            write_section(set, schema, writer)?;
        }
        Ok(())
    }

    fn read_from_path<P: AsRef<Path>>(&self, path: P) -> Result<ParameterSet, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        self.read_from_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forcefield::error::ErrorKind;
    use std::io::Cursor;
    use tempfile::tempdir;

    const LIBRARY: &str = "\
reaxFFvdwcutoff      10.0000
reaxFFtol       0.0010000000 0.001
reaxff0_vdw kcal 1.5591
reaxff1_radii
C  core   1.3644   1.2395   1.2636
H  core   0.8930  -0.1000  -0.1000
reaxff1_valence
C  core   4.0000   4.0000   4.0000   4.0000
H  core   1.0000   1.0000   1.0000   1.0000
reaxff2_bo over bo13
C  core C  core  -0.0777   6.7268  -0.1000   9.1628  -0.4550  37.6117
reaxff2_bo
H  core H  core  -0.0790   6.0552   0.0000   0.0000   0.0000   6.0000
reaxff2_bo bo13
C  core H  core  -0.0500   6.9136   0.0000   0.0000   0.0000   6.0000
reaxff2_bond kcal
C  core H  core 169.4760   0.0000   0.0000  -0.6083   5.2290
reaxff2_bond ev
H  core H  core   6.6000   0.0000   0.0000  -0.4600   1.0000
reaxff3_angle kcal
C  core C  core H  core  71.5018   0.0000   0.0000   1.0000   1.2000
reaxff3_hbond kcal
H  core C  core C  core   2.0000  -2.0000   1.4000  19.0000
reaxff4_torsion kcal
X  core C  core H  core X  core   0.0000   0.0000   0.1000   0.0000   0.0000
C  core C  core C  core H  core   0.0000  48.2450   0.3000  -8.0000  -2.0000
";

    #[test]
    fn read_from_reader_builds_set() {
        let mut reader = Cursor::new(LIBRARY);
        let set = ReaxffLibrary::default().read_from(&mut reader).unwrap();
        assert_eq!(set.scalar("reaxff0_vdw"), Some(&[1.5591][..]));
        assert_eq!(set.table("reaxff2_bo").unwrap().len(), 3);
        assert_eq!(
            set.lookup("reaxff2_bond", &["H", "C"]),
            Some(&[169.476, 0.0, 0.0, -0.6083, 5.229][..])
        );
    }

    #[test]
    fn written_library_reads_back_equal() {
        let library = ReaxffLibrary::default();
        let set = library.read_from_str(LIBRARY).unwrap();

        let mut buffer = Vec::new();
        library.write_to(&set, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let reread = library.read_from_str(&text).unwrap();

        assert_eq!(reread, set);
        let cc = reread.lookup_record("reaxff2_bo", &["C", "C"]).unwrap();
        assert_eq!(cc.schema.modifiers, &["bo13", "over"]);
        let hh = reread.lookup_record("reaxff2_bond", &["H", "H"]).unwrap();
        assert_eq!(hh.unit, Some(EnergyUnit::ElectronVolt));
    }

    #[test]
    fn writer_emits_one_header_per_variant_and_unit() {
        let library = ReaxffLibrary::default();
        let set = library.read_from_str(LIBRARY).unwrap();
        let mut buffer = Vec::new();
        library.write_to(&set, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let headers: Vec<&str> = text
            .lines()
            .filter(|line| line.starts_with("reaxff2_"))
            .collect();
        assert_eq!(
            headers,
            [
                "reaxff2_bo bo13 over",
                "reaxff2_bo bo13",
                "reaxff2_bo",
                "reaxff2_bond kcal",
                "reaxff2_bond ev",
            ]
        );
        assert!(text.starts_with("reaxFFvdwcutoff "));
        assert!(text.contains("X  core C  core H  core X  core"));
    }

    #[test]
    fn write_to_path_and_read_from_path_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ffield.lib");
        let library = ReaxffLibrary::default();
        let set = library.read_from_str(LIBRARY).unwrap();

        library.write_to_path(&set, &path).unwrap();
        assert_eq!(library.read_from_path(&path).unwrap(), set);
    }

    #[test]
    fn read_from_path_reports_missing_file_with_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.lib");
        match ReaxffLibrary::default().read_from_path(&path) {
            Err(LoadError::Io { path: reported, .. }) => assert!(reported.ends_with("absent.lib")),
            other => panic!("expected an I/O error, got {:?}", other),
        }
    }

    #[test]
    fn collect_all_merges_lexer_and_builder_errors() {
        let text = "\
C  core 1.0 2.0 3.0
reaxff1_radii
C  core 1.0 2.0
";
        let library = ReaxffLibrary::new(LoadOptions {
            error_policy: ErrorPolicy::CollectAll,
            ..LoadOptions::default()
        });
        match library.read_from_str(text) {
            Err(LoadError::Report(report)) => {
                let kinds: Vec<_> = report.iter().map(|e| e.kind.clone()).collect();
                assert_eq!(
                    kinds,
                    [
                        ErrorKind::NoActiveSection,
                        ErrorKind::FieldCountMismatch {
                            expected: 3,
                            found: 2
                        },
                    ]
                );
            }
            other => panic!("expected a report, got {:?}", other),
        }
    }

    #[test]
    fn collect_all_with_only_orphan_lines_is_still_a_report() {
        let library = ReaxffLibrary::new(LoadOptions {
            error_policy: ErrorPolicy::CollectAll,
            ..LoadOptions::default()
        });
        let result = library.read_from_str("C core 1.0\nreaxff1_radii\nC core 1 2 3\n");
        assert!(matches!(result, Err(LoadError::Report(ref r)) if r.len() == 1));
    }

    #[test]
    fn lint_str_lists_everything_in_line_order() {
        let text = "\
reaxff1_radii
C  core 1.0 2.0
reaxff2_bond
C  core Zn core 1 2 3 4 5
";
        let errors = ReaxffLibrary::default().lint_str(text);
        let lines: Vec<_> = errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, [2, 4]);
        assert!(ReaxffLibrary::default().lint_str(LIBRARY).is_empty());
    }
}
