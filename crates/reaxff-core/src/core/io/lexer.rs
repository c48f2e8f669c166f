//! Splits raw library text into section records.
//!
//! The lexer knows nothing about section layouts. It only recognizes header
//! lines, strips comments and blank lines, and groups the remaining lines
//! under the header that precedes them.

use crate::core::forcefield::error::{ErrorKind, ParameterError};
use crate::core::forcefield::schema::is_header_token;

/// One data line of a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLine {
    /// 1-based line number in the input.
    pub number: usize,
    /// The line with comments and surrounding whitespace removed.
    pub text: String,
    /// Leading tokens of `text` that belong to the header rather than the
    /// data. Non-zero only for values written on the header line itself.
    pub skip: usize,
}

impl DataLine {
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.text.split_whitespace().skip(self.skip)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRecord {
    pub name: String,
    /// Header tokens between the name and any inline values, verbatim.
    pub modifiers: Vec<String>,
    pub header_line: usize,
    pub header_text: String,
    pub lines: Vec<DataLine>,
}

/// Removes a trailing `#` comment and surrounding whitespace.
fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(index) => line[..index].trim(),
        None => line.trim(),
    }
}

fn is_numeric(token: &str) -> bool {
    token.parse::<f64>().is_ok()
}

fn open_section(number: usize, text: &str) -> SectionRecord {
    let mut tokens = text.split_whitespace();
    let name = tokens.next().unwrap_or_default().to_string();

    let mut modifiers = Vec::new();
    let mut inline_values = false;
    for token in tokens {
        if is_numeric(token) {
            inline_values = true;
            break;
        }
        modifiers.push(token.to_string());
    }

    let mut lines = Vec::new();
    if inline_values {
        lines.push(DataLine {
            number,
            text: text.to_string(),
            skip: 1 + modifiers.len(),
        });
    }

    SectionRecord {
        name,
        modifiers,
        header_line: number,
        header_text: text.to_string(),
        lines,
    }
}

/// Splits lines into section records, collecting every line that appears
/// before the first header as a `NoActiveSection` error instead of stopping.
pub fn split_lenient<I, S>(lines: I) -> (Vec<SectionRecord>, Vec<ParameterError>)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut records: Vec<SectionRecord> = Vec::new();
    let mut errors = Vec::new();

    for (index, raw) in lines.into_iter().enumerate() {
        let number = index + 1;
        let text = strip_comment(raw.as_ref());
        let Some(first) = text.split_whitespace().next() else {
            continue;
        };

        if is_header_token(first) {
            records.push(open_section(number, text));
            continue;
        }

        match records.last_mut() {
            Some(record) => record.lines.push(DataLine {
                number,
                text: text.to_string(),
                skip: 0,
            }),
            None => errors.push(ParameterError::new(
                None,
                number,
                text,
                ErrorKind::NoActiveSection,
            )),
        }
    }

    (records, errors)
}

/// Splits a line sequence into section records, failing on the first data
/// line that has no active section.
pub fn split_lines<I, S>(lines: I) -> Result<Vec<SectionRecord>, ParameterError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let (records, errors) = split_lenient(lines);
    match errors.into_iter().next() {
        Some(error) => Err(error),
        None => Ok(records),
    }
}

pub fn split(text: &str) -> Result<Vec<SectionRecord>, ParameterError> {
    split_lines(text.lines())
}
