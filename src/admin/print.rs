//! Columnar report printing
//!
//! Every report column is printed by the routine for its value variant. The
//! routine is told whether it is printing the last column of the row so it
//! can leave off the trailing separator.

use super::format::{FieldDescriptor, FieldKind};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::io::{self, Write};

/// A record attribute ready for printing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Flags(Vec<Cow<'static, str>>),
    /// The record type does not carry this attribute
    Absent,
}

impl FieldValue<'_> {
    /// Printable text, or `None` for the absent placeholder
    pub fn render(&self) -> Option<Cow<'_, str>> {
        match self {
            FieldValue::Text(text) => Some(Cow::Borrowed(*text)),
            FieldValue::Flags(flags) if flags.is_empty() => None,
            FieldValue::Flags(flags) => Some(Cow::Owned(flags.join(","))),
            FieldValue::Absent => None,
        }
    }
}

/// Records that can be shown in a report
pub trait Reportable {
    fn field(&self, kind: FieldKind) -> FieldValue<'_>;
}

/// How columns are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrintMode {
    /// Fixed-width columns separated by a space
    #[default]
    Columns,
    /// Every column followed by the delimiter
    Trailing,
    /// Columns joined by the delimiter, none after the last
    NoEnding,
}

pub const DEFAULT_DELIMITER: &str = "|";

#[derive(Debug, Clone)]
pub struct ReportPrinter {
    mode: PrintMode,
    delimiter: String,
}

impl Default for ReportPrinter {
    fn default() -> Self {
        Self::new(PrintMode::default())
    }
}

impl ReportPrinter {
    pub fn new(mode: PrintMode) -> Self {
        Self {
            mode,
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn mode(&self) -> PrintMode {
        self.mode
    }

    /// Print the header line followed by one line per record
    pub fn render<R: Reportable>(
        &self,
        out: &mut dyn Write,
        records: &[R],
        fields: &[FieldDescriptor],
    ) -> io::Result<()> {
        self.print_header(out, fields)?;
        for record in records {
            self.print_row(out, record, fields)?;
        }
        out.flush()
    }

    pub fn print_header(&self, out: &mut dyn Write, fields: &[FieldDescriptor]) -> io::Result<()> {
        let count = fields.len();
        for (index, field) in fields.iter().enumerate() {
            self.print_cell(out, field, Some(field.name), index + 1 == count)?;
        }
        writeln!(out)
    }

    pub fn print_row<R: Reportable>(
        &self,
        out: &mut dyn Write,
        record: &R,
        fields: &[FieldDescriptor],
    ) -> io::Result<()> {
        let count = fields.len();
        for (index, field) in fields.iter().enumerate() {
            let value = record.field(field.kind);
            let text = value.render();
            self.print_cell(out, field, text.as_deref(), index + 1 == count)?;
        }
        writeln!(out)
    }

    fn print_cell(
        &self,
        out: &mut dyn Write,
        field: &FieldDescriptor,
        value: Option<&str>,
        last: bool,
    ) -> io::Result<()> {
        match self.mode {
            PrintMode::NoEnding if last => write!(out, "{}", value.unwrap_or("")),
            PrintMode::Trailing | PrintMode::NoEnding => {
                write!(out, "{}{}", value.unwrap_or(""), self.delimiter)
            }
            PrintMode::Columns => {
                let width = field.abs_width();
                let text = match value {
                    Some(value) => truncate(value, width),
                    None => Cow::Borrowed(" "),
                };
                if field.left_justified() {
                    write!(out, "{:<width$}", text, width = width)?;
                } else {
                    write!(out, "{:>width$}", text, width = width)?;
                }
                if !last {
                    write!(out, " ")?;
                }
                Ok(())
            }
        }
    }
}

/// Cut `value` to `width` characters, marking the cut with a `+`
fn truncate(value: &str, width: usize) -> Cow<'_, str> {
    if value.chars().count() <= width {
        return Cow::Borrowed(value);
    }
    let mut cut: String = value.chars().take(width.saturating_sub(1)).collect();
    cut.push('+');
    Cow::Owned(cut)
}
