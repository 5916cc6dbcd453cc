//! Shared mechanics of the entity administration commands
//!
//! Every administered entity type goes through the same steps: its arguments
//! are folded into a condition by [`clause`], records are created through
//! [`add`], and query results are printed through [`print`] using a column
//! list resolved by [`format`].

pub mod add;
pub mod clause;
pub mod format;
pub mod option;
pub mod print;

use std::fmt::Display;
use std::io::{self, Write};

pub use add::add_entities;
pub use clause::{ClauseKind, ClauseOutcome, ClauseRules, parse_clause};
pub use format::{FieldDescriptor, FieldKind, FormatError, resolve_format};
pub use print::{FieldValue, PrintMode, ReportPrinter, Reportable};

/// Final result of one command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
}

impl Status {
    pub fn exit_code(self) -> i32 {
        match self {
            Status::Success => 0,
            Status::Error => 1,
        }
    }
}

/// Output and error streams a command writes to
///
/// Notices and errors are indented by one space, as every message of the
/// tool is.
pub struct Console<'a> {
    pub out: &'a mut dyn Write,
    pub err: &'a mut dyn Write,
}

impl<'a> Console<'a> {
    pub fn new(out: &'a mut dyn Write, err: &'a mut dyn Write) -> Self {
        Self { out, err }
    }

    pub fn notice(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.out, " {}", message)
    }

    pub fn error(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.err, " {}", message)
    }
}

/// Query filter for one entity type
pub trait EntityCondition<E>: Default + Clone + Send + Sync {
    /// Condition selecting exactly `names`, deleted records excluded
    fn for_names(names: Vec<String>) -> Self;

    /// Whether `record` satisfies the condition
    fn matches(&self, record: &E) -> bool;

    /// Query string pairs sent to the accounting service
    fn query_pairs(&self) -> Vec<(&'static str, String)>;
}

/// An administered record type
pub trait AdminEntity: Reportable + Clone + Send + Sync + 'static {
    type Condition: EntityCondition<Self>;

    /// Singular noun used in messages ("federation")
    const NOUN: &'static str;
    /// Collection name on the accounting service ("federations")
    const COLLECTION: &'static str;
    /// Heading used when records are added ("Federation(s)")
    const HEADING: &'static str;
    /// Report columns used when none are requested
    const DEFAULT_FORMAT: &'static str;

    fn name(&self) -> &str;

    /// A fresh record with every other attribute defaulted
    fn with_name(name: &str) -> Self;

    /// Label/value pairs echoed to the operator before committing
    fn describe(&self) -> Vec<(&'static str, String)>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_exit_codes() {
        assert_eq!(Status::Success.exit_code(), 0);
        assert_eq!(Status::Error.exit_code(), 1);
    }

    #[test]
    fn test_console_indents_messages() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut console = Console::new(&mut out, &mut err);
        console.notice("Changes Discarded").unwrap();
        console.error("Problem with query.").unwrap();
        assert_eq!(out, b" Changes Discarded\n");
        assert_eq!(err, b" Problem with query.\n");
    }
}
