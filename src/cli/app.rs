use super::commands::entity::EntityArgs;
use crate::admin::PrintMode;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "acctmgr", version)]
#[command(about = "Administer records in the cluster accounting database")]
pub struct Cli {
    /// Commit changes without asking for confirmation
    #[arg(short = 'i', long)]
    pub immediate: bool,

    /// Separate columns with the delimiter, including after the last one
    #[arg(short = 'p', long, conflicts_with = "parsable2")]
    pub parsable: bool,

    /// Separate columns with the delimiter, none after the last one
    #[arg(short = 'P', long)]
    pub parsable2: bool,

    /// Delimiter used by --parsable and --parsable2
    #[arg(long, value_name = "STRING")]
    pub delimiter: Option<String>,

    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Print mode requested on the command line, if any
    pub fn print_mode(&self) -> Option<PrintMode> {
        if self.parsable2 {
            Some(PrintMode::NoEnding)
        } else if self.parsable {
            Some(PrintMode::Trailing)
        } else {
            None
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add records to the accounting database
    #[command(visible_alias = "create")]
    Add(EntityArgs),
    /// Display records from the accounting database
    #[command(visible_alias = "show")]
    List(EntityArgs),
}
