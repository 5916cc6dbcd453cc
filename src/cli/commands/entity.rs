use clap::{Args, ValueEnum};

#[derive(Args, Debug)]
pub struct EntityArgs {
    /// Entity type to operate on
    #[arg(value_enum, ignore_case = true)]
    pub entity: EntityKind,

    /// Keyword arguments, e.g. `Names=fed1,fed2`, `WithDeleted`, `Format=Fe,Fl`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    pub args: Vec<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    #[value(alias = "federations")]
    Federation,
}
