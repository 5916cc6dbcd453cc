//! `add federation` and `list federation`

pub mod add;
pub mod condition;
pub mod list;

pub use add::{AddArgError, AddArgs, add_command, scan_add_args};
pub use condition::FEDERATION_CLAUSE;
pub use list::{ListArgs, list_command, scan_list_args};
