pub mod prompts;

pub use prompts::{AutoConfirm, Confirmation, InteractiveConfirm};
