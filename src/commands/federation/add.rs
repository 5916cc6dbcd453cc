use crate::admin::option::{Keyword, OptionOp, push_unique, split_list, split_option};
use crate::admin::{Console, Status, add_entities};
use crate::api::models::Federation;
use crate::api::store::EntityStore;
use crate::ui::prompts::Confirmation;
use anyhow::Result;
use log::{debug, info};
use thiserror::Error;

const NAMES: Keyword = Keyword::new("Names", 1);
const FEDERATIONS: Keyword = Keyword::new("Federations", 1);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddArgError {
    #[error("Unknown option: {0}")]
    UnknownOption(String),
    #[error("No federation name given in '{0}'")]
    NoName(String),
}

/// Names requested by `add federation`, plus any argument errors
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AddArgs {
    pub names: Vec<String>,
    pub errors: Vec<AddArgError>,
}

/// Collect federation names from bare arguments and `Names=`/`Federations=`
pub fn scan_add_args(args: &[String]) -> AddArgs {
    let mut scanned = AddArgs::default();

    for arg in args {
        let token = split_option(arg);
        let known = match token.op {
            None => true,
            Some(OptionOp::Set) => {
                NAMES.matches(token.keyword) || FEDERATIONS.matches(token.keyword)
            }
            // Nothing exists yet to add to or remove from
            Some(OptionOp::Add | OptionOp::Remove) => false,
        };
        if !known {
            scanned.errors.push(AddArgError::UnknownOption(arg.clone()));
            continue;
        }
        let value = token.value_or_raw();
        if split_list(value).is_empty() {
            scanned.errors.push(AddArgError::NoName(arg.clone()));
            continue;
        }
        push_unique(&mut scanned.names, value);
    }

    debug!("Add arguments: {:?}", scanned);
    scanned
}

/// `add federation ...`
pub async fn add_command<S>(
    store: &mut S,
    confirm: &mut dyn Confirmation,
    console: &mut Console<'_>,
    args: &[String],
) -> Result<Status>
where
    S: EntityStore<Federation> + ?Sized,
{
    info!("Adding federations: {:?}", args);

    let scanned = scan_add_args(args);
    if !scanned.errors.is_empty() {
        for err in &scanned.errors {
            console.error(err)?;
        }
        return Ok(Status::Error);
    }

    add_entities::<Federation, S>(store, confirm, console, scanned.names).await
}
