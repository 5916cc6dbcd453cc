//! Create records after checking which already exist
//!
//! Names that already exist are dropped with a notice, blank names are
//! rejected one by one, and whatever survives is created only after the
//! operator confirms. A failed create is always rolled back.

use super::{AdminEntity, Console, EntityCondition, Status};
use crate::api::store::EntityStore;
use crate::ui::prompts::Confirmation;
use anyhow::Result;
use log::{error, info, warn};
use std::io::Write;

pub const COMMIT_PROMPT: &str = "Would you like to commit changes?";

/// Add one record per name in `names`
///
/// Returns `Ok` with the command status; `Err` only when the console or the
/// prompt themselves fail.
pub async fn add_entities<E, S>(
    store: &mut S,
    confirm: &mut dyn Confirmation,
    console: &mut Console<'_>,
    names: Vec<String>,
) -> Result<Status>
where
    E: AdminEntity,
    S: EntityStore<E> + ?Sized,
{
    if names.is_empty() {
        console.error(format_args!("Need name of {} to add.", E::NOUN))?;
        return Ok(Status::Error);
    }

    let condition = <E::Condition as EntityCondition<E>>::for_names(names.clone());
    let existing = match store.get(&condition).await {
        Ok(records) => records,
        Err(err) => {
            error!("Lookup of existing {} failed: {}", E::COLLECTION, err);
            console.error(format_args!(
                "Problem getting {} from database.  Contact your admin.",
                E::COLLECTION
            ))?;
            return Ok(Status::Error);
        }
    };

    let mut wanted = Vec::with_capacity(names.len());
    for name in names {
        if existing.iter().any(|record| record.name().eq_ignore_ascii_case(&name)) {
            console.notice(format_args!(
                "This {} {} already exists.  Not adding.",
                E::NOUN,
                name
            ))?;
        } else {
            wanted.push(name);
        }
    }

    if wanted.is_empty() {
        console.notice("Nothing new added.")?;
        return Ok(Status::Error);
    }

    let mut status = Status::Success;
    let mut records = Vec::with_capacity(wanted.len());
    console.notice(format_args!("Adding {}", E::HEADING))?;
    for name in wanted {
        if name.trim().is_empty() {
            console.error("No blank names are allowed when adding.")?;
            status = Status::Error;
            continue;
        }
        let record = E::with_name(&name);
        for (label, value) in record.describe() {
            writeln!(console.out, "  {:<13} = {}", label, value)?;
        }
        records.push(record);
    }

    if records.is_empty() {
        console.notice("Nothing new added.")?;
        return Ok(Status::Error);
    }

    if !confirm.confirm(COMMIT_PROMPT)? {
        console.notice("Changes Discarded")?;
        rollback::<E, S>(store).await;
        return Ok(status);
    }

    info!("Creating {} {}(s)", records.len(), E::NOUN);
    match store.create(&records).await {
        Ok(()) => {
            if let Err(err) = store.commit(true).await {
                console.error(format_args!("Problem committing changes: {}", err))?;
                return Ok(Status::Error);
            }
            Ok(status)
        }
        Err(err) => {
            console.error(format_args!(
                "Problem adding {}: {}",
                E::HEADING.to_lowercase(),
                err
            ))?;
            rollback::<E, S>(store).await;
            Ok(Status::Error)
        }
    }
}

async fn rollback<E, S>(store: &mut S)
where
    E: AdminEntity,
    S: EntityStore<E> + ?Sized,
{
    if let Err(err) = store.commit(false).await {
        warn!("Rollback failed: {}", err);
    }
}
