use super::condition::FEDERATION_CLAUSE;
use crate::admin::{
    AdminEntity, ClauseOutcome, Console, ReportPrinter, Status, parse_clause, resolve_format,
};
use crate::api::models::{Federation, FederationCondition};
use crate::api::store::EntityStore;
use anyhow::Result;
use log::{debug, error, info};

/// Condition, report columns and diagnostics gathered from `list` arguments
#[derive(Debug, Default)]
pub struct ListArgs {
    pub condition: FederationCondition,
    pub format: Vec<String>,
    pub errors: Vec<String>,
}

/// Fold every argument into one condition, resuming after each clause
/// boundary or unknown keyword so all problems are reported together
pub fn scan_list_args(args: &[String]) -> ListArgs {
    let mut scanned = ListArgs::default();
    let mut index = 0;

    while index < args.len() {
        let ClauseOutcome {
            filter,
            format,
            next,
            kind,
            errors,
        } = parse_clause(&FEDERATION_CLAUSE, args, index, scanned.condition);

        debug!("Clause at {} ended at {} with code {}", index, next, kind.code());
        scanned.condition = filter;
        scanned.format.extend(format);
        scanned.errors.extend(errors.into_iter().map(|err| err.to_string()));
        // A clause stopping on its own first token is sitting on `Set`
        index = next.max(index + 1);
    }

    scanned
}

/// `list federation ...`
pub async fn list_command<S>(
    store: &mut S,
    printer: &ReportPrinter,
    console: &mut Console<'_>,
    args: &[String],
) -> Result<Status>
where
    S: EntityStore<Federation> + ?Sized,
{
    info!("Listing federations: {:?}", args);

    let scanned = scan_list_args(args);
    if !scanned.errors.is_empty() {
        for err in &scanned.errors {
            console.error(err)?;
        }
        return Ok(Status::Error);
    }

    let fields = match resolve_format(&scanned.format, Federation::DEFAULT_FORMAT) {
        Ok(fields) => fields,
        Err(err) => {
            console.error(err)?;
            return Ok(Status::Error);
        }
    };

    let federations = match store.get(&scanned.condition).await {
        Ok(federations) => federations,
        Err(err) => {
            error!("Federation query failed: {}", err);
            console.error("Problem with query.")?;
            return Ok(Status::Error);
        }
    };

    printer.render(&mut *console.out, &federations, &fields)?;
    Ok(Status::Success)
}
