use std::io::Write;

use tracing::{info, warn};

use super::{release, write_pretty, Outcome};
use crate::errors::ToolError;
use crate::repositories::Connector;

pub const SUCCESS_MARKER: &str = "Database connection OK";
pub const FAILURE_MARKER: &str = "Database connection failed:";

/// Smoke-tests the database by fetching at most one customer.
///
/// Failures are reported on `err` but never turned into a failing exit
/// status; the outcome is always [`Outcome::Success`].
pub async fn run<C, O, E>(connector: &C, out: &mut O, err: &mut E) -> Outcome
where
    C: Connector + ?Sized,
    O: Write + ?Sized,
    E: Write + ?Sized,
{
    if let Err(e) = probe(connector, out).await {
        warn!(error = %e, "Connection check failed");
        let _ = writeln!(err, "{} {}", FAILURE_MARKER, e);
    }

    Outcome::Success
}

async fn probe<C, O>(connector: &C, out: &mut O) -> Result<(), ToolError>
where
    C: Connector + ?Sized,
    O: Write + ?Sized,
{
    let store = connector.connect().await?;

    let result = match store.find_first().await {
        Ok(customer) => {
            info!(found = customer.is_some(), "Connection check succeeded");
            writeln!(out, "{}", SUCCESS_MARKER)
                .map_err(ToolError::from)
                .and_then(|_| write_pretty(out, &customer))
        }
        Err(e) => Err(e),
    };

    release(store).await;
    result
}
