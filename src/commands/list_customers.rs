use std::io::Write;

use tracing::{error, info};

use super::{release, write_pretty, Outcome};
use crate::errors::ToolError;
use crate::repositories::{Connector, CustomerStore};

/// Prints every customer, ordered by name, as indented JSON on `out`.
///
/// Any failure is fatal: the error goes to `err` and the outcome is
/// [`Outcome::Failure`]. The store is released on every path once it has
/// been acquired.
pub async fn run<C, O, E>(connector: &C, out: &mut O, err: &mut E) -> Outcome
where
    C: Connector + ?Sized,
    O: Write + ?Sized,
    E: Write + ?Sized,
{
    let store = match connector.connect().await {
        Ok(store) => store,
        Err(e) => return fail(err, &e),
    };

    let result = print_customers(store.as_ref(), out).await;

    let outcome = match result {
        Ok(count) => {
            info!(count, "Listed customers");
            Outcome::Success
        }
        Err(e) => fail(err, &e),
    };

    release(store).await;
    outcome
}

async fn print_customers<O>(store: &dyn CustomerStore, out: &mut O) -> Result<usize, ToolError>
where
    O: Write + ?Sized,
{
    let customers = store.find_many_ordered_by_name().await?;
    write_pretty(out, &customers)?;
    Ok(customers.len())
}

fn fail<E: Write + ?Sized>(err: &mut E, e: &ToolError) -> Outcome {
    error!(error = %e, "Listing customers failed");
    let _ = writeln!(err, "{}", e);
    Outcome::Failure
}
