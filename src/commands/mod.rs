//! The two customer tools.
//!
//! Both follow the same lifecycle: acquire a [`CustomerStore`], issue one
//! request, write the result, release the store. They differ only in how a
//! failure maps onto the process exit status.

use std::io::Write;
use std::process::ExitCode;

use tracing::warn;

use crate::errors::ToolError;
use crate::repositories::CustomerStore;

pub mod check_connection;
pub mod list_customers;

/// Result of a tool invocation as seen by the operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn code(self) -> u8 {
        match self {
            Outcome::Success => 0,
            Outcome::Failure => 1,
        }
    }

    pub fn exit_code(self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

/// Releases the store; a failed close is logged and otherwise ignored
pub(crate) async fn release(store: Box<dyn CustomerStore>) {
    if let Err(e) = store.disconnect().await {
        warn!(error = %e, "Failed to close database connection");
    }
}

/// Writes `value` as indented JSON followed by a newline
pub(crate) fn write_pretty<W, T>(out: &mut W, value: &T) -> Result<(), ToolError>
where
    W: Write + ?Sized,
    T: serde::Serialize + ?Sized,
{
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
