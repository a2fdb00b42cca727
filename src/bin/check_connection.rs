//! Smoke-tests the database by fetching at most one customer.
//!
//! Run with: cargo run --bin check-connection -- [--database-url <URL>]
//!
//! Failures are printed to stderr; the exit status is always 0.

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use customer_db_tools::{
    build_config::LONG_VERSION,
    commands::check_connection::{self, FAILURE_MARKER},
    config,
    db::DbConfig,
    Outcome,
};

#[derive(Parser)]
#[command(
    name = "check-connection",
    about = "Check the database round trip by fetching one customer",
    version,
    long_version = LONG_VERSION
)]
struct Cli {
    #[arg(long, help = "Database URL; overrides DATABASE_URL and config files")]
    database_url: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut stderr = io::stderr().lock();

    let cfg = match config::load_config()
        .and_then(|cfg| cfg.with_database_url(cli.database_url))
    {
        Ok(cfg) => cfg,
        Err(e) => {
            let _ = writeln!(stderr, "{} {}", FAILURE_MARKER, e);
            return Outcome::Success.exit_code();
        }
    };
    config::init_tracing(cfg.log_level(), cfg.log_json);

    let db_config = DbConfig::from(&cfg);
    check_connection::run(&db_config, &mut io::stdout().lock(), &mut stderr)
        .await
        .exit_code()
}
