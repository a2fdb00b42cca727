//! Prints every customer, ordered by name, as indented JSON.
//!
//! Run with: cargo run --bin list-customers -- [--database-url <URL>]
//!
//! Exits with status 1 on any failure.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use customer_db_tools::{
    build_config::LONG_VERSION,
    commands::list_customers,
    config,
    db::DbConfig,
    Outcome,
};

#[derive(Parser)]
#[command(
    name = "list-customers",
    about = "Print all customers ordered by name as JSON",
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

    let cfg = match config::load_config()
        .and_then(|cfg| cfg.with_database_url(cli.database_url))
    {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{}", e);
            return Outcome::Failure.exit_code();
        }
    };
    config::init_tracing(cfg.log_level(), cfg.log_json);

    let db_config = DbConfig::from(&cfg);
    let outcome = list_customers::run(
        &db_config,
        &mut io::stdout().lock(),
        &mut io::stderr().lock(),
    )
    .await;

    outcome.exit_code()
}
