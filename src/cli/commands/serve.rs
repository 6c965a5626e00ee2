//! Serve command - opens the store and starts the HTTP API.

use std::time::Duration;

use crate::api::{self, Config};
use crate::cli::ServeArgs;
use crate::cli::error::{CliError, CliResult};
use crate::db::{Database, SqliteDatabase};

/// Server configuration for the parsed `serve` flags.
pub fn config(args: &ServeArgs, verbosity: u8) -> Config {
    Config::default()
        .with_host(args.host)
        .with_port(args.port)
        .with_verbosity(verbosity)
        .with_docs(args.docs)
        .with_request_timeout(Duration::from_secs(args.request_timeout))
}

/// Run the API server
pub async fn run(args: ServeArgs, verbosity: u8) -> CliResult<()> {
    println!("Opening database at {}", args.database_url);

    let db = SqliteDatabase::open(&args.database_url).await?;

    // Run migrations before starting the server
    db.migrate().await?;
    println!("Database migrations complete");

    let config = config(&args, verbosity);
    let addr = config.addr();

    // Printed before api::run initializes logging
    println!();
    println!("nestly API server starting...");
    println!("   API:      http://{}/", addr);
    if config.enable_docs {
        println!("   Docs:     http://{}/docs", addr);
    }
    println!();

    api::run(config, db)
        .await
        .map_err(|source| CliError::Server { addr, source })
}
