//! Command-line entry point.
//!
//! Every flag of `serve` can also come from the environment, so the same
//! binary runs unchanged under a process manager or in a container.

mod commands;
pub mod error;


use std::net::IpAddr;

use clap::{ArgAction, Args, Parser, Subcommand};
use miette::Result;

use crate::api::DEFAULT_PORT;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://nestly.db";

#[derive(Parser, Debug)]
#[command(name = "nestly")]
#[command(author, version, about = "Todo CRUD service", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API server
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Host address to bind to
    #[arg(long, env = "NESTLY_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// SQLite connection URL; the file is created if missing
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Serve OpenAPI docs at /docs
    #[arg(long)]
    pub docs: bool,

    /// Per-request timeout in seconds
    #[arg(long, env = "NESTLY_REQUEST_TIMEOUT", default_value_t = 30)]
    pub request_timeout: u64,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => commands::serve::run(args, cli.verbose).await?,
    }

    Ok(())
}
