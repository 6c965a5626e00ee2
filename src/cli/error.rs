use std::net::SocketAddr;

use miette::Diagnostic;
use thiserror::Error;

use crate::db::DbError;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Database(#[from] DbError),

    #[error("Server on {addr} failed")]
    #[diagnostic(
        code(nestly::cli::server),
        help("Is another process listening on this address? Try --port or set PORT.")
    )]
    Server {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

pub type CliResult<T> = Result<T, CliError>;
