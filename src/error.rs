use std::path::PathBuf;

use crate::db::connection::mask_url_password;

/// Error type for the migrate-fixtures crate.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to load test database configuration from {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("failed to connect to {}: {source}", mask_url_password(uri))]
    Connection {
        uri: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("unsupported database URI {}: no dialect for scheme '{scheme}'", mask_url_password(uri))]
    UnsupportedBackend { uri: String, scheme: String },

    #[error("migration file name '{filename}' is declared more than once")]
    DuplicateMigration { filename: String },

    #[error("{0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
