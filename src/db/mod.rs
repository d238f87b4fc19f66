pub mod cleaner;
pub mod connection;
pub mod dialect;

pub use cleaner::reset;
pub use connection::{SQLITE_MEMORY_URI, SqlxBackend, get_backend, mask_url_password};
pub use dialect::Dialect;

use crate::error::Result;
use tracing::warn;

/// Capabilities the fixtures need from a live database connection.
///
/// Calls block the current thread until the database answers.
pub trait Backend {
    /// Execute one or more SQL statements, discarding any rows
    fn execute(&mut self, sql: &str) -> Result<()>;

    fn begin(&mut self) -> Result<()>;

    fn commit(&mut self) -> Result<()>;

    fn rollback(&mut self) -> Result<()>;

    /// Names of the user tables visible to this connection
    fn list_tables(&mut self) -> Result<Vec<String>>;

    /// Quote an identifier for interpolation into SQL
    fn quote_ident(&self, ident: &str) -> String {
        Dialect::Postgres.quote_ident(ident)
    }
}

/// Run `f` inside a transaction on `backend`.
///
/// Commits when `f` succeeds. When `f` or the commit fails the transaction is
/// rolled back and that error is returned; a failing rollback is logged, not
/// returned.
pub fn with_transaction<B, T, F>(backend: &mut B, f: F) -> Result<T>
where
    B: Backend + ?Sized,
    F: FnOnce(&mut B) -> Result<T>,
{
    backend.begin()?;

    let result = f(backend).and_then(|value| backend.commit().map(|()| value));
    if let Err(e) = &result {
        if let Err(rollback_err) = backend.rollback() {
            warn!("Rollback failed after error '{}': {}", e, rollback_err);
        }
    }
    result
}
