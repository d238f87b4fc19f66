use crate::db::{Backend, with_transaction};
use crate::error::Result;
use tracing::{debug, info};

/// Drop every table visible to `backend`, inside a single transaction.
///
/// Tables are dropped in the order the backend lists them, with no regard for
/// foreign keys between them. A drop rejected by the database rolls the
/// transaction back and the database error is returned unchanged. On MySQL,
/// DDL commits implicitly, so tables dropped before a failure stay dropped.
/// SQLite connections have `foreign_keys` enabled, so dropping a populated
/// parent table before its children fails there too.
pub fn reset<B: Backend + ?Sized>(backend: &mut B) -> Result<()> {
    let dropped = with_transaction(backend, |backend| {
        let tables = backend.list_tables()?;
        for table in &tables {
            debug!("Dropping table {}", table);
            let drop_stmt = format!("DROP TABLE {}", backend.quote_ident(table));
            backend.execute(&drop_stmt)?;
        }
        Ok(tables.len())
    })?;

    info!("Reset database: dropped {} table(s)", dropped);
    Ok(())
}
