use crate::db::{Backend, Dialect};
use crate::error::{Error, Result};
use sqlx::{AnyConnection, Connection};
use tokio::runtime::Runtime;
use tracing::{debug, info};

/// URI of a private in-memory SQLite database, usable without any external service
pub const SQLITE_MEMORY_URI: &str = "sqlite::memory:";

/// Mask password in database URL for display
pub fn mask_url_password(url: &str) -> String {
    // Handle case where URL doesn't contain ://
    if !url.contains("://") {
        return url.to_string();
    }

    // Split on :// to get protocol and rest
    let parts: Vec<&str> = url.splitn(2, "://").collect();
    if parts.len() != 2 {
        return url.to_string();
    }

    let protocol = parts[0];
    let rest = parts[1];

    // Check if there's user info (user:pass@host or user@host)
    if let Some(at_pos) = rest.find('@') {
        let user_info = &rest[..at_pos];
        let host_and_path = &rest[at_pos + 1..];

        // Check if there's a password (user:pass)
        if let Some(colon_pos) = user_info.find(':') {
            let username = &user_info[..colon_pos];
            return format!("{}://{}:***@{}", protocol, username, host_and_path);
        }
    }

    url.to_string()
}

/// Connect to the database behind `uri`.
///
/// The connection is attempted once, without a timeout. Failures are returned
/// to the caller unchanged apart from carrying the URI.
pub fn get_backend(uri: &str) -> Result<SqlxBackend> {
    SqlxBackend::connect(uri)
}

/// A single sqlx connection driven synchronously.
///
/// Each backend owns a current-thread tokio runtime and blocks on it for every
/// call, so it must not be used from inside another tokio runtime.
pub struct SqlxBackend {
    uri: String,
    dialect: Dialect,
    // Declared before `runtime` so the connection drops while the runtime is alive
    conn: AnyConnection,
    runtime: Runtime,
}

impl SqlxBackend {
    pub fn connect(uri: &str) -> Result<Self> {
        let dialect = Dialect::from_uri(uri)?;
        sqlx::any::install_default_drivers();

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let conn = runtime
            .block_on(AnyConnection::connect(uri))
            .map_err(|source| Error::Connection {
                uri: uri.to_string(),
                source,
            })?;

        info!(
            "Connected to {} database at {}",
            dialect.name(),
            mask_url_password(uri)
        );

        Ok(Self {
            uri: uri.to_string(),
            dialect,
            conn,
            runtime,
        })
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Close the connection gracefully
    pub fn close(self) -> Result<()> {
        let Self { conn, runtime, .. } = self;
        runtime.block_on(conn.close())?;
        Ok(())
    }
}

impl std::fmt::Debug for SqlxBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlxBackend")
            .field("uri", &mask_url_password(&self.uri))
            .field("dialect", &self.dialect)
            .finish_non_exhaustive()
    }
}

impl Backend for SqlxBackend {
    fn execute(&mut self, sql: &str) -> Result<()> {
        debug!("Executing on {}: {}", self.dialect.name(), sql);
        self.runtime
            .block_on(sqlx::raw_sql(sql).execute(&mut self.conn))?;
        Ok(())
    }

    fn begin(&mut self) -> Result<()> {
        self.execute(self.dialect.begin_sql())
    }

    fn commit(&mut self) -> Result<()> {
        self.execute("COMMIT")
    }

    fn rollback(&mut self) -> Result<()> {
        self.execute("ROLLBACK")
    }

    fn list_tables(&mut self) -> Result<Vec<String>> {
        let tables = self.runtime.block_on(
            sqlx::query_scalar::<_, String>(self.dialect.list_tables_sql())
                .fetch_all(&mut self.conn),
        )?;
        Ok(tables)
    }

    fn quote_ident(&self, ident: &str) -> String {
        self.dialect.quote_ident(ident)
    }
}
