//! # migrate-fixtures
//!
//! Test fixtures for exercising a migration engine against several databases.
//!
//! - [`fixtures`]: write inline migration sources into a temporary directory
//!   that is removed when the test is done, however it ends.
//! - [`config`]: resolve the test databases listed in `test_databases.ini`,
//!   filtered by name.
//! - [`db`]: connect to those databases and reset them by dropping every table.
//!
//! ```
//! use migrate_fixtures::db::{Backend, SQLITE_MEMORY_URI, get_backend, reset};
//! use migrate_fixtures::migrations_dir;
//!
//! let mut backend = get_backend(SQLITE_MEMORY_URI).unwrap();
//!
//! migrations_dir!("CREATE TABLE t (id INT)"; cleanup = "DROP TABLE t")
//!     .run(|dir| {
//!         // hand `dir` to the migration engine under test
//!         assert!(dir.join("0.py").exists());
//!         assert!(dir.join("cleanup.py").exists());
//!     })
//!     .unwrap();
//!
//! backend.execute("CREATE TABLE leftover (id INT)").unwrap();
//! reset(&mut backend).unwrap();
//! assert!(backend.list_tables().unwrap().is_empty());
//! ```

#[macro_use]
mod macros;

pub mod config;
pub mod db;
pub mod error;
pub mod fixtures;

pub use config::{BackendEntry, TestDatabases};
pub use db::{Backend, SqlxBackend, get_backend, reset, with_transaction};
pub use error::{Error, Result};
pub use fixtures::{
    MigrationFixtures, MigrationSpec, MigrationsDir, ScopedTempDir, migrations, tempdir,
    with_tempdir,
};
