use anyhow::Result;
use migrate_fixtures::db::{Backend, SQLITE_MEMORY_URI, SqlxBackend, get_backend};
use migrate_fixtures::TestDatabases;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tracing_subscriber::{EnvFilter, fmt};

/// Route library logs through the test harness, filtered by `RUST_LOG`.
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_test_logging() {
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_test_writer()
        .try_init();
}

/// A test_databases.ini written into its own temporary directory
pub struct TestConfig {
    _temp_dir: TempDir,
    pub databases: TestDatabases,
}

impl TestConfig {
    pub fn new(contents: &str) -> Result<Self> {
        init_test_logging();
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("test_databases.ini");
        fs::write(&path, contents)?;

        Ok(Self {
            databases: TestDatabases::load(&path)?,
            _temp_dir: temp_dir,
        })
    }
}

/// Run a test against a private in-memory SQLite database
pub fn with_sqlite_backend<F, R>(test_fn: F) -> R
where
    F: FnOnce(&mut SqlxBackend) -> R,
{
    init_test_logging();
    let mut backend =
        get_backend(SQLITE_MEMORY_URI).expect("Failed to open in-memory SQLite database");
    test_fn(&mut backend)
}

/// File name -> contents for every file directly inside `dir`
pub fn read_dir_contents(dir: &Path) -> Result<BTreeMap<String, String>> {
    let mut files = BTreeMap::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        files.insert(name, fs::read_to_string(entry.path())?);
    }
    Ok(files)
}

/// Minimal stand-in for a migration engine: apply every `.sql` file in the
/// directory, in file name order
pub fn apply_sql_migrations(backend: &mut dyn Backend, dir: &Path) -> Result<usize> {
    let mut paths: Vec<_> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "sql"))
        .collect();
    paths.sort();

    for path in &paths {
        backend.execute(&fs::read_to_string(path)?)?;
    }
    Ok(paths.len())
}
