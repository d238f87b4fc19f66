pub mod filter;
pub mod types;


pub use filter::BackendFilter;
pub use types::*;

use crate::db::connection::get_backend;
use crate::db::SqlxBackend;
use crate::error::{Error, Result};
use ini::{Ini, ParseOption};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File holding the `name = uri` map of test databases
pub const CONFIG_FILE_NAME: &str = "test_databases.ini";

/// Section of the configuration file read for database entries
pub const DEFAULT_SECTION: &str = "DEFAULT";

/// Location of the test database configuration.
///
/// This module lives in `src/config/`; the file sits two directories up,
/// at the crate root, where the repository provides it.
pub fn default_config_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(CONFIG_FILE_NAME)
}

// Values are read literally, without quote stripping or backslash escapes
fn parse_option() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..Default::default()
    }
}

/// The configured test databases, loaded once and passed around by reference.
#[derive(Debug, Clone)]
pub struct TestDatabases {
    path: PathBuf,
    entries: Vec<BackendEntry>,
}

impl TestDatabases {
    /// Load the configuration from [`default_config_path`]
    pub fn load_default() -> Result<Self> {
        Self::load(default_config_path())
    }

    /// Load the configuration from an INI file.
    ///
    /// A missing or unreadable file is a configuration error, as is a name
    /// declared twice. A file without a `[DEFAULT]` section simply configures
    /// no databases.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let ini = Ini::load_from_file_opt(&path, parse_option()).map_err(|e| Error::Config {
            path: path.clone(),
            message: e.to_string(),
        })?;

        let databases = Self::from_ini(path, &ini)?;
        debug!(
            "Loaded {} test database(s) from {}",
            databases.entries.len(),
            databases.path.display()
        );
        Ok(databases)
    }

    /// Parse configuration text, e.g. for tests that build their own file contents
    pub fn parse(contents: &str) -> Result<Self> {
        let ini = Ini::load_from_str_opt(contents, parse_option()).map_err(|e| Error::Config {
            path: PathBuf::from("<string>"),
            message: e.to_string(),
        })?;

        Self::from_ini(PathBuf::from("<string>"), &ini)
    }

    pub fn from_entries(entries: Vec<BackendEntry>) -> Self {
        Self {
            path: PathBuf::from("<memory>"),
            entries,
        }
    }

    fn from_ini(path: PathBuf, ini: &Ini) -> Result<Self> {
        let mut entries = Vec::new();
        let mut seen = HashSet::new();

        if let Some(section) = ini.section(Some(DEFAULT_SECTION)) {
            for (name, uri) in section.iter() {
                if !seen.insert(name) {
                    return Err(Error::Config {
                        path,
                        message: format!(
                            "test database '{}' is declared more than once in [{}]",
                            name, DEFAULT_SECTION
                        ),
                    });
                }
                entries.push(BackendEntry::new(name, uri));
            }
        }

        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries, in file order
    pub fn entries(&self) -> &[BackendEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&BackendEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Entries selected by name.
    ///
    /// With a non-empty `only`, exactly the entries named in it are selected
    /// and `exclude` is ignored. Otherwise every entry not named in `exclude`
    /// is selected.
    pub fn select(&self, only: &[&str], exclude: &[&str]) -> Vec<&BackendEntry> {
        let filter = BackendFilter::new(only, exclude);
        filter.filter_entries(&self.entries).collect()
    }

    /// Connection URIs of the selected entries, in file order
    pub fn list_uris(&self, only: &[&str], exclude: &[&str]) -> Vec<String> {
        self.select(only, exclude)
            .into_iter()
            .map(|entry| entry.uri.clone())
            .collect()
    }

    /// Connect to every selected database, in file order.
    ///
    /// The first connection failure is returned as-is; no partial list is
    /// produced and nothing is retried.
    pub fn list_backends(&self, only: &[&str], exclude: &[&str]) -> Result<Vec<SqlxBackend>> {
        self.list_uris(only, exclude)
            .iter()
            .map(|uri| get_backend(uri))
            .collect()
    }
}
