//! Inline migration fixtures.
//!
//! Tests declare migration sources as strings; [`MigrationFixtures`] writes
//! them into a fresh temporary directory for a migration engine to discover,
//! and removes the directory when the test is done with it.
//!
//! ```
//! use migrate_fixtures::migrations_dir;
//!
//! let fixtures = migrations_dir!(
//!     "CREATE TABLE t (id INT)",
//!     "DROP TABLE t";
//!     seed = "INSERT INTO t VALUES (1)",
//! );
//!
//! fixtures
//!     .run(|dir| {
//!         assert!(dir.join("0.py").exists());
//!         assert!(dir.join("1.py").exists());
//!         assert!(dir.join("seed.py").exists());
//!     })
//!     .unwrap();
//! ```

pub mod tempdir;
pub mod text;

pub use tempdir::{ScopedTempDir, tempdir, with_tempdir};

use crate::error::{Error, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File extension of a migration source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationExtension {
    Py,
    Sql,
}

impl MigrationExtension {
    /// Extension given to ids that carry no recognized one
    pub const DEFAULT: MigrationExtension = MigrationExtension::Py;

    /// Recognize an id's own extension, if it has one of ours
    pub fn of_id(id: &str) -> Option<Self> {
        match Path::new(id).extension().and_then(|ext| ext.to_str()) {
            Some("py") => Some(MigrationExtension::Py),
            Some("sql") => Some(MigrationExtension::Sql),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MigrationExtension::Py => "py",
            MigrationExtension::Sql => "sql",
        }
    }
}

/// One migration to materialize: its id and its source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationSpec {
    pub id: String,
    pub code: String,
}

impl MigrationSpec {
    pub fn new(id: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
        }
    }

    /// A migration declared by position; its id is the index
    pub fn positional(index: usize, code: impl Into<String>) -> Self {
        Self::new(index.to_string(), code)
    }

    pub fn extension(&self) -> MigrationExtension {
        MigrationExtension::of_id(&self.id).unwrap_or(MigrationExtension::DEFAULT)
    }

    /// File name inside the migrations directory.
    ///
    /// Ids ending in `.py` or `.sql` are used as they are; any other id gets
    /// `.py` appended.
    pub fn filename(&self) -> String {
        match MigrationExtension::of_id(&self.id) {
            Some(_) => self.id.clone(),
            None => format!("{}.{}", self.id, MigrationExtension::DEFAULT.as_str()),
        }
    }

    /// Text written to the file: dedented, with surrounding whitespace removed
    pub fn contents(&self) -> String {
        text::normalize_source(&self.code)
    }

    fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.filename());
        fs::write(&path, self.contents())?;
        debug!("Wrote migration {}", path.display());
        Ok(path)
    }
}

/// A set of inline migrations to write into a temporary directory.
///
/// Positional migrations get ids `0`, `1`, `2`, … in the order they were
/// added; named migrations use their name as id. Files are written positional
/// first, then named, each in declaration order.
///
/// The set can be used as a scope (`create` returns a guard that removes the
/// directory when dropped or closed) or as a wrapper around a test body
/// (`run`/`try_run` pass the directory path to a closure).
#[derive(Debug, Clone, Default)]
pub struct MigrationFixtures {
    positional: Vec<String>,
    named: Vec<(String, String)>,
}

impl MigrationFixtures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a positional migration
    pub fn migration(mut self, code: impl Into<String>) -> Self {
        self.positional.push(code.into());
        self
    }

    /// Add a migration with an explicit id, e.g. `"first"` or `"0002.sql"`
    pub fn named(mut self, id: impl Into<String>, code: impl Into<String>) -> Self {
        self.named.push((id.into(), code.into()));
        self
    }

    /// The migrations in the order their files are written
    pub fn specs(&self) -> Vec<MigrationSpec> {
        self.positional
            .iter()
            .enumerate()
            .map(|(index, code)| MigrationSpec::positional(index, code.as_str()))
            .chain(
                self.named
                    .iter()
                    .map(|(id, code)| MigrationSpec::new(id.as_str(), code.as_str())),
            )
            .collect()
    }

    pub fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Create the temporary directory and write every migration into it.
    ///
    /// Two ids that map to the same file name are rejected before anything is
    /// created. If a write fails, the directory is removed before the error is
    /// returned.
    pub fn create(&self) -> Result<MigrationsDir> {
        let specs = self.specs();
        check_unique_filenames(&specs)?;

        populate(ScopedTempDir::new()?, &specs)
    }

    /// Run `f` with the path of a freshly written migrations directory.
    ///
    /// The directory is removed after `f` returns, and also when `f` panics,
    /// in which case the panic carries on unchanged.
    pub fn run<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&Path) -> R,
    {
        let dir = self.create()?;
        let result = f(dir.path());
        dir.close()?;
        Ok(result)
    }

    /// Like [`MigrationFixtures::run`] for fallible test bodies.
    ///
    /// When `f` fails, its error is returned after the directory has been
    /// removed; a failure to remove the directory is then only logged.
    pub fn try_run<F, T, E>(&self, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&Path) -> std::result::Result<T, E>,
        E: From<Error>,
    {
        let dir = self.create()?;
        match f(dir.path()) {
            Ok(value) => {
                dir.close()?;
                Ok(value)
            }
            Err(e) => {
                drop(dir);
                Err(e)
            }
        }
    }
}

// Takes ownership of `dir` so a failed write drops, and so removes, it.
fn populate(dir: ScopedTempDir, specs: &[MigrationSpec]) -> Result<MigrationsDir> {
    let files = specs
        .iter()
        .map(|spec| spec.write_to(dir.path()))
        .collect::<Result<Vec<_>>>()?;

    info!(
        "Created migrations directory {} with {} migration(s)",
        dir.path().display(),
        files.len()
    );

    Ok(MigrationsDir { dir, files })
}

fn check_unique_filenames(specs: &[MigrationSpec]) -> Result<()> {
    let mut seen = HashSet::new();
    for spec in specs {
        let filename = spec.filename();
        if !seen.insert(filename.clone()) {
            return Err(Error::DuplicateMigration { filename });
        }
    }
    Ok(())
}

/// Positional migrations from a list of sources
pub fn migrations<I, S>(codes: I) -> MigrationFixtures
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    codes
        .into_iter()
        .fold(MigrationFixtures::new(), |fixtures, code| fixtures.migration(code))
}

/// A written migrations directory, removed when closed or dropped
#[derive(Debug)]
pub struct MigrationsDir {
    dir: ScopedTempDir,
    files: Vec<PathBuf>,
}

impl MigrationsDir {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Paths of the written migration files, in write order
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Remove the directory now, reporting any failure
    pub fn close(self) -> Result<()> {
        self.dir.close()
    }
}

impl AsRef<Path> for MigrationsDir {
    fn as_ref(&self) -> &Path {
        self.path()
    }
}
