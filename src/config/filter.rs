use crate::config::types::BackendEntry;
use std::collections::HashSet;

/// Name filter deciding which configured test databases are selected.
///
/// A non-empty `only` set takes precedence: once it is given, `exclude` is
/// not consulted at all, even for names present in both sets.
pub struct BackendFilter {
    only: HashSet<String>,
    exclude: HashSet<String>,
}

impl BackendFilter {
    pub fn new(only: &[&str], exclude: &[&str]) -> Self {
        Self {
            only: only.iter().map(|name| name.to_string()).collect(),
            exclude: exclude.iter().map(|name| name.to_string()).collect(),
        }
    }

    /// Check if a database name should be selected
    pub fn should_include(&self, name: &str) -> bool {
        if !self.only.is_empty() {
            return self.only.contains(name);
        }

        !self.exclude.contains(name)
    }

    /// Apply the filter to entries, keeping declaration order
    pub fn filter_entries<'e>(
        &self,
        entries: &'e [BackendEntry],
    ) -> impl Iterator<Item = &'e BackendEntry> + use<'_, 'e> {
        entries
            .iter()
            .filter(move |entry| self.should_include(&entry.name))
    }
}
