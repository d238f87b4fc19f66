//! Convenience macros for declaring migration fixtures.

/// Declare a [`MigrationFixtures`](crate::fixtures::MigrationFixtures) set inline.
///
/// Positional sources come first, separated by commas. Named sources follow
/// after a `;` as `id = source` pairs, where the id is either a bare
/// identifier or a string literal (for ids such as `"0002.sql"`).
///
/// ```
/// use migrate_fixtures::migrations_dir;
///
/// // 0.py and 1.py
/// let positional = migrations_dir!("CREATE TABLE t (id INT)", "DROP TABLE t");
/// assert_eq!(positional.len(), 2);
///
/// // first.py only
/// let named = migrations_dir!(; first = "CREATE TABLE t (id INT)");
/// assert_eq!(named.specs()[0].filename(), "first.py");
///
/// // 0.py, then 0002.sql
/// let mixed = migrations_dir!(
///     "CREATE TABLE t (id INT)";
///     "0002.sql" = "ALTER TABLE t ADD COLUMN name TEXT",
/// );
/// assert_eq!(mixed.specs()[1].filename(), "0002.sql");
/// ```
///
/// The `;` is required before named sources: without it, `first = "…"` would
/// parse as an assignment expression.
#[macro_export]
macro_rules! migrations_dir {
    ($($code:expr),* $(,)?) => {
        $crate::fixtures::MigrationFixtures::new()
            $(.migration($code))*
    };

    ($($code:expr),* ; $($id:tt = $named:expr),* $(,)?) => {
        $crate::fixtures::MigrationFixtures::new()
            $(.migration($code))*
            $(.named($crate::__migration_id!($id), $named))*
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __migration_id {
    ($id:ident) => {
        stringify!($id)
    };
    ($id:literal) => {
        $id.to_string()
    };
}
