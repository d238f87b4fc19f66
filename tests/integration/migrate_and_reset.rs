/// End-to-end flow: write migrations, apply them, then reset the database
use crate::helpers::harness::{apply_sql_migrations, with_sqlite_backend};
use anyhow::Result;
use migrate_fixtures::db::{Backend, reset, with_transaction};
use migrate_fixtures::migrations_dir;

#[test]
fn test_apply_fixture_migrations_then_reset() -> Result<()> {
    with_sqlite_backend(|backend| {
        let fixtures = migrations_dir!(;
            "0001_users.sql" = r#"
                CREATE TABLE users (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL
                );
            "#,
            "0002_posts.sql" = r#"
                CREATE TABLE posts (
                    id INTEGER PRIMARY KEY,
                    user_id INTEGER NOT NULL
                );
            "#,
        );

        let applied = fixtures.try_run(|dir| apply_sql_migrations(backend, dir))?;
        assert_eq!(applied, 2);
        assert_eq!(backend.list_tables()?, vec!["posts", "users"]);

        reset(backend)?;
        assert!(backend.list_tables()?.is_empty());
        Ok(())
    })
}

#[test]
fn test_reset_between_test_runs() -> Result<()> {
    with_sqlite_backend(|backend| {
        for run in 0..2 {
            backend.execute("CREATE TABLE a (id INTEGER); CREATE TABLE b (id INTEGER)")?;
            assert_eq!(backend.list_tables()?, vec!["a", "b"], "run {run}");

            reset(backend)?;
            assert!(backend.list_tables()?.is_empty(), "run {run}");
        }
        Ok(())
    })
}

#[test]
fn test_failed_drop_rolls_back_every_drop() -> Result<()> {
    with_sqlite_backend(|backend| {
        backend.execute("CREATE TABLE a (id INTEGER); CREATE TABLE b (id INTEGER)")?;

        let result: migrate_fixtures::Result<()> = with_transaction(backend, |backend| {
            backend.execute("DROP TABLE a")?;
            backend.execute("DROP TABLE no_such_table")
        });

        assert!(result.is_err());
        assert_eq!(backend.list_tables()?, vec!["a", "b"]);
        Ok(())
    })
}
