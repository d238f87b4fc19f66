/// Tests for connecting to the configured test databases
use crate::helpers::harness::TestConfig;
use anyhow::Result;
use migrate_fixtures::db::{Backend, Dialect};
use migrate_fixtures::{Error, TestDatabases};

#[test]
fn test_list_backends_connects_in_order() -> Result<()> {
    let config = TestConfig::new(
        "[DEFAULT]\nfirst = sqlite::memory:\nsecond = sqlite::memory:\n",
    )?;

    let mut backends = config.databases.list_backends(&[], &[])?;

    assert_eq!(backends.len(), 2);
    // each handle is its own database
    backends[0].execute("CREATE TABLE only_in_first (id INTEGER)")?;
    assert_eq!(backends[0].list_tables()?, vec!["only_in_first"]);
    assert!(backends[1].list_tables()?.is_empty());
    Ok(())
}

#[test]
fn test_list_backends_honours_exclude() -> Result<()> {
    let config = TestConfig::new(
        "[DEFAULT]\nsqlite = sqlite::memory:\nbroken = oracle://localhost/db\n",
    )?;

    let backends = config.databases.list_backends(&[], &["broken"])?;

    assert_eq!(backends.len(), 1);
    assert_eq!(backends[0].dialect(), Dialect::Sqlite);
    Ok(())
}

#[test]
fn test_connection_failure_propagates_without_partial_result() -> Result<()> {
    let config = TestConfig::new(
        "[DEFAULT]\nok = sqlite::memory:\nmissing = sqlite:///definitely/not/here/test.db\n",
    )?;

    let err = config.databases.list_backends(&[], &[]).err().unwrap();

    match err {
        Error::Connection { uri, .. } => assert!(uri.contains("definitely/not/here")),
        other => panic!("expected connection error, got {other}"),
    }
    Ok(())
}

#[test]
fn test_repository_sqlite_backend_is_usable() -> Result<()> {
    let databases = TestDatabases::load_default()?;

    let mut backends = databases.list_backends(&["sqlite"], &[])?;

    assert_eq!(backends.len(), 1);
    assert!(backends[0].list_tables()?.is_empty());
    Ok(())
}
