pub mod backends;
pub mod migrate_and_reset;
