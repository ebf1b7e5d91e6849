use super::migrations::init_with_migrations;
use crate::libs::data_storage::DataStorage;
use rusqlite::Connection;
use std::path::Path;

pub const DB_FILE_NAME: &str = "momentum.db";

/// An open, migrated SQLite connection.
pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the database in the application data directory.
    pub fn new() -> anyhow::Result<Db> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        Ok(Self::open(db_file_path)?)
    }

    pub fn open(path: impl AsRef<Path>) -> rusqlite::Result<Db> {
        let conn = Connection::open(path)?;
        Self::prepare(conn)
    }

    /// Private in-memory database; used by tests.
    pub fn in_memory() -> rusqlite::Result<Db> {
        Self::prepare(Connection::open_in_memory()?)
    }

    fn prepare(mut conn: Connection) -> rusqlite::Result<Db> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        init_with_migrations(&mut conn)?;
        Ok(Db { conn })
    }
}
