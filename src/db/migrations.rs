//! Schema versioning for the local SQLite store.
//!
//! Applied migrations are recorded in a `migrations` table; on open every
//! migration with a higher version than the recorded maximum runs inside its
//! own transaction, in version order.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use momentum::db::migrations::{get_db_version, init_with_migrations};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open("momentum.db")?;
//! init_with_migrations(&mut conn)?;
//! let version = get_db_version(&conn)?;
//! # Ok::<(), rusqlite::Error>(())
//! ```

use rusqlite::{params, Connection, Transaction};

const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> rusqlite::Result<()>,
}

/// Registry of all migrations in version order.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        // Version 1: tasks, keyed by an opaque text id and ordered per user
        self.add_migration(1, "create_tasks", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS tasks (
                    id TEXT NOT NULL PRIMARY KEY,
                    user_id TEXT NOT NULL,
                    title TEXT NOT NULL,
                    description TEXT NOT NULL DEFAULT '',
                    due_date DATE,
                    completed BOOLEAN NOT NULL DEFAULT FALSE,
                    task_order INTEGER NOT NULL DEFAULT 0,
                    created_at TIMESTAMP NOT NULL,
                    updated_at TIMESTAMP NOT NULL
                )",
                [],
            )?;
            tx.execute(
                "CREATE INDEX IF NOT EXISTS idx_tasks_user_order ON tasks(user_id, task_order)",
                [],
            )?;
            Ok(())
        });

        // Version 2: user profiles
        self.add_migration(2, "create_users", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS users (
                    id TEXT NOT NULL PRIMARY KEY,
                    display_name TEXT NOT NULL,
                    created_at TIMESTAMP NOT NULL,
                    updated_at TIMESTAMP NOT NULL
                )",
                [],
            )?;
            Ok(())
        });

        // Version 3: one urgent task per user
        self.add_migration(3, "create_urgent_tasks", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS urgent_tasks (
                    id TEXT NOT NULL PRIMARY KEY,
                    user_id TEXT NOT NULL UNIQUE,
                    title TEXT NOT NULL,
                    created_at TIMESTAMP NOT NULL,
                    updated_at TIMESTAMP NOT NULL
                )",
                [],
            )?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> rusqlite::Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Applies every migration newer than the recorded version.
    pub fn migrate(&self, conn: &mut Connection) -> rusqlite::Result<u32> {
        conn.execute(MIGRATIONS_TABLE, [])?;
        let current = get_db_version(conn)?;
        let mut applied = 0;

        for migration in self.migrations.iter().filter(|m| m.version > current) {
            let tx = conn.transaction()?;
            (migration.up)(&tx)?;
            tx.execute(
                "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                params![migration.version, migration.name],
            )?;
            tx.commit()?;
            tracing::debug!(version = migration.version, name = migration.name, "migration applied");
            applied += 1;
        }

        Ok(applied)
    }

    pub fn latest_version(&self) -> u32 {
        self.migrations.iter().map(|m| m.version).max().unwrap_or(0)
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Highest applied migration version, `0` for a fresh database.
pub fn get_db_version(conn: &Connection) -> rusqlite::Result<u32> {
    conn.query_row("SELECT COALESCE(MAX(version), 0) FROM migrations", [], |row| row.get(0))
}

pub fn init_with_migrations(conn: &mut Connection) -> rusqlite::Result<()> {
    MigrationManager::new().migrate(conn)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrates_fresh_database_to_latest() {
        let mut conn = Connection::open_in_memory().unwrap();
        let manager = MigrationManager::new();
        assert_eq!(manager.migrate(&mut conn).unwrap(), 3);
        assert_eq!(get_db_version(&conn).unwrap(), manager.latest_version());
    }

    #[test]
    fn second_run_applies_nothing() {
        let mut conn = Connection::open_in_memory().unwrap();
        init_with_migrations(&mut conn).unwrap();
        assert_eq!(MigrationManager::new().migrate(&mut conn).unwrap(), 0);
    }
}
