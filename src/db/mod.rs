//! Local SQLite persistence.
//!
//! [`tasks::LocalStore`] is the `local` backend. It owns one connection,
//! migrated on open by [`migrations`], and implements every store trait:
//! tasks in [`tasks`], the profile row in [`users`] and the pinned task in
//! [`urgent_tasks`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use momentum::db::tasks::LocalStore;
//!
//! let store = LocalStore::open("momentum.db")?;
//! # Ok::<(), momentum::libs::error::StoreError>(())
//! ```

/// Connection setup for the application database.
pub mod db;

/// Versioned schema changes.
pub mod migrations;

/// Task rows and the [`tasks::LocalStore`] handle.
pub mod tasks;

/// Urgent task row, one per user.
pub mod urgent_tasks;

/// User profile rows.
pub mod users;
