//! # Momentum - ordered personal task lists
//!
//! Keeps a user's tasks in a stable, user-defined order and in sync with a
//! persistence backend.
//!
//! ## Features
//!
//! - **Task Order Manager**: add, edit, complete, delete and reorder tasks
//!   against a store, with confirmed writes and an optimistic reorder
//! - **Interchangeable Stores**: Supabase (PostgREST), local SQLite or an
//!   in-memory development store, picked once from configuration
//! - **Statistics**: totals and per-day counts derived from the task list
//! - **Profiles and Urgent Task**: display name onboarding and a single
//!   pinned task per user
//!
//! ## Usage
//!
//! ```rust,no_run
//! use momentum::libs::manager::TaskOrderManager;
//! use momentum::libs::mock::{MockStore, DEV_USER_ID};
//!
//! # async fn run() -> momentum::libs::error::Result<()> {
//! let mut manager = TaskOrderManager::new(MockStore::seeded(DEV_USER_ID), DEV_USER_ID);
//! manager.load().await?;
//! let task = manager.add_task("Water plants", "", None).await?;
//! manager.move_task(&task.id, 0).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;
