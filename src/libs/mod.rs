//! Core library: domain types, the task order manager and its services.
//!
//! Persistence providers live in [`crate::api`] (remote) and [`crate::db`]
//! (local); everything here only sees the traits in [`store`].

pub mod backend;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod feedback;
pub mod manager;
pub mod messages;
pub mod mock;
pub mod mutation;
pub mod profile;
pub mod session;
pub mod stats;
pub mod store;
pub mod task;
pub mod urgent;
pub mod view;
