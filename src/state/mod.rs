/// State management module
///
/// This module handles all application state, including:
/// - Database connection and raw queries (store.rs)
/// - Row to record translation (repository.rs)
/// - Shared data structures (data.rs)
/// - Form mode and intent handling (session.rs)
/// - First-launch sample recipes (seed.rs)

pub mod data;
pub mod repository;
pub mod seed;
pub mod session;
pub mod store;
