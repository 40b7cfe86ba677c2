//! Infrastructure layer - Framework implementations
//!
//! This layer contains:
//! - Database connection and schema (db)
//! - HTTP router setup (server)
//! - Configuration loading (config)
//! - Demo data (seed)
//! - Application state (state)

pub mod config;
pub mod db;
pub mod seed;
pub mod server;
pub mod state;

pub use state::AppState;
