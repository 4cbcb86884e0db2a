// Root library of the `slotfit` crate.
// Re-exports the main modules: domain models, scheduling algorithm,
// SQLite storage and the HTTP server.
pub mod algorithm;
pub mod models;
pub mod server;
pub mod server_handlers;
pub mod storage;

/// Runs the HTTP server (re-export for convenient use from `main`)
pub use server::run_server;
