pub mod api;
pub mod config;
pub mod db;
pub mod errors;
pub mod feed;
pub mod ghl;
pub mod models;
pub mod observability;
pub mod publish;
pub mod schema;
pub mod state;
#[cfg(test)]
pub mod test_helpers;

pub use db::{DbPool, RqDbPool};
pub use state::{AppState, RqAppState};
