pub mod api;
pub mod cache;
pub mod config;
pub mod db;
pub mod explorer;
pub mod models;
pub mod notify;
pub mod pipeline;
pub mod report;
pub mod sources;
pub mod state;
pub mod validation;

#[cfg(test)]
pub mod tests;

// Re-export specific items for convenience
pub use api::error::ApiError;
pub use api::route::create_router;
pub use config::{Config, ConfigError};
pub use db::connection;
pub use models::{ClassifiedAlert, Label, Outcome, PersistedAlert, Transaction};
pub use pipeline::{classify, AlertPolicy, AlertProcessor, Poller};
pub use validation::{validate_action, validate_address_action, validate_eth_address};
