pub mod client;
pub mod fetcher;
pub mod models;

// Re-exports for convenience
pub use client::{ClientError, EtherscanClient, TransactionSource};
pub use fetcher::{AddressBatch, FetchStrategy, Fetcher};
