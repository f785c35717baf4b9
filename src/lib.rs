//! Fetch, cache and rotate short inspirational quotes for a new-tab page.
//!
//! The retrieval pipeline lives in [`quotes`]; providers, the key-value
//! store and the cache are separate modules so each can be swapped in tests.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod providers;
pub mod quotes;
pub mod store;
