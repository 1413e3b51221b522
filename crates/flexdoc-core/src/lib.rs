//! FlexDoc Core Library
//!
//! This crate provides the domain models, error types, configuration, validation,
//! and durable key-value storage shared across all FlexDoc client components.

pub mod config;
pub mod constants;
pub mod error;
pub mod keystore;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::ClientError;
pub use keystore::{FileKeyStore, KeyValueStore, MemoryKeyStore};
