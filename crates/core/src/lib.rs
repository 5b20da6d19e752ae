//! Core types and shared functionality for websift.
//!
//! This crate provides:
//! - Unified error types
//! - Configuration structures
//! - Value records returned by the search and fetch tools

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use types::{FetchOptions, FetchOutcome, Link, SearchResult};
