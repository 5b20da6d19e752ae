//! Client code for websift.
//!
//! This crate provides the bounded HTTP fetch pipeline, the DuckDuckGo HTML
//! search client, and readable content extraction shared by the server.

pub mod extract;
pub mod fetch;
pub mod reader;
pub mod search;

pub use extract::{Article, ExtractConfig, Extractor, ReadabilityExtractor, extract_readable, extract_with};
pub use fetch::{BoundedFetcher, Body, FetchResponse, HttpTransport, TransportConfig, TransportResponse, read_bounded};
pub use reader::PageReader;
pub use search::{SearchClient, normalize_link, parse_results};
