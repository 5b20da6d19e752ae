//! MCP tool implementations.
//!
//! This module contains all tools exposed by the websift server.

pub mod fetch_page;
pub mod search_web;
