//! Terminal explorer for the public Marvel character catalog
//!
//! Signed requests against the character API, a client-side query pipeline
//! (search, filter, sort), and list, gallery and detail views.

pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod detail;
pub mod error;
pub mod fetch;
pub mod gallery;
pub mod list;
pub mod navigation;
pub mod query;
pub mod ui;
pub mod version;

#[cfg(test)]
mod tests;

pub use auth::{AuthParams, Credentials, RequestSigner};
pub use client::{CatalogApi, MarvelClient};
pub use config::{ClientConfig, Config};
pub use error::{ErrorCode, ExplorerError, Result};
pub use query::{CharacterFilter, Query, SortKey, SortOrder, SortSpec};
