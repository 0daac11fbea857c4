//! Wire types for the Marvel public character API
//!
//! - `common`: the character record and its nested value types
//! - `api`: request queries and response envelopes per endpoint

pub mod api;
pub mod common;

pub use api::*;
pub use common::*;
