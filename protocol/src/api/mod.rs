//! API DTOs module
//!
//! Request queries and response envelopes, one submodule per endpoint family:
//! - `character`: character list and lookup

pub mod character;

pub use character::*;
