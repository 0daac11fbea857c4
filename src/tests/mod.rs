//! Shared fixtures and stubs for unit tests

pub mod mocks;
pub mod utils;
