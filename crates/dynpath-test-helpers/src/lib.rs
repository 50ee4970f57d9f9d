//! Test utilities and fixtures for dynpath
//!
//! Shared by the integration tests (tests/ directories) of the workspace crates.

pub mod compile;
pub mod fixtures;
pub mod mocks;
