//! Helper utilities for integration tests.

pub mod csv_fixtures;

pub use csv_fixtures::*;
