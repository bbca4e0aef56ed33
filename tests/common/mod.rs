//! Shared test utilities.

pub mod helpers;
