//! Command implementations.

pub mod zip;
