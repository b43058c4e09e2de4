//! Test utilities for Autofix services.
//!
//! Provides the in-memory database factory and row seed helpers. Import in
//! `#[cfg(test)]` blocks and `tests/` only — never in production code.

pub mod db;
pub mod seed;
