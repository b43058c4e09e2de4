//! Ambient service plumbing shared across Autofix services: health
//! endpoints, tracing setup, request-id middleware.

pub mod health;
pub mod middleware;
pub mod tracing;
