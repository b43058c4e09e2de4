//! Identity types injected by the authenticating presentation layer.

pub mod identity;
