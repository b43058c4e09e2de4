//! Domain types shared across the Autofix workspace.
//!
//! This crate contains only pure types and rules with no framework
//! dependencies. Import in `usecase/` and `domain/` layers; never in
//! `infra/` or `handlers/`.

pub mod access;
pub mod pagination;
pub mod position;
pub mod validation;
