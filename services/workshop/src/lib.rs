//! Workshop service: repair orders, warehouse stock and the staff,
//! client and vehicle records behind them.

pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod infra;
pub mod router;
pub mod state;
pub mod usecase;
