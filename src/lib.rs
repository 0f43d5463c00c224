//! Pawbridge - Pet Marketplace Backend Core
//!
//! This crate implements the admission and state-synchronization core of the
//! Pawbridge marketplace: consult-request admission control with single-use
//! emergency override codes, and idempotent billing subscription sync.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
