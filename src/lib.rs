//! Leave Balance Engine
//!
//! This crate computes employee leave balances (annual, sick and emergency
//! leave) from join dates, per-company leave settings and leave requests.
//! Every figure is accompanied by an audit trail of the rules applied.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod sources;
