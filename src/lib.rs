//! Leave and Time Accounting Engine
//!
//! This crate provides the policy core of a people-operations service: PTO
//! accrual and balances, leave approval routing, daily overtime
//! classification, and the authorization gates for approvals and profile
//! edits, together with an HTTP API over an in-memory store.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod policy;
pub mod store;
