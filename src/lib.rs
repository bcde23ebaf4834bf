//! Expense Track API Library
//!
//! This library provides the core functionality for the expense tracking
//! API: the expense workflow domain (visibility, review transitions,
//! reporting), repository adapters, and the HTTP layer.

pub mod api;
pub mod auth;
pub mod domain;
pub mod infrastructure;
