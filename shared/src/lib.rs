//! Shared types and models for the Farmsight crop monitoring platform
//!
//! This crate contains types shared between the analysis engine and the
//! presentation layer (dashboard, report generators).

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
