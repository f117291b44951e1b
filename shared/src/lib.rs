//! Shared types, calculations and validation for CHRONOS
//!
//! This crate contains the business rules shared between the backend, the
//! browser forms (via WASM), and other components of the system.

pub mod economics;
pub mod models;
pub mod numeric;
pub mod status;
pub mod types;
pub mod validation;

pub use economics::*;
pub use models::*;
pub use numeric::*;
pub use status::*;
pub use types::*;
pub use validation::*;
