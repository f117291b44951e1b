//! Domain models used by the backend
//!
//! Everything lives in the shared crate so the browser forms validate and
//! calculate with the same types.

pub use shared::models::*;
