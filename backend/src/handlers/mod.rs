//! HTTP handlers for the CHRONOS API

mod bank;
mod calculation;
mod client;
mod distributor;
mod health;
mod purchase_order;
mod sale;

pub use bank::*;
pub use calculation::*;
pub use client::*;
pub use distributor::*;
pub use health::*;
pub use purchase_order::*;
pub use sale::*;
