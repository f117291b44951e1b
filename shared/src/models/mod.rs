//! Domain models for CHRONOS

mod bank;
mod client;
mod distributor;
mod movement;
mod product;
mod purchase_order;
mod sale;

pub use bank::*;
pub use client::*;
pub use distributor::*;
pub use movement::*;
pub use product::*;
pub use purchase_order::*;
pub use sale::*;
