//! Business logic services for CHRONOS

pub mod bank;
pub mod client;
pub mod distributor;
pub mod purchase_order;
pub mod sale;

pub use bank::BankService;
pub use client::ClientService;
pub use distributor::DistributorService;
pub use purchase_order::{PurchaseOrderFilter, PurchaseOrderService};
pub use sale::{SaleFilter, SaleService};
