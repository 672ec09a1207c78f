//! Route handlers, one module per area:
//! - routes::transactions: ledger list, create, clear, summary, CSV export
//! - routes::assistant: the assistant gateway endpoint
//! - routes::page: the embedded single-page UI

pub mod assistant;
pub mod page;
pub mod transactions;
