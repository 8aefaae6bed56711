//! Core client logic
//!
//! This module contains the client-side data, search and aggregation layer:
//! - `traits` - The request handler seam shared by every backend
//! - `record_store` - Versioned, subscribable snapshot of customer records
//! - `validation` - Form rules evaluated before any request is issued
//! - `query` - Pure search functions over a record set
//! - `synthesis` - Placeholder values for display-only statistics
//! - `aggregator` - Dashboard statistics
//! - `service` - Customer API client driving the record store

pub mod aggregator;
pub mod query;
pub mod record_store;
pub mod service;
pub mod synthesis;
pub mod traits;
pub mod validation;

pub use aggregator::{Aggregator, DashboardStats, DisplayRecord};
pub use record_store::{RecordStore, RefreshOutcome, Snapshot};
pub use service::CustomerService;
pub use synthesis::{FixedSynthesizer, SeededSynthesizer, Synthesizer};
pub use traits::RequestHandler;
