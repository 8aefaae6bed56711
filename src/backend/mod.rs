//! Backend selection for the customer service
//!
//! Requests from [`crate::core::CustomerService`] go through a single
//! [`RequestHandler`]. Which handler that is gets decided once, at
//! configuration time, by [`create_backend`]:
//!
//! - **simulated**: the in-memory [`SimulatedBackend`] in front of the
//!   pass-through terminal; anything it does not intercept fails as
//!   unreachable
//! - **offline**: the pass-through terminal alone, i.e. a client whose real
//!   backend is down

use crate::cli::BackendKind;
use crate::core::traits::RequestHandler;
use crate::types::Customer;
use chrono::NaiveDate;

pub mod offline;
pub mod simulated;

pub use offline::OfflineBackend;
pub use simulated::{sample_customers, SimulatedBackend, NOT_FOUND_SENTINEL_ID};

/// Default base URL of the customer API
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/customer-api";

/// Default master seed for placeholder synthesis
pub const DEFAULT_SYNTHESIS_SEED: u64 = 42;

/// Client configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every request path is appended to, without trailing slash
    pub base_url: String,
    pub backend: BackendKind,
    /// Master seed of the dashboard's placeholder synthesizer
    pub synthesis_seed: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            backend: BackendKind::Simulated,
            synthesis_seed: DEFAULT_SYNTHESIS_SEED,
        }
    }
}

impl ClientConfig {
    /// Create a new ClientConfig with custom values
    ///
    /// Trailing slashes are stripped from `base_url`. A blank base URL falls
    /// back to the default with a warning.
    pub fn new(base_url: &str, backend: BackendKind, synthesis_seed: u64) -> Self {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = if trimmed.is_empty() {
            log::warn!(
                "Invalid base_url ({:?}), using default ({})",
                base_url,
                DEFAULT_BASE_URL
            );
            DEFAULT_BASE_URL.to_string()
        } else {
            trimmed.to_string()
        };

        Self {
            base_url,
            backend,
            synthesis_seed,
        }
    }
}

/// Records the simulated backend starts with
#[derive(Clone, Debug, PartialEq)]
pub enum SeedData {
    Empty,
    /// The three sample customers, dated relative to the given day
    Sample(NaiveDate),
    Records(Vec<Customer>),
}

impl SeedData {
    fn into_records(self) -> Vec<Customer> {
        match self {
            SeedData::Empty => Vec::new(),
            SeedData::Sample(today) => sample_customers(today),
            SeedData::Records(records) => records,
        }
    }
}

/// Create the request handler for the selected backend
///
/// # Arguments
///
/// * `kind` - Which backend answers requests
/// * `seed` - Initial records of the simulated backend (ignored for offline)
///
/// # Returns
///
/// A boxed trait object implementing the RequestHandler trait
pub fn create_backend(kind: BackendKind, seed: SeedData) -> Box<dyn RequestHandler> {
    match kind {
        BackendKind::Simulated => {
            let records = seed.into_records();
            log::info!("simulated backend seeded with {} customers", records.len());
            Box::new(SimulatedBackend::new(records, Box::new(OfflineBackend)))
        }
        BackendKind::Offline => Box::new(OfflineBackend),
    }
}
