//! Dashboard view state
//!
//! Every load refreshes the shared customer list, then recomputes the
//! statistics from the snapshot. Statistics are never accumulated across
//! loads.

use crate::core::aggregator::{Aggregator, DashboardStats, DisplayRecord};
use crate::core::record_store::Snapshot;
use crate::core::service::CustomerService;
use crate::core::synthesis::{SeededSynthesizer, Synthesizer};
use crate::types::Customer;
use chrono::NaiveDate;

/// Prefix of the message shown when the customer list cannot be loaded
pub const LOAD_ERROR_PREFIX: &str = "Failed to load customers. Server returned:";

/// State the dashboard renders
#[derive(Debug, Clone)]
pub struct DashboardScreen<S = SeededSynthesizer> {
    aggregator: Aggregator<S>,
    pub stats: DashboardStats,
    /// Version of the snapshot `stats` was computed from
    pub version: u64,
    pub error: Option<String>,
    /// `error` came from aggregation rather than from loading
    degraded: bool,
    /// Message handed over by the screen that navigated here
    pub success_message: Option<String>,
}

impl<S: Synthesizer> DashboardScreen<S> {
    pub fn new(synthesizer: S) -> Self {
        DashboardScreen {
            aggregator: Aggregator::new(synthesizer),
            stats: DashboardStats::default(),
            version: 0,
            error: None,
            degraded: false,
            success_message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.success_message = Some(message.into());
        self
    }

    /// Refresh the customer list and recompute the statistics
    ///
    /// On failure the error is kept for display and the statistics are
    /// computed from whatever snapshot the store still holds.
    pub async fn load(&mut self, service: &CustomerService, today: NaiveDate) {
        self.error = None;
        self.degraded = false;
        if let Err(e) = service.refresh_customers().await {
            log::warn!("dashboard: customer list refresh failed: {}", e);
            self.error = Some(format!("{} {}", LOAD_ERROR_PREFIX, e));
        }
        self.apply(&service.store().snapshot(), today);
    }

    /// Recompute from `snapshot`
    ///
    /// An aggregation failure degrades the statistics to zeros and empty
    /// groups and records the error instead of propagating it. A later
    /// successful computation clears that error; a load error stays.
    pub fn apply(&mut self, snapshot: &Snapshot, today: NaiveDate) {
        self.version = snapshot.version;
        match self.aggregator.summarize(&snapshot.customers, today) {
            Ok(stats) => {
                self.stats = stats;
                if self.degraded {
                    self.error = None;
                    self.degraded = false;
                }
            }
            Err(e) => {
                log::warn!("dashboard: degraded, {}", e);
                self.stats = DashboardStats::default();
                self.error = Some(e.to_string());
                self.degraded = true;
            }
        }
    }

    /// Per-row display values for the customer table
    pub fn rows<'a>(&self, records: &'a [Customer], today: NaiveDate) -> Vec<DisplayRecord<'a>> {
        self.aggregator.project(records, today)
    }
}

impl Default for DashboardScreen<SeededSynthesizer> {
    fn default() -> Self {
        Self::new(SeededSynthesizer::new(crate::backend::DEFAULT_SYNTHESIS_SEED))
    }
}
