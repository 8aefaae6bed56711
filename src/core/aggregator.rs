//! Dashboard aggregation
//!
//! Derives portfolio statistics from a record snapshot. Every call starts
//! from zero; nothing carries over between calls, so repeated refreshes
//! never double-count.
//!
//! Records missing a balance or join date are projected into
//! [`DisplayRecord`]s with synthesized placeholders. The source records are
//! only ever borrowed.
//!
//! All statistics are commutative reductions: visiting the records in any
//! order yields the same [`DashboardStats`].

use crate::core::synthesis::Synthesizer;
use crate::types::{ClientError, Customer};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Display-only view of a record with placeholders filled in
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRecord<'a> {
    pub customer: &'a Customer,
    pub balance: Decimal,
    pub join_date: NaiveDate,
    pub balance_synthesized: bool,
    pub join_date_synthesized: bool,
}

/// Summary statistics shown on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_customers: usize,
    pub customers_by_state: BTreeMap<String, usize>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_assets: Decimal,
    pub new_customers_this_month: usize,
}

impl DashboardStats {
    /// State codes that have at least one customer, sorted
    pub fn states(&self) -> Vec<&str> {
        self.customers_by_state.keys().map(String::as_str).collect()
    }
}

/// Computes dashboard statistics with a pluggable placeholder source
#[derive(Debug, Clone)]
pub struct Aggregator<S> {
    synthesizer: S,
}

impl<S: Synthesizer> Aggregator<S> {
    pub fn new(synthesizer: S) -> Self {
        Aggregator { synthesizer }
    }

    /// Project records into display records
    pub fn project<'a>(&self, records: &'a [Customer], today: NaiveDate) -> Vec<DisplayRecord<'a>> {
        records
            .iter()
            .map(|customer| DisplayRecord {
                customer,
                balance: customer
                    .total_balance
                    .unwrap_or_else(|| self.synthesizer.balance(customer)),
                join_date: customer
                    .join_date
                    .unwrap_or_else(|| self.synthesizer.join_date(customer, today)),
                balance_synthesized: customer.total_balance.is_none(),
                join_date_synthesized: customer.join_date.is_none(),
            })
            .collect()
    }

    /// Compute all four statistics for `records` as seen on `today`
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Aggregate` if the asset total overflows.
    pub fn summarize(&self, records: &[Customer], today: NaiveDate) -> Result<DashboardStats, ClientError> {
        let mut stats = DashboardStats {
            total_customers: records.len(),
            ..DashboardStats::default()
        };

        for row in self.project(records, today) {
            stats.total_assets = stats
                .total_assets
                .checked_add(row.balance)
                .ok_or_else(|| ClientError::aggregate("totalAssets", "decimal overflow"))?;

            if row.join_date.year() == today.year() && row.join_date.month() == today.month() {
                stats.new_customers_this_month += 1;
            }

            let state = row.customer.address.state.trim();
            if !state.is_empty() {
                *stats.customers_by_state.entry(state.to_string()).or_insert(0) += 1;
            }
        }

        Ok(stats)
    }
}
