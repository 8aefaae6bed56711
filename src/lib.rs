//! Customer Onboarding Client Library
//! # Overview
//!
//! This library provides the client-side data, search and aggregation core
//! of a customer onboarding manager, together with a simulated customer API
//! for running without a real backend.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Customer, Criteria, requests, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::record_store`] - Versioned, subscribable customer list
//!   - [`core::validation`] - Form rules checked before any request
//!   - [`core::query`] - General, card and loan search
//!   - [`core::aggregator`] - Dashboard statistics
//!   - [`core::service`] - Customer API client
//! - [`backend`] - Simulated and pass-through request handlers
//! - [`screens`] - Dashboard, find-customer and form view state
//! - [`io`] - Customer CSV export and seed loading
//!
//! # Control Flow
//!
//! A screen action is validated first; a failing rule stops it before any
//! request is issued. Requests go through one [`core::RequestHandler`], the
//! simulated backend or the pass-through terminal, which share a contract.
//! Create and update refresh the record store, and the dashboard recomputes
//! its statistics from the new snapshot.
//!
//! # Dashboard Statistics
//!
//! - `totalCustomers`: number of records
//! - `customersByState`: records per state code; records without a state are
//!   not bucketed
//! - `totalAssets`: sum of balances, with a placeholder for records that
//!   carry none
//! - `newCustomersThisMonth`: records whose join date falls in the current
//!   calendar month

// Module declarations
pub mod backend;
pub mod cli;
pub mod core;
pub mod io;
pub mod screens;
pub mod types;

pub use backend::{create_backend, ClientConfig, SeedData};
pub use core::{Aggregator, CustomerService, DashboardStats, RecordStore};
pub use io::write_customers_csv;
pub use types::{
    ClientError, Criteria, Customer, CustomerField, CustomerId, CustomerInput, CustomerPatch,
};
