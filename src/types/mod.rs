//! Types module
//!
//! Contains core data structures used throughout the client.
//! This module organizes types into logical submodules:
//! - `customer`: Customer records and their create/update payloads
//! - `criteria`: Search criteria and the named customer fields
//! - `http`: Request/response model of the backend HTTP surface
//! - `error`: Error types for the client core

pub mod criteria;
pub mod customer;
pub mod error;
pub mod http;

pub use criteria::{is_blank, Criteria, CustomerField};
pub use customer::{Address, CreateCustomerRequest, Customer, CustomerId, CustomerInput, CustomerPatch};
pub use error::{ClientError, ValidationError, ValidationErrors};
pub use http::{ApiRequest, ApiResponse, Method};
