//! Screen models
//!
//! Plain state the views bind to. Each screen drives the customer service
//! and turns its errors into the messages the view shows.

pub mod dashboard;
pub mod find;
pub mod form;

pub use dashboard::DashboardScreen;
pub use find::{FindCustomerScreen, PanelKind, SearchPanel};
pub use form::{CustomerForm, FormMode, Status, StatusKind};
