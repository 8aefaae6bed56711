//! Simulated backend
//!
//! A deterministic stand-in for the customer API, used during development.
//! It intercepts the seven routes of the customer API and answers them from
//! an in-memory record set; every other request passes through unchanged to
//! the next handler.
//!
//! # Latency
//!
//! Each route answers after a fixed delay. The state change a request causes
//! (create, update) is applied when the request is received, before the
//! delay elapses, so latency never changes ordering or results, only timing.
//!
//! # Injected failure
//!
//! `GET /get-customer/999` always answers 404 Not Found, whatever the record
//! set contains, to exercise the failure path.

use crate::core::query;
use crate::core::traits::RequestHandler;
use crate::core::validation::GENERAL_SEARCH_FIELDS;
use crate::types::{
    Address, ApiRequest, ApiResponse, CreateCustomerRequest, Criteria, Customer, CustomerPatch,
    Method,
};
use chrono::{Months, NaiveDate};
use futures::future::{BoxFuture, FutureExt};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Id that always answers 404 on get-by-id
pub const NOT_FOUND_SENTINEL_ID: &str = "999";

/// Fixed per-route response delays
pub mod latency {
    use std::time::Duration;

    pub const LIST: Duration = Duration::from_millis(500);
    pub const GET: Duration = Duration::from_millis(300);
    pub const GET_NOT_FOUND: Duration = Duration::from_millis(500);
    pub const CREATE: Duration = Duration::from_millis(500);
    pub const UPDATE: Duration = Duration::from_millis(500);
    pub const UPDATE_NOT_FOUND: Duration = Duration::ZERO;
    pub const SEARCH: Duration = Duration::from_millis(400);
    pub const SEARCH_NO_CRITERIA: Duration = Duration::from_millis(200);
}

/// A response together with the delay before it is delivered
#[derive(Debug, Clone, PartialEq)]
struct Routed {
    response: ApiResponse,
    delay: Duration,
}

impl Routed {
    fn after(delay: Duration, response: ApiResponse) -> Self {
        Routed { response, delay }
    }
}

/// In-memory request handler for the customer API
pub struct SimulatedBackend {
    customers: Mutex<Vec<Customer>>,
    next: Box<dyn RequestHandler>,
}

impl SimulatedBackend {
    /// Create a backend answering from `customers`, delegating unmatched
    /// requests to `next`
    pub fn new(customers: Vec<Customer>, next: Box<dyn RequestHandler>) -> Self {
        SimulatedBackend {
            customers: Mutex::new(customers),
            next,
        }
    }

    /// Backend with the three sample customers, dated relative to `today`
    pub fn with_sample_data(today: NaiveDate, next: Box<dyn RequestHandler>) -> Self {
        Self::new(sample_customers(today), next)
    }

    /// Copy of the backend's current record set
    pub fn records(&self) -> Vec<Customer> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Customer>> {
        self.customers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Match a request against the intercepted routes
    ///
    /// Returns `None` when the request should pass through.
    fn route(&self, request: &ApiRequest) -> Option<Routed> {
        let url = request.url.as_str();
        let routed = match request.method {
            Method::Get if url.ends_with("/get-all-customers") => self.list_all(),
            Method::Get if url.contains("/search-customers") => self.search_general(request),
            Method::Get if url.contains("/search-by-card") => self.search_by_card(request),
            Method::Get if url.contains("/search-by-loan") => self.search_by_loan(request),
            Method::Get => self.get_by_id(request.path_param("/get-customer/")?),
            Method::Post if url.ends_with("/add-new-customer") => self.create(request),
            Method::Put => self.update(request.path_param("/update-customer/")?, request),
            _ => return None,
        };
        Some(routed)
    }

    fn list_all(&self) -> Routed {
        Routed::after(latency::LIST, json_response(200, "OK", &*self.lock()))
    }

    fn get_by_id(&self, id: &str) -> Routed {
        if id == NOT_FOUND_SENTINEL_ID {
            return Routed::after(latency::GET_NOT_FOUND, ApiResponse::not_found());
        }
        match self.lock().iter().find(|c| c.customer_id == id) {
            Some(customer) => Routed::after(latency::GET, json_response(200, "OK", customer)),
            None => Routed::after(latency::GET_NOT_FOUND, ApiResponse::not_found()),
        }
    }

    fn create(&self, request: &ApiRequest) -> Routed {
        let body = request.body.clone().unwrap_or_default();
        let payload: CreateCustomerRequest = match serde_json::from_value(body) {
            Ok(payload) => payload,
            Err(e) => {
                return Routed::after(latency::CREATE, ApiResponse::bad_request(e.to_string()))
            }
        };

        let mut customers = self.lock();
        let customer_id = next_customer_id(&customers);
        let customer = Customer::from_input(customer_id, payload.customer);
        log::info!("simulated backend: created customer {}", customer.customer_id);
        customers.push(customer.clone());

        Routed::after(latency::CREATE, json_response(201, "Created", &customer))
    }

    fn update(&self, id: &str, request: &ApiRequest) -> Routed {
        let mut customers = self.lock();
        let Some(index) = customers.iter().position(|c| c.customer_id == id) else {
            return Routed::after(latency::UPDATE_NOT_FOUND, ApiResponse::not_found());
        };

        let body = request.body.clone().unwrap_or_default();
        let patch: CustomerPatch = match serde_json::from_value(body) {
            Ok(patch) => patch,
            Err(e) => {
                return Routed::after(latency::UPDATE, ApiResponse::bad_request(e.to_string()))
            }
        };

        let merged = customers[index].merged_with(&patch);
        customers[index] = merged.clone();
        log::info!("simulated backend: updated customer {}", id);

        Routed::after(latency::UPDATE, json_response(200, "OK", &merged))
    }

    fn search_general(&self, request: &ApiRequest) -> Routed {
        let criteria =
            Criteria::from_query_pairs(request.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        if criteria.restricted_to(&GENERAL_SEARCH_FIELDS).is_blank() {
            let empty: [Customer; 0] = [];
            return Routed::after(latency::SEARCH_NO_CRITERIA, json_response(200, "OK", &empty));
        }
        let results = query::search_general(&self.lock(), &criteria);
        Routed::after(latency::SEARCH, json_response(200, "OK", &results))
    }

    fn search_by_card(&self, request: &ApiRequest) -> Routed {
        let card_number = request.param("cardNumber").unwrap_or_default();
        let results = query::search_by_card(&self.lock(), card_number);
        Routed::after(latency::SEARCH, json_response(200, "OK", &results))
    }

    fn search_by_loan(&self, request: &ApiRequest) -> Routed {
        let loan_number = request.param("loanNumber").unwrap_or_default();
        let results = query::search_by_loan(&self.lock(), loan_number);
        Routed::after(latency::SEARCH, json_response(200, "OK", &results))
    }
}

impl RequestHandler for SimulatedBackend {
    fn handle(&self, request: ApiRequest) -> BoxFuture<'_, ApiResponse> {
        match self.route(&request) {
            Some(Routed { response, delay }) => {
                log::debug!(
                    "simulated backend: {} -> {} after {:?}",
                    request,
                    response.status,
                    delay
                );
                async move {
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    response
                }
                .boxed()
            }
            None => {
                log::debug!("simulated backend: passing through {}", request);
                self.next.handle(request)
            }
        }
    }
}

/// `count + 1`, stepping past ids a seed file already took
fn next_customer_id(customers: &[Customer]) -> String {
    let mut candidate = customers.len() + 1;
    loop {
        let id = candidate.to_string();
        if customers.iter().all(|c| c.customer_id != id) {
            return id;
        }
        candidate += 1;
    }
}

fn json_response<T: Serialize + ?Sized>(status: u16, status_text: &str, body: &T) -> ApiResponse {
    match serde_json::to_value(body) {
        Ok(value) => ApiResponse::new(status, status_text, value),
        Err(e) => ApiResponse::new(500, "Internal Server Error", serde_json::Value::String(e.to_string())),
    }
}

/// The three sample customers served by a fresh development backend
pub fn sample_customers(today: NaiveDate) -> Vec<Customer> {
    let last_month = today.checked_sub_months(Months::new(1)).unwrap_or(today);
    vec![
        Customer {
            customer_id: "1".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email_id: "john.doe@example.com".to_string(),
            phone_no: "123-456-7890".to_string(),
            address: Address::new("New York", "NY", "Manhattan"),
            total_balance: Some(Decimal::new(150_000, 0)),
            join_date: NaiveDate::from_ymd_opt(2023, 5, 15),
            card_number: Some("4242-4242-4242-4242".to_string()),
            loan_account_number: Some("LN-1001".to_string()),
        },
        Customer {
            customer_id: "2".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Smith".to_string(),
            email_id: "jane.smith@example.com".to_string(),
            phone_no: "987-654-3210".to_string(),
            address: Address::new("Los Angeles", "CA", "Hollywood"),
            total_balance: Some(Decimal::new(275_000, 0)),
            join_date: Some(last_month),
            card_number: Some("5555-5555-5555-5555".to_string()),
            loan_account_number: Some("LN-1002".to_string()),
        },
        Customer {
            customer_id: "3".to_string(),
            first_name: "Peter".to_string(),
            last_name: "Jones".to_string(),
            email_id: "peter.jones@example.com".to_string(),
            phone_no: "555-555-5555".to_string(),
            address: Address::new("Chicago", "IL", "The Loop"),
            total_balance: Some(Decimal::new(89_000, 0)),
            join_date: Some(today),
            card_number: Some("4111-1111-1111-1111".to_string()),
            loan_account_number: Some("LN-1003".to_string()),
        },
    ]
}
