//! Customer service
//!
//! Client façade over the customer API. It turns each operation into an
//! [`ApiRequest`], sends it through the configured [`RequestHandler`], and
//! maps the [`ApiResponse`] into a typed result.
//!
//! # Design
//!
//! - Validation runs first; when a rule fails, no request is issued.
//! - 404 on get/update maps to [`ClientError::NotFound`]; any other non-2xx
//!   status (including `0`, nothing answered) maps to
//!   [`ClientError::Transport`].
//! - Create and update refresh the [`RecordStore`] after the backend has
//!   accepted the change. A refresh failure at that point is logged and does
//!   not fail the mutation, which already took effect.

use crate::backend::{create_backend, ClientConfig, SeedData};
use crate::core::record_store::{RecordStore, RefreshOutcome, Snapshot};
use crate::core::traits::RequestHandler;
use crate::core::validation::{
    validate_card_search, validate_customer_input, validate_customer_patch,
    validate_general_search, validate_loan_search, GENERAL_SEARCH_FIELDS,
};
use crate::types::{
    ApiRequest, ApiResponse, ClientError, CreateCustomerRequest, Criteria, Customer, CustomerField,
    CustomerInput, CustomerPatch, ValidationError,
};
use serde::de::DeserializeOwned;
use tokio::sync::watch;

/// Whether a 404 on this route means "record does not exist"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Absence {
    NotFound,
    Failure,
}

/// Customer API client with an owned record store
pub struct CustomerService {
    handler: Box<dyn RequestHandler>,
    base_url: String,
    store: RecordStore,
}

impl CustomerService {
    /// Create a service sending requests for `base_url` through `handler`
    pub fn new(handler: Box<dyn RequestHandler>, base_url: impl Into<String>) -> Self {
        CustomerService {
            handler,
            base_url: base_url.into(),
            store: RecordStore::new(),
        }
    }

    /// Create a service with the backend selected by `config`
    pub fn from_config(config: &ClientConfig, seed: SeedData) -> Self {
        Self::new(create_backend(config.backend, seed), config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Read-only subscription to the shared record list
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.store.subscribe()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        absence: Absence,
    ) -> Result<T, ClientError> {
        log::debug!("-> {}", request);
        let url = request.url.clone();
        let response = self.handler.handle(request).await;
        log::debug!("<- {} {} {}", response.status, response.status_text, url);
        decode(response, &url, absence)
    }

    /// Fetch the full record list from the backend
    ///
    /// Does not touch the store; see [`Self::refresh_customers`].
    pub async fn get_customers(&self) -> Result<Vec<Customer>, ClientError> {
        self.send(ApiRequest::get(self.url("/get-all-customers")), Absence::Failure)
            .await
    }

    /// Re-fetch the record list and publish it to subscribers
    pub async fn refresh_customers(&self) -> Result<RefreshOutcome, ClientError> {
        let outcome = self.store.refresh_with(self.get_customers()).await?;
        if let RefreshOutcome::Applied(version) = outcome {
            log::info!(
                "customer list refreshed (v{}, {} customers)",
                version,
                self.store.current().len()
            );
        }
        Ok(outcome)
    }

    /// Fetch one record
    ///
    /// # Errors
    ///
    /// `ClientError::NotFound` when the backend has no record with `id`.
    pub async fn get_customer_by_id(&self, id: &str) -> Result<Customer, ClientError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ClientError::validation(ValidationError::Required {
                field: CustomerField::CustomerId,
            }));
        }
        self.send(
            ApiRequest::get(self.url(&format!("/get-customer/{}", id))),
            Absence::NotFound,
        )
        .await
    }

    /// Create a record and refresh the shared list
    ///
    /// Returns the record as stored by the backend, with its assigned id.
    pub async fn add_customer(&self, input: &CustomerInput) -> Result<Customer, ClientError> {
        validate_customer_input(input)?;

        let body = serde_json::to_value(CreateCustomerRequest {
            customer: input.clone(),
        })?;
        let created: Customer = self
            .send(
                ApiRequest::post(self.url("/add-new-customer"), body),
                Absence::Failure,
            )
            .await?;
        log::info!("created customer {}", created.customer_id);

        self.refresh_after_write().await;
        Ok(created)
    }

    /// Apply a partial update and refresh the shared list
    ///
    /// # Errors
    ///
    /// `ClientError::NotFound` when the backend has no record with `id`.
    pub async fn update_customer(
        &self,
        id: &str,
        patch: &CustomerPatch,
    ) -> Result<Customer, ClientError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ClientError::validation(ValidationError::Required {
                field: CustomerField::CustomerId,
            }));
        }
        validate_customer_patch(patch)?;

        let body = serde_json::to_value(patch)?;
        let updated: Customer = self
            .send(
                ApiRequest::put(self.url(&format!("/update-customer/{}", id)), body),
                Absence::NotFound,
            )
            .await?;
        log::info!("updated customer {}", updated.customer_id);

        self.refresh_after_write().await;
        Ok(updated)
    }

    /// General search: OR over customer id, email and phone
    ///
    /// Only the general search fields are sent; blank ones are omitted.
    pub async fn search_customers(&self, criteria: &Criteria) -> Result<Vec<Customer>, ClientError> {
        validate_general_search(criteria)?;

        let mut request = ApiRequest::get(self.url("/search-customers"));
        for (key, value) in criteria.restricted_to(&GENERAL_SEARCH_FIELDS).to_query_pairs() {
            request = request.with_param(key, value);
        }
        self.send(request, Absence::Failure).await
    }

    /// Exact card-number search
    pub async fn search_by_card(&self, card_number: &str) -> Result<Vec<Customer>, ClientError> {
        validate_card_search(card_number)?;
        let request =
            ApiRequest::get(self.url("/search-by-card")).with_param("cardNumber", card_number);
        self.send(request, Absence::Failure).await
    }

    /// Exact loan-account-number search
    pub async fn search_by_loan(&self, loan_number: &str) -> Result<Vec<Customer>, ClientError> {
        validate_loan_search(loan_number)?;
        let request =
            ApiRequest::get(self.url("/search-by-loan")).with_param("loanNumber", loan_number);
        self.send(request, Absence::Failure).await
    }

    async fn refresh_after_write(&self) {
        if let Err(e) = self.refresh_customers().await {
            log::warn!("customer list not refreshed after write: {}", e);
        }
    }
}

fn decode<T: DeserializeOwned>(
    response: ApiResponse,
    url: &str,
    absence: Absence,
) -> Result<T, ClientError> {
    if response.is_success() {
        return Ok(serde_json::from_value(response.body)?);
    }
    match (response.status, absence) {
        (404, Absence::NotFound) => Err(ClientError::not_found(
            response.status,
            &response.status_text,
            url,
        )),
        _ => Err(ClientError::transport(
            response.status,
            &response.status_text,
        )),
    }
}
