//! Add/edit customer form
//!
//! One form serves both flows. Without an id it creates a record; with an id
//! it loads that record, and submitting sends the form value as a partial
//! update.

use crate::core::service::CustomerService;
use crate::core::validation::validate_customer_input;
use crate::types::{ClientError, CustomerId, CustomerInput, CustomerPatch, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(CustomerId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// Outcome line shown under the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerForm {
    mode: FormMode,
    pub value: CustomerInput,
    pristine: CustomerInput,
    pub submitting: bool,
    /// Set after a successful submit
    pub submitted: bool,
    pub status: Option<Status>,
    pub validation: Option<ValidationErrors>,
}

impl CustomerForm {
    pub fn create() -> Self {
        Self::with_mode(FormMode::Create)
    }

    pub fn edit(id: impl Into<CustomerId>) -> Self {
        Self::with_mode(FormMode::Edit(id.into()))
    }

    fn with_mode(mode: FormMode) -> Self {
        CustomerForm {
            mode,
            value: CustomerInput::default(),
            pristine: CustomerInput::default(),
            submitting: false,
            submitted: false,
            status: None,
            validation: None,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn page_title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add Customer",
            FormMode::Edit(_) => "Edit Customer",
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.value != self.pristine
    }

    /// Whether navigating away needs no confirmation
    pub fn can_leave(&self) -> bool {
        !(self.is_dirty() && !self.submitted)
    }

    /// Populate the form from the record being edited
    ///
    /// A no-op in create mode.
    pub async fn load(&mut self, service: &CustomerService) -> Result<(), ClientError> {
        let FormMode::Edit(id) = &self.mode else {
            return Ok(());
        };
        match service.get_customer_by_id(id).await {
            Ok(customer) => {
                self.value = CustomerInput::from(&customer);
                self.pristine = self.value.clone();
                Ok(())
            }
            Err(e) => {
                self.status = Some(Status {
                    kind: StatusKind::Error,
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Validate and send the form
    ///
    /// Nothing is sent when validation fails.
    pub async fn submit(&mut self, service: &CustomerService) {
        if let Err(errors) = validate_customer_input(&self.value) {
            self.validation = Some(errors);
            return;
        }
        self.validation = None;
        self.submitting = true;
        self.status = None;

        let (result, action) = match &self.mode {
            FormMode::Create => (service.add_customer(&self.value).await, "created"),
            FormMode::Edit(id) => {
                let patch = CustomerPatch::from(self.value.clone());
                (service.update_customer(id, &patch).await, "updated")
            }
        };

        self.submitting = false;
        self.status = Some(match result {
            Ok(_) => {
                self.submitted = true;
                self.pristine = self.value.clone();
                Status {
                    kind: StatusKind::Success,
                    message: format!("Customer was successfully {}.", action),
                }
            }
            Err(e) => Status {
                kind: StatusKind::Error,
                message: e.to_string(),
            },
        });
    }

    /// Empty the form and drop the status line
    pub fn reset(&mut self) {
        self.value = CustomerInput::default();
        self.pristine = CustomerInput::default();
        self.status = None;
        self.validation = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{sample_customers, OfflineBackend, SimulatedBackend, DEFAULT_BASE_URL};
    use crate::types::{Address, CustomerField};
    use chrono::NaiveDate;

    fn sample_service() -> CustomerService {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        CustomerService::new(
            Box::new(SimulatedBackend::new(
                sample_customers(today),
                Box::new(OfflineBackend),
            )),
            DEFAULT_BASE_URL,
        )
    }

    fn filled() -> CustomerInput {
        CustomerInput {
            customer_id: None,
            first_name: "Ana".to_string(),
            last_name: "Lee".to_string(),
            email_id: "ana@example.com".to_string(),
            phone_no: "555-0100".to_string(),
            address: Address::new("Albany", "NY", "Downtown"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_flow() {
        let service = sample_service();
        let mut form = CustomerForm::create();
        assert_eq!(form.page_title(), "Add Customer");
        form.value = filled();
        assert!(!form.can_leave());

        form.submit(&service).await;

        assert_eq!(
            form.status,
            Some(Status {
                kind: StatusKind::Success,
                message: "Customer was successfully created.".to_string()
            })
        );
        assert!(form.submitted);
        assert!(form.can_leave());
        assert_eq!(service.store().current().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_flow() {
        let service = sample_service();
        let mut form = CustomerForm::edit("2");
        assert_eq!(form.page_title(), "Edit Customer");

        form.load(&service).await.unwrap();
        assert_eq!(form.value.first_name, "Jane");
        assert!(!form.is_dirty());

        form.value.phone_no = "000-000-0000".to_string();
        form.submit(&service).await;

        assert_eq!(
            form.status.as_ref().map(|s| s.message.as_str()),
            Some("Customer was successfully updated.")
        );
        let jane = service.get_customer_by_id("2").await.unwrap();
        assert_eq!(jane.phone_no, "000-000-0000");
        assert_eq!(jane.card_number.as_deref(), Some("5555-5555-5555-5555"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_edit_missing_record() {
        let service = sample_service();
        let mut form = CustomerForm::edit("999");

        let error = form.load(&service).await.unwrap_err();

        assert!(error.is_not_found());
        assert_eq!(
            form.status.map(|s| s.message),
            Some("Server returned HTTP 404: Not Found".to_string())
        );
    }

    #[tokio::test]
    async fn test_invalid_form_is_not_sent() {
        let service = CustomerService::new(Box::new(OfflineBackend), DEFAULT_BASE_URL);
        let mut form = CustomerForm::create();
        form.value = CustomerInput {
            email_id: "nope".to_string(),
            ..filled()
        };

        form.submit(&service).await;

        assert_eq!(form.status, None);
        assert!(form
            .validation
            .as_ref()
            .is_some_and(|v| v.has_field(CustomerField::EmailId)));
    }

    #[tokio::test]
    async fn test_transport_failure_is_reported() {
        let service = CustomerService::new(Box::new(OfflineBackend), DEFAULT_BASE_URL);
        let mut form = CustomerForm::create();
        form.value = filled();

        form.submit(&service).await;

        assert_eq!(
            form.status,
            Some(Status {
                kind: StatusKind::Error,
                message: "Server returned HTTP 0: Unknown Error".to_string()
            })
        );
        assert!(!form.submitted);
        assert!(!form.can_leave());
    }

    #[test]
    fn test_reset() {
        let mut form = CustomerForm::create();
        form.value = filled();
        form.status = Some(Status {
            kind: StatusKind::Error,
            message: "x".to_string(),
        });

        form.reset();

        assert_eq!(form.value, CustomerInput::default());
        assert_eq!(form.status, None);
        assert!(form.can_leave());
    }
}
