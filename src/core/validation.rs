//! Validation rules
//!
//! Pure predicates evaluated before a submit or search is attempted. A form
//! collects every failed rule into [`ValidationErrors`]; when anything
//! failed, the caller must not issue a request.
//!
//! Group rules (at-least-one-of) take the group's field list explicitly
//! instead of walking a form's controls.

use crate::types::{
    is_blank, Criteria, CustomerField, CustomerInput, CustomerPatch, ValidationError,
    ValidationErrors,
};
use regex::Regex;
use std::sync::OnceLock;

/// Fields of the general customer search form
pub const GENERAL_SEARCH_FIELDS: [CustomerField; 3] = [
    CustomerField::CustomerId,
    CustomerField::EmailId,
    CustomerField::PhoneNo,
];

static EMAIL_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

fn email_pattern() -> Option<&'static Regex> {
    EMAIL_PATTERN
        .get_or_init(|| {
            Regex::new(
                r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*\.[A-Za-z]{2,}$",
            )
            .ok()
        })
        .as_ref()
}

/// Required-field rule: non-empty after trimming
pub fn required(field: CustomerField, value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        Err(ValidationError::Required { field })
    } else {
        Ok(())
    }
}

/// Email-shape rule
///
/// An empty value only fails when the field is also required.
pub fn email(field: CustomerField, value: &str, is_required: bool) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return if is_required {
            Err(ValidationError::Required { field })
        } else {
            Ok(())
        };
    }
    if email_pattern().is_some_and(|pattern| pattern.is_match(value)) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail { field })
    }
}

/// At-least-one-of rule, evaluated at group scope
pub fn at_least_one_of(criteria: &Criteria, fields: &[CustomerField]) -> Result<(), ValidationError> {
    if fields.iter().any(|field| criteria.get(*field).is_some()) {
        Ok(())
    } else {
        Err(ValidationError::AtLeastOneRequired {
            fields: fields.to_vec(),
        })
    }
}

/// Accumulates rule outcomes for one form
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<ValidationError>,
}

impl Validator {
    pub fn new() -> Self {
        Validator { errors: Vec::new() }
    }

    pub fn check(mut self, outcome: Result<(), ValidationError>) -> Self {
        if let Err(error) = outcome {
            self.errors.push(error);
        }
        self
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}

/// Customer create form: every field required, email well-formed
pub fn validate_customer_input(input: &CustomerInput) -> Result<(), ValidationErrors> {
    Validator::new()
        .check(required(CustomerField::FirstName, &input.first_name))
        .check(required(CustomerField::LastName, &input.last_name))
        .check(email(CustomerField::EmailId, &input.email_id, true))
        .check(required(CustomerField::PhoneNo, &input.phone_no))
        .check(required(CustomerField::City, &input.address.city))
        .check(required(CustomerField::State, &input.address.state))
        .check(required(CustomerField::Area, &input.address.area))
        .finish()
}

/// Customer update: supplied fields must still satisfy the create rules
pub fn validate_customer_patch(patch: &CustomerPatch) -> Result<(), ValidationErrors> {
    let mut validator = Validator::new();
    let supplied = [
        (CustomerField::FirstName, &patch.first_name),
        (CustomerField::LastName, &patch.last_name),
        (CustomerField::PhoneNo, &patch.phone_no),
    ];
    for (field, value) in supplied {
        if let Some(value) = value {
            validator = validator.check(required(field, value));
        }
    }
    if let Some(email_id) = &patch.email_id {
        validator = validator.check(email(CustomerField::EmailId, email_id, true));
    }
    if let Some(address) = &patch.address {
        validator = validator
            .check(required(CustomerField::City, &address.city))
            .check(required(CustomerField::State, &address.state))
            .check(required(CustomerField::Area, &address.area));
    }
    validator.finish()
}

/// General customer search form
pub fn validate_general_search(criteria: &Criteria) -> Result<(), ValidationErrors> {
    Validator::new()
        .check(email(
            CustomerField::EmailId,
            criteria.raw(CustomerField::EmailId).unwrap_or_default(),
            false,
        ))
        .check(at_least_one_of(criteria, &GENERAL_SEARCH_FIELDS))
        .finish()
}

/// Card search form
pub fn validate_card_search(card_number: &str) -> Result<(), ValidationErrors> {
    Validator::new()
        .check(required(CustomerField::CardNumber, card_number))
        .finish()
}

/// Loan search form
pub fn validate_loan_search(loan_number: &str) -> Result<(), ValidationErrors> {
    Validator::new()
        .check(required(CustomerField::LoanAccountNumber, loan_number))
        .finish()
}
