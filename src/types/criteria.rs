//! Search criteria types
//!
//! A criteria object maps a customer field to a filter string. Blank values
//! are kept as entered (so forms can round-trip them) but never take part in
//! matching, validation of "something was supplied", or the query string.

use super::customer::Customer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Customer fields that can be named in criteria, validation errors and
/// query strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CustomerField {
    CustomerId,
    FirstName,
    LastName,
    EmailId,
    PhoneNo,
    City,
    State,
    Area,
    CardNumber,
    LoanAccountNumber,
}

impl CustomerField {
    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerField::CustomerId => "customerId",
            CustomerField::FirstName => "firstName",
            CustomerField::LastName => "lastName",
            CustomerField::EmailId => "emailId",
            CustomerField::PhoneNo => "phoneNo",
            CustomerField::City => "city",
            CustomerField::State => "state",
            CustomerField::Area => "area",
            CustomerField::CardNumber => "cardNumber",
            CustomerField::LoanAccountNumber => "loanAccountNumber",
        }
    }

    /// Read the matching value off a record
    ///
    /// Returns `None` for optional fields the record does not carry.
    pub fn value_of<'a>(&self, customer: &'a Customer) -> Option<&'a str> {
        match self {
            CustomerField::CustomerId => Some(&customer.customer_id),
            CustomerField::FirstName => Some(&customer.first_name),
            CustomerField::LastName => Some(&customer.last_name),
            CustomerField::EmailId => Some(&customer.email_id),
            CustomerField::PhoneNo => Some(&customer.phone_no),
            CustomerField::City => Some(&customer.address.city),
            CustomerField::State => Some(&customer.address.state),
            CustomerField::Area => Some(&customer.address.area),
            CustomerField::CardNumber => customer.card_number.as_deref(),
            CustomerField::LoanAccountNumber => customer.loan_account_number.as_deref(),
        }
    }
}

impl fmt::Display for CustomerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CustomerField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customerId" => Ok(CustomerField::CustomerId),
            "firstName" => Ok(CustomerField::FirstName),
            "lastName" => Ok(CustomerField::LastName),
            "emailId" => Ok(CustomerField::EmailId),
            "phoneNo" => Ok(CustomerField::PhoneNo),
            "city" => Ok(CustomerField::City),
            "state" => Ok(CustomerField::State),
            "area" => Ok(CustomerField::Area),
            "cardNumber" => Ok(CustomerField::CardNumber),
            "loanAccountNumber" => Ok(CustomerField::LoanAccountNumber),
            other => Err(format!("Unknown customer field '{}'", other)),
        }
    }
}

/// Returns true when the value is empty after trimming
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Criteria object: field name to filter string
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Criteria {
    fields: BTreeMap<CustomerField, String>,
}

impl Criteria {
    pub fn new() -> Self {
        Criteria {
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, field: CustomerField, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: CustomerField, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    /// The raw value as entered, blank or not
    pub fn raw(&self, field: CustomerField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// The trimmed value, or `None` when the field is absent or blank
    pub fn get(&self, field: CustomerField) -> Option<&str> {
        self.raw(field)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    /// Copy of these criteria with blank values removed and the rest trimmed
    pub fn normalized(&self) -> Criteria {
        Criteria {
            fields: self
                .fields
                .keys()
                .filter_map(|field| self.get(*field).map(|v| (*field, v.to_string())))
                .collect(),
        }
    }

    /// Copy of these criteria keeping only `fields`
    pub fn restricted_to(&self, fields: &[CustomerField]) -> Criteria {
        Criteria {
            fields: self
                .fields
                .iter()
                .filter(|(field, _)| fields.contains(field))
                .map(|(field, value)| (*field, value.clone()))
                .collect(),
        }
    }

    /// True when no field carries a non-blank value
    pub fn is_blank(&self) -> bool {
        self.fields.values().all(|value| is_blank(value))
    }

    /// Query-string pairs for the non-blank fields, in field order
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        self.normalized()
            .fields
            .into_iter()
            .map(|(field, value)| (field.as_str().to_string(), value))
            .collect()
    }

    /// Rebuild criteria from query-string pairs
    ///
    /// Unknown keys are ignored.
    pub fn from_query_pairs<'a, I>(pairs: I) -> Criteria
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut criteria = Criteria::new();
        for (key, value) in pairs {
            if let Ok(field) = key.parse::<CustomerField>() {
                criteria.insert(field, value);
            }
        }
        criteria
    }
}
