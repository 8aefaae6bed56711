//! Query engine
//!
//! Three independent query shapes, each a pure function of a record set and
//! its criteria. Inputs are borrowed immutably and matches are returned as
//! owned copies in input order. "No match" is an empty list, never an error.

use crate::core::validation::GENERAL_SEARCH_FIELDS;
use crate::types::{Criteria, Customer, CustomerField};

/// General multi-field search
///
/// A record matches when ANY supplied non-blank field among customerId,
/// emailId and phoneNo is a case-insensitive substring of the record's
/// corresponding field (logical OR). With no field supplied the result is
/// empty, never the full record set.
pub fn search_general(records: &[Customer], criteria: &Criteria) -> Vec<Customer> {
    let needles: Vec<(CustomerField, String)> = GENERAL_SEARCH_FIELDS
        .iter()
        .filter_map(|field| criteria.get(*field).map(|v| (*field, v.to_lowercase())))
        .collect();

    if needles.is_empty() {
        return Vec::new();
    }

    records
        .iter()
        .filter(|record| {
            needles.iter().any(|(field, needle)| {
                field
                    .value_of(record)
                    .is_some_and(|value| value.to_lowercase().contains(needle.as_str()))
            })
        })
        .cloned()
        .collect()
}

/// Card search: exact, case-sensitive equality with `cardNumber`
pub fn search_by_card(records: &[Customer], card_number: &str) -> Vec<Customer> {
    exact_match(records, CustomerField::CardNumber, card_number)
}

/// Loan search: exact equality with `loanAccountNumber`
pub fn search_by_loan(records: &[Customer], loan_number: &str) -> Vec<Customer> {
    exact_match(records, CustomerField::LoanAccountNumber, loan_number)
}

fn exact_match(records: &[Customer], field: CustomerField, wanted: &str) -> Vec<Customer> {
    // a blank number identifies nothing
    if wanted.trim().is_empty() {
        return Vec::new();
    }
    records
        .iter()
        .filter(|record| field.value_of(record) == Some(wanted))
        .cloned()
        .collect()
}
