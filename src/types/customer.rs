//! Customer record types
//!
//! This module defines the customer record as it travels over the wire,
//! together with the create payload and the partial update payload.
//! Wire names are camelCase to match the backend HTTP surface.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Customer identifier
///
/// Opaque string assigned by the backend on create.
pub type CustomerId = String;

/// Postal address of a customer
///
/// All three parts are required for a persisted record.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub state: String,
    pub area: String,
}

impl Address {
    pub fn new(city: impl Into<String>, state: impl Into<String>, area: impl Into<String>) -> Self {
        Address {
            city: city.into(),
            state: state.into(),
            area: area.into(),
        }
    }
}

/// Customer record
///
/// The enriched fields (`total_balance`, `join_date`, `card_number`,
/// `loan_account_number`) are absent for records created through the basic
/// form flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub customer_id: CustomerId,
    pub first_name: String,
    pub last_name: String,
    pub email_id: String,
    pub phone_no: String,
    pub address: Address,

    /// Portfolio balance, serialized as a JSON number
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_balance: Option<Decimal>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_date: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_account_number: Option<String>,
}

impl Customer {
    /// Build a persisted record from a create payload and a backend-assigned id
    pub fn from_input(customer_id: CustomerId, input: CustomerInput) -> Self {
        Customer {
            customer_id,
            first_name: input.first_name,
            last_name: input.last_name,
            email_id: input.email_id,
            phone_no: input.phone_no,
            address: input.address,
            total_balance: None,
            join_date: None,
            card_number: None,
            loan_account_number: None,
        }
    }

    /// Shallow merge: every field supplied by the patch overwrites the
    /// existing value, everything else is left untouched.
    ///
    /// The address is replaced as a whole, never merged per part. The
    /// customer id is never changed by a patch.
    pub fn merged_with(&self, patch: &CustomerPatch) -> Customer {
        let mut merged = self.clone();
        if let Some(first_name) = &patch.first_name {
            merged.first_name = first_name.clone();
        }
        if let Some(last_name) = &patch.last_name {
            merged.last_name = last_name.clone();
        }
        if let Some(email_id) = &patch.email_id {
            merged.email_id = email_id.clone();
        }
        if let Some(phone_no) = &patch.phone_no {
            merged.phone_no = phone_no.clone();
        }
        if let Some(address) = &patch.address {
            merged.address = address.clone();
        }
        if patch.total_balance.is_some() {
            merged.total_balance = patch.total_balance;
        }
        if patch.join_date.is_some() {
            merged.join_date = patch.join_date;
        }
        if let Some(card_number) = &patch.card_number {
            merged.card_number = Some(card_number.clone());
        }
        if let Some(loan) = &patch.loan_account_number {
            merged.loan_account_number = Some(loan.clone());
        }
        merged
    }
}

/// Create payload as entered on the customer form
///
/// The form carries a `customerId` control that is never required; the
/// backend ignores it and assigns its own id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
    pub first_name: String,
    pub last_name: String,
    pub email_id: String,
    pub phone_no: String,
    pub address: Address,
}

impl From<&Customer> for CustomerInput {
    fn from(customer: &Customer) -> Self {
        CustomerInput {
            customer_id: Some(customer.customer_id.clone()),
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            email_id: customer.email_id.clone(),
            phone_no: customer.phone_no.clone(),
            address: customer.address.clone(),
        }
    }
}

/// Request body of `POST /add-new-customer`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCustomerRequest {
    pub customer: CustomerInput,
}

/// Partial update payload for `PUT /update-customer/{id}`
///
/// `None` means "not supplied". A supplied `customer_id` is accepted on the
/// wire (the edit form sends it back) but never applied.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_balance: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_account_number: Option<String>,
}

impl CustomerPatch {
    pub fn is_empty(&self) -> bool {
        *self == CustomerPatch::default()
    }
}

impl From<CustomerInput> for CustomerPatch {
    fn from(input: CustomerInput) -> Self {
        CustomerPatch {
            customer_id: input.customer_id,
            first_name: Some(input.first_name),
            last_name: Some(input.last_name),
            email_id: Some(input.email_id),
            phone_no: Some(input.phone_no),
            address: Some(input.address),
            ..CustomerPatch::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn john() -> Customer {
        Customer {
            customer_id: "1".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email_id: "john.doe@example.com".to_string(),
            phone_no: "123-456-7890".to_string(),
            address: Address::new("New York", "NY", "Manhattan"),
            total_balance: Some(Decimal::new(150000, 0)),
            join_date: NaiveDate::from_ymd_opt(2023, 5, 15),
            card_number: Some("4242-4242-4242-4242".to_string()),
            loan_account_number: Some("LN-1001".to_string()),
        }
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let value = serde_json::to_value(john()).unwrap();
        assert_eq!(value["customerId"], "1");
        assert_eq!(value["emailId"], "john.doe@example.com");
        assert_eq!(value["address"]["state"], "NY");
        assert_eq!(value["totalBalance"], json!(150000.0));
        assert_eq!(value["joinDate"], "2023-05-15");
        assert_eq!(value["loanAccountNumber"], "LN-1001");
    }

    #[test]
    fn test_optional_fields_are_omitted_and_default_when_missing() {
        let body = json!({
            "customerId": "7",
            "firstName": "A",
            "lastName": "B",
            "emailId": "a@b.com",
            "phoneNo": "555",
            "address": { "city": "X", "state": "Y", "area": "Z" }
        });
        let customer: Customer = serde_json::from_value(body).unwrap();
        assert_eq!(customer.total_balance, None);
        assert_eq!(customer.join_date, None);

        let back = serde_json::to_value(&customer).unwrap();
        assert!(back.get("totalBalance").is_none());
        assert!(back.get("cardNumber").is_none());
    }

    #[test]
    fn test_merge_only_touches_supplied_fields() {
        let original = john();
        let patch = CustomerPatch {
            first_name: Some("X".to_string()),
            ..CustomerPatch::default()
        };

        let merged = original.merged_with(&patch);

        assert_eq!(merged.first_name, "X");
        assert_eq!(
            Customer {
                first_name: original.first_name.clone(),
                ..merged
            },
            original
        );
    }

    #[test]
    fn test_merge_replaces_address_whole_and_keeps_id() {
        let patch = CustomerPatch {
            customer_id: Some("42".to_string()),
            address: Some(Address::new("Boston", "MA", "Back Bay")),
            ..CustomerPatch::default()
        };

        let merged = john().merged_with(&patch);

        assert_eq!(merged.customer_id, "1");
        assert_eq!(merged.address, Address::new("Boston", "MA", "Back Bay"));
    }

    #[test]
    fn test_patch_from_json_with_single_field() {
        let patch: CustomerPatch = serde_json::from_value(json!({ "firstName": "X" })).unwrap();
        assert_eq!(patch.first_name.as_deref(), Some("X"));
        assert!(patch.last_name.is_none());
        assert!(!patch.is_empty());
        assert!(CustomerPatch::default().is_empty());
    }
}
