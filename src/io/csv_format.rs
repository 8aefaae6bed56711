//! CSV format handling for customer records
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvCustomer, the flat row layout (address columns inlined)
//! - Conversion between CSV rows and domain records
//! - Customer list output serialization
//!
//! All functions are pure (no file handling) for easy testing.
//!
//! Columns: `customerId, firstName, lastName, emailId, phoneNo, city, state,
//! area, totalBalance, joinDate, cardNumber, loanAccountNumber`. The last
//! four may be empty.

use crate::core::validation::validate_customer_input;
use crate::types::{Address, ClientError, Customer, CustomerInput};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;

/// Header row of every customer CSV
pub const CSV_HEADER: [&str; 12] = [
    "customerId",
    "firstName",
    "lastName",
    "emailId",
    "phoneNo",
    "city",
    "state",
    "area",
    "totalBalance",
    "joinDate",
    "cardNumber",
    "loanAccountNumber",
];

/// One CSV row
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvCustomer {
    pub customer_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email_id: String,
    pub phone_no: String,
    pub city: String,
    pub state: String,
    pub area: String,
    #[serde(default)]
    pub total_balance: String,
    #[serde(default)]
    pub join_date: String,
    #[serde(default)]
    pub card_number: String,
    #[serde(default)]
    pub loan_account_number: String,
}

impl From<&Customer> for CsvCustomer {
    fn from(customer: &Customer) -> Self {
        CsvCustomer {
            customer_id: customer.customer_id.clone(),
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            email_id: customer.email_id.clone(),
            phone_no: customer.phone_no.clone(),
            city: customer.address.city.clone(),
            state: customer.address.state.clone(),
            area: customer.address.area.clone(),
            total_balance: customer
                .total_balance
                .map(|b| format!("{:.2}", b))
                .unwrap_or_default(),
            join_date: customer
                .join_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            card_number: customer.card_number.clone().unwrap_or_default(),
            loan_account_number: customer.loan_account_number.clone().unwrap_or_default(),
        }
    }
}

fn optional(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

/// Convert a CsvCustomer to a Customer
///
/// This function:
/// - Requires a non-blank customer id
/// - Applies the create-form rules to the name, contact and address columns
/// - Parses the balance as a non-negative decimal and the join date as
///   `YYYY-MM-DD` (if present)
///
/// # Returns
///
/// * `Ok(Customer)` - Successfully converted record
/// * `Err(String)` - Message describing the conversion failure
pub fn convert_csv_record(row: CsvCustomer) -> Result<Customer, String> {
    let customer_id = row.customer_id.trim().to_string();
    if customer_id.is_empty() {
        return Err("customerId is required".to_string());
    }

    let input = CustomerInput {
        customer_id: None,
        first_name: row.first_name,
        last_name: row.last_name,
        email_id: row.email_id,
        phone_no: row.phone_no,
        address: Address::new(row.city, row.state, row.area),
    };
    validate_customer_input(&input).map_err(|e| format!("customer {}: {}", customer_id, e))?;

    let total_balance = match optional(&row.total_balance) {
        Some(raw) => match Decimal::from_str(raw) {
            Ok(balance) if balance >= Decimal::ZERO => Some(balance),
            _ => {
                return Err(format!(
                    "Invalid totalBalance '{}' for customer {}",
                    raw, customer_id
                ))
            }
        },
        None => None,
    };

    let join_date = match optional(&row.join_date) {
        Some(raw) => Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            format!("Invalid joinDate '{}' for customer {}", raw, customer_id)
        })?),
        None => None,
    };

    let mut customer = Customer::from_input(customer_id, input);
    customer.total_balance = total_balance;
    customer.join_date = join_date;
    customer.card_number = optional(&row.card_number).map(str::to_string);
    customer.loan_account_number = optional(&row.loan_account_number).map(str::to_string);
    Ok(customer)
}

/// Write customer records to CSV format
///
/// Records are written in the order given, which is the backend's order.
///
/// # Arguments
///
/// * `customers` - Records to write
/// * `output` - Mutable reference to a writer for outputting CSV
pub fn write_customers_csv(customers: &[Customer], output: &mut dyn Write) -> Result<(), ClientError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(output);

    writer.write_record(CSV_HEADER)?;
    for customer in customers {
        writer.serialize(CsvCustomer::from(customer))?;
    }
    writer.flush()?;

    Ok(())
}
