//! Seed data reader
//!
//! Streams customer records out of a CSV file for the simulated backend.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Error Handling
//!
//! - Fatal errors (file not found) are returned from `from_path()`
//! - Row errors are yielded as `Err` items carrying the line number
//! - [`read_customers_csv`] stops at the first bad row and also rejects
//!   duplicate customer ids

use crate::io::csv_format::{convert_csv_record, CsvCustomer};
use crate::types::{ClientError, Customer};
use csv::{ReaderBuilder, Trim};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Iterator over the customer rows of a CSV source
#[derive(Debug)]
pub struct SeedReader<R> {
    reader: csv::Reader<R>,
    line_num: u64,
}

impl SeedReader<File> {
    /// Open a CSV file for reading
    pub fn from_path(path: &Path) -> Result<Self, ClientError> {
        let file = File::open(path).map_err(|e| ClientError::Io {
            message: format!("Failed to open file '{}': {}", path.display(), e),
        })?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> SeedReader<R> {
    pub fn from_reader(source: R) -> Self {
        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            reader,
            line_num: 1,
        }
    }
}

impl<R: Read> Iterator for SeedReader<R> {
    type Item = Result<Customer, ClientError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<CsvCustomer>();
        let row = deserializer.next()?;
        self.line_num += 1;

        Some(match row {
            Ok(row) => convert_csv_record(row).map_err(|message| ClientError::Csv {
                line: Some(self.line_num),
                message,
            }),
            Err(e) => Err(ClientError::from(e)),
        })
    }
}

/// Read every customer from a CSV file
///
/// # Errors
///
/// Fails on the first unreadable or invalid row, and on a customer id that
/// appears twice.
pub fn read_customers_csv(path: &Path) -> Result<Vec<Customer>, ClientError> {
    let customers = collect_unique(SeedReader::from_path(path)?)?;
    log::info!(
        "loaded {} customers from {}",
        customers.len(),
        path.display()
    );
    Ok(customers)
}

/// Collect rows, rejecting duplicate customer ids
pub fn collect_unique<R: Read>(reader: SeedReader<R>) -> Result<Vec<Customer>, ClientError> {
    let mut seen = HashSet::new();
    let mut customers = Vec::new();
    let mut line = 1;
    for row in reader {
        line += 1;
        let customer = row?;
        if !seen.insert(customer.customer_id.clone()) {
            return Err(ClientError::Csv {
                line: Some(line),
                message: format!("duplicate customerId {}", customer.customer_id),
            });
        }
        customers.push(customer);
    }
    Ok(customers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "customerId,firstName,lastName,emailId,phoneNo,city,state,area,totalBalance,joinDate,cardNumber,loanAccountNumber\n";

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_reads_rows_in_order() {
        let file = create_temp_csv(&format!(
            "{}1,John,Doe,john@example.com,123,New York,NY,Manhattan,150000,2023-05-15,4242,LN-1\n\
             2, Jane ,Smith,jane@example.com,987,Los Angeles,CA,Hollywood,,,,\n",
            HEADER
        ));

        let customers = read_customers_csv(file.path()).unwrap();

        assert_eq!(customers.len(), 2);
        assert_eq!(customers[0].total_balance, Some(Decimal::new(150_000, 0)));
        assert_eq!(customers[1].first_name, "Jane");
        assert_eq!(customers[1].join_date, None);
    }

    #[test]
    fn test_header_only_is_empty() {
        let file = create_temp_csv(HEADER);
        assert!(read_customers_csv(file.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file() {
        let error = read_customers_csv(Path::new("nonexistent.csv")).unwrap_err();
        assert!(matches!(error, ClientError::Io { .. }));
        assert!(error.to_string().contains("Failed to open file"));
    }

    #[test]
    fn test_invalid_row_reports_line() {
        let file = create_temp_csv(&format!(
            "{}1,John,Doe,john@example.com,123,New York,NY,Manhattan,,,,\n\
             2,Jane,Smith,not-an-email,987,Los Angeles,CA,Hollywood,,,,\n",
            HEADER
        ));

        let error = read_customers_csv(file.path()).unwrap_err();

        assert_eq!(
            error,
            ClientError::Csv {
                line: Some(3),
                message: "customer 2: emailId must be a valid email address".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let source = format!(
            "{}1,John,Doe,john@example.com,123,New York,NY,Manhattan,,,,\n\
             1,Jane,Smith,jane@example.com,987,Los Angeles,CA,Hollywood,,,,\n",
            HEADER
        );

        let error = collect_unique(SeedReader::from_reader(source.as_bytes())).unwrap_err();

        assert!(error.to_string().contains("duplicate customerId 1"));
    }

    #[test]
    fn test_iterator_continues_past_bad_rows() {
        let source = format!(
            "{}1,John,Doe,bad,123,New York,NY,Manhattan,,,,\n\
             2,Jane,Smith,jane@example.com,987,Los Angeles,CA,Hollywood,,,,\n",
            HEADER
        );

        let rows: Vec<_> = SeedReader::from_reader(source.as_bytes()).collect();

        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_err());
        assert_eq!(rows[1].as_ref().unwrap().customer_id, "2");
    }
}
