//! I/O module
//!
//! Handles customer CSV input and output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (row conversion, list serialization)
//! - `seed_reader` - Streaming reader for simulated-backend seed files

pub mod csv_format;
pub mod seed_reader;

pub use csv_format::{convert_csv_record, write_customers_csv, CsvCustomer};
pub use seed_reader::{read_customers_csv, SeedReader};
