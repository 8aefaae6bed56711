use crate::backend::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_SYNTHESIS_SEED};
use crate::types::{Address, Criteria, CustomerField, CustomerInput, CustomerPatch};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Manage customer onboarding records
#[derive(Parser, Debug)]
#[command(name = "coms")]
#[command(about = "Manage customer onboarding records", long_about = None)]
pub struct CliArgs {
    /// Backend answering requests
    #[arg(
        long = "backend",
        value_name = "BACKEND",
        default_value = "simulated",
        global = true,
        help = "Backend: 'simulated' for the in-memory API or 'offline' for an unreachable one"
    )]
    pub backend: BackendKind,

    /// Base URL of the customer API
    #[arg(
        long = "base-url",
        value_name = "URL",
        default_value = DEFAULT_BASE_URL,
        global = true
    )]
    pub base_url: String,

    /// Master seed for dashboard placeholder values
    #[arg(long = "seed", value_name = "SEED", global = true)]
    pub seed: Option<u64>,

    /// CSV file with the simulated backend's initial records
    #[arg(
        long = "data",
        value_name = "CSV",
        global = true,
        help = "Seed the simulated backend from a CSV file (default: sample customers)"
    )]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available backends
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    Simulated,
    Offline,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every customer as CSV
    List,
    /// Show one customer as JSON
    Get { id: String },
    /// Create a customer
    Add(CustomerFields),
    /// Update fields of an existing customer
    Update {
        id: String,
        #[command(flatten)]
        patch: PatchFields,
    },
    /// Search by customer id, email or phone (any match)
    Search {
        #[arg(long = "customer-id")]
        customer_id: Option<String>,
        #[arg(long = "email-id")]
        email_id: Option<String>,
        #[arg(long = "phone-no")]
        phone_no: Option<String>,
    },
    /// Search by exact card number
    SearchCard { card_number: String },
    /// Search by exact loan account number
    SearchLoan { loan_number: String },
    /// Show dashboard statistics as JSON
    Dashboard,
}

/// Fields of the create form
#[derive(Args, Debug, Clone)]
pub struct CustomerFields {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub email_id: String,
    #[arg(long)]
    pub phone_no: String,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub state: String,
    #[arg(long)]
    pub area: String,
}

impl From<CustomerFields> for CustomerInput {
    fn from(fields: CustomerFields) -> Self {
        CustomerInput {
            customer_id: None,
            first_name: fields.first_name,
            last_name: fields.last_name,
            email_id: fields.email_id,
            phone_no: fields.phone_no,
            address: Address::new(fields.city, fields.state, fields.area),
        }
    }
}

/// Fields of an update; omitted flags leave the stored value alone
///
/// The address is replaced as a whole, so `--city`, `--state` and `--area`
/// must be given together.
#[derive(Args, Debug, Clone)]
pub struct PatchFields {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email_id: Option<String>,
    #[arg(long)]
    pub phone_no: Option<String>,
    #[arg(long, requires_all = ["state", "area"])]
    pub city: Option<String>,
    #[arg(long, requires_all = ["city", "area"])]
    pub state: Option<String>,
    #[arg(long, requires_all = ["city", "state"])]
    pub area: Option<String>,
}

impl From<PatchFields> for CustomerPatch {
    fn from(fields: PatchFields) -> Self {
        let address = match (fields.city, fields.state, fields.area) {
            (Some(city), Some(state), Some(area)) => Some(Address::new(city, state, area)),
            _ => None,
        };
        CustomerPatch {
            first_name: fields.first_name,
            last_name: fields.last_name,
            email_id: fields.email_id,
            phone_no: fields.phone_no,
            address,
            ..CustomerPatch::default()
        }
    }
}

impl Command {
    /// Criteria of a `search` command; empty for every other command
    pub fn criteria(&self) -> Criteria {
        let mut criteria = Criteria::new();
        if let Command::Search {
            customer_id,
            email_id,
            phone_no,
        } = self
        {
            let fields = [
                (CustomerField::CustomerId, customer_id),
                (CustomerField::EmailId, email_id),
                (CustomerField::PhoneNo, phone_no),
            ];
            for (field, value) in fields {
                if let Some(value) = value {
                    criteria.insert(field, value.clone());
                }
            }
        }
        criteria
    }
}

impl CliArgs {
    /// Create a ClientConfig from CLI arguments
    ///
    /// Values not given on the command line fall back to the defaults; an
    /// unusable base URL is replaced with a warning (see [`ClientConfig::new`]).
    pub fn to_client_config(&self) -> ClientConfig {
        ClientConfig::new(
            &self.base_url,
            self.backend,
            self.seed.unwrap_or(DEFAULT_SYNTHESIS_SEED),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // Backend parsing tests
    #[rstest]
    #[case::default_backend(&["coms", "list"], BackendKind::Simulated)]
    #[case::explicit_simulated(&["coms", "--backend", "simulated", "list"], BackendKind::Simulated)]
    #[case::explicit_offline(&["coms", "--backend", "offline", "list"], BackendKind::Offline)]
    #[case::after_subcommand(&["coms", "list", "--backend", "offline"], BackendKind::Offline)]
    fn test_backend_parsing(#[case] args: &[&str], #[case] expected: BackendKind) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.backend, expected);
    }

    #[rstest]
    #[case::all_defaults(&["coms", "dashboard"], DEFAULT_BASE_URL, 42)]
    #[case::custom_seed(&["coms", "--seed", "7", "dashboard"], DEFAULT_BASE_URL, 7)]
    #[case::custom_url(&["coms", "--base-url", "http://api.test/", "list"], "http://api.test", 42)]
    #[case::blank_url_falls_back(&["coms", "--base-url", "", "list"], DEFAULT_BASE_URL, 42)]
    fn test_client_config_conversion(
        #[case] args: &[&str],
        #[case] expected_url: &str,
        #[case] expected_seed: u64,
    ) {
        let config = CliArgs::try_parse_from(args).unwrap().to_client_config();
        assert_eq!(config.base_url, expected_url);
        assert_eq!(config.synthesis_seed, expected_seed);
    }

    #[test]
    fn test_add_maps_to_input() {
        let parsed = CliArgs::try_parse_from([
            "coms", "add", "--first-name", "Ana", "--last-name", "Lee", "--email-id",
            "ana@example.com", "--phone-no", "555", "--city", "Albany", "--state", "NY",
            "--area", "Downtown",
        ])
        .unwrap();
        let Command::Add(fields) = parsed.command else {
            panic!("expected add command");
        };
        let input = CustomerInput::from(fields);
        assert_eq!(input.first_name, "Ana");
        assert_eq!(input.address, Address::new("Albany", "NY", "Downtown"));
        assert_eq!(input.customer_id, None);
    }

    #[test]
    fn test_update_maps_to_patch() {
        let parsed =
            CliArgs::try_parse_from(["coms", "update", "3", "--first-name", "X"]).unwrap();
        let Command::Update { id, patch } = parsed.command else {
            panic!("expected update command");
        };
        let patch = CustomerPatch::from(patch);
        assert_eq!(id, "3");
        assert_eq!(patch.first_name.as_deref(), Some("X"));
        assert_eq!(patch.address, None);
        assert_eq!(patch.last_name, None);
    }

    #[test]
    fn test_search_criteria() {
        let parsed =
            CliArgs::try_parse_from(["coms", "search", "--email-id", "jane@example.com"]).unwrap();
        let criteria = parsed.command.criteria();
        assert_eq!(criteria.get(CustomerField::EmailId), Some("jane@example.com"));
        assert_eq!(criteria.get(CustomerField::CustomerId), None);
    }

    // Error handling tests
    #[rstest]
    #[case::missing_command(&["coms"])]
    #[case::invalid_backend(&["coms", "--backend", "remote", "list"])]
    #[case::partial_address(&["coms", "update", "1", "--city", "Albany"])]
    #[case::add_missing_fields(&["coms", "add", "--first-name", "Ana"])]
    #[case::get_without_id(&["coms", "get"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_err());
    }
}
