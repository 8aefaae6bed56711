//! Customer onboarding CLI
//!
//! Command-line front end for the customer onboarding client core.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- list > customers.csv
//! cargo run -- get 2
//! cargo run -- add --first-name Ana --last-name Lee --email-id ana@example.com \
//!     --phone-no 555-0100 --city Albany --state NY --area Downtown
//! cargo run -- update 2 --phone-no 000-000-0000
//! cargo run -- search --email-id jane.smith@example.com
//! cargo run -- search-card 4242-4242-4242-4242
//! cargo run -- --data customers.csv --seed 7 dashboard
//! cargo run -- --backend offline list
//! ```
//!
//! Record lists are written to stdout as CSV; single records and dashboard
//! statistics as pretty-printed JSON. Set `RUST_LOG=debug` to trace
//! requests.
//!
//! # Backends
//!
//! - **simulated**: in-memory customer API, seeded with sample customers or
//!   the `--data` CSV file (default)
//! - **offline**: no backend reachable; every request fails
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (validation failure, record not found, unreachable backend,
//!   unreadable seed file, etc.)

use coms_client::backend::SeedData;
use coms_client::cli::{self, CliArgs, Command};
use coms_client::core::{CustomerService, SeededSynthesizer};
use coms_client::io::{read_customers_csv, write_customers_csv};
use coms_client::screens::DashboardScreen;
use coms_client::types::{ClientError, Customer};
use serde::Serialize;
use std::io::Write;
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    let args = cli::parse_args();

    match run(&args).await {
        Ok(None) => {}
        Ok(Some(degraded)) => {
            eprintln!("Error: {}", degraded);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

/// Execute the selected command
///
/// Returns the error message of a degraded result that was still printed
/// (a dashboard computed from partial data).
async fn run(args: &CliArgs) -> Result<Option<String>, ClientError> {
    let config = args.to_client_config();
    let today = chrono::Local::now().date_naive();

    let seed = match &args.data {
        Some(path) => SeedData::Records(read_customers_csv(path)?),
        None => SeedData::Sample(today),
    };
    let service = CustomerService::from_config(&config, seed);

    match &args.command {
        Command::List => print_csv(&service.get_customers().await?)?,
        Command::Get { id } => print_json(&service.get_customer_by_id(id).await?)?,
        Command::Add(fields) => {
            let created = service.add_customer(&fields.clone().into()).await?;
            print_json(&created)?;
        }
        Command::Update { id, patch } => {
            let updated = service.update_customer(id, &patch.clone().into()).await?;
            print_json(&updated)?;
        }
        Command::Search { .. } => {
            print_csv(&service.search_customers(&args.command.criteria()).await?)?
        }
        Command::SearchCard { card_number } => {
            print_csv(&service.search_by_card(card_number).await?)?
        }
        Command::SearchLoan { loan_number } => {
            print_csv(&service.search_by_loan(loan_number).await?)?
        }
        Command::Dashboard => {
            let mut screen = DashboardScreen::new(SeededSynthesizer::new(config.synthesis_seed));
            screen.load(&service, today).await;
            print_json(&screen.stats)?;
            return Ok(screen.error);
        }
    }

    Ok(None)
}

fn print_csv(customers: &[Customer]) -> Result<(), ClientError> {
    let mut output = std::io::stdout().lock();
    write_customers_csv(customers, &mut output)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), ClientError> {
    let mut output = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut output, value)?;
    writeln!(output)?;
    Ok(())
}
