use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result, miette};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use upp_gateway::domain::money::Amount;
use upp_gateway::domain::request::RequestType;
use upp_gateway::infrastructure::in_memory::InMemoryOutcomeStore;
use upp_gateway::interfaces::csv::notification_reader::NotificationReader;
use upp_gateway::interfaces::csv::outcome_writer::OutcomeWriter;
use upp_gateway::interfaces::{callback, html};
use upp_gateway::{AuthorizeParams, NotificationProcessor, SigningConfig, WebTransaction};

/// Signs authorize requests for the hosted payment page and verifies its notifications.
///
/// The merchant configuration is read from UPP_MERCHANT_ID, UPP_SIGN_KEY,
/// UPP_SIGN_KEY_2 and UPP_ENVIRONMENT (a .env file is loaded first).
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the signed authorize form
    Form {
        /// Merchant reference number of the order
        #[arg(long)]
        refno: String,
        /// Amount in minor units (1000 = 10.00)
        #[arg(
            long,
            required_unless_present = "amount_major",
            conflicts_with = "amount_major"
        )]
        amount: Option<u64>,
        /// Amount in major units with at most two decimals (10.00)
        #[arg(long)]
        amount_major: Option<Decimal>,
        /// ISO 4217 currency code
        #[arg(long)]
        currency: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        name: Option<String>,
        /// NOA (authorize only) or CAA (authorize and capture)
        #[arg(long, default_value = "NOA")]
        request_type: RequestType,
        /// Let the payment page collect the customer's address
        #[arg(long)]
        customer_details: bool,
        /// Print only the hidden inputs, without the surrounding form
        #[arg(long)]
        fields_only: bool,
    },
    /// Verify a urlencoded notification body ("-" for stdin) and print its outcome as JSON
    Verify { input: PathBuf },
    /// Verify a CSV export of notifications and print the recorded outcomes as CSV
    Reconcile { input: PathBuf },
}

fn open_input(path: &Path) -> Result<Box<dyn Read>> {
    if path == Path::new("-") {
        Ok(Box::new(io::stdin().lock()))
    } else {
        Ok(Box::new(File::open(path).into_diagnostic()?))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded environment variables from .env file");
    }

    let cli = Cli::parse();
    let config = Arc::new(SigningConfig::from_env().into_diagnostic()?);

    match cli.command {
        Command::Form {
            refno,
            amount,
            amount_major,
            currency,
            email,
            name,
            request_type,
            customer_details,
            fields_only,
        } => {
            let amount = match amount_major {
                Some(major) => Amount::from_decimal(major).into_diagnostic()?.minor_units(),
                None => amount
                    .ok_or_else(|| miette!("Either --amount or --amount-major is required"))?,
            };
            let params = AuthorizeParams {
                refno,
                amount,
                currency,
                customer_email: email,
                customer_name: name,
                customer_details,
                request_type,
            };
            let transaction = WebTransaction::new(config, params).into_diagnostic()?;
            let fields = transaction.hidden_fields();
            if fields_only {
                println!("{}", html::hidden_fields(&fields));
            } else {
                println!("{}", html::form(transaction.authorize_url(), &fields));
            }
        }
        Command::Verify { input } => {
            let response = callback::read_body(open_input(&input)?).into_diagnostic()?;
            let processor =
                NotificationProcessor::new(config, Box::new(InMemoryOutcomeStore::new()));
            let record = processor
                .process_notification(response)
                .await
                .into_diagnostic()?;
            println!("{}", serde_json::to_string_pretty(&record).into_diagnostic()?);
        }
        Command::Reconcile { input } => {
            let processor =
                NotificationProcessor::new(config, Box::new(InMemoryOutcomeStore::new()));

            let reader = NotificationReader::new(open_input(&input)?);
            for result in reader.notifications() {
                match result {
                    Ok(response) => {
                        if let Err(e) = processor.process_notification(response).await {
                            eprintln!("Error processing notification: {}", e);
                        }
                    }
                    Err(e) => {
                        eprintln!("Error reading notification: {}", e);
                    }
                }
            }

            let records = processor.into_results().await.into_diagnostic()?;
            let stdout = io::stdout();
            let mut writer = OutcomeWriter::new(stdout.lock());
            writer.write_outcomes(&records).into_diagnostic()?;
        }
    }

    Ok(())
}
