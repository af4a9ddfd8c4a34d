//! FX CLI
//!
//! Command-line interface for the FX rates API.

mod import;

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use fx_client::FxClient;
use fx_types::{CurrencyCode, CurrencyId, RateId, RateRequest};

#[derive(Parser)]
#[command(name = "fx")]
#[command(author, version, about = "FX rates API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the FX rates API
    #[arg(long, env = "FX_API_URL", default_value = "http://localhost:3000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Currency operations
    Currency {
        #[command(subcommand)]
        action: CurrencyCommands,
    },
    /// Rate operations
    Rate {
        #[command(subcommand)]
        action: RateCommands,
    },
    /// Import daily rates from a CSV file
    Import {
        /// CSV with a `Date,BASE/TARGET,...` header
        #[arg(long)]
        input_file: PathBuf,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum CurrencyCommands {
    /// Register a currency
    Create {
        /// Three-letter code
        code: CurrencyCode,
    },
    /// List registered currencies
    List,
    /// Change the code of a currency
    Update {
        /// Currency ID (UUID)
        id: CurrencyId,
        /// New three-letter code
        code: CurrencyCode,
    },
    /// Delete a currency no rate refers to
    Delete {
        code: CurrencyCode,
    },
}

/// Fields shared by `rate create` and `rate update`.
#[derive(clap::Args)]
struct RateArgs {
    #[arg(long)]
    base: CurrencyCode,
    #[arg(long)]
    target: CurrencyCode,
    /// Units of target per one unit of base
    #[arg(long)]
    rate: f64,
    /// Date as YYYY-MM-DD
    #[arg(long)]
    date: NaiveDate,
}

impl From<RateArgs> for RateRequest {
    fn from(args: RateArgs) -> Self {
        RateRequest {
            rate: args.rate,
            currency_base: args.base,
            currency_target: args.target,
            date: args.date,
        }
    }
}

#[derive(Subcommand)]
enum RateCommands {
    /// Record a direct rate
    Create(RateArgs),
    /// Show a stored rate
    Show {
        /// Rate ID (UUID)
        id: RateId,
    },
    /// Overwrite a stored rate
    Update {
        /// Rate ID (UUID)
        id: RateId,
        #[command(flatten)]
        rate: RateArgs,
    },
    /// Delete a stored rate
    Delete {
        /// Rate ID (UUID)
        id: RateId,
    },
    /// Show every stored rate for a pair
    History {
        base: CurrencyCode,
        target: CurrencyCode,
    },
    /// Resolve the rate for a pair on a date, through cross pairs if needed
    Get {
        base: CurrencyCode,
        target: CurrencyCode,
        /// Date as YYYY-MM-DD
        date: NaiveDate,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = FxClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Currency { action } => match action {
            CurrencyCommands::Create { code } => {
                let currency = client.create_currency(code).await?;
                println!("{}", serde_json::to_string_pretty(&currency)?);
            }
            CurrencyCommands::List => {
                let currencies = client.list_currencies().await?;
                println!("{}", serde_json::to_string_pretty(&currencies)?);
            }
            CurrencyCommands::Update { id, code } => {
                let currency = client.update_currency(id, code).await?;
                println!("{}", serde_json::to_string_pretty(&currency)?);
            }
            CurrencyCommands::Delete { code } => {
                client.delete_currency(code).await?;
                println!("✓ Currency {} deleted", code);
            }
        },

        Commands::Rate { action } => match action {
            RateCommands::Create(args) => {
                let rate = client.create_rate(&args.into()).await?;
                println!("{}", serde_json::to_string_pretty(&rate)?);
            }
            RateCommands::Show { id } => {
                let rate = client.get_rate(id).await?;
                println!("{}", serde_json::to_string_pretty(&rate)?);
            }
            RateCommands::Update { id, rate } => {
                let rate = client.update_rate(id, &rate.into()).await?;
                println!("{}", serde_json::to_string_pretty(&rate)?);
            }
            RateCommands::Delete { id } => {
                client.delete_rate(id).await?;
                println!("✓ Rate {} deleted", id);
            }
            RateCommands::History { base, target } => {
                let rates = client.rate_history(base, target).await?;
                println!("{}", serde_json::to_string_pretty(&rates)?);
            }
            RateCommands::Get { base, target, date } => {
                let resolved = client.rate_for_date(base, target, date).await?;
                println!("{}", serde_json::to_string_pretty(&resolved)?);
            }
        },

        Commands::Import { input_file } => {
            println!("Importing rates from {}", input_file.display());
            let sheet = import::read_rates(&input_file)?;
            let summary = import::import_rates(&client, &sheet).await?;
            println!(
                "✓ {} currencies created, {} rates created, {} already present",
                summary.currencies_created, summary.rates_created, summary.rates_skipped
            );
        }
    }

    Ok(())
}
