//! Command line interface for the on-chain value charting backend.
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use dotenv::dotenv;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use tvl_api::AppState;
use tvl_charts::assemble::AssetBalance;
use tvl_charts::gap_fill::chart_points;
use tvl_data::Database;
use tvl_domain::entities::Token;
use tvl_domain::value_objects::{AssetId, ChainId};

#[derive(Parser)]
#[command(name = "tvl-cli")]
#[command(about = "On-chain value chart inspection CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the dense chart series for one asset
    Chart {
        /// Asset identity, e.g. dai-dai-stablecoin
        #[arg(short, long)]
        asset: String,

        /// Chain id the reports were resolved on
        #[arg(long, default_value_t = 1)]
        chain: u64,

        /// Step size in hours
        #[arg(long, default_value_t = 1)]
        hours: u64,

        /// Asset decimal places
        #[arg(short, long, default_value_t = 18)]
        decimals: u32,

        /// Put the USD column before the asset column
        #[arg(long)]
        usd_first: bool,
    },
    /// Print per-asset earliest and latest observed timestamps
    Boundaries {
        /// Which time series to inspect
        #[arg(long, value_enum, default_value = "prices")]
        entity: Entity,
    },
    /// Serve the chart API
    Serve {
        /// Bind address
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: SocketAddr,

        /// Path to the generated token metadata JSON
        #[arg(long)]
        tokens: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Entity {
    Balances,
    Prices,
    Supplies,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let database_url =
        env::var("DATABASE_URL").context("DATABASE_URL must be set in .env or environment")?;
    let db = Database::connect(&database_url).await?;

    match cli.command {
        Commands::Chart {
            asset,
            chain,
            hours,
            decimals,
            usd_first,
        } => {
            let asset_id = AssetId::new(asset);
            let reports = db
                .reports()
                .get_by_chain_and_asset(ChainId::new(chain), &asset_id)
                .await?;
            if reports.is_empty() {
                println!("No data found for {asset_id}");
                return Ok(());
            }

            let balances: Vec<AssetBalance> = reports
                .iter()
                .map(|report| AssetBalance {
                    timestamp: report.timestamp,
                    asset: report.amount,
                    usd: report.usd_value,
                })
                .collect();
            let series = chart_points(&balances, hours, decimals as i32, usd_first)?;

            let (first_column, second_column) = if usd_first {
                ("USD", "Amount")
            } else {
                ("Amount", "USD")
            };
            println!(
                "{:<20} | {:<18} | {:<18}",
                "Time", first_column, second_column
            );
            println!("{}", "-".repeat(60));
            for point in series {
                println!(
                    "{:<20} | {:<18.4} | {:<18.4}",
                    point.timestamp.to_string(),
                    point.values[0],
                    point.values[1]
                );
            }
        }
        Commands::Boundaries { entity } => {
            let boundaries = match entity {
                Entity::Balances => db.balances().find_data_boundaries().await?,
                Entity::Prices => db.prices().find_data_boundaries().await?,
                Entity::Supplies => db.total_supplies().find_data_boundaries().await?,
            };
            let mut rows: Vec<_> = boundaries.into_iter().collect();
            rows.sort_by(|a, b| a.0.cmp(&b.0));

            println!("{:<30} | {:<20} | {:<20}", "Asset", "Earliest", "Latest");
            println!("{}", "-".repeat(76));
            for (asset_id, boundary) in rows {
                println!(
                    "{:<30} | {:<20} | {:<20}",
                    asset_id.to_string(),
                    boundary.earliest.to_string(),
                    boundary.latest.to_string()
                );
            }
        }
        Commands::Serve { bind, tokens } => {
            let raw = std::fs::read_to_string(&tokens)
                .with_context(|| format!("cannot read {}", tokens.display()))?;
            let tokens: Vec<Token> =
                serde_json::from_str(&raw).context("cannot parse token metadata")?;
            let state = AppState::new(db, tokens);
            tvl_api::serve(state, bind).await?;
        }
    }

    Ok(())
}
