mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "leadqual-cli")]
#[command(about = "Lead qualification command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Bulk-import leads from a CSV file.
    Import {
        /// CSV with columns name,role,company,industry,location,linkedin_bio.
        file: PathBuf,
    },
    /// Create a new offer; scoring always uses the latest one.
    Offer {
        #[arg(long)]
        name: String,
        /// Repeatable.
        #[arg(long = "value-prop", required = true)]
        value_props: Vec<String>,
        /// Repeatable.
        #[arg(long = "use-case", required = true)]
        ideal_use_cases: Vec<String>,
    },
    /// Run one scoring pass over all leads against the latest offer.
    Score,
    /// Print stored scoring results, best score first.
    Results,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = leadqual_core::load_app_config_from_env()?;
    let pool_config = leadqual_db::PoolConfig::from_app_config(&config);
    let pool = leadqual_db::connect_pool(&config.database_url, pool_config).await?;
    leadqual_db::run_migrations(&pool).await?;

    match cli.command {
        Commands::Import { file } => commands::import(&pool, &file).await?,
        Commands::Offer {
            name,
            value_props,
            ideal_use_cases,
        } => commands::create_offer(&pool, &name, &value_props, &ideal_use_cases).await?,
        Commands::Score => commands::score(&pool, &config).await?,
        Commands::Results => commands::results(&pool).await?,
    }

    Ok(())
}
