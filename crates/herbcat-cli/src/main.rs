mod browse;
mod manage;

use clap::{Parser, Subcommand};
use herbcat_client::CatalogClient;
use herbcat_core::{CategoryFilter, SortKey};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "herbcat")]
#[command(about = "Herbal product catalog command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List products matching a search, category filter and sort order
    List {
        /// Case-insensitive text matched against name, latin name and category
        #[arg(long, default_value = "")]
        search: String,
        /// Category id, or "all"
        #[arg(long, default_value = "all")]
        category: CategoryFilter,
        /// One of: name, price-low, price-high
        #[arg(long, default_value = "name")]
        sort: SortKey,
        /// Maximum number of products to show
        #[arg(long)]
        limit: Option<usize>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show the home-page preview (first products by name)
    Preview {
        #[arg(long)]
        json: bool,
    },
    /// List product categories
    Categories {
        #[arg(long)]
        json: bool,
    },
    /// Show a single product
    Show {
        id: i64,
        #[arg(long)]
        json: bool,
    },
    /// Create a product
    Create {
        #[command(flatten)]
        fields: manage::CreateArgs,
    },
    /// Update a product; only fields that changed are sent
    Update {
        id: i64,
        #[command(flatten)]
        fields: manage::UpdateArgs,
    },
    /// Delete a product
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = herbcat_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let client = CatalogClient::from_config(&config)
        .map_err(|e| anyhow::anyhow!("failed to build catalog client: {e}"))?;

    match cli.command {
        Commands::List {
            search,
            category,
            sort,
            limit,
            json,
        } => {
            let query = herbcat_core::CatalogQuery::new()
                .with_search(search)
                .with_category(category)
                .with_sort(sort)
                .with_limit(limit);
            browse::run_list(&client, &query, json).await
        }
        Commands::Preview { json } => {
            browse::run_preview(&client, config.preview_limit, json).await
        }
        Commands::Categories { json } => browse::run_categories(&client, json).await,
        Commands::Show { id, json } => browse::run_show(&client, id, json).await,
        Commands::Create { fields } => manage::run_create(&client, fields).await,
        Commands::Update { id, fields } => manage::run_update(&client, id, fields).await,
        Commands::Delete { id } => manage::run_delete(&client, id).await,
    }
}
