//! catalog-admin - inspect, search, export and bulk import the catalog

use anyhow::{Context, Result, bail};
use catalog_engine::transfer::upload::{FileCandidate, UploadPolicy};
use catalog_engine::{
    CatalogStore, Config, CsvSpreadsheet, SheetFormat, SpreadsheetDecoder, SpreadsheetEncoder,
    init_logger_with_file,
};
use clap::{Parser, Subcommand};
use shared::models::{Catalog, NodeLevel};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "catalog-admin", version, about = "Catalog admin tools")]
struct Cli {
    /// JSON catalog to start from (overrides CATALOG_SEED_PATH)
    #[arg(long, global = true)]
    seed: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Ancestor selection for level-scoped commands
#[derive(clap::Args, Debug, Default)]
struct Scope {
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    subcategory: Option<String>,
    #[arg(long = "sub-subcategory")]
    sub_subcategory: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the catalog tree
    Tree {
        /// Print JSON instead of an outline
        #[arg(long)]
        json: bool,
    },

    /// Root categories matching a query at any depth
    Search { query: String },

    /// List the products of a sub-subcategory
    Products {
        #[command(flatten)]
        scope: Scope,
        #[arg(long, default_value = "")]
        query: String,
        /// name-asc, name-desc, price-asc or price-desc
        #[arg(long, default_value = "")]
        sort: String,
    },

    /// Export one sibling group as CSV
    Export {
        /// category, subcategory or sub-subcategory
        level: String,
        #[command(flatten)]
        scope: Scope,
        /// Output directory
        #[arg(long, short, default_value = ".")]
        out: PathBuf,
    },

    /// Bulk import a CSV sheet and print the resulting catalog
    Import {
        /// category, subcategory or sub-subcategory
        level: String,
        file: PathBuf,
        #[command(flatten)]
        scope: Scope,
        /// Write the resulting catalog JSON here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn parse_level(raw: &str) -> Result<NodeLevel> {
    NodeLevel::parse(raw).with_context(|| format!("Unknown level '{}'", raw))
}

fn select(store: CatalogStore, scope: &Scope) -> Result<CatalogStore> {
    let mut store = store;
    if let Some(name) = &scope.category {
        store = store.select_category(name)?;
    }
    if let Some(name) = &scope.subcategory {
        store = store.select_subcategory(name)?;
    }
    if let Some(name) = &scope.sub_subcategory {
        store = store.select_sub_subcategory(name)?;
    }
    Ok(store)
}

fn print_outline(catalog: &Catalog) {
    for category in &catalog.categories {
        println!("{}", category.name);
        for sub in &category.subcategories {
            println!("  {}", sub.name);
            for sub_sub in &sub.sub_subcategories {
                println!("    {}", sub_sub.name);
                for product in &sub_sub.products {
                    println!("      [{}] {} ({})", product.id, product.name, product.price);
                }
            }
        }
    }
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(seed) = &cli.seed {
        config.seed_path = Some(seed.display().to_string());
    }
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    let store = CatalogStore::bootstrap(&config).context("Failed to load catalog")?;
    tracing::debug!(stats = ?store.stats(), environment = %config.environment, "Catalog ready");

    match cli.command {
        Command::Tree { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(store.catalog())?);
            } else {
                print_outline(store.catalog());
            }
        }
        Command::Search { query } => {
            for category in store.filtered_categories(&query) {
                println!("{}", category.name);
            }
        }
        Command::Products { scope, query, sort } => {
            let store = select(store, &scope)?;
            if store.selection().sub_subcategory().is_none() {
                bail!("--category, --subcategory and --sub-subcategory are required");
            }
            for product in store.sorted_products(&query, &sort) {
                println!("[{}] {} {}", product.id, product.name, product.price);
            }
        }
        Command::Export { level, scope, out } => {
            let level = parse_level(&level)?;
            let store = select(store, &scope)?;
            let export = store.export(level)?;
            let bytes = CsvSpreadsheet::new().encode(&export.rows, &export.columns)?;
            let path = out.join(export.file_name(SheetFormat::DelimitedText.extension()));
            std::fs::write(&path, bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), rows = export.rows.len(), "Export written");
            println!("{}", path.display());
        }
        Command::Import {
            level,
            file,
            scope,
            output,
        } => {
            let level = parse_level(&level)?;
            let store = select(store, &scope)?;

            let candidate = FileCandidate::from_path(&file)?;
            let format = UploadPolicy::from_config(&config).check_spreadsheet(&candidate)?;
            let bytes = std::fs::read(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let rows = CsvSpreadsheet::new().decode(&bytes, format)?;

            let (store, count) = store.import_rows(level, &rows)?;
            tracing::info!(level = level.label(), count, stats = ?store.stats(), "Import applied");

            let json = serde_json::to_string_pretty(store.catalog())?;
            match output {
                Some(path) => std::fs::write(&path, json)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => println!("{}", json),
            }
        }
    }
    Ok(())
}
