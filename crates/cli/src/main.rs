use anyhow::{bail, Context, Result};
use browse::{BrowseConfig, BrowseEngine, PaginationSummary};
use catalog::{CatalogIndex, Facet, FilterField, Perfume};
use catalog_store::InMemoryStore;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Perfume Finder - browse and search a perfume catalog
#[derive(Parser)]
#[command(name = "perfume-finder")]
#[command(about = "Filter, paginate and search a perfume catalog", long_about = None)]
struct Cli {
    /// Path to the catalog JSON file
    #[arg(short, long, default_value = "data/perfumes.json")]
    catalog: PathBuf,

    /// Optional JSON file with browse settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log engine activity at debug level
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter the catalog and print one page of results
    Search(SearchArgs),

    /// Type a prefix and print the name suggestions
    Suggest {
        /// Text typed into the search box
        #[arg(long)]
        prefix: String,
    },

    /// Show catalog statistics
    Stats {
        /// Also list the perfumes of this brand
        #[arg(long)]
        brand: Option<String>,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Free-text query over names, brands, descriptions and notes
    #[arg(short, long)]
    query: Option<String>,

    #[arg(long)]
    brand: Option<String>,

    #[arg(long)]
    gender: Option<String>,

    /// Required accord (repeatable)
    #[arg(long = "accord")]
    accords: Vec<String>,

    #[arg(long = "top-note")]
    top_notes: Vec<String>,

    #[arg(long = "middle-note")]
    middle_notes: Vec<String>,

    #[arg(long = "base-note")]
    base_notes: Vec<String>,

    /// Raw criteria field as key=value, e.g. topNotes=Bergamot,Pepper (repeatable)
    #[arg(long = "filter", value_name = "KEY=VALUE")]
    filters: Vec<String>,

    /// Page to show, starting at 1
    #[arg(long, default_value = "1")]
    page: u32,

    /// Overrides items_per_page from the config
    #[arg(long)]
    per_page: Option<u32>,

    /// Filter in memory instead of going through the store
    #[arg(long)]
    local: bool,
}

impl SearchArgs {
    fn filter_fields(&self) -> Result<Vec<FilterField>> {
        let mut fields = Vec::new();
        if let Some(query) = &self.query {
            fields.push(FilterField::SearchQuery(query.clone()));
        }
        if self.brand.is_some() {
            fields.push(FilterField::Brand(self.brand.clone()));
        }
        if self.gender.is_some() {
            fields.push(FilterField::Gender(self.gender.clone()));
        }
        let facets = [
            (Facet::Accords, &self.accords),
            (Facet::TopNotes, &self.top_notes),
            (Facet::MiddleNotes, &self.middle_notes),
            (Facet::BaseNotes, &self.base_notes),
        ];
        for (facet, values) in facets {
            if !values.is_empty() {
                fields.push(FilterField::Facet(facet, values.clone()));
            }
        }
        for raw in &self.filters {
            let (key, value) = raw
                .split_once('=')
                .with_context(|| format!("Expected KEY=VALUE, got '{raw}'"))?;
            fields.push(
                FilterField::parse(key.trim(), value)
                    .with_context(|| format!("Invalid --filter '{raw}'"))?,
            );
        }
        Ok(fields)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "info,browse=debug,catalog_store=debug,matcher=debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    let config = match &cli.config {
        Some(path) => BrowseConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => BrowseConfig::default(),
    };

    let start = Instant::now();
    let index = Arc::new(
        CatalogIndex::load_from_file(&cli.catalog)
            .with_context(|| format!("Failed to load catalog from {}", cli.catalog.display()))?,
    );
    println!(
        "{} Loaded {} perfumes in {:?}",
        "✓".green(),
        index.len(),
        start.elapsed()
    );

    match cli.command {
        Commands::Search(args) => handle_search(index, config, args).await?,
        Commands::Suggest { prefix } => handle_suggest(index, config, &prefix).await?,
        Commands::Stats { brand } => handle_stats(&index, brand.as_deref()),
    }

    Ok(())
}

/// Handle the 'search' command
async fn handle_search(index: Arc<CatalogIndex>, mut config: BrowseConfig, args: SearchArgs) -> Result<()> {
    if let Some(per_page) = args.per_page {
        config.items_per_page = per_page;
    }
    config.validate().context("Invalid browse settings")?;

    let store = Arc::new(
        InMemoryStore::new(Arc::clone(&index)).with_suggestion_limit(config.suggestion_limit),
    );
    let mut engine = if args.local {
        BrowseEngine::with_local_catalog(store, &config, index.perfumes().to_vec())
    } else {
        BrowseEngine::new(store, &config)
    };

    engine.start();
    for field in args.filter_fields()? {
        engine.set_filter_field(field);
    }
    engine.settle().await;

    if args.page != 1 {
        engine
            .set_page(args.page)
            .with_context(|| format!("Cannot show page {}", args.page))?;
        engine.settle().await;
    }

    if let Some(err) = engine.last_error() {
        bail!("Search failed: {err}");
    }
    debug!("criteria: {:?}", engine.criteria());

    print_results(engine.visible_items(), engine.pagination_summary());
    Ok(())
}

/// Handle the 'suggest' command
async fn handle_suggest(index: Arc<CatalogIndex>, config: BrowseConfig, prefix: &str) -> Result<()> {
    let store = Arc::new(
        InMemoryStore::new(Arc::clone(&index)).with_suggestion_limit(config.suggestion_limit),
    );
    let mut engine = BrowseEngine::new(Arc::clone(&store), &config);

    // Keystrokes arrive faster than the debounce, so only the full prefix is queried
    let mut typed = String::new();
    for ch in prefix.chars() {
        typed.push(ch);
        engine.on_text_changed(&typed);
    }
    engine.settle().await;
    debug!("suggestion queries sent: {:?}", store.suggestion_prefixes());

    println!("{}", format!("Suggestions for '{}':", prefix).bold().blue());
    if engine.suggestions().is_empty() {
        println!("  (none)");
    }
    for (i, name) in engine.suggestions().iter().enumerate() {
        println!("{}. {}", (i + 1).to_string().green(), name);
    }
    Ok(())
}

/// Handle the 'stats' command
fn handle_stats(index: &CatalogIndex, brand: Option<&str>) {
    println!("{}", "Catalog statistics:".bold().blue());
    println!("{}Perfumes: {}", "• ".green(), index.len());
    println!("{}Brands: {}", "• ".green(), index.brand_count());
    for facet in Facet::ALL {
        println!(
            "{}Distinct {}: {}",
            "• ".cyan(),
            facet.label(),
            index.distinct_facet_values(facet).len()
        );
    }

    if let Some(brand) = brand {
        let perfumes = index.by_brand(brand);
        println!("\n{} {} ({})", "Brand".bold().blue(), brand, perfumes.len());
        for perfume in perfumes {
            println!("  {}", perfume.name);
        }
    }
}

fn print_results(perfumes: &[Perfume], summary: PaginationSummary) {
    println!(
        "{}",
        format!(
            "Page {} of {}",
            summary.page_number,
            summary.total_pages.max(1)
        )
        .bold()
        .blue()
    );
    if perfumes.is_empty() {
        println!("  No perfumes match these filters.");
    }
    for perfume in perfumes {
        let brand = if perfume.brand.is_empty() {
            String::new()
        } else {
            format!(" by {}", perfume.brand)
        };
        println!(
            "{} {}{} [{}]",
            "•".green(),
            perfume.name.bold(),
            brand,
            perfume.accords.join(", ")
        );
    }

    let mut nav = Vec::new();
    if summary.has_prev {
        nav.push(format!("--page {}", summary.page_number - 1));
    }
    if summary.has_next {
        nav.push(format!("--page {}", summary.page_number + 1));
    }
    if !nav.is_empty() {
        println!("{}", format!("More: {}", nav.join(" | ")).dimmed());
    }
}
