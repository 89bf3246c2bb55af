//! Portfolio CLI
//!
//! Builds the site snapshot and previews each filtered list from a terminal.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use portfolio::{
    error::{AppError, Result},
    models::{
        Article, CollectionSlug, Config, MaterialAsset, MaterialCollection, Repository, Talk,
        fallback_articles, spotlight,
    },
    pipeline::{self, FilterEngine, Filterable},
    services,
    storage::LocalStorage,
    utils::http::HttpFetcher,
};

/// Portfolio - content pipeline for the portfolio site
#[derive(Parser, Debug)]
#[command(
    name = "portfolio",
    version,
    about = "Build and preview portfolio content lists"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "site/config.toml")]
    config: PathBuf,

    /// Directory local source paths are resolved against
    #[arg(short, long, default_value = ".")]
    base: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Search and filter options shared by the list commands.
#[derive(clap::Args, Debug, Default)]
struct FilterArgs {
    /// Free-text search
    #[arg(short, long)]
    query: Option<String>,

    /// Category filter as `axis=value`; repeatable
    #[arg(short, long = "filter", value_parser = parse_filter)]
    filters: Vec<(String, String)>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch every source and write the JSON snapshot
    Build {
        /// Output directory (default: {base}/public/data)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List articles from the feed
    Articles {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List public repositories
    Projects {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List talks
    Talks {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List the files of one material collection
    Materials {
        /// Collection slug: slides, summaries, roadmaps or templates
        slug: CollectionSlug,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// List material collections with their file counts
    Collections,

    /// Validate the configuration file
    Validate,
}

fn parse_filter(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(axis, value)| (axis.trim().to_string(), value.trim().to_string()))
        .filter(|(axis, value)| !axis.is_empty() && !value.is_empty())
        .ok_or_else(|| format!("expected axis=value, got '{raw}'"))
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// One-record summary printed by the list commands.
trait Card {
    fn card(&self) -> String;
}

impl Card for Article {
    fn card(&self) -> String {
        format!(
            "[{}] {} ({})\n    {}\n    {}",
            self.tag, self.title, self.published_at, self.excerpt, self.url
        )
    }
}

impl Card for Repository {
    fn card(&self) -> String {
        let mut flags = Vec::new();
        if self.is_fork {
            flags.push("fork");
        }
        if self.is_archived {
            flags.push("archived");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };

        let description = if self.description.is_empty() {
            "No description provided."
        } else {
            self.description.as_str()
        };

        format!(
            "{}{} - {} | ★ {} | forks {} | updated {}\n    {}\n    {}",
            self.name,
            flags,
            self.language_label(),
            self.stars,
            self.forks,
            self.updated_at,
            description,
            self.url
        )
    }
}

impl Card for Talk {
    fn card(&self) -> String {
        format!(
            "{} - {} ({}, {}, {})\n    {}",
            self.title,
            self.event,
            self.display_date(),
            self.format,
            self.source,
            self.url
        )
    }
}

impl Card for MaterialAsset {
    fn card(&self) -> String {
        format!(
            "{} [{}] {} | updated {}\n    {}",
            self.display_name, self.extension, self.size_label, self.updated_at, self.href
        )
    }
}

/// Apply the filter arguments and print options, counts and cards.
///
/// Returns the visible records.
fn print_list<'a, T: Filterable + Card>(
    items: &'a [T],
    args: &FilterArgs,
    empty_message: &str,
) -> Result<Vec<&'a T>> {
    let engine = FilterEngine::new(items);

    let mut state = engine.initial_state();
    if let Some(query) = &args.query {
        state = engine.apply_query(&state, query);
    }
    for (axis, value) in &args.filters {
        state = engine.apply_axis(&state, axis, value)?;
    }

    for axis in engine.options() {
        println!("{} ({}): {}", axis.label, axis.key, axis.options.join(" | "));
    }

    let view = engine.view(&state);
    println!();
    if view.has_filters {
        println!("{} of {} shown (clear filters to see all)", view.shown(), view.total);
    } else {
        println!("{} of {} shown", view.shown(), view.total);
    }
    println!();

    if view.is_empty() {
        println!("{empty_message}");
    }
    for item in &view.visible {
        println!("{}\n", item.card());
    }

    Ok(view.visible)
}

fn report_unavailable<T>(name: &str, retrieval: &services::Retrieval<T>) {
    if let Some(reason) = &retrieval.unavailable {
        log::warn!("{name} source unavailable ({reason}); showing fallback content");
    }
}

fn default_out(base: &Path) -> PathBuf {
    base.join("public").join("data")
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    log::debug!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Build { out } => {
            let out = out.unwrap_or_else(|| default_out(&cli.base));
            let fetcher = HttpFetcher::new(&config.http)?;
            let storage = LocalStorage::new(&out);

            let summary = pipeline::run_build(&config, &fetcher, &storage, &cli.base).await?;
            log::info!(
                "Wrote {} files to {} at {}",
                summary.files_written,
                out.display(),
                summary.timestamp.to_rfc3339()
            );
        }

        Command::Articles { filter } => {
            let fetcher = HttpFetcher::new(&config.http)?;
            let articles = services::fetch_articles(&fetcher, &config)
                .await
                .or_fallback(fallback_articles);
            report_unavailable("Article", &articles);

            print_list(
                &articles.items,
                &filter,
                "No articles match the selected filters yet.",
            )?;
        }

        Command::Projects { filter } => {
            let fetcher = HttpFetcher::new(&config.http)?;
            let repositories = services::fetch_repositories(&fetcher, &config).await;

            print_list(
                &repositories.items,
                &filter,
                "No repositories match the selected filters yet.",
            )?;
        }

        Command::Talks { filter } => {
            let talks = services::load_talks(&config.talks_path(&cli.base)).await;
            report_unavailable("Talk", &talks);

            let visible = print_list(
                &talks.items,
                &filter,
                "No talk sessions match the selected filters yet.",
            )?;
            if let Some(talk) = spotlight(&visible) {
                println!("Spotlight: {} ({})", talk.title, talk.url);
            }
        }

        Command::Materials { slug, filter } => {
            let collection = MaterialCollection::find(slug)
                .ok_or_else(|| AppError::validation(format!("Unknown material collection '{slug}'")))?;
            println!("{}\n{}\n", collection.title, collection.description);

            let root = config.materials_root(&cli.base);
            let assets = services::collection_assets(&root, slug).await;
            if assets.items.is_empty() && filter.query.is_none() && filter.filters.is_empty() {
                println!("No files published yet. Upload to {}", collection.upload_path);
                return Ok(());
            }

            print_list(
                &assets.items,
                &filter,
                "No files match the selected filters yet.",
            )?;
        }

        Command::Collections => {
            let overview = services::materials_overview(&config.materials_root(&cli.base)).await;
            for entry in &overview.collections {
                let count = entry.assets.items.len();
                println!(
                    "{:<10} {:<24} {} {}",
                    entry.collection.slug,
                    entry.collection.title,
                    count,
                    if count == 1 { "file" } else { "files" }
                );
            }
            println!("\n{} files in total", overview.total_assets);
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
        }
    }

    Ok(())
}
