use anyhow::Context;
use clap::{Parser, ValueEnum};
use newsdeck_core::{
    AppConfig, ConfigError, CoreError, EnhancedItem, ErrorExt, ErrorReporter, HighlightLevel,
    HighlightPreferences, Item,
};
use preference_store::{
    load_filter_preferences, load_highlight_preferences, load_sort_criterion, PreferenceStore,
};
use relevance_engine::Pipeline;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PayloadFormat {
    /// Item array as produced by any source
    Items,
    /// Reddit listing response
    Reddit,
    /// Hacker News story array
    #[value(name = "hackernews", alias = "hn")]
    HackerNews,
    /// GitHub repository search response
    #[value(name = "github")]
    GitHub,
}

/// Rank a saved feed payload with the stored filter and highlight preferences.
#[derive(Parser, Debug)]
#[command(name = "newsdeck")]
#[command(version)]
#[command(about, long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// JSON payload to rank
    #[arg(value_name = "PAYLOAD")]
    payload: PathBuf,

    /// Shape of the payload
    #[arg(short, long, value_enum, default_value_t = PayloadFormat::Items)]
    format: PayloadFormat,
}

/// A missing config file falls back to defaults; the error is handed back so
/// it can be logged once tracing is up.
fn load_config(path: Option<&Path>) -> Result<(AppConfig, Option<ConfigError>), ConfigError> {
    let Some(path) = path else {
        return Ok((AppConfig::default(), None));
    };
    match AppConfig::load(path) {
        Ok(config) => Ok((config, None)),
        Err(e @ ConfigError::FileNotFound { .. }) => Ok((AppConfig::default(), Some(e))),
        Err(e) => Err(e),
    }
}

fn read_items(path: &Path, format: PayloadFormat) -> Result<Vec<Item>, CoreError> {
    let raw = std::fs::read_to_string(path)?;
    let items = match format {
        PayloadFormat::Items => newsdeck_core::parse_items(&raw)?,
        PayloadFormat::Reddit => source_adapters::parse_listing(&raw)?,
        PayloadFormat::HackerNews => {
            let stories = source_adapters::parse_stories(&raw)?;
            source_adapters::stories_to_items(source_adapters::prefilter_stories(
                stories,
                chrono::Utc::now(),
            ))
        }
        PayloadFormat::GitHub => {
            let repos = source_adapters::parse_search_response(&raw)?;
            source_adapters::repos_to_items(source_adapters::prefilter_repos(repos))?
        }
    };
    Ok(items)
}

/// Categories from the config file replace the stored table and are all enabled.
fn apply_config_categories(config: &AppConfig, highlight: HighlightPreferences) -> HighlightPreferences {
    match &config.categories {
        Some(categories) => HighlightPreferences {
            enable_highlighting: highlight.enable_highlighting,
            primary_keywords: highlight.primary_keywords,
            secondary_keywords: highlight.secondary_keywords,
            ..HighlightPreferences::with_categories(categories.clone())
        },
        None => highlight,
    }
}

fn render(item: &EnhancedItem) -> String {
    let marker = match item.highlight_level {
        HighlightLevel::None => "      ".to_string(),
        level => format!("[{}]", level.as_str().to_uppercase()),
    };
    let group = item.item.group.as_deref().unwrap_or("-");
    format!(
        "{marker:<8} {:>3}% {:>6} {} ({group})",
        item.relevance_percentage, item.item.score, item.item.title
    )
}

async fn run(args: Args, config: AppConfig) -> Result<(), CoreError> {
    let store = PreferenceStore::connect(&config.database_url).await?;
    store.run_migrations().await?;

    let filter = load_filter_preferences(&store).await?;
    let highlight = apply_config_categories(&config, load_highlight_preferences(&store).await?);
    let sort = load_sort_criterion(&store).await?;

    let items = read_items(&args.payload, args.format)?;
    info!("Loaded {} items from {}", items.len(), args.payload.display());
    if !filter.enabled {
        warn!("Content filtering is disabled");
    }

    let ranked = Pipeline::new(&filter, &highlight).with_sort(sort).run(items);
    info!("Showing {} items sorted by {}", ranked.len(), sort);
    for item in &ranked {
        println!("{}", render(item));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let (config, missing) =
        load_config(args.config.as_deref()).context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(config.log_filter.as_str())
        .init();

    let reporter = ErrorReporter::new();
    if let Some(e) = missing {
        reporter.report_warning(&CoreError::from(e));
        warn!("Using default configuration");
    }

    info!("Starting Newsdeck");

    if let Err(e) = run(args, config).await {
        reporter.report_error(&e);
        return Err(anyhow::anyhow!(e.user_friendly_message()));
    }
    Ok(())
}
