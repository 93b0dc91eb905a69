use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use macrodata_catalog::load_default_catalog;
use macrodata_cli::chooser::choose;
use macrodata_cli::summary::{print_resolution, variables_table};
use macrodata_fetch::{
    DEFAULT_MAX_AGE_DAYS, DataStore, FetchOutput, FetcherSet, FredClient, GreenbookClient,
    LocalStore, SeriesFetcher,
};
use macrodata_llm::{API_KEY_ENV_VAR, ChatClient, LlmClassifier, LlmConfig};
use macrodata_map::{KeywordClassifier, Resolver, ResolverConfig, SourceClassifier};
use macrodata_model::{Resolution, ResolutionOutcome, VariableEntry};

use crate::cli::{FetchArgs, ResolutionArgs, ResolveArgs, VariablesArgs};

/// Environment variable naming the default download directory.
pub const OUTPUT_DIR_ENV_VAR: &str = "MACRODATA_OUTPUT_DIR";
const DEFAULT_OUTPUT_DIR: &str = "data";

/// How a `fetch` invocation ended.
#[derive(Debug)]
pub enum FetchReport {
    Saved(Vec<PathBuf>),
    /// A recent download already exists at this path.
    UpToDate(PathBuf),
    Cancelled,
    NoMatch(String),
}

pub fn run_variables(args: &VariablesArgs) -> Result<()> {
    let catalog = load_default_catalog().context("load variable catalog")?;
    let entries = match args.source {
        Some(source) => catalog.filter_by_source(source.into()),
        None => catalog.entries().iter().collect(),
    };
    println!("{}", variables_table(entries.iter().copied()));
    for (source, count) in catalog.sources() {
        println!("{source}: {count} variables ({})", source.provider());
    }
    Ok(())
}

pub fn run_resolve(args: &ResolveArgs) -> Result<Resolution> {
    let resolver = build_resolver(&args.resolution)?;
    let resolution = resolve(&resolver, &args.resolution);
    if args.json {
        let json =
            serde_json::to_string_pretty(&resolution).context("serialize resolution")?;
        println!("{json}");
    } else {
        print_resolution(&resolution);
    }
    Ok(resolution)
}

pub fn run_fetch(args: &FetchArgs) -> Result<FetchReport> {
    let query = args.resolution.query_text();
    let span = info_span!("fetch", query = %query);
    let _guard = span.enter();

    let resolver = build_resolver(&args.resolution)?;
    let resolution = resolve(&resolver, &args.resolution);
    print_resolution(&resolution);

    let entry = match resolution.outcome {
        ResolutionOutcome::Resolved { candidate } => candidate.entry,
        ResolutionOutcome::AmbiguousChoice { candidates } => {
            if args.no_input || !io::stdin().is_terminal() {
                anyhow::bail!(
                    "\"{query}\" matches {} variables; refine the query or run interactively",
                    candidates.len()
                );
            }
            let stdin = io::stdin();
            let selected = choose(&candidates, stdin.lock(), io::stdout())
                .context("read selection")?;
            match selected.and_then(|index| candidates.into_iter().nth(index)) {
                Some(candidate) => candidate.entry,
                None => return Ok(FetchReport::Cancelled),
            }
        }
        ResolutionOutcome::NoMatch { query } => return Ok(FetchReport::NoMatch(query)),
    };

    let store = LocalStore::new(output_dir(args));
    let max_age = chrono::Duration::days(DEFAULT_MAX_AGE_DAYS);
    if !args.force && !store.is_stale(&entry, max_age) {
        let dir = store.archive_dir(entry.upstream_id());
        info!(code = %entry.code, dir = %dir.display(), "skipping download; recent copy exists");
        return Ok(FetchReport::UpToDate(dir));
    }

    let fetchers = FetcherSet::new(
        Box::new(FredFromEnv),
        Box::new(GreenbookClient::new().context("build Greenbook client")?),
    );
    let output = fetchers
        .fetch(&entry)
        .with_context(|| format!("fetch {} from {}", entry.upstream_id(), entry.source.provider()))?;
    let paths = store
        .save(&query, &entry, &output)
        .with_context(|| format!("save {} under {}", entry.code, store.root().display()))?;
    Ok(FetchReport::Saved(paths))
}

fn resolve(resolver: &Resolver, args: &ResolutionArgs) -> Resolution {
    let query = args.query_text();
    match args.source {
        Some(source) => resolver.resolve_with_source(&query, source.into()),
        None => resolver.resolve(&query),
    }
}

fn build_resolver(args: &ResolutionArgs) -> Result<Resolver> {
    let catalog = load_default_catalog().context("load variable catalog")?;
    let config = resolver_config(args);
    let classifier = build_classifier(args, config.classify_timeout);
    Ok(Resolver::new(Arc::new(catalog), classifier).with_config(config))
}

fn resolver_config(args: &ResolutionArgs) -> ResolverConfig {
    let mut config =
        ResolverConfig::default().with_classify_timeout(Duration::from_secs(args.timeout_secs));
    if let Some(threshold) = args.threshold {
        config = config.with_threshold(threshold);
    }
    if let Some(margin) = args.margin {
        config = config.with_margin(margin);
    }
    if let Some(max_choices) = args.max_choices {
        config = config.with_max_choices(max_choices);
    }
    config
}

fn build_classifier(args: &ResolutionArgs, timeout: Duration) -> Arc<dyn SourceClassifier> {
    if args.no_llm || args.source.is_some() {
        return Arc::new(KeywordClassifier::new());
    }
    let api_key = std::env::var(API_KEY_ENV_VAR)
        .ok()
        .filter(|key| !key.trim().is_empty());
    let Some(api_key) = api_key else {
        info!("{API_KEY_ENV_VAR} not set; routing with keyword classifier");
        return Arc::new(KeywordClassifier::new());
    };
    let config = LlmConfig::from_env().with_timeout(timeout);
    match ChatClient::new(api_key, config) {
        Ok(client) => Arc::new(LlmClassifier::new(client)),
        Err(err) => {
            warn!(error = %err, "LLM client unavailable; routing with keyword classifier");
            Arc::new(KeywordClassifier::new())
        }
    }
}

fn output_dir(args: &FetchArgs) -> PathBuf {
    args.output_dir
        .clone()
        .or_else(|| {
            std::env::var_os(OUTPUT_DIR_ENV_VAR)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
}

/// FRED fetcher that reads `FRED_API_KEY` only when a historical series is
/// actually requested, so forecast downloads work without it.
struct FredFromEnv;

impl SeriesFetcher for FredFromEnv {
    fn name(&self) -> &str {
        "fred"
    }

    fn fetch(&self, entry: &VariableEntry) -> macrodata_fetch::Result<FetchOutput> {
        FredClient::from_env()?.fetch(entry)
    }
}
