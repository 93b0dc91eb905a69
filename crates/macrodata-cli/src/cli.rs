//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use macrodata_model::DataSource;

#[derive(Parser)]
#[command(
    name = "macrodata",
    version,
    about = "Resolve and fetch Federal Reserve economic data",
    long_about = "Resolve free-text queries to FRED series or Greenbook/Tealbook forecast \
                  variables, and download the matching data.\n\n\
                  Set GROQ_API_KEY to route queries with an LLM; without it a keyword \
                  classifier is used. FRED downloads need FRED_API_KEY."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve a query to a catalog variable without downloading anything.
    Resolve(ResolveArgs),

    /// Resolve a query and download the matching data.
    Fetch(FetchArgs),

    /// List the variables in the catalog.
    Variables(VariablesArgs),
}

/// Options shared by `resolve` and `fetch`.
#[derive(Args)]
pub struct ResolutionArgs {
    /// Free-text description of the data, e.g. "greenbook real gdp".
    #[arg(value_name = "QUERY", required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Skip classification and search this source only.
    #[arg(long = "source", value_enum)]
    pub source: Option<SourceArg>,

    /// Do not call the LLM; route with the keyword classifier.
    #[arg(long = "no-llm")]
    pub no_llm: bool,

    /// Minimum match score in [0, 1] (default: 0.3).
    #[arg(long = "threshold", value_name = "SCORE")]
    pub threshold: Option<f64>,

    /// Lead the best match needs over the runner-up to win (default: 0.15).
    #[arg(long = "margin", value_name = "SCORE")]
    pub margin: Option<f64>,

    /// Most candidates listed for an ambiguous query (default: 10).
    #[arg(long = "max-choices", value_name = "N")]
    pub max_choices: Option<usize>,

    /// Seconds to wait for the classifier before defaulting to FRED.
    #[arg(long = "timeout-secs", value_name = "SECS", default_value_t = 5)]
    pub timeout_secs: u64,
}

impl ResolutionArgs {
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }
}

#[derive(Args)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub resolution: ResolutionArgs,

    /// Print the resolution as JSON.
    #[arg(long = "json")]
    pub json: bool,
}

#[derive(Args)]
pub struct FetchArgs {
    #[command(flatten)]
    pub resolution: ResolutionArgs,

    /// Directory for downloaded data (default: $MACRODATA_OUTPUT_DIR or ./data).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Download again even if a recent copy exists.
    #[arg(long = "force")]
    pub force: bool,

    /// Never prompt; an ambiguous query is reported and fails.
    #[arg(long = "no-input")]
    pub no_input: bool,
}

#[derive(Args)]
pub struct VariablesArgs {
    /// Only list variables from this source.
    #[arg(long = "source", value_enum)]
    pub source: Option<SourceArg>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SourceArg {
    /// FRED historical series.
    #[value(alias = "fred")]
    Historical,
    /// Greenbook/Tealbook forecasts.
    #[value(alias = "greenbook", alias = "tealbook")]
    Forecast,
}

impl From<SourceArg> for DataSource {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Historical => DataSource::Historical,
            SourceArg::Forecast => DataSource::Forecast,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
