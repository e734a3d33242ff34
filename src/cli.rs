//! Command-line interface components.

use crate::config::{DataLocation, LookupConfig, ReportFormat};
use crate::constants::DEFAULT_DATA_PATH;
use crate::error::Result;
use clap::{Parser, ValueEnum};
use tracing::debug;

#[derive(Parser, Debug, Clone)]
#[command(name = "diem_thi")]
#[command(about = "Look up exam results by student identifier (SBD)")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Identifiers to look up; starts an interactive prompt when omitted
    #[arg(value_name = "SBD")]
    pub sbd: Vec<String>,

    /// Score sheet location: a CSV file path or an http(s) URL
    #[arg(short, long, value_name = "PATH_OR_URL", default_value = DEFAULT_DATA_PATH)]
    pub data: String,

    /// Report output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,

    /// Load the score sheet on the first search instead of at startup
    #[arg(long)]
    pub no_preload: bool,

    /// Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only show errors; hides the loading spinner
    #[arg(short, long)]
    pub quiet: bool,
}

/// Report formats accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Html,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => ReportFormat::Text,
            OutputFormat::Html => ReportFormat::Html,
        }
    }
}

impl Args {
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Interactive mode reads identifiers from stdin
    pub fn is_interactive(&self) -> bool {
        self.sbd.is_empty()
    }

    /// Build the lookup configuration from defaults and flags
    pub fn to_config(&self) -> Result<LookupConfig> {
        let mut config = LookupConfig::default()
            .with_data(DataLocation::parse(&self.data))
            .with_format(self.format.into());
        if self.no_color {
            config = config.without_color();
        }
        if self.no_preload {
            config = config.without_preload();
        }
        if self.quiet {
            config = config.without_progress();
        }

        config.validate()?;
        Ok(config)
    }
}

/// Set up structured logging to stderr
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("diem_thi={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}
