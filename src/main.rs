use std::io::{self, Write};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use pricecorr_lib::models::config::{AppConfig, SourceConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use pricecorr_lib::utils::export;
use pricecorr_lib::{commands, init_tracing, AppState};

/// Windowed price correlation for the dashboard's tickers
#[derive(Parser)]
#[command(name = "pricecorr")]
#[command(version)]
struct Cli {
    /// Base URL of the price history API
    #[arg(long, env = "PRICECORR_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "PRICECORR_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the available tickers
    Tickers,
    /// Load every ticker for a window and print the correlation matrix
    Matrix {
        /// Look-back window in minutes (defaults to the slider default)
        #[arg(long, allow_negative_numbers = true)]
        minutes: Option<i64>,
        #[arg(long, value_enum, default_value_t = MatrixFormat::Table)]
        format: MatrixFormat,
        /// Use `minutes` as given instead of snapping it to the slider
        #[arg(long)]
        no_snap: bool,
    },
    /// Load every ticker for a window and print per-ticker statistics
    Summary {
        #[arg(long, allow_negative_numbers = true)]
        minutes: Option<i64>,
        #[arg(long, value_enum, default_value_t = SummaryFormat::Csv)]
        format: SummaryFormat,
        #[arg(long)]
        no_snap: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum MatrixFormat {
    Table,
    Csv,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum SummaryFormat {
    Csv,
    Json,
}

fn resolve_minutes(config: &AppConfig, minutes: Option<i64>, no_snap: bool) -> i64 {
    let requested = minutes.unwrap_or(config.slider.default as i64);
    if no_snap {
        requested
    } else {
        config.slider.snap(requested)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = AppConfig {
        source: SourceConfig {
            base_url: cli.base_url,
            timeout_secs: cli.timeout_secs,
        },
        ..AppConfig::default()
    };
    let state = AppState::from_config(config).context("Invalid configuration")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Tickers => {
            for ticker in commands::get_tickers(&state).await? {
                writeln!(out, "{}", ticker)?;
            }
        }
        Command::Matrix {
            minutes,
            format,
            no_snap,
        } => {
            let minutes = resolve_minutes(&state.config, minutes, no_snap);
            info!("Loading correlation matrix for {} minutes", minutes);
            let view = commands::set_window(&state, minutes).await?;
            match format {
                MatrixFormat::Table => export::write_matrix_table(&view.matrix, &mut out)?,
                MatrixFormat::Csv => export::write_matrix_csv(&view.matrix, &mut out)?,
                MatrixFormat::Json => export::write_json(&view, &mut out)?,
            }
        }
        Command::Summary {
            minutes,
            format,
            no_snap,
        } => {
            let minutes = resolve_minutes(&state.config, minutes, no_snap);
            let view = commands::set_window(&state, minutes).await?;
            match format {
                SummaryFormat::Csv => export::write_summaries_csv(&view.summaries, &mut out)?,
                SummaryFormat::Json => export::write_json(&view.summaries, &mut out)?,
            }
        }
    }

    Ok(())
}
