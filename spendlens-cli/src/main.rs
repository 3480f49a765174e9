use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use spendlens_finance::SpendingAnalyzer;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

mod browser;
mod config;
mod console;
mod format;
mod html;

const DEFAULT_CSV: &str = "synthetic_bank_data (1).txt";

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("SPENDLENS_BUILD_SHA"),
    ")"
);

#[derive(Parser, Debug)]
#[command(
    name = "spendlens",
    version = VERSION,
    about = "Personal finance dashboard from a bank transaction export"
)]
struct Cli {
    /// Bank export to analyze (CSV with Date, Amount, Category, Description)
    #[arg(default_value = DEFAULT_CSV)]
    csv: PathBuf,

    /// How to present the dashboard
    #[arg(long, value_enum, default_value_t = OutputFormat::Console)]
    format: OutputFormat,

    /// Where to write the HTML dashboard (default: dashboard.html)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write the HTML dashboard without opening a browser
    #[arg(long)]
    no_open: bool,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of recommended spending cuts
    #[arg(long)]
    top_cuts: Option<usize>,

    /// Number of questionable transactions to list
    #[arg(long)]
    top_questionable: Option<usize>,

    /// `RUST_LOG` takes precedence when set
    #[arg(long, default_value_t = LevelFilter::WARN)]
    log_level: LevelFilter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Console,
    Html,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.log_level);
    debug!("Log level set to {}", cli.log_level.to_string().to_lowercase());

    if !cli.csv.exists() {
        eprintln!("\nError: CSV file not found: {}", cli.csv.display());
        eprintln!("Place your CSV in the working directory or pass the path as the first argument:");
        eprintln!("  spendlens \"path/to/your.csv\"");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let cfg = config::load_config(cli.config.as_deref())?;
    let today = cfg.today()?;
    let table = cfg.necessity_table()?;
    let settings = cfg.report_settings(cli.top_cuts, cli.top_questionable);
    info!(csv = %cli.csv.display(), %today, ?settings, "starting analysis");

    let analyzer = SpendingAnalyzer::from_path(&cli.csv, table, today)
        .with_context(|| format!("loading {}", cli.csv.display()))?
        .with_settings(settings);
    let dashboard = analyzer.generate_dashboard();

    match cli.format {
        OutputFormat::Console => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            console::render(&dashboard, &mut out)?;
            out.flush()?;
        }
        OutputFormat::Json => {
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            serde_json::to_writer_pretty(&mut out, &dashboard).context("serialize dashboard")?;
            writeln!(out)?;
        }
        OutputFormat::Html => {
            let path = cfg.output_path(cli.output);
            let path = if path.is_absolute() {
                path
            } else {
                std::env::current_dir()
                    .context("resolve working directory")?
                    .join(path)
            };
            html::write_dashboard(&dashboard, &path)?;
            println!("Wrote {}", path.display());

            if cfg.open_browser(cli.no_open) {
                // a missing browser never fails the run
                if let Err(e) = browser::open_in_browser(&path) {
                    warn!("could not open browser: {e:#}");
                }
            }
        }
    }

    Ok(())
}

pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(
            ["spendlens", "spendlens_core", "spendlens_ingest", "spendlens_finance"]
                .iter()
                .map(|target| format!("{target}={level}"))
                .collect::<Vec<_>>()
                .join(","),
        ),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["spendlens"]).unwrap();
        assert_eq!(cli.csv, PathBuf::from(DEFAULT_CSV));
        assert_eq!(cli.format, OutputFormat::Console);
        assert_eq!(cli.log_level, LevelFilter::WARN);
        assert!(!cli.no_open);
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "spendlens",
            "bank.csv",
            "--format",
            "html",
            "--output",
            "out.html",
            "--no-open",
            "--top-cuts",
            "3",
            "--top-questionable",
            "12",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.csv, PathBuf::from("bank.csv"));
        assert_eq!(cli.format, OutputFormat::Html);
        assert_eq!(cli.output, Some(PathBuf::from("out.html")));
        assert!(cli.no_open);
        assert_eq!(cli.top_cuts, Some(3));
        assert_eq!(cli.top_questionable, Some(12));
        assert_eq!(cli.log_level, LevelFilter::DEBUG);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["spendlens", "--format", "pdf"]).is_err());
    }

    #[test]
    fn test_run_writes_html() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("bank.csv");
        std::fs::write(
            &csv,
            "Date,Amount,Category,Description\n2024-01-02,-25,Dining,Diner\n",
        )
        .unwrap();
        let out = dir.path().join("report.html");

        let args: Vec<std::ffi::OsString> = vec![
            "spendlens".into(),
            csv.clone().into_os_string(),
            "--format".into(),
            "html".into(),
            "--output".into(),
            out.clone().into_os_string(),
            "--no-open".into(),
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        run(cli).unwrap();
        assert!(std::fs::read_to_string(&out).unwrap().contains("Diner"));
    }
}
