//! pc_probe - one-shot machine probe binary
//!
//! Prints CPU frequency and load, disk size and memory size once, then exits.
//! The exit status is non-zero when any metric could not be sampled.

use anyhow::Context;
use clap::Parser;
use pc_probe::{
    exit_status, render, OutputFormat, Probe, ProbeConfig, DEFAULT_PROC_ROOT, DEFAULT_WINDOW_US,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, Level};
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

/// Exit status when the probe could not start at all
const EXIT_STARTUP_FAILED: u8 = 2;

#[derive(Parser)]
#[command(name = "pc_probe")]
#[command(about = "One-shot CPU, disk and memory probe")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = "Samples CPU frequency and load over a short window, then reports disk and memory capacity")]
struct Cli {
    /// CPU measurement window in microseconds
    #[arg(short, long, default_value_t = DEFAULT_WINDOW_US)]
    window_us: u64,

    /// Path on the filesystem to measure (defaults to this executable)
    #[arg(short, long)]
    path: Option<PathBuf>,

    /// Directory holding the kernel `stat` and `meminfo` files
    #[arg(long, default_value = DEFAULT_PROC_ROOT)]
    proc_root: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            // The logger may not be installed yet, so report directly.
            eprintln!("{}", startup_failure_message(&err));
            ExitCode::from(EXIT_STARTUP_FAILED)
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<u8> {
    init_logging(cli)?;

    let program = std::env::args_os()
        .next()
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());

    let disk_path = cli.path.clone().unwrap_or_else(|| default_disk_path(&program));
    debug!("Disk probe target: {}", disk_path.display());

    let config = ProbeConfig::new(disk_path)
        .with_window_us(cli.window_us)
        .with_proc_root(&cli.proc_root);
    let probe = Probe::new(config).context("invalid probe configuration")?;

    let report = probe.run(program).await;
    let output = render(&report, cli.format).context("failed to render report")?;
    match cli.format {
        OutputFormat::Text => print!("{}", output),
        OutputFormat::Json => println!("{}", output),
    }

    Ok(exit_status(&report))
}

fn startup_failure_message(err: &anyhow::Error) -> String {
    format!("{}: {:#}", env!("CARGO_PKG_NAME"), err)
}

/// The running executable, or the invocation path if it cannot be resolved.
fn default_disk_path(program: &str) -> PathBuf {
    std::env::current_exe().unwrap_or_else(|_| PathBuf::from(program))
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::default().add_directive(LevelFilter::from_level(level).into()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install log subscriber")?;

    Ok(())
}
