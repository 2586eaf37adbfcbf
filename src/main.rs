use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use std::process;
use tracing_subscriber::EnvFilter;

use montecarlo_pi::{Backend, Config, RemainderPolicy};

/// Estimate pi by Monte Carlo sampling across worker threads
#[derive(Parser)]
#[command(name = "montecarlo_pi")]
#[command(version)]
struct Cli {
    /// Number of workers
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    num_threads: u32,

    /// Worker backend
    #[arg(long, value_enum, default_value_t = Backend::Threads)]
    backend: Backend,

    /// Give the points left over by the even split to the last worker
    #[arg(long)]
    distribute_remainder: bool,

    /// Verbosity level (logs go to stderr)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn print_usage(program: &str) {
    println!("Usage: {} <num_threads>", program);
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            let program = std::env::args().next().unwrap_or_else(|| "montecarlo_pi".into());
            print!("{}", err.render());
            print_usage(&program);
            process::exit(1);
        }
    };

    init_logging(cli.verbose);

    let remainder = if cli.distribute_remainder {
        RemainderPolicy::LastWorker
    } else {
        RemainderPolicy::Drop
    };
    let config = Config::new(cli.num_threads as usize)
        .context("Invalid configuration")?
        .with_remainder(remainder);

    let estimate = match cli.backend {
        Backend::Threads => montecarlo_pi::estimate(&config),
        Backend::Tokio => montecarlo_pi::estimate_on_runtime(&config),
    }
    .context("Estimation failed")?;

    println!("{}", estimate);
    Ok(())
}
