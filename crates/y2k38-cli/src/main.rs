mod config;
mod server;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::time::MissedTickBehavior;
use y2k38_core::{
    Countdown, FirstSample, Policy, TICK_INTERVAL_MILLIS, TargetInstant, Ticker, now_unix_millis,
    terminal_lines,
};
use y2k38_page::Variant;

use crate::config::{Overrides, Settings};
use crate::server::PageServer;

#[derive(Parser)]
#[command(name = "y2k38", about = "Countdown page for the 32-bit Unix time rollover")]
struct Cli {
    /// TOML config file (also Y2K38_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the countdown page over HTTP
    Serve {
        /// Listen address as IP:PORT (also Y2K38_ADDR)
        #[arg(long)]
        addr: Option<String>,

        /// Page variant: terminal or card (also Y2K38_VARIANT)
        #[arg(long)]
        variant: Option<Variant>,
    },

    /// Write the rendered page to stdout or a file
    Render {
        /// Page variant: terminal or card
        #[arg(long)]
        variant: Option<Variant>,

        /// Output file path
        #[arg(long, short)]
        out: Option<PathBuf>,
    },

    /// Print the time remaining until the rollover
    Countdown {
        /// Segments to split into: days or years
        #[arg(long, default_value = "days")]
        policy: Policy,

        /// Sample at this Unix time in milliseconds instead of now
        #[arg(long, allow_negative_numbers = true)]
        at: Option<i64>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,

        /// Refresh every second until the rollover is reached
        #[arg(long)]
        watch: bool,
    },
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Serve { addr, variant } => cmd_serve(&cli, addr.clone(), *variant).await,
        Commands::Render { variant, out } => cmd_render(&cli, *variant, out.as_deref()),
        Commands::Countdown {
            policy,
            at,
            json,
            watch,
        } => {
            if *watch {
                cmd_watch(*policy, *at, *json).await
            } else {
                cmd_countdown(*policy, *at, *json)
            }
        }
    }
}

fn settings(cli: &Cli, addr: Option<String>, variant: Option<Variant>) -> Result<Settings> {
    Settings::from_env(Overrides {
        config: cli.config.clone(),
        addr,
        variant,
    })
    .context("failed to resolve settings")
}

async fn cmd_serve(cli: &Cli, addr: Option<String>, variant: Option<Variant>) -> Result<()> {
    let settings = settings(cli, addr, variant)?;
    let running = PageServer::new(settings.variant, TargetInstant::Y2K38)
        .bind(settings.addr)
        .await?;
    eprintln!("listening on http://{}", running.local_addr());

    let token = running.shutdown_token();
    tokio::spawn(async move {
        server::shutdown_signal().await;
        token.cancel();
    });
    running.wait().await
}

fn cmd_render(cli: &Cli, variant: Option<Variant>, out: Option<&std::path::Path>) -> Result<()> {
    let settings = settings(cli, None, variant)?;
    let html = y2k38_page::render(settings.variant, TargetInstant::Y2K38);

    match out {
        Some(path) => {
            std::fs::write(path, &html)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("wrote {} page to {}", settings.variant, path.display());
        }
        None => print!("{html}"),
    }
    Ok(())
}

fn print_countdown(countdown: &Countdown, json: bool) -> Result<()> {
    if json {
        let line = serde_json::to_string(countdown).context("failed to serialize countdown")?;
        println!("{line}");
        return Ok(());
    }
    match countdown {
        Countdown::Remaining(d) => print!("{}", terminal_lines(d)),
        Countdown::Reached => println!("{}", Variant::Terminal.reached_message()),
    }
    Ok(())
}

fn cmd_countdown(policy: Policy, at: Option<i64>, json: bool) -> Result<()> {
    let now = at.unwrap_or_else(now_unix_millis);
    let countdown = y2k38_core::decompose(TargetInstant::Y2K38, now, policy);
    tracing::debug!(now, %policy, "{countdown}");
    print_countdown(&countdown, json)
}

/// Re-print once per tick until the target is reached. With `--at`, the
/// clock starts at that instant and advances in real time.
async fn cmd_watch(policy: Policy, at: Option<i64>, json: bool) -> Result<()> {
    let offset = at.map_or(0, |at| at.saturating_sub(now_unix_millis()));
    let clock = move || now_unix_millis().saturating_add(offset);

    let mut ticker = Ticker::new(TargetInstant::Y2K38, policy, FirstSample::Immediate);
    let mut interval = tokio::time::interval(Duration::from_millis(TICK_INTERVAL_MILLIS));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // the first interval tick completes immediately and is covered by start()
    interval.tick().await;

    let mut next = ticker.start(clock());
    loop {
        if let Some(countdown) = next.take() {
            print_countdown(&countdown, json)?;
            if !json && !countdown.is_reached() {
                println!();
            }
        }
        if ticker.is_stopped() {
            tracing::info!(samples = ticker.samples(), "target reached, stopping");
            return Ok(());
        }
        interval.tick().await;
        next = ticker.tick(clock());
    }
}
