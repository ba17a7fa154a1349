use std::io;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tokio::sync::watch;

use fleetwatch::alert::alert_channel;
use fleetwatch::{client, dashboard};
use fleetwatch::config::{ClientConfig, ConfigError};
use fleetwatch::simulator::{self, DEFAULT_FLEET_SIZE, DEFAULT_TICK_MS, SimulatorState};
use fleetwatch::view::FilterSelector;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "fleetwatch", about = "Live robot fleet monitor and simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the fleet snapshot, follow live updates, and render them.
    Watch(WatchArgs),
    /// Serve a simulated fleet on `/robots` and `/updates`.
    Simulate(SimulateArgs),
}

#[derive(Args, Debug)]
struct WatchArgs {
    /// Overrides `FLEET_BASE_URL` (default `http://127.0.0.1:8000`).
    #[arg(long)]
    base_url: Option<String>,

    #[arg(long, default_value = "all")]
    filter: FilterSelector,

    /// Overrides `FLEET_SNAPSHOT_TIMEOUT_SECS` (default 10).
    #[arg(long)]
    snapshot_timeout_secs: Option<u64>,
}

#[derive(Args, Debug)]
struct SimulateArgs {
    #[arg(long, default_value_t = 8000)]
    port: u16,

    #[arg(long, default_value_t = DEFAULT_TICK_MS)]
    tick_ms: u64,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Watch(args) => run_watch(args).await,
        Command::Simulate(args) => run_simulate(args).await,
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run_watch(args: WatchArgs) -> Result<(), AppError> {
    let mut config = match args.base_url {
        Some(url) => ClientConfig {
            base_url: ClientConfig::new(&url).base_url,
            ..ClientConfig::from_env()
        },
        None => ClientConfig::from_env(),
    };
    if let Some(secs) = args.snapshot_timeout_secs {
        config = config.with_snapshot_timeout(Duration::from_secs(secs));
    }

    let (alerts, alert_rx) = alert_channel();
    let session = client::start(&config, alerts).await?;

    let (selector_tx, selector_rx) = watch::channel(args.filter);
    // Detached: a read blocked on the terminal must not keep the process alive.
    std::thread::spawn(move || dashboard::read_selectors(io::stdin().lock(), &selector_tx, &mut io::stderr()));

    let stop = async {
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };
    dashboard::run(session, selector_rx, alert_rx, stop, &mut io::stdout()).await?;
    Ok(())
}

async fn run_simulate(args: SimulateArgs) -> Result<(), AppError> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", args.port)).await?;
    let state = SimulatorState::new(DEFAULT_FLEET_SIZE, Duration::from_millis(args.tick_ms));
    simulator::serve(listener, state).await?;
    Ok(())
}
