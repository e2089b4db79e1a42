//! Midas service entry point
//!
//! Wires the pipeline to concrete adapters and drives it on a fixed
//! interval. With an oracle URL configured, prices come from the HTTP
//! quote endpoint; without one, a seeded demo store and a drifting
//! simulated oracle make the binary runnable out of the box.

mod config;
mod seed;

use config::RunnerConfig;
use midas_adapters::{BroadcastEventPublisher, HttpPriceOracle, InMemoryTokenStore, JitterOracle};
use midas_pipeline::{PipelineError, PriceRefreshPipeline};
use midas_ports::{EventPublisher, PriceOracle, TokenStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

fn print_help() {
    eprintln!(
        r#"Midas - token price refresh service

USAGE:
    midas [OPTIONS]

OPTIONS:
    --config <PATH>     Load configuration from JSON file
    --once              Run a single refresh and exit
    --help              Print this help message

ENVIRONMENT VARIABLES:
    MIDAS_INTERVAL_SECS   Seconds between refresh runs
    MIDAS_BATCH_SIZE      Tokens per cursor batch
    MIDAS_CONCURRENCY     Concurrent oracle lookups per batch
    MIDAS_ORACLE_URL      Quote endpoint base URL
    RUST_LOG              Log level filter

EXAMPLES:
    # Run with the seeded demo store and simulated oracle
    midas

    # Single refresh against a real quote endpoint
    MIDAS_ORACLE_URL=https://quotes.example.com midas --once
"#
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut once = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--once" => {
                once = true;
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_path = Some(args[i].clone());
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => {
            log::info!("loading configuration from {}", path);
            RunnerConfig::from_file(&path)?
        }
        None => RunnerConfig::default(),
    }
    .with_env_overrides()?;

    let publisher = Arc::new(BroadcastEventPublisher::default());

    // Drain the bus so published events are visible in the logs
    let mut events = publisher.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            log::debug!("bus event: {:?}", event);
        }
    });

    let tokens = seed::demo_tokens();
    log::info!("seeding in-memory store with {} tokens", tokens.len());
    let prices = seed::reference_prices(&tokens);
    let store = Arc::new(InMemoryTokenStore::seeded(tokens));

    match config.oracle_url.clone() {
        Some(url) => {
            log::info!("using HTTP price oracle at {}", url);
            let oracle = Arc::new(HttpPriceOracle::new(
                url,
                Duration::from_millis(config.oracle_timeout_ms),
            ));
            serve(store, oracle, publisher, &config, once).await
        }
        None => {
            log::info!("no oracle configured, quoting from the simulated drift source");
            let oracle = Arc::new(JitterOracle::seeded(prices));
            serve(store, oracle, publisher, &config, once).await
        }
    }
}

async fn serve<S, O, P>(
    store: Arc<S>,
    oracle: Arc<O>,
    publisher: Arc<P>,
    config: &RunnerConfig,
    once: bool,
) -> Result<(), Box<dyn std::error::Error>>
where
    S: TokenStore + 'static,
    O: PriceOracle + 'static,
    P: EventPublisher + 'static,
{
    let pipeline = PriceRefreshPipeline::new(store, oracle, publisher, config.refresh.clone());

    if once {
        let summary = pipeline.run().await?;
        log::info!(
            "single refresh finished: {} updated, {} errors out of {} tokens",
            summary.updated_count,
            summary.error_count,
            summary.total_processed
        );
        return Ok(());
    }

    let mut ticker = tokio::time::interval(Duration::from_secs(config.interval_secs.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    log::info!("refreshing prices every {}s", config.interval_secs.max(1));

    loop {
        ticker.tick().await;
        match pipeline.run().await {
            Ok(summary) => log::info!(
                "refresh finished: {} updated, {} errors out of {} tokens ({:.1}% success)",
                summary.updated_count,
                summary.error_count,
                summary.total_processed,
                summary.success_rate()
            ),
            Err(PipelineError::AlreadyRunning) => {
                log::warn!("previous refresh still in flight, skipping this tick");
            }
            Err(err) => {
                log::error!("refresh run failed: {}", err);
            }
        }
    }
}
