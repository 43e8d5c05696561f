//! Feed tap - headless subscriber that logs feed events
//!
//! Subscribes to the symbols given on the command line (defaults to a
//! couple of presets) and writes every event to the log. Useful for
//! watching a feed without the TUI.

use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info, warn};

use feedsocket::{ClientEvent, FeedClient};
use quotedeck::bin_common::{load_config_from_env, parse_args, BinaryRunner, ConfigType, RunConfig};
use quotes::feed::{build_feed_client, FeedEvent, FeedLink, QuoteParser};
use quotes::{QuoteRegistry, ViewerConfig};

struct TapRunner {
    client: FeedClient<QuoteParser>,
    config: RunConfig,
}

impl BinaryRunner for TapRunner {
    fn config(&self) -> &RunConfig {
        &self.config
    }

    async fn run(&mut self) -> Result<()> {
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Ctrl+C received, stopping");
                    return Ok(());
                }
                _ = tokio::time::sleep(Duration::from_millis(50)) => {
                    while let Some(event) = self.client.try_recv_event() {
                        log_event(event);
                    }
                }
            }
        }
    }
}

fn log_event(event: ClientEvent<FeedEvent>) {
    match event {
        ClientEvent::Opened => info!("Socket open"),
        ClientEvent::Closed => warn!("Socket closed"),
        ClientEvent::Reconnecting(attempt) => info!(attempt, "Reconnecting"),
        ClientEvent::Error(error) => debug!(error = %error, "Transport error"),
        ClientEvent::Event(FeedEvent::Status { connected }) => {
            info!(connected, "Feed status");
        }
        ClientEvent::Event(FeedEvent::Trade { symbol, data }) => {
            if let Some(price) = data.value() {
                info!(symbol = %symbol, price, "Trade");
            }
        }
        ClientEvent::Event(other) => debug!(event = ?other, "Feed event"),
    }
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_path = load_config_from_env(ConfigType::Viewer);
    let config = ViewerConfig::load(&config_path)?;

    let args = parse_args();
    let symbols = if args.is_empty() {
        vec!["AAPL".to_string(), "MSFT".to_string()]
    } else {
        args
    };

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let client = build_feed_client(&config).await?;

        for raw in &symbols {
            let symbol = QuoteRegistry::normalize(raw);
            if symbol.is_empty() {
                continue;
            }
            client.send_subscribe(&symbol)?;
            info!(symbol = %symbol, "Subscribed");
        }

        let mut runner = TapRunner {
            client,
            config: RunConfig::new("quote-tap"),
        };
        let result = runner.execute().await;

        let TapRunner { client, .. } = runner;
        client.shutdown().await?;

        result
    })
}
