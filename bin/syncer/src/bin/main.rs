use alloy_primitives::Address;
use balance::MetadataCache;
use clap::Parser;
use std::sync::Arc;
use store::{bootstrap_with_retry, ChainLedger, Store};
use syncer::{
    config::Config,
    log_snapshots,
    metrics::{install_prometheus_exporter, Metrics},
    poll_accounts, run_store,
};
use tokio::sync::watch;
use tracing::info;

#[derive(Parser)]
#[command(name = "syncer")]
#[command(about = "Keep the redemptions app state in sync with the chain")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Account to track, overrides the config file
    #[arg(long, env = "SYNC_ACCOUNT")]
    account: Option<Address>,
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    info!(config = %cli.config, "Starting syncer");
    let mut config = Config::from_file(&cli.config)?;
    config.account = cli.account.or(config.account);

    if let Some(port) = config.metrics_port {
        install_prometheus_exporter(port)?;
        info!(port, "Prometheus exporter listening");
    }
    let metrics = Metrics::new();

    let (provider, chain_id) = client::connect(&config.rpc_url).await?;
    info!(rpc_url = %config.rpc_url, chain_id, "Connected");

    let ledger = Arc::new(ChainLedger::new(provider.clone(), config.redemptions_address));
    let cache = Arc::new(MetadataCache::new());

    let mut settings = bootstrap_with_retry(
        ledger.as_ref(),
        &cache,
        config.bootstrap_retry_delay(),
        config.bootstrap_max_attempts,
    )
    .await?;
    if let Some(network) = config.network {
        info!(detected = %settings.network, network = %network, "Network overridden");
        settings.network = network;
    }

    let (accounts, account_rx) = watch::channel(config.account);
    let poller = match config.account {
        Some(account) => {
            info!(account = %account, "Tracking fixed account");
            None
        }
        None => Some(tokio::spawn(poll_accounts(
            provider,
            accounts.clone(),
            config.account_poll_interval(),
        ))),
    };

    let (store, handle) = Store::create(ledger, cache, settings, account_rx).await;
    tokio::spawn(log_snapshots(handle));
    let mut reducer = tokio::spawn(run_store(store, metrics));

    tokio::select! {
        result = &mut reducer => result?,
        result = tokio::signal::ctrl_c() => {
            result?;
            info!("Shutting down");
            reducer.abort();
        }
    }

    if let Some(poller) = poller {
        poller.abort();
    }
    drop(accounts);

    Ok(())
}
