use clap::Parser;
use owns_dns_domain::CliOverrides;
use owns_dns_infrastructure::dns::DnsServerHandler;
use owns_dns_jobs::{CacheSweepJob, JobRunner};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "owns-dns")]
#[command(version)]
#[command(about = "Owns DNS - split-horizon DNS forwarder with a local hosts table")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// DNS server port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Directory holding forward.yaml and hosts.txt
    #[arg(long, value_name = "DIR")]
    conf_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Load the zone and hosts files, print the zone table and exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        bind_address: cli.bind.clone(),
        port: cli.port,
        conf_dir: cli.conf_dir.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting Owns DNS v{}", env!("CARGO_PKG_VERSION"));

    let dns_services = di::DnsServices::new(&config)?;

    if cli.check {
        print!("{}", dns_services.zones.describe());
        println!("Loaded {} hosts", dns_services.local_records.len());
        return Ok(());
    }

    debug!("Zone table:\n{}", dns_services.zones.describe());

    let shutdown = CancellationToken::new();

    JobRunner::new()
        .with_cache_sweep(
            CacheSweepJob::new(dns_services.cache_sweeper.clone())
                .with_interval(config.cache.sweep_interval_secs),
        )
        .with_shutdown_token(shutdown.clone())
        .start()
        .await;

    let dns_handler = DnsServerHandler::new(dns_services.handler_use_case.clone());
    let dns_addr = config.listen_address();

    tokio::select! {
        result = server::start_dns_server(dns_addr, dns_handler, shutdown.clone()) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl-C, shutting down");
        }
    }

    shutdown.cancel();
    info!("Server shutdown complete");
    Ok(())
}
