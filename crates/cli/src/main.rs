use clap::Parser;
use cobalt_dns_api::AppState;
use cobalt_dns_domain::CliOverrides;
use std::net::SocketAddr;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "cobalt-dns")]
#[command(version)]
#[command(about = "Cobalt DNS - authoritative DNS server with a cache-through record store")]
struct Cli {
    /// UDP port to answer queries on
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Management API port
    #[arg(short = 'a', long)]
    api_port: Option<u16>,

    /// Bind address for both servers
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        dns_port: cli.dns_port,
        api_port: cli.api_port,
        bind_address: cli.bind.clone(),
        log_level: cli.log_level.clone(),
    };
    let config = bootstrap::load_config(overrides)?;

    bootstrap::init_logging(&config);
    info!("starting Cobalt DNS v{}", env!("CARGO_PKG_VERSION"));

    let pool = bootstrap::init_store_pool(&config.store).await?;
    let services = di::Services::build(&config, pool).await?;

    if config.api.enabled {
        let state = AppState {
            store: services.store.clone(),
            metrics: services.metrics_reader.clone(),
        };
        let web_addr: SocketAddr = format!("{}:{}", config.api.host, config.api.port).parse()?;
        tokio::spawn(async move {
            if let Err(e) = server::start_web_server(web_addr, state).await {
                error!(error = %e, "management API server error");
            }
        });
    }

    let dns_config = config.server.clone();
    let handler = services.handler.clone();
    tokio::spawn(async move {
        if let Err(e) = server::start_dns_server(&dns_config, handler).await {
            error!(error = %e, "DNS server error");
        }
    });

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received, draining metrics pipeline");
    services.pipeline.shutdown().await;
    info!("server shutdown complete");
    Ok(())
}
