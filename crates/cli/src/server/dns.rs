use cobalt_dns_domain::ServerConfig;
use cobalt_dns_infrastructure::dns::{bind_udp_socket, run_udp_server, QueryHandler};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

pub async fn start_dns_server(
    config: &ServerConfig,
    handler: Arc<QueryHandler>,
) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let socket = Arc::new(bind_udp_socket(addr)?);

    info!(bind_address = %addr, "starting DNS server");
    run_udp_server(socket, handler, config.buffer_size).await;
    Ok(())
}
