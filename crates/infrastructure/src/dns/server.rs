use super::QueryHandler;
use cobalt_dns_domain::DomainError;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{error, info};

/// Binds the query socket with sized kernel buffers.
pub fn bind_udp_socket(addr: SocketAddr) -> Result<UdpSocket, DomainError> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))
        .map_err(|e| DomainError::ConfigError(format!("failed to create UDP socket: {}", e)))?;
    socket
        .set_reuse_address(true)
        .and_then(|_| socket.set_recv_buffer_size(4 * 1024 * 1024))
        .and_then(|_| socket.set_send_buffer_size(2 * 1024 * 1024))
        .and_then(|_| socket.bind(&addr.into()))
        .and_then(|_| socket.set_nonblocking(true))
        .map_err(|e| DomainError::ConfigError(format!("failed to bind {}: {}", addr, e)))?;

    let std_socket: std::net::UdpSocket = socket.into();
    UdpSocket::from_std(std_socket)
        .map_err(|e| DomainError::ConfigError(format!("failed to register socket: {}", e)))
}

/// Receive loop: one datagram is one unit of work, dispatched onto its
/// own task so a slow lookup never stalls the socket. Receive errors
/// are logged and the loop continues.
pub async fn run_udp_server(
    socket: Arc<UdpSocket>,
    handler: Arc<QueryHandler>,
    buffer_size: usize,
) {
    info!(
        local_addr = ?socket.local_addr().ok(),
        buffer_size,
        "DNS server listening"
    );

    let mut buf = vec![0u8; buffer_size];
    loop {
        let (len, peer) = match socket.recv_from(&mut buf).await {
            Ok(received) => received,
            Err(e) => {
                error!(error = %e, "UDP receive failed");
                continue;
            }
        };

        let datagram = buf[..len].to_vec();
        let socket = Arc::clone(&socket);
        let handler = Arc::clone(&handler);
        tokio::spawn(async move {
            handler.handle_datagram(&socket, &datagram, peer).await;
        });
    }
}
