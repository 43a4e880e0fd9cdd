mod handler;
mod server;

pub use handler::QueryHandler;
pub use server::{bind_udp_socket, run_udp_server};
