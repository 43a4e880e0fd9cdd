use crate::metrics::MetricsRecorder;
use chrono::Utc;
use cobalt_dns_application::use_cases::{ResolveOutcome, ResolveQueryUseCase};
use cobalt_dns_domain::wire::{
    pack_message, parse_message, DnsMessage, RCODE_FORMERR, RCODE_NXDOMAIN, RCODE_SERVFAIL,
};
use cobalt_dns_domain::MetricSample;
use std::net::SocketAddr;
use std::time::Instant;
use tokio::net::UdpSocket;
use tracing::{debug, error, info, warn};

/// Per-datagram orchestrator: parse → validate → lookup → compose →
/// send → emit. Exactly one metric sample leaves this function for
/// every datagram that begins processing; the only silent exit is an
/// inbound message with QR already set.
pub struct QueryHandler {
    resolver: ResolveQueryUseCase,
    metrics: MetricsRecorder,
}

impl QueryHandler {
    pub fn new(resolver: ResolveQueryUseCase, metrics: MetricsRecorder) -> Self {
        Self { resolver, metrics }
    }

    pub async fn handle_datagram(&self, socket: &UdpSocket, datagram: &[u8], peer: SocketAddr) {
        let started = Instant::now();
        let mut sample = MetricSample {
            timestamp: Utc::now(),
            client_ip: peer.ip(),
            domain: "N/A".to_string(),
            query_type: "N/A".to_string(),
            success: true,
            error_message: String::new(),
            response_time_ms: 0.0,
            cache_hit: false,
            rcode: 0,
        };

        let mut response = DnsMessage::response();

        let request = match parse_message(datagram) {
            Ok(request) => request,
            Err(e) => {
                warn!(client = %peer, error = %e, "malformed query");
                response.header.flags.rcode = RCODE_FORMERR;
                sample.success = false;
                sample.error_message = format!("FORMERR: {}", e);
                sample.rcode = RCODE_FORMERR;
                self.send_and_emit(socket, peer, &response, sample, started)
                    .await;
                return;
            }
        };

        if request.header.flags.qr {
            // A response on the query port: drop it without answering
            // and without a sample.
            debug!(client = %peer, id = request.header.id, "inbound message has QR set, ignoring");
            return;
        }

        response.header.id = request.header.id;
        response.header.flags.opcode = request.header.flags.opcode;
        response.questions = request.questions.clone();

        let Some(question) = request.questions.first() else {
            warn!(client = %peer, id = request.header.id, "query carries no questions");
            response.header.flags.rcode = RCODE_FORMERR;
            sample.success = false;
            sample.error_message = "FORMERR: no questions in request".to_string();
            sample.rcode = RCODE_FORMERR;
            self.send_and_emit(socket, peer, &response, sample, started)
                .await;
            return;
        };

        sample.domain = question.name.clone();
        sample.query_type = question.qtype.to_string();
        info!(client = %peer, domain = %question.name, qtype = %question.qtype, "query received");

        match self.resolver.execute(question).await {
            Ok(ResolveOutcome::Answer { record, cache_hit }) => {
                sample.cache_hit = cache_hit;
                response.header.flags.aa = true;
                response.answers.push(record);
            }
            Ok(ResolveOutcome::NameError) => {
                response.header.flags.rcode = RCODE_NXDOMAIN;
                sample.success = false;
                sample.error_message = "NXDOMAIN: no record for name".to_string();
                sample.rcode = RCODE_NXDOMAIN;
            }
            Err(e) => {
                error!(client = %peer, domain = %question.name, error = %e, "lookup failed");
                response.header.flags.rcode = RCODE_SERVFAIL;
                sample.success = false;
                sample.error_message = format!("SERVFAIL: {}", e);
                sample.rcode = RCODE_SERVFAIL;
            }
        }

        self.send_and_emit(socket, peer, &response, sample, started)
            .await;
    }

    async fn send_and_emit(
        &self,
        socket: &UdpSocket,
        peer: SocketAddr,
        response: &DnsMessage,
        mut sample: MetricSample,
        started: Instant,
    ) {
        match pack_message(response) {
            Ok(bytes) => {
                if let Err(e) = socket.send_to(&bytes, peer).await {
                    error!(client = %peer, error = %e, "failed to send response");
                    sample.success = false;
                    sample.error_message = format!("send failed: {}", e);
                    sample.rcode = RCODE_SERVFAIL;
                }
            }
            Err(e) => {
                // Fatal for this one request; nothing is sent.
                error!(client = %peer, error = %e, "failed to pack response");
                sample.success = false;
                sample.error_message = format!("pack failed: {}", e);
                sample.rcode = RCODE_SERVFAIL;
            }
        }

        sample.response_time_ms = started.elapsed().as_secs_f64() * 1000.0;
        self.metrics.collect(sample);
    }
}
