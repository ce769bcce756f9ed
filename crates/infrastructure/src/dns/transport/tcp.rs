use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use bytes::Bytes;
use dnscheck_domain::QueryFailure;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

/// DNS over TCP (RFC 1035 §4.2.2): each message carries a 2-byte length prefix.
///
/// Used as the fallback when a UDP answer comes back truncated.
pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    async fn exchange(&self, message_bytes: &[u8]) -> Result<TransportResponse, QueryFailure> {
        let length = u16::try_from(message_bytes.len()).map_err(|_| {
            QueryFailure::Network(format!(
                "DNS message too large for TCP: {} bytes",
                message_bytes.len()
            ))
        })?;

        let mut stream = TcpStream::connect(self.server_addr).await.map_err(|e| {
            QueryFailure::Network(format!("failed to connect to {}: {}", self.server_addr, e))
        })?;

        let mut framed = Vec::with_capacity(message_bytes.len() + 2);
        framed.extend_from_slice(&length.to_be_bytes());
        framed.extend_from_slice(message_bytes);

        stream.write_all(&framed).await.map_err(|e| {
            QueryFailure::Network(format!(
                "failed to send TCP query to {}: {}",
                self.server_addr, e
            ))
        })?;

        debug!(server = %self.server_addr, bytes_sent = framed.len(), "TCP query sent");

        let mut length_buf = [0u8; 2];
        stream.read_exact(&mut length_buf).await.map_err(|e| {
            QueryFailure::Network(format!(
                "failed to read TCP response length from {}: {}",
                self.server_addr, e
            ))
        })?;

        let response_len = u16::from_be_bytes(length_buf) as usize;
        let mut response = vec![0u8; response_len];
        stream.read_exact(&mut response).await.map_err(|e| {
            QueryFailure::Network(format!(
                "failed to read TCP response from {}: {}",
                self.server_addr, e
            ))
        })?;

        debug!(
            server = %self.server_addr,
            bytes_received = response_len,
            "TCP response received"
        );

        Ok(TransportResponse {
            bytes: Bytes::from(response),
            protocol_used: "TCP",
        })
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, QueryFailure> {
        tokio::time::timeout(timeout, self.exchange(message_bytes))
            .await
            .map_err(|_| QueryFailure::Timeout)?
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }
}
