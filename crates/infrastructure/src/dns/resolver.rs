use super::forwarding::{DnsResponse, MessageBuilder, RecordTypeMapper, ResponseParser};
use super::transport::Transport;
use async_trait::async_trait;
use dnscheck_application::ports::UpstreamResolver;
use dnscheck_domain::{DnsQuery, QueryFailure, ResolverEndpoint};
use hickory_proto::rr::RecordType as HickoryRecordType;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tracing::debug;

/// Sends one question to one resolver over UDP, retrying over TCP when the
/// UDP answer is truncated.
///
/// Resolver addresses that are names rather than IPs are resolved through the
/// system resolver on every query.
#[derive(Debug, Default, Clone, Copy)]
pub struct HickoryUpstreamResolver;

impl HickoryUpstreamResolver {
    pub fn new() -> Self {
        Self
    }

    async fn server_addr(resolver: &str) -> Result<SocketAddr, QueryFailure> {
        let endpoint: ResolverEndpoint = resolver.parse().map_err(QueryFailure::Network)?;

        match endpoint {
            ResolverEndpoint::Socket(addr) => Ok(addr),
            ResolverEndpoint::Named { host, port } => {
                let mut addrs = tokio::net::lookup_host((host.as_ref(), port))
                    .await
                    .map_err(|e| {
                        QueryFailure::Network(format!(
                            "cannot resolve resolver address '{}': {}",
                            host, e
                        ))
                    })?;
                addrs.next().ok_or_else(|| {
                    QueryFailure::Network(format!("resolver name '{}' has no addresses", host))
                })
            }
        }
    }

    async fn exchange(
        transport: &Transport,
        id: u16,
        query_bytes: &[u8],
        expected: HickoryRecordType,
        timeout: Duration,
    ) -> Result<DnsResponse, QueryFailure> {
        let response = transport.send(query_bytes, timeout).await?;
        let parsed = ResponseParser::parse_bytes(response.bytes, expected)?;

        if parsed.id != id {
            return Err(QueryFailure::Network(format!(
                "{} response ID {} does not match query ID {}",
                transport.protocol_name(),
                parsed.id,
                id
            )));
        }

        Ok(parsed)
    }
}

#[async_trait]
impl UpstreamResolver for HickoryUpstreamResolver {
    async fn resolve(
        &self,
        query: &DnsQuery,
        timeout: Duration,
    ) -> Result<Vec<String>, QueryFailure> {
        let start = Instant::now();
        let server = Self::server_addr(&query.resolver).await?;

        let name = query.query_name();
        let expected = RecordTypeMapper::to_hickory(query.record_type);
        let built = MessageBuilder::build_query(&name, query.record_type)?;

        let remaining = timeout.saturating_sub(start.elapsed());
        let mut response = Self::exchange(
            &Transport::udp(server),
            built.id,
            &built.bytes,
            expected,
            remaining,
        )
        .await?;

        if response.truncated {
            debug!(
                server = %server,
                name = %name,
                "Response truncated (TC bit), retrying via TCP"
            );

            let remaining = timeout.saturating_sub(start.elapsed());
            if remaining.is_zero() {
                return Err(QueryFailure::Timeout);
            }
            response = Self::exchange(
                &Transport::tcp(server),
                built.id,
                &built.bytes,
                expected,
                remaining,
            )
            .await?;
        }

        debug!(
            server = %server,
            name = %name,
            record_type = %query.record_type,
            rcode = ResponseParser::rcode_to_status(response.rcode),
            answers = response.answer_count,
            "Upstream answered"
        );

        response.into_values()
    }
}
