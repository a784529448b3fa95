use crate::ports::{ResponseCachePort, UpstreamExchange};
use crate::services::LocalAnswerService;
use hickory_proto::op::{Message, Query};
use owns_dns_domain::{
    decode_reverse_query, DomainError, LocalRecordStore, QueryContext, ReverseQuery,
    UpstreamServer, ZoneTable,
};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Where the answer for a query came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    Cache,
    Local,
    Upstream(UpstreamServer),
}

#[derive(Debug, Clone)]
pub struct DnsResolution {
    pub message: Message,
    pub source: ResolutionSource,
}

pub struct HandleDnsQueryUseCase {
    cache: Arc<dyn ResponseCachePort>,
    local: LocalAnswerService,
    zones: Arc<ZoneTable>,
    upstream: Arc<dyn UpstreamExchange>,
}

impl HandleDnsQueryUseCase {
    pub fn new(
        cache: Arc<dyn ResponseCachePort>,
        local_records: Arc<LocalRecordStore>,
        zones: Arc<ZoneTable>,
        upstream: Arc<dyn UpstreamExchange>,
    ) -> Self {
        Self {
            cache,
            local: LocalAnswerService::new(local_records),
            zones,
            upstream,
        }
    }

    /// Resolves one request: cache, then local hosts, then the upstream servers
    /// selected by the zone table. The reply always carries the request's id.
    ///
    /// Fails with `TransportAllServersUnreachable` when every selected server
    /// failed, in which case the client gets no reply at all.
    pub async fn execute(
        &self,
        request: &Message,
        client_ip: IpAddr,
    ) -> Result<DnsResolution, DomainError> {
        let query = request.queries().first().ok_or(DomainError::EmptyQuestion)?;

        if let Some(mut cached) = self.cache.get(query) {
            cached.set_id(request.id());
            debug!(domain = %query.name(), client = %client_ip, "Cache hit");
            return Ok(DnsResolution {
                message: cached,
                source: ResolutionSource::Cache,
            });
        }

        let name = query.name().to_ascii();
        let hostname = name.strip_suffix('.').unwrap_or(&name);
        debug!(domain = %hostname, record_type = %query.query_type(), client = %client_ip, "Handling query");

        let context = match decode_reverse_query(hostname) {
            ReverseQuery::Address(ip) => {
                if let Some(reply) = self.local.answer_reverse(request, query, ip) {
                    return Ok(local(reply));
                }
                QueryContext::Reverse(ip)
            }
            classification => {
                if classification == ReverseQuery::Invalid {
                    warn!(domain = %hostname, "Malformed reverse query, forwarding by name");
                }
                if let Some(reply) = self.local.answer_forward(request, query, hostname) {
                    return Ok(local(reply));
                }
                QueryContext::Forward(hostname)
            }
        };

        let servers = self.zones.select_servers(context);
        self.forward(servers, request, query).await
    }

    /// Tries each server in order; the first successful exchange wins.
    async fn forward(
        &self,
        servers: &[UpstreamServer],
        request: &Message,
        query: &Query,
    ) -> Result<DnsResolution, DomainError> {
        if servers.is_empty() {
            return Err(DomainError::NoUpstreamServers(query.name().to_ascii()));
        }

        for server in servers {
            let start = Instant::now();
            match self.upstream.exchange(server, request).await {
                Ok(mut response) => {
                    debug!(
                        domain = %query.name(),
                        server = %server,
                        answers = response.answers().len(),
                        elapsed_ms = start.elapsed().as_millis() as u64,
                        "Upstream answered"
                    );
                    self.cache.put(query, &response);
                    response.set_id(request.id());
                    return Ok(DnsResolution {
                        message: response,
                        source: ResolutionSource::Upstream(*server),
                    });
                }
                Err(e) => {
                    debug!(domain = %query.name(), server = %server, error = %e, "Upstream exchange failed, trying next server");
                }
            }
        }

        Err(DomainError::TransportAllServersUnreachable)
    }
}

fn local(message: Message) -> DnsResolution {
    DnsResolution {
        message,
        source: ResolutionSource::Local,
    }
}
