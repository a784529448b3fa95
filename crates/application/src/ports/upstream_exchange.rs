use async_trait::async_trait;
use hickory_proto::op::Message;
use owns_dns_domain::{DomainError, UpstreamServer};

/// One request/response exchange with a single upstream server.
#[async_trait]
pub trait UpstreamExchange: Send + Sync {
    async fn exchange(
        &self,
        server: &UpstreamServer,
        request: &Message,
    ) -> Result<Message, DomainError>;
}
