pub mod cache;
pub mod cache_maintenance;
pub mod forwarding;
pub mod server;
pub mod transport;

pub use cache::{CacheKey, ResponseCache};
pub use cache_maintenance::DnsCacheSweeper;
pub use forwarding::UpstreamForwarder;
pub use server::DnsServerHandler;
