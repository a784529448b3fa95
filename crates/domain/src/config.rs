pub mod cache;
pub mod errors;
pub mod forward_zones;
pub mod forwarding;
pub mod hosts;
pub mod logging;
pub mod root;
pub mod server;

pub use cache::CacheConfig;
pub use errors::ConfigError;
pub use forward_zones::{load_zone_table, parse_cidr, parse_zone_table, ForwardZoneConfig};
pub use forwarding::ForwardingConfig;
pub use hosts::{load_local_records, parse_local_records};
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
