//! Owns DNS Domain Layer
pub mod config;
pub mod errors;
pub mod local_record;
pub mod reverse_name;
pub mod upstream;
pub mod zone;

pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use local_record::{LocalRecord, LocalRecordStore};
pub use reverse_name::{decode_reverse_query, reverse_name, ReverseQuery};
pub use upstream::{Transport, UpstreamServer};
pub use zone::{QueryContext, ZoneRule, ZoneTable};
