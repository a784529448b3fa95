pub mod dns;

pub use dns::{DnsResolution, HandleDnsQueryUseCase, ResolutionSource};
