//! Owns DNS Application Layer
//!
//! Ports the dispatcher depends on, plus the per-query use case that ties the
//! cache, the local hosts table and the zone table together.
pub mod ports;
pub mod services;
pub mod use_cases;
