//! Owns DNS Infrastructure Layer
//!
//! Adapters behind the application ports: the in-memory response cache and its
//! sweeper, upstream transports, and the UDP request handler.
pub mod dns;
