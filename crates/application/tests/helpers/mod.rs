pub mod mock_ports;

pub use mock_ports::{answer_a, query_message, MockResponseCache, MockUpstreamExchange};
