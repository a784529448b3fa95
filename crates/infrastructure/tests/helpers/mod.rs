pub mod dns_server_mock;

pub use dns_server_mock::{query_bytes, MockDnsServer, MOCK_ANSWER_IP, MOCK_ANSWER_TTL};
