#![allow(dead_code)]

use async_trait::async_trait;
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{Name, RData, Record, RecordType};
use owns_dns_application::ports::{ResponseCachePort, UpstreamExchange};
use owns_dns_domain::{DomainError, UpstreamServer};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

pub fn query_message(id: u16, name: &str, record_type: RecordType) -> Message {
    let mut message = Message::new();
    message
        .set_id(id)
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true);
    message.add_query(Query::query(Name::from_str(name).unwrap(), record_type));
    message
}

/// Upstream-style answer to `request` with a single A record.
pub fn answer_a(request: &Message, ip: Ipv4Addr, ttl: u32) -> Message {
    let mut response = request.clone();
    response.set_message_type(MessageType::Response);
    let name = request.queries()[0].name().clone();
    response.add_answer(Record::from_rdata(name, ttl, RData::A(A(ip))));
    response
}

fn cache_key(query: &Query) -> String {
    format!(
        "{}:{}:{}",
        query.name().to_lowercase(),
        query.query_type(),
        query.query_class()
    )
}

#[derive(Clone, Default)]
pub struct MockResponseCache {
    entries: Arc<Mutex<HashMap<String, Message>>>,
    puts: Arc<Mutex<usize>>,
}

impl MockResponseCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, query: &Query, response: Message) {
        self.entries.lock().unwrap().insert(cache_key(query), response);
    }

    pub fn put_count(&self) -> usize {
        *self.puts.lock().unwrap()
    }

    pub fn contains(&self, query: &Query) -> bool {
        self.entries.lock().unwrap().contains_key(&cache_key(query))
    }
}

impl ResponseCachePort for MockResponseCache {
    fn get(&self, query: &Query) -> Option<Message> {
        self.entries.lock().unwrap().get(&cache_key(query)).cloned()
    }

    fn put(&self, query: &Query, response: &Message) {
        *self.puts.lock().unwrap() += 1;
        if !response.answers().is_empty() {
            self.entries
                .lock()
                .unwrap()
                .insert(cache_key(query), response.clone());
        }
    }

    fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

/// Upstream that answers from a per-server table and records every attempt.
#[derive(Clone, Default)]
pub struct MockUpstreamExchange {
    answers: Arc<Mutex<HashMap<UpstreamServer, Ipv4Addr>>>,
    calls: Arc<Mutex<Vec<UpstreamServer>>>,
}

impl MockUpstreamExchange {
    pub fn new() -> Self {
        Self::default()
    }

    /// Servers without an answer fail with a timeout.
    pub fn answer_from(&self, server: &str, ip: Ipv4Addr) {
        let server: UpstreamServer = server.parse().unwrap();
        self.answers.lock().unwrap().insert(server, ip);
    }

    pub fn calls(&self) -> Vec<UpstreamServer> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamExchange for MockUpstreamExchange {
    async fn exchange(
        &self,
        server: &UpstreamServer,
        request: &Message,
    ) -> Result<Message, DomainError> {
        self.calls.lock().unwrap().push(*server);
        let answer = self.answers.lock().unwrap().get(server).copied();
        match answer {
            Some(ip) => {
                // Upstreams pick their own ids; the dispatcher must restore the client's.
                let mut response = answer_a(request, ip, 300);
                response.set_id(request.id().wrapping_add(1));
                Ok(response)
            }
            None => Err(DomainError::TransportTimeout {
                server: server.to_string(),
            }),
        }
    }
}
