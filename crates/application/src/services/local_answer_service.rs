use hickory_proto::op::{Message, MessageType, Query, ResponseCode};
use hickory_proto::rr::rdata::{A, AAAA, PTR, TXT};
use hickory_proto::rr::{Name, RData, Record, RecordType};
use owns_dns_domain::LocalRecordStore;
use std::net::IpAddr;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

/// TTL of every answer synthesized from the hosts table.
pub const LOCAL_ANSWER_TTL: u32 = 60;

/// Empty response mirroring the request's id, opcode, RD flag and question.
pub fn reply_to(request: &Message) -> Message {
    let mut reply = Message::new();
    reply
        .set_id(request.id())
        .set_message_type(MessageType::Response)
        .set_op_code(request.op_code())
        .set_recursion_desired(request.recursion_desired())
        .set_response_code(ResponseCode::NoError);
    reply.add_queries(request.queries().iter().cloned());
    reply
}

/// Answers queries from the static hosts table.
pub struct LocalAnswerService {
    records: Arc<LocalRecordStore>,
}

impl LocalAnswerService {
    pub fn new(records: Arc<LocalRecordStore>) -> Self {
        Self { records }
    }

    /// Forward lookup by hostname. `None` means the query is not handled
    /// locally and must be forwarded.
    ///
    /// A known host always handles A (empty answer without an IPv4 address),
    /// while AAAA and TXT fall through when the field is missing.
    pub fn answer_forward(&self, request: &Message, query: &Query, hostname: &str) -> Option<Message> {
        let record = self.records.lookup_by_name(hostname)?;

        let rdata = match query.query_type() {
            RecordType::A => record.ipv4.map(|ip| RData::A(A(ip))),
            RecordType::AAAA => Some(RData::AAAA(AAAA(record.ipv6?))),
            RecordType::TXT => {
                let text = record.text.as_ref().filter(|t| !t.is_empty())?;
                Some(RData::TXT(TXT::new(vec![text.clone()])))
            }
            _ => None,
        };

        let mut reply = authoritative_reply(request);
        if let Some(rdata) = rdata {
            reply.add_answer(Record::from_rdata(
                query.name().clone(),
                LOCAL_ANSWER_TTL,
                rdata,
            ));
        }

        debug!(
            domain = %hostname,
            record_type = %query.query_type(),
            answers = reply.answers().len(),
            "Answered from local hosts"
        );
        Some(reply)
    }

    /// Reverse lookup by address; answers with a PTR to the owning hostname.
    pub fn answer_reverse(&self, request: &Message, query: &Query, ip: IpAddr) -> Option<Message> {
        let (hostname, _) = self.records.lookup_by_address(ip)?;

        let target = match Name::from_str(&format!("{}.", hostname)) {
            Ok(name) => name,
            Err(e) => {
                warn!(hostname = %hostname, error = %e, "Local hostname is not a valid PTR target");
                return None;
            }
        };

        let mut reply = authoritative_reply(request);
        reply.add_answer(Record::from_rdata(
            query.name().clone(),
            LOCAL_ANSWER_TTL,
            RData::PTR(PTR(target)),
        ));

        debug!(ip = %ip, hostname = %hostname, "Answered reverse lookup from local hosts");
        Some(reply)
    }
}

fn authoritative_reply(request: &Message) -> Message {
    let mut reply = reply_to(request);
    reply.set_authoritative(true);
    reply
}
