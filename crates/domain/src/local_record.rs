use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// A statically configured host answered without going upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalRecord {
    pub hostname: String,
    pub ipv4: Option<Ipv4Addr>,
    pub ipv6: Option<Ipv6Addr>,
    pub text: Option<String>,
}

impl LocalRecord {
    pub fn new(hostname: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            ..Default::default()
        }
    }

    pub fn with_ipv4(mut self, ip: Ipv4Addr) -> Self {
        self.ipv4 = Some(ip);
        self
    }

    pub fn with_ipv6(mut self, ip: Ipv6Addr) -> Self {
        self.ipv6 = Some(ip);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.text = if text.is_empty() { None } else { Some(text) };
        self
    }

    pub fn has_address(&self, ip: IpAddr) -> bool {
        match ip {
            IpAddr::V4(v4) => self.ipv4 == Some(v4),
            IpAddr::V6(v6) => self.ipv6 == Some(v6),
        }
    }

    /// Parses one `hostname,ipv4,ipv6,text` line. Returns `None` for lines with
    /// fewer than two fields; unparsable addresses are kept as absent.
    pub fn parse_line(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.splitn(4, ',').map(str::trim).collect();
        if fields.len() < 2 || fields[0].is_empty() {
            return None;
        }

        let mut record = LocalRecord::new(fields[0]);
        record.ipv4 = fields[1].parse().ok();
        record.ipv6 = fields.get(2).and_then(|f| f.parse().ok());
        if let Some(text) = fields.get(3) {
            record = record.with_text(*text);
        }
        Some(record)
    }
}

/// Hostname-keyed table of local records. Built once, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct LocalRecordStore {
    records: HashMap<String, LocalRecord>,
}

impl LocalRecordStore {
    pub fn new(records: Vec<LocalRecord>) -> Self {
        let mut store = Self::default();
        for record in records {
            store.insert(record);
        }
        store
    }

    fn insert(&mut self, record: LocalRecord) {
        let key = normalize_hostname(&record.hostname);
        self.records.insert(key, record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn lookup_by_name(&self, hostname: &str) -> Option<&LocalRecord> {
        self.records.get(&normalize_hostname(hostname))
    }

    /// Linear scan for a record owning exactly this address.
    pub fn lookup_by_address(&self, ip: IpAddr) -> Option<(&str, &LocalRecord)> {
        self.records
            .iter()
            .find(|(_, record)| record.has_address(ip))
            .map(|(hostname, record)| (hostname.as_str(), record))
    }
}

fn normalize_hostname(hostname: &str) -> String {
    hostname.trim().trim_end_matches('.').to_ascii_lowercase()
}
