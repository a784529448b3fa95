use compact_str::CompactString;
use hickory_proto::op::Query;
use hickory_proto::rr::{DNSClass, RecordType};
use std::fmt;

/// Normalized question: lowercase FQDN plus type and class.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub name: CompactString,
    pub record_type: RecordType,
    pub class: DNSClass,
}

impl CacheKey {
    #[inline]
    pub fn new(name: &str, record_type: RecordType, class: DNSClass) -> Self {
        let mut name = CompactString::from(name.to_ascii_lowercase());
        if !name.ends_with('.') {
            name.push('.');
        }
        Self {
            name,
            record_type,
            class,
        }
    }

    pub fn from_query(query: &Query) -> Self {
        Self::new(
            &query.name().to_ascii(),
            query.query_type(),
            query.query_class(),
        )
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.name, self.class, self.record_type)
    }
}
