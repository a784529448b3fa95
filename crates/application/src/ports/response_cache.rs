use hickory_proto::op::{Message, Query};

/// TTL-aware store of upstream answers, keyed by the question.
pub trait ResponseCachePort: Send + Sync {
    /// Returns a copy of the stored answer with TTLs rewritten to the remaining
    /// lifetime, or `None` when absent or expired. The id is left for the caller.
    fn get(&self, query: &Query) -> Option<Message>;

    /// Stores the answer if it carries at least one answer record.
    fn put(&self, query: &Query, response: &Message);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
