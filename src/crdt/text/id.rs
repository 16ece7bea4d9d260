//! Item ID: unique identifier for document items
//!
//! Each item in the text CRDT has a unique ID composed of:
//! - Agent: the replica that created the item
//! - Seq: that agent's own strictly increasing counter, starting at 0

use crate::AgentId;

/// Unique identifier for a text item
///
/// An agent never reuses a sequence number, so `(agent, seq)` is
/// globally unique. Within one agent, items are totally ordered by
/// `seq`; across agents there is no inherent order — where a tie must
/// be broken, the integration algorithm compares agent names
/// lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemId {
    /// Agent that created this item
    pub agent: AgentId,

    /// Position in that agent's own sequence of inserts
    pub seq: u64,
}

impl ItemId {
    /// Create a new item ID
    pub fn new(agent: AgentId, seq: u64) -> Self {
        Self { agent, seq }
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.agent, self.seq)
    }
}
