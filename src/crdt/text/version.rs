//! Version vector: per-agent high-water mark of sequence numbers seen
//!
//! Causal completeness invariant: once an agent's entry reaches S,
//! every item by that agent with `seq <= S` is present in the
//! associated document. [`VersionVector::advance`] enforces it by
//! rejecting any gap in an agent's sequence numbers.
//!
//! Note that only insertions are tracked. Deletions advance no counter
//! in this design; they propagate through full-state tombstone
//! reconciliation instead.

use super::id::ItemId;
use crate::error::{CrdtError, Result};
use crate::AgentId;
use std::collections::HashMap;

/// Mapping from agent name to the highest `seq` seen from that agent
///
/// An absent entry means nothing has been seen from that agent yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionVector(HashMap<AgentId, u64>);

impl VersionVector {
    /// Create an empty version vector
    pub fn new() -> Self {
        Self::default()
    }

    /// Highest sequence number seen from `agent`, if any
    pub fn get(&self, agent: &str) -> Option<u64> {
        self.0.get(agent).copied()
    }

    /// The sequence number `agent`'s next insert should carry
    pub fn next_seq(&self, agent: &str) -> u64 {
        self.get(agent).map_or(0, |seen| seen + 1)
    }

    /// True if the item identified by `id` has been seen
    pub fn contains(&self, id: &ItemId) -> bool {
        self.contains_seq(&id.agent, id.seq)
    }

    /// True if `(agent, seq)` has been seen
    pub fn contains_seq(&self, agent: &str, seq: u64) -> bool {
        self.get(agent).map_or(false, |seen| seen >= seq)
    }

    /// Causal-knowledge check with absence trivially satisfied
    ///
    /// An absent origin (document start/end) depends on nothing, so it
    /// is always known.
    pub fn knows(&self, id: Option<&ItemId>) -> bool {
        match id {
            None => true,
            Some(id) => self.contains(id),
        }
    }

    /// Record `id` as seen
    ///
    /// Requires `id.seq` to immediately follow the last seen sequence
    /// number for its agent (or be 0 with no entry). A gap means the
    /// caller attempted to apply an operation out of order; the vector
    /// is left unchanged and [`CrdtError::OutOfOrder`] is returned —
    /// skipping the check would corrupt causal tracking.
    pub fn advance(&mut self, id: &ItemId) -> Result<()> {
        let expected = self.next_seq(&id.agent);
        if id.seq != expected {
            return Err(CrdtError::OutOfOrder {
                agent: id.agent.clone(),
                expected,
                got: id.seq,
            });
        }
        self.0.insert(id.agent.clone(), id.seq);
        Ok(())
    }

    /// Clone the underlying map (for the wire payload)
    pub fn to_map(&self) -> HashMap<AgentId, u64> {
        self.0.clone()
    }

    /// Rebuild from a wire payload's map
    pub fn from_map(map: HashMap<AgentId, u64>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(agent: &str, seq: u64) -> ItemId {
        ItemId::new(agent.to_string(), seq)
    }

    #[test]
    fn test_empty_vector() {
        let v = VersionVector::new();
        assert_eq!(v.get("alice"), None);
        assert_eq!(v.next_seq("alice"), 0);
        assert!(!v.contains(&id("alice", 0)));
    }

    #[test]
    fn test_advance_in_sequence() {
        let mut v = VersionVector::new();
        v.advance(&id("alice", 0)).unwrap();
        v.advance(&id("alice", 1)).unwrap();

        assert_eq!(v.get("alice"), Some(1));
        assert!(v.contains(&id("alice", 0)));
        assert!(v.contains(&id("alice", 1)));
        assert!(!v.contains(&id("alice", 2)));
    }

    #[test]
    fn test_advance_rejects_gap() {
        let mut v = VersionVector::new();
        v.advance(&id("alice", 0)).unwrap();

        let err = v.advance(&id("alice", 2)).unwrap_err();
        assert_eq!(
            err,
            CrdtError::OutOfOrder {
                agent: "alice".to_string(),
                expected: 1,
                got: 2,
            }
        );
        // Vector untouched by the failed advance
        assert_eq!(v.get("alice"), Some(0));
    }

    #[test]
    fn test_advance_rejects_nonzero_start() {
        let mut v = VersionVector::new();
        assert!(v.advance(&id("bob", 3)).is_err());
        assert_eq!(v.get("bob"), None);
    }

    #[test]
    fn test_agents_tracked_independently() {
        let mut v = VersionVector::new();
        v.advance(&id("alice", 0)).unwrap();
        v.advance(&id("bob", 0)).unwrap();
        v.advance(&id("alice", 1)).unwrap();

        assert_eq!(v.get("alice"), Some(1));
        assert_eq!(v.get("bob"), Some(0));
    }

    #[test]
    fn test_knows_treats_absence_as_known() {
        let v = VersionVector::new();
        assert!(v.knows(None));
        assert!(!v.knows(Some(&id("alice", 0))));
    }

    #[test]
    fn test_map_round_trip() {
        let mut v = VersionVector::new();
        v.advance(&id("alice", 0)).unwrap();
        v.advance(&id("bob", 0)).unwrap();

        let rebuilt = VersionVector::from_map(v.to_map());
        assert_eq!(rebuilt, v);
    }
}
