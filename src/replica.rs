//! Replica: one agent's owned document plus its boundary surface
//!
//! [`Replica`] is what the surrounding application drives: the diff
//! layer hands it [`Edit`]s, the transport layer exchanges the strings
//! produced by [`Replica::encode`] and consumed by
//! [`Replica::apply_remote`]. The replica exclusively owns its
//! document; callers must present local edits and remote merges as a
//! strictly serial sequence of calls.

use crate::crdt::text::Doc;
use crate::error::Result;
use crate::protocol;
use crate::AgentId;

/// A replacement edit at a visible-text offset, as produced by the
/// (external) old-text/new-text diff: delete `delete_len` characters at
/// `position`, then insert `insert` at the same position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub position: usize,
    pub delete_len: usize,
    pub insert: String,
}

/// One replica: an agent name and the document it owns
///
/// # Example
///
/// ```rust
/// use cotext_core::Replica;
///
/// let mut replica = Replica::new("alice");
/// replica.insert(0, "hello").unwrap();
/// replica.delete(0, 1).unwrap();
///
/// assert_eq!(replica.text(), "ello");
/// ```
#[derive(Debug, Clone)]
pub struct Replica {
    agent: AgentId,
    doc: Doc,
}

impl Replica {
    /// Create a replica with an empty document
    pub fn new(agent: impl Into<AgentId>) -> Self {
        Self {
            agent: agent.into(),
            doc: Doc::new(),
        }
    }

    /// This replica's agent name
    pub fn agent(&self) -> &str {
        &self.agent
    }

    /// The owned document
    pub fn doc(&self) -> &Doc {
        &self.doc
    }

    /// Current visible text
    pub fn text(&self) -> String {
        self.doc.text()
    }

    /// Insert `text` at visible offset `pos`
    pub fn insert(&mut self, pos: usize, text: &str) -> Result<()> {
        self.doc.local_insert(&self.agent, pos, text)
    }

    /// Delete `len` visible characters starting at `pos`
    pub fn delete(&mut self, pos: usize, len: usize) -> Result<()> {
        self.doc.local_delete(pos, len)
    }

    /// Apply a replacement edit from the diff layer
    ///
    /// The deletion is validated against the current visible length
    /// before anything mutates, and the insertion position is always
    /// valid once the deletion has applied, so a rejected edit leaves
    /// the document untouched.
    pub fn apply_edit(&mut self, edit: &Edit) -> Result<()> {
        if edit.delete_len > 0 {
            self.doc.local_delete(edit.position, edit.delete_len)?;
        }
        if !edit.insert.is_empty() {
            self.doc
                .local_insert(&self.agent, edit.position, &edit.insert)?;
        }
        Ok(())
    }

    /// Merge another replica's document into this one
    pub fn merge_from(&mut self, other: &Replica) -> Result<()> {
        self.doc.merge_from(&other.doc)
    }

    /// Replace the document with a fresh empty one
    pub fn reset(&mut self) {
        self.doc = Doc::new();
    }

    /// Serialize this replica's full state for broadcast
    pub fn encode(&self) -> Result<String> {
        protocol::encode_state(&self.agent, &self.doc)
    }

    /// Decode a broadcast payload and merge it
    ///
    /// Returns `Ok(true)` if a remote state was merged and `Ok(false)`
    /// if the payload was this replica's own echoed broadcast, which is
    /// discarded without merging. A malformed payload is dropped with
    /// the document untouched; the error is logged and returned for the
    /// surrounding layer to handle.
    pub fn apply_remote(&mut self, payload: &str) -> Result<bool> {
        let (agent, remote) = match protocol::decode_state(payload) {
            Ok(decoded) => decoded,
            Err(err) => {
                log::warn!("{}: dropping malformed payload: {}", self.agent, err);
                return Err(err);
            }
        };

        if agent == self.agent {
            log::debug!("{}: ignoring own echoed broadcast", self.agent);
            return Ok(false);
        }

        self.doc.merge_from(&remote)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CrdtError;

    #[test]
    fn test_local_editing() {
        let mut replica = Replica::new("alice");
        replica.insert(0, "hello world").unwrap();
        replica.delete(5, 6).unwrap();

        assert_eq!(replica.text(), "hello");
        assert_eq!(replica.agent(), "alice");
    }

    #[test]
    fn test_apply_edit_replacement() {
        let mut replica = Replica::new("alice");
        replica.insert(0, "hello world").unwrap();

        // "world" -> "there"
        replica
            .apply_edit(&Edit {
                position: 6,
                delete_len: 5,
                insert: "there".to_string(),
            })
            .unwrap();

        assert_eq!(replica.text(), "hello there");
    }

    #[test]
    fn test_apply_edit_out_of_range_rejected() {
        let mut replica = Replica::new("alice");
        replica.insert(0, "hi").unwrap();

        let err = replica
            .apply_edit(&Edit {
                position: 2,
                delete_len: 1,
                insert: "x".to_string(),
            })
            .unwrap_err();

        assert!(matches!(err, CrdtError::PositionOutOfBounds { .. }));
        assert_eq!(replica.text(), "hi");
    }

    #[test]
    fn test_reset() {
        let mut replica = Replica::new("alice");
        replica.insert(0, "hello").unwrap();
        replica.reset();

        assert_eq!(replica.text(), "");
        assert_eq!(replica.doc().items().len(), 0);
    }

    #[test]
    fn test_round_trip_through_wire() {
        let mut alice = Replica::new("alice");
        alice.insert(0, "shared").unwrap();

        let mut bob = Replica::new("bob");
        let merged = bob.apply_remote(&alice.encode().unwrap()).unwrap();

        assert!(merged);
        assert_eq!(bob.text(), "shared");
    }

    #[test]
    fn test_self_merge_guard() {
        let mut alice = Replica::new("alice");
        alice.insert(0, "hello").unwrap();

        let echo = alice.encode().unwrap();
        let merged = alice.apply_remote(&echo).unwrap();

        assert!(!merged);
        assert_eq!(alice.text(), "hello");
        assert_eq!(alice.doc().items().len(), 5);
    }

    #[test]
    fn test_malformed_payload_dropped() {
        let mut alice = Replica::new("alice");
        alice.insert(0, "hello").unwrap();

        let err = alice.apply_remote("not json at all").unwrap_err();
        assert!(matches!(err, CrdtError::Protocol(_)));
        assert_eq!(alice.text(), "hello");
    }
}
