//! Serialization layer - convert document state to/from the JSON wire format
//!
//! The wire schema is deliberately separate from the in-memory CRDT
//! types: [`StatePayload`] / [`WireItem`] / [`WireId`] define what goes
//! on the network, and conversion happens explicitly in both
//! directions. Decoding validates the payload as a whole before any
//! [`Doc`] is built, so a malformed payload is rejected at the boundary
//! and never reaches a merge.

use crate::crdt::text::{Doc, Item, ItemId, VersionVector};
use crate::error::{CrdtError, Result};
use crate::AgentId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Item identifier as it appears on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireId {
    pub agent: String,
    pub seq: u64,
}

impl WireId {
    fn from_id(id: &ItemId) -> Self {
        Self {
            agent: id.agent.clone(),
            seq: id.seq,
        }
    }

    fn into_id(self) -> ItemId {
        ItemId::new(self.agent, self.seq)
    }
}

/// One item as it appears on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireItem {
    pub content: char,
    pub id: WireId,
    pub origin_left: Option<WireId>,
    pub origin_right: Option<WireId>,
    pub deleted: bool,
}

impl WireItem {
    fn from_item(item: &Item) -> Self {
        Self {
            content: item.content,
            id: WireId::from_id(&item.id),
            origin_left: item.origin_left.as_ref().map(WireId::from_id),
            origin_right: item.origin_right.as_ref().map(WireId::from_id),
            deleted: item.deleted,
        }
    }

    fn into_item(self) -> Item {
        let mut item = Item::new(
            self.id.into_id(),
            self.content,
            self.origin_left.map(WireId::into_id),
            self.origin_right.map(WireId::into_id),
        );
        if self.deleted {
            item.delete();
        }
        item
    }
}

/// One replica's full state: the only unit ever exchanged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatePayload {
    /// Owning agent's name (receivers discard their own echoes)
    pub agent: AgentId,

    /// Complete item sequence in document order, tombstones included
    pub items: Vec<WireItem>,

    /// Per-agent high-water marks
    pub version: HashMap<AgentId, u64>,
}

impl StatePayload {
    /// Snapshot a document into a payload
    pub fn from_doc(agent: &str, doc: &Doc) -> Self {
        Self {
            agent: agent.to_string(),
            items: doc.items().iter().map(WireItem::from_item).collect(),
            version: doc.version().to_map(),
        }
    }

    /// Validate the payload and rebuild the sender's document
    ///
    /// Rejected before any document is built:
    /// - duplicate item ids
    /// - an origin referencing an id not present in the payload
    /// - an item id not covered by the payload's own version vector
    pub fn into_doc(self) -> Result<(AgentId, Doc)> {
        let mut ids = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            if !ids.insert((item.id.agent.as_str(), item.id.seq)) {
                return Err(CrdtError::Protocol(format!(
                    "duplicate item id {}:{}",
                    item.id.agent, item.id.seq
                )));
            }
        }

        for item in &self.items {
            for origin in [&item.origin_left, &item.origin_right]
                .into_iter()
                .flatten()
            {
                if !ids.contains(&(origin.agent.as_str(), origin.seq)) {
                    return Err(CrdtError::Protocol(format!(
                        "item {}:{} references origin {}:{} absent from payload",
                        item.id.agent, item.id.seq, origin.agent, origin.seq
                    )));
                }
            }

            let covered = self
                .version
                .get(&item.id.agent)
                .map_or(false, |&seen| seen >= item.id.seq);
            if !covered {
                return Err(CrdtError::Protocol(format!(
                    "item {}:{} not covered by payload version vector",
                    item.id.agent, item.id.seq
                )));
            }
        }

        let StatePayload {
            agent,
            items,
            version,
        } = self;
        let items = items.into_iter().map(WireItem::into_item).collect();
        let doc = Doc::from_parts(items, VersionVector::from_map(version));

        Ok((agent, doc))
    }
}

/// Serialize a document to the JSON wire format
pub fn encode_state(agent: &str, doc: &Doc) -> Result<String> {
    let payload = StatePayload::from_doc(agent, doc);
    serde_json::to_string(&payload)
        .map_err(|e| CrdtError::Protocol(format!("failed to encode state: {}", e)))
}

/// Deserialize and validate a JSON wire payload
///
/// Returns the sending agent's name alongside the rebuilt document so
/// the caller can apply the self-merge guard before merging.
pub fn decode_state(payload: &str) -> Result<(AgentId, Doc)> {
    let payload: StatePayload = serde_json::from_str(payload)
        .map_err(|e| CrdtError::Protocol(format!("failed to decode state: {}", e)))?;
    payload.into_doc()
}
