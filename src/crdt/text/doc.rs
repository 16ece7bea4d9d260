//! Doc: one replica's authoritative document state
//!
//! A [`Doc`] is an ordered sequence of [`Item`]s (the canonical document
//! order, shared by all converged replicas) plus a [`VersionVector`]. It
//! is mutated only through the local edit API or through
//! [`Doc::merge_from`]; every operation either completes fully or
//! leaves the document untouched.

use super::id::ItemId;
use super::item::Item;
use super::version::VersionVector;
use crate::error::{CrdtError, Result};

/// One replica's document: item sequence + version vector
///
/// The visible text is the concatenation of the non-tombstoned items'
/// characters in sequence order.
///
/// # Example
///
/// ```rust
/// use cotext_core::Doc;
///
/// let mut doc = Doc::new();
/// doc.local_insert("alice", 0, "hello").unwrap();
/// doc.local_delete(0, 1).unwrap();
///
/// assert_eq!(doc.text(), "ello");
/// assert_eq!(doc.items().len(), 5); // tombstone for 'h' is retained
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Doc {
    /// Items in canonical document order, tombstones included
    pub(crate) items: Vec<Item>,

    /// Highest sequence number seen per agent
    pub(crate) version: VersionVector,
}

impl Doc {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a document from its parts (wire layer only; the payload
    /// validator is responsible for handing us a well-formed pair)
    pub(crate) fn from_parts(items: Vec<Item>, version: VersionVector) -> Self {
        Self { items, version }
    }

    /// The visible text: non-deleted items' characters in order
    pub fn text(&self) -> String {
        self.items
            .iter()
            .filter(|item| !item.deleted)
            .map(|item| item.content)
            .collect()
    }

    /// Number of visible (non-tombstoned) characters
    pub fn visible_len(&self) -> usize {
        self.items.iter().filter(|item| !item.deleted).count()
    }

    /// True if no visible characters remain
    pub fn is_empty(&self) -> bool {
        self.visible_len() == 0
    }

    /// Full item sequence, tombstones included
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// This replica's version vector
    pub fn version(&self) -> &VersionVector {
        &self.version
    }

    /// Map a visible-character offset to an index into the item
    /// sequence
    ///
    /// Only non-tombstoned items occupy a visible offset. `stick_end`
    /// controls tie-breaking when `pos` lands against a tombstoned run:
    /// when true (insertion) the earliest satisfying index is returned,
    /// so the insert lands before any tombstones at that offset; when
    /// false (deletion) tombstones are skipped and the first live item
    /// at the offset is returned.
    ///
    /// # Errors
    ///
    /// [`CrdtError::PositionOutOfBounds`] if `pos` exceeds the visible
    /// length.
    pub fn resolve_position(&self, pos: usize, stick_end: bool) -> Result<usize> {
        let mut remaining = pos;

        for (idx, item) in self.items.iter().enumerate() {
            if stick_end && remaining == 0 {
                return Ok(idx);
            }
            if item.deleted {
                continue;
            }
            if remaining == 0 {
                return Ok(idx);
            }
            remaining -= 1;
        }

        if remaining == 0 {
            Ok(self.items.len())
        } else {
            Err(CrdtError::PositionOutOfBounds {
                position: pos,
                length: self.visible_len(),
            })
        }
    }

    /// Index of the item with the given id
    fn index_of(&self, id: &ItemId) -> Result<usize> {
        self.items
            .iter()
            .position(|item| &item.id == id)
            .ok_or_else(|| CrdtError::MissingItem(id.clone()))
    }

    /// Index of an origin reference; `None` sorts before index 0
    fn origin_index(&self, origin: Option<&ItemId>) -> Result<Option<usize>> {
        match origin {
            None => Ok(None),
            Some(id) => Ok(Some(self.index_of(id)?)),
        }
    }

    /// Place a fully-formed new item into the sequence
    ///
    /// This is the conflict-resolution core. Every replica that applies
    /// the same set of items through this algorithm ends with the same
    /// sequence order, regardless of arrival order, provided each item's
    /// origins are already integrated.
    ///
    /// Scanning forward from just past `origin_left` toward
    /// `origin_right`, each already-placed candidate is classified by
    /// where its own anchors sit relative to the new item's:
    /// - candidate anchored strictly earlier: the new item goes before
    ///   it;
    /// - identical anchors: a true concurrent conflict, broken by
    ///   lexicographic agent-name comparison;
    /// - same left anchor but right anchor still inside the contested
    ///   range: ambiguous, keep scanning without committing;
    /// - anything else is unrelated and skipped.
    ///
    /// # Errors
    ///
    /// - [`CrdtError::OutOfOrder`] if the item's seq does not extend the
    ///   version vector (must never happen for locally issued items).
    /// - [`CrdtError::MissingItem`] if an origin is absent from the
    ///   sequence; the caller must integrate origins first.
    ///
    /// Either failure leaves the document untouched.
    pub fn integrate(&mut self, new_item: Item) -> Result<()> {
        // Check the version precondition before anything else so a gap
        // is reported as an ordering error even when anchors are also
        // unresolvable.
        let expected = self.version.next_seq(&new_item.id.agent);
        if new_item.id.seq != expected {
            return Err(CrdtError::OutOfOrder {
                agent: new_item.id.agent.clone(),
                expected,
                got: new_item.id.seq,
            });
        }

        // Option<usize> ordering has None < Some(_), so an absent left
        // anchor sorts before every real index.
        let left = self.origin_index(new_item.origin_left.as_ref())?;
        let right = match new_item.origin_right.as_ref() {
            Some(id) => self.index_of(id)?,
            None => self.items.len(),
        };

        let mut dest = left.map_or(0, |l| l + 1);
        let mut scanning = false;

        let mut i = dest;
        loop {
            if !scanning {
                dest = i;
            }
            // End of sequence or the right anchor: no further conflict
            // is possible.
            if i == self.items.len() || i == right {
                break;
            }

            let other = &self.items[i];
            let other_left = self.origin_index(other.origin_left.as_ref())?;
            let other_right = match other.origin_right.as_ref() {
                Some(id) => self.index_of(id)?,
                None => self.items.len(),
            };

            if other_left < left
                || (other_left == left
                    && other_right == right
                    && new_item.id.agent < other.id.agent)
            {
                break;
            }
            if other_left == left {
                scanning = other_right < right;
            }

            i += 1;
        }

        self.version.advance(&new_item.id)?;
        self.items.insert(dest, new_item);
        Ok(())
    }

    /// Insert `text` at visible offset `pos`, authored by `agent`
    ///
    /// Characters are integrated left to right with fresh sequence
    /// numbers; the offset advances after each one so a multi-character
    /// insert lands contiguously in user order.
    ///
    /// # Errors
    ///
    /// [`CrdtError::PositionOutOfBounds`] if `pos` exceeds the visible
    /// length; the document is left unmodified.
    pub fn local_insert(&mut self, agent: &str, pos: usize, text: &str) -> Result<()> {
        if pos > self.visible_len() {
            return Err(CrdtError::PositionOutOfBounds {
                position: pos,
                length: self.visible_len(),
            });
        }

        let mut pos = pos;
        for ch in text.chars() {
            self.insert_one(agent, pos, ch)?;
            pos += 1;
        }
        Ok(())
    }

    fn insert_one(&mut self, agent: &str, pos: usize, ch: char) -> Result<()> {
        let idx = self.resolve_position(pos, true)?;
        let id = ItemId::new(agent.to_string(), self.version.next_seq(agent));

        let origin_left = idx.checked_sub(1).map(|i| self.items[i].id.clone());
        let origin_right = self.items.get(idx).map(|item| item.id.clone());

        self.integrate(Item::new(id, ch, origin_left, origin_right))
    }

    /// Tombstone `len` visible characters starting at offset `pos`
    ///
    /// The offset does not advance between characters: each pass
    /// tombstones the now-first live character at `pos`, which is the
    /// contract for "delete forward from cursor". Deletions do not
    /// touch the version vector — tombstoning is not a causally
    /// ordered creation event in this design, so causal tracking
    /// covers insertions only and deletions propagate via merge's
    /// tombstone reconciliation.
    ///
    /// # Errors
    ///
    /// [`CrdtError::PositionOutOfBounds`] if the range exceeds the
    /// visible length; the document is left unmodified.
    pub fn local_delete(&mut self, pos: usize, len: usize) -> Result<()> {
        let visible = self.visible_len();
        if pos + len > visible {
            return Err(CrdtError::PositionOutOfBounds {
                position: pos + len,
                length: visible,
            });
        }

        for _ in 0..len {
            let idx = self.resolve_position(pos, false)?;
            self.items[idx].delete();
        }
        Ok(())
    }
}
