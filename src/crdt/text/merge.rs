//! Cross-replica merge
//!
//! A merge takes another replica's full document state and applies
//! everything the destination has not seen: missing items are
//! integrated in a causally valid order, then deletions are reconciled
//! by tombstone. Merging is idempotent, and repeated pairwise merges
//! across any set of replicas converge on one document.
//!
//! Deletions carry no causal metadata of their own (the version vector
//! tracks insertions only), so "has everything up to seq S from agent
//! X" does not imply "has every deletion X issued". Deletions propagate
//! solely through the reconciliation pass here, which is why exchanges
//! always ship full state.

use super::doc::Doc;
use super::id::ItemId;
use super::item::Item;
use crate::error::{CrdtError, Result};
use std::collections::HashMap;

impl Doc {
    /// Merge another replica's state into this document
    ///
    /// After a successful merge, this document contains every item
    /// `src` has, with every deletion `src` recorded, and an advanced
    /// version vector. Already-known items are neither duplicated nor
    /// reordered; merging the same source twice is a no-op the second
    /// time. `src` is never mutated.
    ///
    /// # Errors
    ///
    /// - [`CrdtError::MergeStalled`] if a full pass over the remaining
    ///   missing items integrates none of them — the source has a gap
    ///   or cycle in its dependency graph and retrying cannot help.
    /// - [`CrdtError::OutOfOrder`] / [`CrdtError::MissingItem`] if the
    ///   source is internally inconsistent.
    ///
    /// On any failure the destination is left exactly as it was: the
    /// merge works on staged state and commits only once everything
    /// has applied.
    pub fn merge_from(&mut self, src: &Doc) -> Result<()> {
        let mut staged = self.clone();
        staged.integrate_missing(src)?;
        staged.reconcile_tombstones(src)?;
        *self = staged;
        Ok(())
    }

    /// Integrate every item in `src` not yet causally known here
    ///
    /// Fixed-point loop: each pass integrates whatever has become
    /// ready (its agent predecessor and both origins known), until
    /// nothing is left or a pass makes no progress.
    fn integrate_missing(&mut self, src: &Doc) -> Result<()> {
        let mut missing: Vec<Option<&Item>> = src
            .items()
            .iter()
            .filter(|item| !self.version.contains(&item.id))
            .map(Some)
            .collect();
        let mut remaining = missing.len();

        while remaining > 0 {
            let mut integrated_this_pass = 0;

            for slot in missing.iter_mut() {
                let Some(item) = *slot else { continue };
                if !self.causally_ready(item) {
                    continue;
                }

                self.integrate(item.clone())?;
                *slot = None;
                remaining -= 1;
                integrated_this_pass += 1;
            }

            if integrated_this_pass == 0 {
                return Err(CrdtError::MergeStalled { remaining });
            }
        }

        Ok(())
    }

    /// True once everything `item` depends on is known here: the item
    /// itself is new, its agent's previous seq has been applied, and
    /// both origin anchors are present
    fn causally_ready(&self, item: &Item) -> bool {
        if self.version.contains(&item.id) {
            return false;
        }
        let predecessor_known =
            item.id.seq == 0 || self.version.contains_seq(&item.id.agent, item.id.seq - 1);

        predecessor_known
            && self.version.knows(item.origin_left.as_ref())
            && self.version.knows(item.origin_right.as_ref())
    }

    /// Copy `src`'s deletions onto the matching local items
    ///
    /// Matching is purely by id lookup: concurrent inserts from a third
    /// replica can interleave differently in the two sequences, so
    /// positional alignment is not safe. This is a monotonic OR over
    /// the tombstone flag; nothing is ever un-deleted.
    fn reconcile_tombstones(&mut self, src: &Doc) -> Result<()> {
        let index: HashMap<ItemId, usize> = self
            .items
            .iter()
            .enumerate()
            .map(|(idx, item)| (item.id.clone(), idx))
            .collect();

        for src_item in src.items().iter().filter(|item| item.deleted) {
            // After integrate_missing, every source item must exist here
            let idx = *index
                .get(&src_item.id)
                .ok_or_else(|| CrdtError::MissingItem(src_item.id.clone()))?;
            self.items[idx].delete();
        }

        Ok(())
    }
}
