//! Item: the fundamental building block of the text CRDT
//!
//! Each item represents exactly one character with:
//! - Unique ID
//! - Left/right origins for conflict resolution
//! - Deleted flag (tombstone)

use super::id::ItemId;

/// A single character in the document
///
/// Items record their insertion context: what was immediately to the
/// left and to the right at the moment of insertion. These anchors are
/// what lets the integration algorithm resolve concurrent inserts at
/// the same position deterministically.
///
/// `id`, `origin_left`, and `origin_right` are immutable after
/// creation; only `deleted` may change, and only from false to true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Unique identifier for this item
    pub id: ItemId,

    /// The character itself
    pub content: char,

    /// Item immediately to the left at insertion time (None at
    /// document start)
    pub origin_left: Option<ItemId>,

    /// Item immediately to the right at insertion time (None at
    /// document end)
    pub origin_right: Option<ItemId>,

    /// Tombstone flag; deletion never removes the item from the
    /// sequence
    pub deleted: bool,
}

impl Item {
    /// Create a new, live item
    pub fn new(
        id: ItemId,
        content: char,
        origin_left: Option<ItemId>,
        origin_right: Option<ItemId>,
    ) -> Self {
        Self {
            id,
            content,
            origin_left,
            origin_right,
            deleted: false,
        }
    }

    /// Mark this item as deleted (monotonic; never reverts)
    pub fn delete(&mut self) {
        self.deleted = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(agent: &str, seq: u64) -> ItemId {
        ItemId::new(agent.to_string(), seq)
    }

    #[test]
    fn test_item_creation() {
        let item = Item::new(id("alice", 3), 'x', Some(id("alice", 2)), None);

        assert_eq!(item.id, id("alice", 3));
        assert_eq!(item.content, 'x');
        assert_eq!(item.origin_left, Some(id("alice", 2)));
        assert_eq!(item.origin_right, None);
        assert!(!item.deleted);
    }

    #[test]
    fn test_item_deletion_is_monotonic() {
        let mut item = Item::new(id("alice", 0), 'a', None, None);

        assert!(!item.deleted);
        item.delete();
        assert!(item.deleted);
        item.delete();
        assert!(item.deleted);
    }
}
