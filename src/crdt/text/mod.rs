//! Character-level text CRDT with dual insertion origins
//!
//! Every character in the document is an [`Item`] carrying a globally
//! unique [`ItemId`] and the ids of its left and right neighbors at the
//! moment of insertion. Those two anchors are enough for the integration
//! algorithm in [`Doc::integrate`] to place concurrent inserts in the
//! same order on every replica, no matter what order operations arrive
//! in.
//!
//! Deletion never removes an item: it flips a tombstone flag, keeping
//! the item in the sequence as a stable anchor for concurrent edits.
//! Tombstones accumulate for the lifetime of the document; there is no
//! garbage collection in this variant.
//!
//! # Example
//!
//! ```rust
//! use cotext_core::crdt::text::Doc;
//!
//! let mut a = Doc::new();
//! let mut b = Doc::new();
//!
//! a.local_insert("a", 0, "AB").unwrap();
//! b.local_insert("b", 0, "C").unwrap();
//!
//! a.merge_from(&b).unwrap();
//! b.merge_from(&a).unwrap();
//!
//! // Same interleaving on both replicas
//! assert_eq!(a.text(), b.text());
//! ```

mod doc;
mod id;
mod item;
mod merge;
mod version;

pub use doc::Doc;
pub use id::ItemId;
pub use item::Item;
pub use version::VersionVector;
