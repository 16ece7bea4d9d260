//! CoText Core - replicated text engine for collaborative editing
//!
//! This is the Rust core of CoText. Each replica owns a [`Replica`] and
//! edits it independently; replicas exchange their full state over an
//! opaque transport and converge without coordination. It implements:
//! - A character-level list CRDT with dual insertion origins
//! - Version vectors for causal bookkeeping
//! - A deterministic integration algorithm for concurrent inserts
//! - Full-state merge with causal-readiness ordering
//! - A JSON wire format for state exchange
//!
//! The UI, the old-text/new-text diffing, and the broadcast transport are
//! deliberately outside this crate; they drive it through [`Replica`].
//!
//! # Examples
//!
//! ```rust
//! use cotext_core::Replica;
//!
//! let mut alice = Replica::new("alice");
//! let mut bob = Replica::new("bob");
//!
//! alice.insert(0, "hello").unwrap();
//! bob.insert(0, "world").unwrap();
//!
//! alice.merge_from(&bob).unwrap();
//! bob.merge_from(&alice).unwrap();
//!
//! // Both replicas converge to the same text
//! assert_eq!(alice.text(), bob.text());
//! ```

pub mod crdt;
pub mod error;
pub mod protocol;
pub mod replica;

// Re-exports for convenience
pub use crdt::text::{Doc, Item, ItemId, VersionVector};
pub use error::{CrdtError, Result};
pub use replica::{Edit, Replica};

/// Agent (replica/user) identifier type
pub type AgentId = String;
