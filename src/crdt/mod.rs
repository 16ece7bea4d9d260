//! CRDT (Conflict-free Replicated Data Type) implementation
//!
//! The engine in this module lets independent replicas apply edits
//! concurrently or offline and converge to an identical document once
//! they have exchanged state, without a central authority resolving
//! conflicts.
//!
//! # References
//!
//! - "Conflict-free Replicated Data Types" (INRIA Research Report 7687)
//! - "Near Real-Time Peer-to-Peer Shared Editing on Extensible Data Types" (YATA)
//! - "Replicated abstract data types: Building blocks for collaborative
//!   applications" (RGA)

pub mod text;

pub use text::Doc;
