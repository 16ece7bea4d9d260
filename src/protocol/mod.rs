//! Wire protocol for replica state exchange
//!
//! The unit of exchange between replicas is always one full document
//! state: the complete item sequence (tombstones included), the version
//! vector, and the owning agent's name. There is no incremental delta
//! format; duplication and reordering of payloads are harmless because
//! merging is idempotent and re-checks causal readiness every time.

pub mod serialize;

pub use serialize::{decode_state, encode_state, StatePayload, WireId, WireItem};
