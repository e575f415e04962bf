// src/engine/mod.rs
//! Selector verification core: trees, the tree walker, and the
//! concurrent fan-out across targets.

pub mod concurrent;
pub mod tree;
pub mod types;
pub mod verify;

pub use concurrent::run_all;
pub use tree::{SelectorNode, SelectorTree};
pub use types::{Status, Verification, VerificationResult};
pub use verify::{verify, verify_tree};
