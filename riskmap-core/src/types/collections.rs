//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};

/// Set of catalog ids (risk/control/capability ids are opaque strings).
pub type IdSet = FxHashSet<String>;
