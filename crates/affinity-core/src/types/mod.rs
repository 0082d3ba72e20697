//! Collection aliases shared by the Affinity crates.

pub mod collections;

pub use collections::{FxHashMap, FxHashSet, SmallVec2, SmallVec4};
