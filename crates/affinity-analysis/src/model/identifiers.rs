//! Stable ids into the declaration graph.
//!
//! Distinct newtypes keep a `TypeId` from being used where a `NodeId`
//! is expected.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u32);

        impl $name {
            pub fn new(raw: u32) -> Self {
                Self(raw)
            }

            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}#{}", stringify!($name), self.0)
            }
        }
    };
}

define_id!(
    /// A type declaration (class, interface, attribute class).
    TypeId
);

define_id!(
    /// A member declaration (constructor, method, field, property).
    MemberId
);

define_id!(
    /// A syntax node inside a code body.
    NodeId
);
