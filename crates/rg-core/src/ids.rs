//! Strongly typed, 1-based identifier wrappers.
//!
//! Vertex and edge ids are sequence numbers handed out in creation order
//! starting at 1, which is also how they appear in exported tables.  `0` is
//! never assigned and serves as the `INVALID` sentinel.  Use `.slot()` to get
//! the 0-based position in a backing `Vec`.

use std::fmt;

/// Generate a typed 1-based ID wrapper around a primitive integer.
macro_rules! sequence_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".  Real ids start at 1.
            pub const INVALID: $name = $name(0);

            /// The first id handed out by a fresh sequence.
            pub const FIRST: $name = $name(1);

            /// Raw id value as written to exported tables.
            #[inline(always)]
            pub fn get(self) -> $inner {
                self.0
            }

            /// 0-based position in a backing `Vec`.
            ///
            /// Must not be called on `INVALID`.
            #[inline(always)]
            pub fn slot(self) -> usize {
                debug_assert!(self.0 != 0, "slot() on INVALID {}", stringify!($name));
                self.0 as usize - 1
            }

            /// Id of the element stored at 0-based `slot`.
            #[inline(always)]
            pub fn from_slot(slot: usize) -> $name {
                $name((slot + 1) as $inner)
            }

            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self.0 != 0
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

sequence_id! {
    /// Identity of a resolved network vertex.
    pub struct VertexId(u32);
}

sequence_id! {
    /// Identity of an undirected edge, in input-record order.
    pub struct EdgeId(u32);
}
