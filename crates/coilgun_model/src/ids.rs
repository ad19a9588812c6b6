//! Identifier newtypes.
//!
//! Every entity kind gets its own `u64` wrapper so a coil id can never be
//! passed where a tube id is expected. Ids are allocated by whatever store
//! owns the entities; this crate only carries them.

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Create an identifier from a raw `u64`.
            #[must_use]
            pub const fn from_raw(id: u64) -> Self {
                Self(id)
            }

            /// Returns the raw `u64` identifier.
            #[must_use]
            pub const fn id(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($label, "({})"), self.0)
            }
        }
    };
}

entity_id!(
    /// Identifies a [`Tube`](crate::Tube).
    TubeId,
    "Tube"
);

entity_id!(
    /// Identifies a [`Coil`](crate::Coil).
    CoilId,
    "Coil"
);

entity_id!(
    /// Identifies a [`Capsule`](crate::Capsule).
    CapsuleId,
    "Capsule"
);

entity_id!(
    /// Identifies a [`SystemConfig`](crate::SystemConfig).
    SystemId,
    "System"
);
