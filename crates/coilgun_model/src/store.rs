//! Entity lookup.

use crate::entity::{Capsule, Coil, Tube};
use crate::ids::{CapsuleId, CoilId, TubeId};

/// Read access to stored entities, keyed by id.
///
/// Implementations decide where entities live. Lookups return owned copies;
/// a resolved system never borrows from its store.
pub trait EntityStore {
    fn tube(&self, id: TubeId) -> Option<Tube>;
    fn coil(&self, id: CoilId) -> Option<Coil>;
    fn capsule(&self, id: CapsuleId) -> Option<Capsule>;
}

impl<S: EntityStore + ?Sized> EntityStore for &S {
    fn tube(&self, id: TubeId) -> Option<Tube> {
        (**self).tube(id)
    }

    fn coil(&self, id: CoilId) -> Option<Coil> {
        (**self).coil(id)
    }

    fn capsule(&self, id: CapsuleId) -> Option<Capsule> {
        (**self).capsule(id)
    }
}
