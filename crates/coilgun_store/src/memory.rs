//! Concurrent in-memory entity store.
//!
//! Ids are chosen by the caller. Inserting under an existing id replaces the
//! previous entity.

use dashmap::DashMap;
use tracing::debug;

use coilgun_model::{
    Capsule, CapsuleId, Coil, CoilId, EntityStore, SystemConfig, SystemId, Tube, TubeId,
};

use crate::error::StoreError;
use crate::scenario::Scenario;

/// Tubes, coils, capsules and system configurations, keyed by id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tubes: DashMap<TubeId, Tube>,
    coils: DashMap<CoilId, Coil>,
    capsules: DashMap<CapsuleId, Capsule>,
    systems: DashMap<SystemId, SystemConfig>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every entity in a scenario into a fresh store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuplicateId`] if two entities of the same kind
    /// share an id.
    pub fn from_scenario(scenario: Scenario) -> Result<Self, StoreError> {
        let store = Self::new();
        for tube in scenario.tubes {
            if store.insert_tube(tube).is_some() {
                return Err(duplicate("tube", tube.id.id()));
            }
        }
        for coil in scenario.coils {
            if store.insert_coil(coil).is_some() {
                return Err(duplicate("coil", coil.id.id()));
            }
        }
        for capsule in scenario.capsules {
            if store.insert_capsule(capsule).is_some() {
                return Err(duplicate("capsule", capsule.id.id()));
            }
        }
        for system in scenario.systems {
            let id = system.id;
            if store.insert_system(system).is_some() {
                return Err(duplicate("system", id.id()));
            }
        }
        debug!(
            tubes = store.tubes.len(),
            coils = store.coils.len(),
            capsules = store.capsules.len(),
            systems = store.systems.len(),
            "loaded scenario"
        );
        Ok(store)
    }

    // -- Insert --

    /// Insert a tube, returning the one it replaced.
    pub fn insert_tube(&self, tube: Tube) -> Option<Tube> {
        self.tubes.insert(tube.id, tube)
    }

    /// Insert a coil, returning the one it replaced.
    pub fn insert_coil(&self, coil: Coil) -> Option<Coil> {
        self.coils.insert(coil.id, coil)
    }

    /// Insert a capsule, returning the one it replaced.
    pub fn insert_capsule(&self, capsule: Capsule) -> Option<Capsule> {
        self.capsules.insert(capsule.id, capsule)
    }

    /// Insert a system configuration, returning the one it replaced.
    pub fn insert_system(&self, system: SystemConfig) -> Option<SystemConfig> {
        self.systems.insert(system.id, system)
    }

    // -- Lookup --

    #[must_use]
    pub fn system(&self, id: SystemId) -> Option<SystemConfig> {
        self.systems.get(&id).map(|s| s.value().clone())
    }

    /// All tubes, ordered by id.
    #[must_use]
    pub fn tubes(&self) -> Vec<Tube> {
        sorted_by_id(self.tubes.iter().map(|e| *e.value()), |t| t.id)
    }

    /// All coils, ordered by id.
    #[must_use]
    pub fn coils(&self) -> Vec<Coil> {
        sorted_by_id(self.coils.iter().map(|e| *e.value()), |c| c.id)
    }

    /// All capsules, ordered by id.
    #[must_use]
    pub fn capsules(&self) -> Vec<Capsule> {
        sorted_by_id(self.capsules.iter().map(|e| *e.value()), |c| c.id)
    }

    /// All system configurations, ordered by id.
    #[must_use]
    pub fn systems(&self) -> Vec<SystemConfig> {
        sorted_by_id(self.systems.iter().map(|e| e.value().clone()), |s| s.id)
    }

    // -- Remove --

    pub fn remove_tube(&self, id: TubeId) -> Option<Tube> {
        self.tubes.remove(&id).map(|(_, t)| t)
    }

    pub fn remove_coil(&self, id: CoilId) -> Option<Coil> {
        self.coils.remove(&id).map(|(_, c)| c)
    }

    pub fn remove_capsule(&self, id: CapsuleId) -> Option<Capsule> {
        self.capsules.remove(&id).map(|(_, c)| c)
    }

    pub fn remove_system(&self, id: SystemId) -> Option<SystemConfig> {
        self.systems.remove(&id).map(|(_, s)| s)
    }
}

impl EntityStore for MemoryStore {
    fn tube(&self, id: TubeId) -> Option<Tube> {
        self.tubes.get(&id).map(|t| *t.value())
    }

    fn coil(&self, id: CoilId) -> Option<Coil> {
        self.coils.get(&id).map(|c| *c.value())
    }

    fn capsule(&self, id: CapsuleId) -> Option<Capsule> {
        self.capsules.get(&id).map(|c| *c.value())
    }
}

fn sorted_by_id<T, K: Ord>(items: impl Iterator<Item = T>, key: impl Fn(&T) -> K) -> Vec<T> {
    let mut out: Vec<T> = items.collect();
    out.sort_by_key(key);
    out
}

fn duplicate(kind: &'static str, id: u64) -> StoreError {
    StoreError::DuplicateId { kind, id }
}

#[cfg(test)]
mod tests {
    use coilgun_sim::{SimulationError, resolve};

    use super::*;

    fn store() -> MemoryStore {
        let store = MemoryStore::new();
        store.insert_tube(Tube::new(1, 10.0));
        store.insert_capsule(Capsule::new(1, 1.0, 1.0));
        store.insert_coil(Coil::new(2, 2.0, 10.0));
        store.insert_coil(Coil::new(1, 1.0, 5.0));
        store.insert_system(SystemConfig::new(1, 1, 1).with_coil(2, 4.0));
        store
    }

    #[test]
    fn test_lookup_through_entity_store() {
        let store = store();
        assert_eq!(store.tube(TubeId(1)).unwrap().length_m, 10.0);
        assert!(store.coil(CoilId(3)).is_none());
        assert_eq!(store.capsule(CapsuleId(1)).unwrap().mass_kg, 1.0);
    }

    #[test]
    fn test_insert_replaces() {
        let store = store();
        let old = store.insert_tube(Tube::new(1, 20.0)).unwrap();
        assert_eq!(old.length_m, 10.0);
        assert_eq!(store.tube(TubeId(1)).unwrap().length_m, 20.0);
    }

    #[test]
    fn test_lists_are_ordered_by_id() {
        let ids: Vec<_> = store().coils().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![CoilId(1), CoilId(2)]);
    }

    #[test]
    fn test_every_list_is_ordered_by_id() {
        let store = store();
        store.insert_tube(Tube::new(3, 5.0));
        store.insert_tube(Tube::new(2, 7.0));
        store.insert_capsule(Capsule::new(9, 2.0, 1.0));
        store.insert_capsule(Capsule::new(4, 3.0, 1.0));
        store.insert_system(SystemConfig::new(7, 2, 4));
        store.insert_system(SystemConfig::new(0, 3, 9));

        let tubes: Vec<_> = store.tubes().iter().map(|t| t.id).collect();
        assert_eq!(tubes, vec![TubeId(1), TubeId(2), TubeId(3)]);
        let capsules: Vec<_> = store.capsules().iter().map(|c| c.id).collect();
        assert_eq!(capsules, vec![CapsuleId(1), CapsuleId(4), CapsuleId(9)]);
        let systems: Vec<_> = store.systems().iter().map(|s| s.id).collect();
        assert_eq!(systems, vec![SystemId(0), SystemId(1), SystemId(7)]);
    }

    #[test]
    fn test_remove_then_miss() {
        let store = store();

        assert_eq!(store.remove_tube(TubeId(1)).unwrap().length_m, 10.0);
        assert!(store.remove_tube(TubeId(1)).is_none());
        assert!(store.tube(TubeId(1)).is_none());
        assert!(store.tubes().is_empty());

        assert!(store.remove_coil(CoilId(2)).is_some());
        assert!(store.remove_coil(CoilId(2)).is_none());
        assert!(store.coil(CoilId(2)).is_none());
        assert_eq!(store.coils().len(), 1);

        assert_eq!(store.remove_capsule(CapsuleId(1)).unwrap().mass_kg, 1.0);
        assert!(store.remove_capsule(CapsuleId(1)).is_none());
        assert!(store.capsule(CapsuleId(1)).is_none());
        assert!(store.capsules().is_empty());

        assert_eq!(store.remove_system(SystemId(1)).unwrap().tube_id, TubeId(1));
        assert!(store.remove_system(SystemId(1)).is_none());
        assert!(store.system(SystemId(1)).is_none());
        assert!(store.systems().is_empty());
    }

    #[test]
    fn test_resolve_against_memory_store() {
        let store = store();
        let config = store.system(SystemId(1)).unwrap();
        let system = resolve(&config, &store).unwrap();
        assert_eq!(system.coils().len(), 1);

        store.remove_coil(CoilId(2));
        let err = resolve(&config, &store).unwrap_err();
        assert!(matches!(err, SimulationError::UnknownEntity { id: 2, .. }));
    }

    #[test]
    fn test_from_scenario_rejects_duplicate_ids() {
        let scenario = Scenario {
            coils: vec![Coil::new(1, 1.0, 1.0), Coil::new(1, 2.0, 1.0)],
            ..Scenario::default()
        };
        let err = MemoryStore::from_scenario(scenario).unwrap_err();
        assert!(matches!(
            err,
            StoreError::DuplicateId {
                kind: "coil",
                id: 1
            }
        ));
    }
}
