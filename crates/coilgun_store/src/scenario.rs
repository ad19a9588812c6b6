//! Scenario documents.
//!
//! A scenario is a JSON file listing the entities of one or more
//! accelerator setups:
//!
//! ```json
//! {
//!   "tubes":    [{ "id": 1, "length_m": 10.0 }],
//!   "capsules": [{ "id": 1, "mass_kg": 1.0, "initial_velocity_mps": 1.0 }],
//!   "coils":    [{ "id": 1, "length_m": 2.0, "force_applied_n": 10.0 }],
//!   "systems":  [{ "id": 1, "tube_id": 1, "capsule_id": 1,
//!                  "coils": [{ "coil_id": 1, "position_m": 4.0 }] }]
//! }
//! ```

use serde::{Deserialize, Serialize};

use coilgun_model::{Capsule, Coil, SystemConfig, Tube};

use crate::error::StoreError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub tubes: Vec<Tube>,
    #[serde(default)]
    pub coils: Vec<Coil>,
    #[serde(default)]
    pub capsules: Vec<Capsule>,
    #[serde(default)]
    pub systems: Vec<SystemConfig>,
}

impl Scenario {
    /// Parse a scenario from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Json`] if the text is not a valid scenario.
    pub fn from_json(text: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(text)?)
    }
}
