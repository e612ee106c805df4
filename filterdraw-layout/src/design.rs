//! Design files: the synthesis step's result object.
//!
//! ```json
//! {
//!   "circuitTopology": "ladder-t",
//!   "sourceImpedance": 50,
//!   "loadImpedance": 50,
//!   "components": [
//!     { "id": "L1", "type": "inductor", "value": 0.00796, "position": "series" }
//!   ],
//!   "transferFunction": { "...": "ignored" }
//! }
//! ```

use crate::model::{Component, Impedances, Topology};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DesignError {
    #[error("Failed to parse design JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Duplicate component id '{0}'")]
    DuplicateId(String),
}

/// A synthesized filter ready for layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Design {
    #[serde(default)]
    pub components: Vec<Component>,
    #[serde(default, rename = "circuitTopology", alias = "topology")]
    pub topology: Option<Topology>,
    #[serde(default)]
    pub source_impedance: Option<f64>,
    #[serde(default)]
    pub load_impedance: Option<f64>,
}

impl Design {
    /// Parse a design and check that component ids are unique.
    pub fn from_json(json: &str) -> Result<Self, DesignError> {
        let design: Design = serde_json::from_str(json)?;
        design.check_ids()?;
        Ok(design)
    }

    fn check_ids(&self) -> Result<(), DesignError> {
        let mut seen = HashSet::new();
        for component in &self.components {
            if !seen.insert(component.id.as_str()) {
                return Err(DesignError::DuplicateId(component.id.clone()));
            }
        }
        Ok(())
    }

    pub fn impedances(&self) -> Impedances {
        Impedances {
            source: self.source_impedance,
            load: self.load_impedance,
        }
    }
}
