//! Input model: the component list produced by filter synthesis.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Electrical component kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Resistor,
    Inductor,
    Capacitor,
    #[serde(alias = "op-amp", alias = "op_amp")]
    Opamp,
}

impl ComponentKind {
    /// Unit symbol appended to formatted values.
    pub fn unit(self) -> &'static str {
        match self {
            ComponentKind::Resistor => "Ω",
            ComponentKind::Inductor => "H",
            ComponentKind::Capacitor => "F",
            ComponentKind::Opamp => "",
        }
    }
}

/// Where a component sits in the circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Inserted directly in the signal path.
    Series,
    /// From a signal node to ground.
    Shunt,
    /// From a signal junction to an amplifier output (Sallen-Key only).
    Feedback,
    /// The amplifying element.
    Active,
}

/// One component of a synthesized filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Unique id within the diagram (e.g. `"L1"`, `"S2_C1"`).
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    /// Value in SI base units; ignored for op-amps.
    #[serde(default)]
    pub value: f64,
    #[serde(alias = "position")]
    pub role: Role,
}

impl Component {
    pub fn new(id: impl Into<String>, kind: ComponentKind, value: f64, role: Role) -> Self {
        Self {
            id: id.into(),
            kind,
            value,
            role,
        }
    }
}

/// Circuit topology; selects the layout strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topology {
    #[serde(rename = "ladder-t")]
    LadderT,
    #[serde(rename = "ladder-pi")]
    LadderPi,
    #[serde(rename = "lattice")]
    Lattice,
    #[serde(rename = "sallen-key")]
    SallenKey,
}

impl Topology {
    pub const ALL: [Topology; 4] = [
        Topology::LadderT,
        Topology::LadderPi,
        Topology::Lattice,
        Topology::SallenKey,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Topology::LadderT => "ladder-t",
            Topology::LadderPi => "ladder-pi",
            Topology::Lattice => "lattice",
            Topology::SallenKey => "sallen-key",
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Topology {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topology::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown topology '{s}' (expected ladder-t, ladder-pi, lattice or sallen-key)"))
    }
}

/// Source and load terminations in ohms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Impedances {
    pub source: Option<f64>,
    pub load: Option<f64>,
}

impl Impedances {
    pub fn new(source: f64, load: f64) -> Self {
        Self {
            source: Some(source),
            load: Some(load),
        }
    }
}
