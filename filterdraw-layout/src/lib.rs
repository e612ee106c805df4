//! Schematic layout engine for synthesized analog filters.
//!
//! Turns an ordered component list plus a topology into a fully
//! coordinate-resolved [`Scene`] suitable for:
//!
//! 1. **SVG output** via [`svg::to_svg`]
//! 2. **Front ends** that draw the JSON scene themselves ([`to_json`])
//!
//! # Pipeline
//!
//! ```text
//! Design (components, topology, impedances)
//!   → strategy selection   (ladder | lattice | sallen-key, by topology)
//!   → placement            (cursor sweep / bridge sections / stage pre-pass)
//!   → glyphs               (resistor, inductor, capacitor, op-amp, ground)
//!   → Scene                (JSON-serializable primitives)
//! ```
//!
//! The transformation is pure: identical inputs give identical scenes, and
//! nothing here performs I/O.

pub mod config;
pub mod design;
pub mod format;
pub mod glyphs;
pub mod ladder;
pub mod lattice;
pub mod model;
pub mod sallen_key;
pub mod scene;
pub mod stages;
pub mod svg;
pub mod types;

pub use config::LayoutConfig;
pub use design::{Design, DesignError};
pub use format::{SiFormatter, ValueFormatter};
pub use model::{Component, ComponentKind, Impedances, Role, Topology};
pub use types::{Point, Primitive, Scene};

/// Message shown when a design has nothing to draw.
pub const EMPTY_MESSAGE: &str = "No circuit to display";

/// Lay out `components` with the strategy selected by `topology`.
///
/// Impedances are only drawn by the passive (ladder and lattice) layouts.
pub fn render(
    components: &[Component],
    topology: Topology,
    impedances: Impedances,
    cfg: &LayoutConfig,
    formatter: &dyn ValueFormatter,
) -> Scene {
    match topology {
        Topology::LadderT | Topology::LadderPi => ladder::layout(components, impedances, cfg, formatter),
        Topology::Lattice => lattice::layout(components, impedances, cfg, formatter),
        Topology::SallenKey => sallen_key::layout(components, cfg, formatter),
    }
}

/// Render a parsed design with SI labels.
///
/// Empty component lists and missing topologies yield the placeholder scene.
pub fn render_design(design: &Design, cfg: &LayoutConfig) -> Scene {
    match design.topology {
        Some(topology) if !design.components.is_empty() => render(
            &design.components,
            topology,
            design.impedances(),
            cfg,
            &SiFormatter,
        ),
        _ => {
            tracing::debug!(
                components = design.components.len(),
                topology = ?design.topology,
                "nothing to lay out"
            );
            scene::placeholder(cfg, EMPTY_MESSAGE)
        }
    }
}

/// Serialize a scene to pretty-printed JSON.
pub fn to_json(scene: &Scene) -> String {
    serde_json::to_string_pretty(scene).expect("scene serialization should not fail")
}
