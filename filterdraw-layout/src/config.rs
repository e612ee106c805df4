//! Pixel constants for every layout strategy.
//!
//! All values are in layout units (1 unit = 1 px at 100 % zoom). Every
//! structure is `#[serde(default)]`, so a style file only needs to name the
//! values it changes:
//!
//! ```yaml
//! glyph:
//!   body_length: 36.0
//! lattice:
//!   rail_separation: 140.0
//! ```

use serde::{Deserialize, Serialize};

/// Root configuration passed into each layout strategy.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub glyph: GlyphStyle,
    pub label: LabelStyle,
    pub ladder: LadderConfig,
    pub lattice: LatticeConfig,
    pub sallen_key: SallenKeyConfig,
}

/// Symbol proportions shared by all layouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphStyle {
    /// Decorative length of a symbol in the fixed-width modes.
    pub body_length: f32,
    /// Fraction of the segment used by the symbol in direction mode.
    pub direction_fraction: f32,
    /// Zigzag half-height (resistor).
    pub zigzag_amplitude: f32,
    /// Number of zigzag vertices (resistor).
    pub zigzag_teeth: usize,
    /// Number of coil bumps (inductor).
    pub coil_loops: usize,
    /// Gap between capacitor plates.
    pub plate_gap: f32,
    /// Half-length of a capacitor plate.
    pub plate_half_length: f32,
    /// Half-height of the generic box symbol.
    pub box_half_height: f32,
    /// Op-amp triangle width (flat side to apex).
    pub opamp_width: f32,
    /// Op-amp triangle height (flat side).
    pub opamp_height: f32,
    /// Input/output stub length outside the triangle.
    pub opamp_lead: f32,
    /// Widest ground bar.
    pub ground_width: f32,
    /// Vertical spacing of ground bars.
    pub ground_spacing: f32,
    pub dot_radius: f32,
    pub port_radius: f32,
}

impl Default for GlyphStyle {
    fn default() -> Self {
        Self {
            body_length: 40.0,
            direction_fraction: 0.6,
            zigzag_amplitude: 6.0,
            zigzag_teeth: 6,
            coil_loops: 4,
            plate_gap: 8.0,
            plate_half_length: 12.0,
            box_half_height: 8.0,
            opamp_width: 48.0,
            opamp_height: 56.0,
            opamp_lead: 12.0,
            ground_width: 20.0,
            ground_spacing: 4.0,
            dot_radius: 3.0,
            port_radius: 4.0,
        }
    }
}

/// Label typography.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelStyle {
    pub font_size: f32,
    /// Baseline distance between the two lines of a label.
    pub line_height: f32,
    /// Clearance between a glyph and its label.
    pub offset: f32,
    pub header_size: f32,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            line_height: 14.0,
            offset: 14.0,
            header_size: 14.0,
        }
    }
}

/// Ladder (T / Pi) layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LadderConfig {
    /// Space reserved on each side for the source/load markers.
    pub side_margin: f32,
    pub top_margin: f32,
    pub bottom_margin: f32,
    /// Distance from the main signal line down to the ground rail.
    pub rail_drop: f32,
    /// Horizontal slot of a series component.
    pub series_slot: f32,
    /// Gap after each series slot.
    pub series_gap: f32,
    /// Width of a shunt section.
    pub shunt_section: f32,
}

impl Default for LadderConfig {
    fn default() -> Self {
        Self {
            side_margin: 110.0,
            top_margin: 60.0,
            bottom_margin: 40.0,
            rail_drop: 100.0,
            series_slot: 60.0,
            series_gap: 20.0,
            shunt_section: 80.0,
        }
    }
}

/// Lattice (bridge) layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeConfig {
    pub side_margin: f32,
    pub top_margin: f32,
    pub bottom_margin: f32,
    pub section_width: f32,
    /// Vertical distance between the top and bottom rails.
    pub rail_separation: f32,
    /// Horizontal gap between chained sections.
    pub section_gap: f32,
    /// Wire length from a port terminal to the first/last corner.
    pub port_lead: f32,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            side_margin: 90.0,
            top_margin: 60.0,
            bottom_margin: 60.0,
            section_width: 160.0,
            rail_separation: 140.0,
            section_gap: 80.0,
            port_lead: 30.0,
        }
    }
}

/// Sallen-Key cascade layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SallenKeyConfig {
    pub side_margin: f32,
    /// Distance from the canvas top to the signal line.
    pub signal_y: f32,
    pub bottom_margin: f32,
    /// Input wire from the stage entry to the first series component.
    pub input_lead: f32,
    pub series_slot: f32,
    /// Wire from junction B to the op-amp's non-inverting input.
    pub opamp_gap: f32,
    /// Distance from the op-amp output to the output branch point.
    pub branch_offset: f32,
    /// Wire from the branch point to the stage exit.
    pub output_lead: f32,
    /// Height of the feedback run above the signal line.
    pub feedback_clearance: f32,
    /// Depth of the unity-gain loop below the signal line.
    pub loop_drop: f32,
    /// Distance from the inverting input to the loop's vertical run.
    pub loop_inset: f32,
    /// Distance from the signal line down to the ground rail.
    pub rail_drop: f32,
    /// Connector between consecutive stages.
    pub stage_connector: f32,
    /// Height of the stage header above the feedback run.
    pub header_clearance: f32,
}

impl Default for SallenKeyConfig {
    fn default() -> Self {
        Self {
            side_margin: 60.0,
            signal_y: 190.0,
            bottom_margin: 40.0,
            input_lead: 30.0,
            series_slot: 70.0,
            opamp_gap: 30.0,
            branch_offset: 24.0,
            output_lead: 24.0,
            feedback_clearance: 80.0,
            loop_drop: 60.0,
            loop_inset: 14.0,
            rail_drop: 120.0,
            stage_connector: 30.0,
            header_clearance: 60.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: LayoutConfig =
            serde_json::from_str(r#"{"lattice":{"rail_separation":200.0}}"#).unwrap();
        assert_eq!(cfg.lattice.rail_separation, 200.0);
        assert_eq!(cfg.lattice.section_width, LatticeConfig::default().section_width);
        assert_eq!(cfg.glyph, GlyphStyle::default());
    }

    #[test]
    fn loop_stays_between_junction_and_opamp() {
        let sk = SallenKeyConfig::default();
        let glyph = GlyphStyle::default();
        // The unity-gain loop's vertical run must sit right of junction B.
        assert!(sk.loop_inset < sk.opamp_gap + glyph.opamp_lead);
        // The loop must pass above the ground rail.
        assert!(sk.loop_drop < sk.rail_drop);
    }
}
