//! Lattice (bridge) layout.
//!
//! Components are consumed in pairs: the first of each pair is drawn on both
//! rails, the second on both diagonals. Each section is a four-node bridge
//! (TL, TR, BL, BR) and sections chain left to right.
//!
//! The diagonals cross at the section center. To keep the crossing readable
//! each diagonal is split there: TL→BR carries its symbol on the TL half and
//! BL→TR on the TR half, with the other halves left as plain wire.

use crate::config::LayoutConfig;
use crate::format::ValueFormatter;
use crate::glyphs::{self, Mount};
use crate::ladder::impedance_label;
use crate::model::{Component, Impedances};
use crate::scene::SceneBuilder;
use crate::types::*;

/// One bridge section with its corner nodes.
#[derive(Debug, Clone)]
pub struct Section<'a> {
    pub rail: &'a Component,
    pub diagonal: &'a Component,
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_left: Point,
    pub bottom_right: Point,
}

impl Section<'_> {
    /// Where the two diagonals cross.
    pub fn center(&self) -> Point {
        self.top_left.midpoint(self.bottom_right)
    }
}

/// Pair up components into sections; a trailing odd component is dropped.
pub fn sections<'a>(components: &'a [Component], cfg: &LayoutConfig) -> Vec<Section<'a>> {
    let lc = &cfg.lattice;
    let top = lc.top_margin;
    let bottom = top + lc.rail_separation;

    if components.len() % 2 == 1 {
        if let Some(extra) = components.last() {
            tracing::warn!(id = %extra.id, "unpaired lattice component dropped");
        }
    }

    components
        .chunks_exact(2)
        .enumerate()
        .map(|(i, pair)| {
            let x0 = lc.side_margin + i as f32 * (lc.section_width + lc.section_gap);
            let x1 = x0 + lc.section_width;
            Section {
                rail: &pair[0],
                diagonal: &pair[1],
                top_left: Point::new(x0, top),
                top_right: Point::new(x1, top),
                bottom_left: Point::new(x0, bottom),
                bottom_right: Point::new(x1, bottom),
            }
        })
        .collect()
}

/// Lay out a lattice network.
pub fn layout(
    components: &[Component],
    impedances: Impedances,
    cfg: &LayoutConfig,
    formatter: &dyn ValueFormatter,
) -> Scene {
    let lc = &cfg.lattice;
    let height = lc.top_margin + lc.rail_separation + lc.bottom_margin;
    let sections = sections(components, cfg);

    let (Some(first), Some(last)) = (sections.first(), sections.last()) else {
        tracing::debug!(components = components.len(), "lattice layout has no sections");
        return SceneBuilder::new().finish(2.0 * lc.side_margin, height);
    };

    let mut scene = SceneBuilder::new();

    // Source port: two terminals with polarity marks.
    let in_top = first.top_left - Point::new(lc.port_lead, 0.0);
    let in_bottom = first.bottom_left - Point::new(lc.port_lead, 0.0);
    scene.group("source", |g| {
        port_pair(g, cfg, in_top, in_bottom);
        g.wire(in_top, first.top_left);
        g.wire(in_bottom, first.bottom_left);
        let value = impedance_label(impedances.source, formatter);
        let mid_y = in_top.midpoint(in_bottom).y;
        g.label(
            cfg,
            Point::new(in_top.x - cfg.label.offset, mid_y - cfg.label.line_height / 2.0),
            "Rs",
            &value,
            TextAnchor::End,
        );
    });

    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            let prev = &sections[i - 1];
            scene.wire(prev.top_right, section.top_left);
            scene.wire(prev.bottom_right, section.bottom_left);
        }
        scene.group(format!("section-{}", i + 1), |g| {
            draw_section(g, section, cfg, formatter)
        });
    }

    let out_top = last.top_right + Point::new(lc.port_lead, 0.0);
    let out_bottom = last.bottom_right + Point::new(lc.port_lead, 0.0);
    scene.group("load", |g| {
        g.wire(last.top_right, out_top);
        g.wire(last.bottom_right, out_bottom);
        port_pair(g, cfg, out_top, out_bottom);
        let value = impedance_label(impedances.load, formatter);
        let mid_y = out_top.midpoint(out_bottom).y;
        g.label(
            cfg,
            Point::new(out_top.x + cfg.label.offset, mid_y - cfg.label.line_height / 2.0),
            "Rl",
            &value,
            TextAnchor::Start,
        );
    });

    let width = last.top_right.x + lc.side_margin;
    tracing::debug!(
        components = components.len(),
        sections = sections.len(),
        width,
        height,
        "lattice layout"
    );
    scene.finish(width, height)
}

fn port_pair(g: &mut SceneBuilder, cfg: &LayoutConfig, top: Point, bottom: Point) {
    let r = cfg.glyph.port_radius;
    let size = cfg.label.font_size;
    g.port(top, r);
    g.port(bottom, r);
    g.text(top - Point::new(0.0, r + size / 2.0), "+", TextAnchor::Middle, size);
    g.text(bottom + Point::new(0.0, r + size), "−", TextAnchor::Middle, size);
}

fn draw_section(
    g: &mut SceneBuilder,
    section: &Section<'_>,
    cfg: &LayoutConfig,
    formatter: &dyn ValueFormatter,
) {
    let style = &cfg.glyph;
    let label = &cfg.label;
    let center = section.center();

    // Rails
    let rail = section.rail;
    let rail_value = formatter.format(rail.value, rail.kind);
    let rail_lift = label.offset + label.line_height + style.plate_half_length / 2.0;
    for (from, to, label_y) in [
        (section.top_left, section.top_right, section.top_left.y - rail_lift),
        (
            section.bottom_left,
            section.bottom_right,
            section.bottom_left.y + label.offset + label.font_size + style.plate_half_length / 2.0,
        ),
    ] {
        let glyph = glyphs::glyph(rail.kind, Mount::Segment { from, to }, style);
        g.extend(glyph.primitives);
        g.label(
            cfg,
            Point::new(from.midpoint(to).x, label_y),
            &rail.id,
            &rail_value,
            TextAnchor::Middle,
        );
    }

    // Diagonals: symbol on the TL half of TL→BR and on the TR half of BL→TR.
    let diagonal = section.diagonal;
    let diag_value = formatter.format(diagonal.value, diagonal.kind);
    let label_dx = label.offset + style.plate_half_length / 2.0;

    let falling = glyphs::glyph(
        diagonal.kind,
        Mount::Segment { from: section.top_left, to: center },
        style,
    );
    g.extend(falling.primitives);
    g.wire(center, section.bottom_right);
    let falling_mid = section.top_left.midpoint(center);
    g.label(
        cfg,
        Point::new(falling_mid.x - label_dx, falling_mid.y - label.line_height / 2.0),
        &diagonal.id,
        &diag_value,
        TextAnchor::End,
    );

    g.wire(section.bottom_left, center);
    let rising = glyphs::glyph(
        diagonal.kind,
        Mount::Segment { from: center, to: section.top_right },
        style,
    );
    g.extend(rising.primitives);
    let rising_mid = center.midpoint(section.top_right);
    g.label(
        cfg,
        Point::new(rising_mid.x + label_dx, rising_mid.y - label.line_height / 2.0),
        &diagonal.id,
        &diag_value,
        TextAnchor::Start,
    );

    for corner in [
        section.top_left,
        section.top_right,
        section.bottom_left,
        section.bottom_right,
    ] {
        g.dot(corner, style.dot_radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::SiFormatter;
    use crate::model::{ComponentKind, Role};

    fn pair(n: usize) -> Vec<Component> {
        (1..=n)
            .flat_map(|i| {
                [
                    Component::new(format!("L{i}"), ComponentKind::Inductor, 0.00796, Role::Series),
                    Component::new(format!("C{i}"), ComponentKind::Capacitor, 3.18e-7, Role::Shunt),
                ]
            })
            .collect()
    }

    #[test]
    fn section_count_is_half_rounded_down() {
        let cfg = LayoutConfig::default();
        let mut comps = pair(2);
        comps.push(Component::new("L3", ComponentKind::Inductor, 1e-3, Role::Series));
        assert_eq!(sections(&comps, &cfg).len(), 2);
        assert_eq!(sections(&comps[..1], &cfg).len(), 0);
    }

    #[test]
    fn sections_chain_left_to_right() {
        let cfg = LayoutConfig::default();
        let comps = pair(3);
        let s = sections(&comps, &cfg);
        for w in s.windows(2) {
            assert_eq!(
                w[1].top_left.x - w[0].top_right.x,
                cfg.lattice.section_gap
            );
        }
        assert_eq!(s[0].bottom_left.y - s[0].top_left.y, cfg.lattice.rail_separation);
    }

    #[test]
    fn diagonal_labels_sit_away_from_crossing() {
        let cfg = LayoutConfig::default();
        let comps = pair(1);
        let scene = layout(&comps, Impedances::default(), &cfg, &SiFormatter);
        let center = sections(&comps, &cfg)[0].center();

        let c1_x: Vec<f32> = scene
            .walk()
            .filter_map(|p| match p {
                Primitive::Text { at, content, .. } if content == "C1" => Some(at.x),
                _ => None,
            })
            .collect();
        assert_eq!(c1_x.len(), 2);
        assert!(c1_x[0] < center.x - cfg.lattice.section_width / 4.0);
        assert!(c1_x[1] > center.x + cfg.lattice.section_width / 4.0);
    }

    #[test]
    fn crossing_has_no_junction_dot() {
        let cfg = LayoutConfig::default();
        let comps = pair(1);
        let scene = layout(&comps, Impedances::default(), &cfg, &SiFormatter);
        let center = sections(&comps, &cfg)[0].center();
        let dots_at_center = scene
            .walk()
            .filter(|p| matches!(p, Primitive::Circle { center: c, filled: true, .. } if c.distance(center) < 1e-3))
            .count();
        assert_eq!(dots_at_center, 0);
    }

    #[test]
    fn empty_lattice_is_a_blank_canvas() {
        let cfg = LayoutConfig::default();
        let comps = pair(1);
        let scene = layout(&comps[..1], Impedances::default(), &cfg, &SiFormatter);
        assert!(scene.primitives.is_empty());
        assert!(scene.width > 0.0 && scene.height > 0.0);
    }

    #[test]
    fn only_outer_sections_expose_ports() {
        let cfg = LayoutConfig::default();
        let scene = layout(&pair(3), Impedances::new(50.0, 50.0), &cfg, &SiFormatter);
        let ports = scene
            .walk()
            .filter(|p| matches!(p, Primitive::Circle { filled: false, .. }))
            .count();
        assert_eq!(ports, 4);
        assert_eq!(scene.count_text("+"), 2);
    }
}
