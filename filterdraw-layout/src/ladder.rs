//! Ladder (T / Pi) layout.
//!
//! One sweep over the component list with a horizontal cursor:
//! - series components sit on the main signal line in fixed slots
//! - shunt components hang from a tap on the main line down to the ground rail
//! - the source marker sits in the left margin, the load marker in the right
//!
//! Placement ([`plan`]) and drawing ([`draw`]) are separate passes so the
//! geometry can be checked without walking primitives.

use crate::config::LayoutConfig;
use crate::format::ValueFormatter;
use crate::glyphs::{self, Mount};
use crate::model::{Component, ComponentKind, Impedances, Role};
use crate::scene::SceneBuilder;
use crate::types::*;

/// Slot type a component occupies on the ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Series,
    Shunt,
}

/// A component with its resolved terminals.
#[derive(Debug, Clone)]
pub struct PlacedItem<'a> {
    pub component: &'a Component,
    pub slot: Slot,
    /// First terminal (left for series, tap for shunt).
    pub start: Point,
    /// Second terminal (right for series, ground rail for shunt).
    pub end: Point,
}

impl PlacedItem<'_> {
    /// Where the main line enters this item.
    fn entry(&self) -> Point {
        self.start
    }

    /// Where the main line leaves this item.
    fn exit(&self) -> Point {
        match self.slot {
            Slot::Series => self.end,
            Slot::Shunt => self.start,
        }
    }
}

/// Resolved ladder geometry.
#[derive(Debug, Clone)]
pub struct LadderPlan<'a> {
    pub main_y: f32,
    pub rail_y: f32,
    /// Open input terminal.
    pub input_port: Point,
    /// Source resistor terminals (port side, line side).
    pub source: (Point, Point),
    pub items: Vec<PlacedItem<'a>>,
    /// Load resistor terminals (tap, rail).
    pub load: (Point, Point),
    /// Open output terminal.
    pub output_port: Point,
    pub width: f32,
    pub height: f32,
}

/// Resolve every terminal position without drawing anything.
pub fn plan<'a>(components: &'a [Component], cfg: &LayoutConfig) -> LadderPlan<'a> {
    let lc = &cfg.ladder;
    let main_y = lc.top_margin;
    let rail_y = main_y + lc.rail_drop;

    let port_x = lc.side_margin - lc.series_slot - lc.series_gap;
    let input_port = Point::new(port_x, main_y);
    let source = (input_port, Point::new(port_x + lc.series_slot, main_y));

    let mut cursor = lc.side_margin;
    let mut items = Vec::with_capacity(components.len());

    for component in components {
        let item = match component.role {
            Role::Shunt => {
                let tap = Point::new(cursor + lc.shunt_section / 2.0, main_y);
                cursor += lc.shunt_section;
                PlacedItem {
                    component,
                    slot: Slot::Shunt,
                    start: tap,
                    end: Point::new(tap.x, rail_y),
                }
            }
            _ => {
                let start = Point::new(cursor, main_y);
                cursor += lc.series_slot + lc.series_gap;
                PlacedItem {
                    component,
                    slot: Slot::Series,
                    start,
                    end: Point::new(start.x + lc.series_slot, main_y),
                }
            }
        };
        tracing::trace!(id = %component.id, x = item.start.x, slot = ?item.slot, "ladder item");
        items.push(item);
    }

    let load_x = cursor + lc.series_gap;
    let load = (Point::new(load_x, main_y), Point::new(load_x, rail_y));
    let output_port = Point::new(load_x + lc.series_slot / 2.0, main_y);

    let ground_depth = 2.0 * cfg.glyph.ground_spacing;
    LadderPlan {
        main_y,
        rail_y,
        input_port,
        source,
        items,
        load,
        output_port,
        width: load_x + lc.side_margin,
        height: rail_y + ground_depth + lc.bottom_margin,
    }
}

/// Draw a resolved plan.
pub fn draw(
    plan: &LadderPlan<'_>,
    impedances: Impedances,
    cfg: &LayoutConfig,
    formatter: &dyn ValueFormatter,
) -> Scene {
    let style = &cfg.glyph;
    let lc = &cfg.ladder;
    let label_lift = cfg.label.offset + cfg.label.line_height;
    let side_label_dx = style.plate_half_length + cfg.label.offset / 2.0;

    let mut scene = SceneBuilder::new();

    // Source marker: input port + series source resistance.
    scene.group("source", |g| {
        g.port(plan.input_port, style.port_radius);
        let rs = glyphs::glyph(
            ComponentKind::Resistor,
            Mount::Horizontal { origin: plan.source.0, slot: lc.series_slot },
            style,
        );
        g.extend(rs.primitives);
        let value = impedance_label(impedances.source, formatter);
        g.label(
            cfg,
            Point::new(plan.source.0.midpoint(plan.source.1).x, plan.main_y - label_lift),
            "Rs",
            &value,
            TextAnchor::Middle,
        );
    });

    let mut previous_exit = plan.source.1;
    for item in &plan.items {
        scene.wire(previous_exit, item.entry());
        previous_exit = item.exit();

        let component = item.component;
        let value = formatter.format(component.value, component.kind);
        scene.group(component.id.clone(), |g| match item.slot {
            Slot::Series => {
                let glyph = glyphs::glyph(
                    component.kind,
                    Mount::Horizontal { origin: item.start, slot: lc.series_slot },
                    style,
                );
                g.extend(glyph.primitives);
                g.label(
                    cfg,
                    Point::new(item.start.midpoint(item.end).x, plan.main_y - label_lift),
                    &component.id,
                    &value,
                    TextAnchor::Middle,
                );
            }
            Slot::Shunt => {
                let glyph = glyphs::glyph(
                    component.kind,
                    Mount::Vertical { origin: item.start, slot: plan.rail_y - plan.main_y },
                    style,
                );
                g.extend(glyph.primitives);
                g.dot(item.start, style.dot_radius);
                g.extend(glyphs::ground(item.end, style));
                let mid_y = item.start.midpoint(item.end).y;
                g.label(
                    cfg,
                    Point::new(item.start.x + side_label_dx, mid_y - cfg.label.line_height / 2.0),
                    &component.id,
                    &value,
                    TextAnchor::Start,
                );
            }
        });
    }

    scene.wire(previous_exit, plan.load.0);

    // Load marker: shunt load resistance + output port.
    scene.group("load", |g| {
        let rl = glyphs::glyph(
            ComponentKind::Resistor,
            Mount::Vertical { origin: plan.load.0, slot: plan.rail_y - plan.main_y },
            style,
        );
        g.extend(rl.primitives);
        g.dot(plan.load.0, style.dot_radius);
        g.extend(glyphs::ground(plan.load.1, style));
        g.wire(plan.load.0, plan.output_port);
        g.port(plan.output_port, style.port_radius);
        let value = impedance_label(impedances.load, formatter);
        let mid_y = plan.load.0.midpoint(plan.load.1).y;
        g.label(
            cfg,
            Point::new(plan.load.0.x + side_label_dx, mid_y - cfg.label.line_height / 2.0),
            "Rl",
            &value,
            TextAnchor::Start,
        );
    });

    scene.finish(plan.width, plan.height)
}

/// Lay out a ladder network.
pub fn layout(
    components: &[Component],
    impedances: Impedances,
    cfg: &LayoutConfig,
    formatter: &dyn ValueFormatter,
) -> Scene {
    let plan = plan(components, cfg);
    tracing::debug!(
        components = components.len(),
        width = plan.width,
        height = plan.height,
        "ladder layout"
    );
    draw(&plan, impedances, cfg, formatter)
}

/// Second label line of a source/load marker; empty when no value is known.
pub(crate) fn impedance_label(ohms: Option<f64>, formatter: &dyn ValueFormatter) -> String {
    ohms.map(|z| formatter.format(z, ComponentKind::Resistor))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::SiFormatter;

    fn l(id: &str) -> Component {
        Component::new(id, ComponentKind::Inductor, 0.00796, Role::Series)
    }

    fn c(id: &str) -> Component {
        Component::new(id, ComponentKind::Capacitor, 3.18e-7, Role::Shunt)
    }

    #[test]
    fn series_share_main_line_and_shunts_share_rail() {
        let comps = vec![l("L1"), c("C1"), l("L2"), c("C2"), l("L3")];
        let cfg = LayoutConfig::default();
        let p = plan(&comps, &cfg);

        for item in &p.items {
            match item.slot {
                Slot::Series => {
                    assert_eq!(item.start.y, p.main_y);
                    assert_eq!(item.end.y, p.main_y);
                }
                Slot::Shunt => {
                    assert_eq!(item.start.y, p.main_y);
                    assert_eq!(item.end.y, p.rail_y);
                    assert_eq!(item.start.x, item.end.x);
                }
            }
        }
    }

    #[test]
    fn placement_follows_input_order() {
        let comps = vec![c("C1"), l("L1"), c("C2"), l("L2")];
        let p = plan(&comps, &LayoutConfig::default());
        let ids: Vec<_> = p.items.iter().map(|i| i.component.id.as_str()).collect();
        assert_eq!(ids, ["C1", "L1", "C2", "L2"]);
        for pair in p.items.windows(2) {
            assert!(pair[0].start.x < pair[1].start.x);
        }
        assert!(p.items.last().unwrap().start.x < p.load.0.x);
    }

    #[test]
    fn shunt_is_centered_in_its_section() {
        let cfg = LayoutConfig::default();
        let comps = vec![c("C1")];
        let p = plan(&comps, &cfg);
        assert_eq!(p.items[0].start.x, cfg.ladder.side_margin + cfg.ladder.shunt_section / 2.0);
    }

    #[test]
    fn width_grows_with_component_count() {
        let cfg = LayoutConfig::default();
        let short = plan(&[l("L1")], &cfg).width;
        let long = plan(&[l("L1"), c("C1"), l("L2")], &cfg).width;
        assert_eq!(long - short, cfg.ladder.shunt_section + cfg.ladder.series_slot + cfg.ladder.series_gap);
    }

    #[test]
    fn adjacent_series_items_are_wired() {
        let comps = vec![l("L1"), l("L2")];
        let cfg = LayoutConfig::default();
        let p = plan(&comps, &cfg);
        let scene = draw(&p, Impedances::default(), &cfg, &SiFormatter);
        let gap_wire = Primitive::Line { from: p.items[0].end, to: p.items[1].start };
        assert!(scene.primitives.contains(&gap_wire));
    }

    #[test]
    fn markers_default_to_symbolic_names() {
        let comps = vec![l("L1")];
        let scene = layout(&comps, Impedances::default(), &LayoutConfig::default(), &SiFormatter);
        assert_eq!(scene.count_text("Rs"), 1);
        assert_eq!(scene.count_text("Rl"), 1);
        assert!(!scene.texts().iter().any(|t| t.ends_with('Ω')));
    }

    #[test]
    fn shunt_group_has_dot_and_ground() {
        let comps = vec![c("C1")];
        let scene = layout(&comps, Impedances::new(50.0, 50.0), &LayoutConfig::default(), &SiFormatter);
        let Some(Primitive::Group { children, .. }) = scene.group("C1") else {
            panic!("C1 group missing");
        };
        assert!(children.iter().any(|p| matches!(p, Primitive::Circle { filled: true, .. })));
        assert!(children.len() >= 3 + 2);
    }
}
