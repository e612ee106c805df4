//! Component symbol generators.
//!
//! Each two-terminal component is drawn between two terminal points as
//! lead-in wire, decorative body, lead-out wire. The body shape encodes the
//! component: zigzag for resistors, coil arcs for inductors, parallel plates
//! for capacitors. Bodies are computed in a local frame (unit direction plus
//! its perpendicular), so the same code draws horizontal, vertical and
//! diagonal symbols.
//!
//! The op-amp does not follow its terminals: it has a fixed local frame
//! anchored at its non-inverting input.

use crate::config::GlyphStyle;
use crate::model::ComponentKind;
use crate::scene::COINCIDENT;
use crate::types::*;
use std::f32::consts::PI;

/// How a two-terminal glyph is mounted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mount {
    /// Fixed-width slot running right from `origin`; the body keeps
    /// [`GlyphStyle::body_length`] and leads pad the rest.
    Horizontal { origin: Point, slot: f32 },
    /// Fixed-width slot running down from `origin`.
    Vertical { origin: Point, slot: f32 },
    /// Arbitrary segment; the body takes
    /// [`GlyphStyle::direction_fraction`] of its length.
    Segment { from: Point, to: Point },
}

/// A drawn two-terminal glyph and the terminals it touches.
#[derive(Debug, Clone)]
pub struct Glyph {
    pub primitives: Vec<Primitive>,
    pub start: Point,
    pub end: Point,
}

/// Local drawing frame of a two-terminal glyph.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    /// Unit vector from the first to the second terminal.
    pub dir: Point,
    /// Unit perpendicular; decorations are offset along it.
    pub normal: Point,
    pub body_start: Point,
    pub body_end: Point,
    pub body: f32,
}

impl Frame {
    /// Returns `None` for a zero-length segment.
    fn new(a: Point, b: Point, body: f32) -> Option<Self> {
        let len = a.distance(b);
        if len < COINCIDENT {
            return None;
        }
        let dir = unit_direction(a, b);
        let body = body.clamp(0.0, len);
        let body_start = a + dir * ((len - body) / 2.0);
        Some(Self {
            dir,
            normal: dir.perpendicular(),
            body_start,
            body_end: body_start + dir * body,
            body,
        })
    }

    /// Point `along` units from the body start, `across` units off-axis.
    fn at(&self, along: f32, across: f32) -> Point {
        self.body_start + self.dir * along + self.normal * across
    }
}

/// Unit vector from `a` to `b`, or +x when the points coincide.
pub fn unit_direction(a: Point, b: Point) -> Point {
    let d = b - a;
    let len = d.length();
    if len < COINCIDENT || !len.is_finite() {
        Point::new(1.0, 0.0)
    } else {
        d * (1.0 / len)
    }
}

type BodyFn = fn(&Frame, &GlyphStyle) -> Vec<Primitive>;

/// Body renderer per component kind.
const BODIES: [(ComponentKind, BodyFn); 4] = [
    (ComponentKind::Resistor, resistor_body),
    (ComponentKind::Inductor, inductor_body),
    (ComponentKind::Capacitor, capacitor_body),
    (ComponentKind::Opamp, box_body),
];

fn body_renderer(kind: ComponentKind) -> BodyFn {
    BODIES
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, f)| *f)
        .unwrap_or(box_body)
}

/// Draw a two-terminal component.
pub fn glyph(kind: ComponentKind, mount: Mount, style: &GlyphStyle) -> Glyph {
    let (start, end, body) = match mount {
        Mount::Horizontal { origin, slot } => {
            (origin, origin + Point::new(slot, 0.0), style.body_length)
        }
        Mount::Vertical { origin, slot } => {
            (origin, origin + Point::new(0.0, slot), style.body_length)
        }
        Mount::Segment { from, to } => (from, to, from.distance(to) * style.direction_fraction),
    };

    let primitives = match Frame::new(start, end, body) {
        Some(frame) => {
            let mut out = Vec::new();
            lead(&mut out, start, frame.body_start);
            out.extend(body_renderer(kind)(&frame, style));
            lead(&mut out, frame.body_end, end);
            out
        }
        // Zero-length segment: no decoration, just the degenerate lead.
        None => vec![Primitive::Line {
            from: start,
            to: end,
        }],
    };

    Glyph {
        primitives,
        start,
        end,
    }
}

fn lead(out: &mut Vec<Primitive>, from: Point, to: Point) {
    if from.distance(to) > COINCIDENT {
        out.push(Primitive::Line { from, to });
    }
}

// ---------------------------------------------------------------------------
// Two-terminal bodies
// ---------------------------------------------------------------------------

/// American-style zigzag resistor.
fn resistor_body(frame: &Frame, style: &GlyphStyle) -> Vec<Primitive> {
    let teeth = style.zigzag_teeth.max(1);
    let mut points = Vec::with_capacity(teeth + 2);
    points.push(frame.body_start);
    for i in 0..teeth {
        let t = (i as f32 + 0.5) / teeth as f32;
        let side = if i % 2 == 0 { 1.0 } else { -1.0 };
        points.push(frame.at(frame.body * t, style.zigzag_amplitude * side));
    }
    points.push(frame.body_end);
    vec![Primitive::Polyline { points }]
}

/// Inductor: series of half-circle bumps on the normal side.
fn inductor_body(frame: &Frame, style: &GlyphStyle) -> Vec<Primitive> {
    let loops = style.coil_loops.max(1);
    let r = frame.body / (2.0 * loops as f32);
    // Start each bump opposite the travel direction and sweep half a turn;
    // the midpoint of the sweep lands on `frame.normal`.
    let a0 = (-frame.dir.y).atan2(-frame.dir.x);

    let mut commands = vec![PathCmd::MoveTo(frame.body_start.x, frame.body_start.y)];
    for i in 0..loops {
        let c = frame.at(r * (2 * i + 1) as f32, 0.0);
        commands.push(PathCmd::ArcTo(c.x, c.y, r, a0, a0 + PI));
    }
    vec![Primitive::Path { commands }]
}

/// Non-polarized capacitor: two parallel plates.
fn capacitor_body(frame: &Frame, style: &GlyphStyle) -> Vec<Primitive> {
    let gap = style.plate_gap.min(frame.body);
    let h = style.plate_half_length;
    let p1 = (frame.body - gap) / 2.0;
    let p2 = p1 + gap;

    let mut out = Vec::with_capacity(4);
    lead(&mut out, frame.body_start, frame.at(p1, 0.0));
    out.push(Primitive::Line {
        from: frame.at(p1, -h),
        to: frame.at(p1, h),
    });
    out.push(Primitive::Line {
        from: frame.at(p2, -h),
        to: frame.at(p2, h),
    });
    lead(&mut out, frame.at(p2, 0.0), frame.body_end);
    out
}

/// Generic rectangular body for kinds without a two-terminal symbol.
fn box_body(frame: &Frame, style: &GlyphStyle) -> Vec<Primitive> {
    let h = style.box_half_height;
    let corner = frame.at(0.0, -h);
    vec![Primitive::Polyline {
        points: vec![
            corner,
            frame.at(frame.body, -h),
            frame.at(frame.body, h),
            frame.at(0.0, h),
            corner,
        ],
    }]
}

// ---------------------------------------------------------------------------
// Fixed-frame symbols
// ---------------------------------------------------------------------------

/// A drawn op-amp and its three terminals.
#[derive(Debug, Clone)]
pub struct OpAmpGlyph {
    pub primitives: Vec<Primitive>,
    pub non_inverting: Point,
    pub inverting: Point,
    pub output: Point,
}

/// Op-amp triangle with `+` on top, `−` below, output at the apex.
///
/// The frame is anchored at the non-inverting input terminal and never
/// scaled or mirrored.
pub fn opamp(non_inverting: Point, style: &GlyphStyle) -> OpAmpGlyph {
    let h = style.opamp_height;
    let flat_x = non_inverting.x + style.opamp_lead;
    let center_y = non_inverting.y + h / 4.0;
    let apex = Point::new(flat_x + style.opamp_width, center_y);
    let inverting = Point::new(non_inverting.x, non_inverting.y + h / 2.0);
    let output = Point::new(apex.x + style.opamp_lead, center_y);

    let mark = h / 14.0;
    let mark_x = flat_x + 2.0 * mark;

    let primitives = vec![
        // Triangle body
        Primitive::Path {
            commands: vec![
                PathCmd::MoveTo(flat_x, center_y - h / 2.0),
                PathCmd::LineTo(flat_x, center_y + h / 2.0),
                PathCmd::LineTo(apex.x, apex.y),
                PathCmd::Close,
            ],
        },
        // Input and output stubs
        Primitive::Line {
            from: non_inverting,
            to: Point::new(flat_x, non_inverting.y),
        },
        Primitive::Line {
            from: inverting,
            to: Point::new(flat_x, inverting.y),
        },
        Primitive::Line {
            from: apex,
            to: output,
        },
        // Non-inverting mark (+)
        Primitive::Line {
            from: Point::new(mark_x - mark, non_inverting.y),
            to: Point::new(mark_x + mark, non_inverting.y),
        },
        Primitive::Line {
            from: Point::new(mark_x, non_inverting.y - mark),
            to: Point::new(mark_x, non_inverting.y + mark),
        },
        // Inverting mark (−)
        Primitive::Line {
            from: Point::new(mark_x - mark, inverting.y),
            to: Point::new(mark_x + mark, inverting.y),
        },
    ];

    OpAmpGlyph {
        primitives,
        non_inverting,
        inverting,
        output,
    }
}

/// Ground symbol: three shrinking bars hanging below `at`.
pub fn ground(at: Point, style: &GlyphStyle) -> Vec<Primitive> {
    [1.0, 0.6, 0.2]
        .iter()
        .enumerate()
        .map(|(i, scale)| {
            let half = style.ground_width * scale / 2.0;
            let y = at.y + style.ground_spacing * i as f32;
            Primitive::Line {
                from: Point::new(at.x - half, y),
                to: Point::new(at.x + half, y),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> GlyphStyle {
        GlyphStyle::default()
    }

    fn all_points(glyph: &Glyph) -> Vec<Point> {
        glyph.primitives.iter().flat_map(Primitive::points).collect()
    }

    fn touches(glyph: &Glyph, p: Point) -> bool {
        all_points(glyph).iter().any(|q| q.distance(p) < 1e-3)
    }

    #[test]
    fn every_kind_touches_both_terminals() {
        let mounts = [
            Mount::Horizontal { origin: Point::new(10.0, 50.0), slot: 60.0 },
            Mount::Vertical { origin: Point::new(10.0, 50.0), slot: 100.0 },
            Mount::Segment { from: Point::new(0.0, 0.0), to: Point::new(80.0, 70.0) },
        ];
        for kind in [
            ComponentKind::Resistor,
            ComponentKind::Inductor,
            ComponentKind::Capacitor,
            ComponentKind::Opamp,
        ] {
            for mount in mounts {
                let g = glyph(kind, mount, &style());
                assert!(touches(&g, g.start), "{kind:?} {mount:?} misses start");
                assert!(touches(&g, g.end), "{kind:?} {mount:?} misses end");
            }
        }
    }

    #[test]
    fn fixed_width_body_ignores_slot_size() {
        let short = glyph(
            ComponentKind::Resistor,
            Mount::Horizontal { origin: Point::new(0.0, 0.0), slot: 60.0 },
            &style(),
        );
        let long = glyph(
            ComponentKind::Resistor,
            Mount::Horizontal { origin: Point::new(0.0, 0.0), slot: 200.0 },
            &style(),
        );
        let zigzag_span = |g: &Glyph| match g.primitives.iter().find(|p| matches!(p, Primitive::Polyline { .. })) {
            Some(Primitive::Polyline { points }) => points.last().unwrap().x - points[0].x,
            _ => panic!("resistor has no zigzag"),
        };
        assert!((zigzag_span(&short) - 40.0).abs() < 1e-3);
        assert!((zigzag_span(&long) - 40.0).abs() < 1e-3);
    }

    #[test]
    fn direction_body_scales_with_segment() {
        let g = glyph(
            ComponentKind::Resistor,
            Mount::Segment { from: Point::new(0.0, 0.0), to: Point::new(100.0, 0.0) },
            &style(),
        );
        match &g.primitives[0] {
            Primitive::Line { from, to } => {
                assert_eq!(*from, Point::new(0.0, 0.0));
                assert!((to.x - 20.0).abs() < 1e-3, "lead-in should cover 20%");
            }
            other => panic!("expected lead-in line, got {other:?}"),
        }
    }

    #[test]
    fn vertical_capacitor_plates_are_horizontal() {
        let g = glyph(
            ComponentKind::Capacitor,
            Mount::Vertical { origin: Point::new(50.0, 0.0), slot: 100.0 },
            &style(),
        );
        let plates: Vec<_> = g
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Line { from, to } if (from.y - to.y).abs() < 1e-3 => Some((*from, *to)),
                _ => None,
            })
            .collect();
        assert_eq!(plates.len(), 2);
        for (from, to) in plates {
            assert!((from.distance(to) - 24.0).abs() < 1e-3);
        }
    }

    #[test]
    fn horizontal_coil_bumps_upward() {
        let g = glyph(
            ComponentKind::Inductor,
            Mount::Horizontal { origin: Point::new(0.0, 100.0), slot: 60.0 },
            &style(),
        );
        let path = g
            .primitives
            .iter()
            .find_map(|p| match p {
                Primitive::Path { commands } => Some(commands.clone()),
                _ => None,
            })
            .expect("inductor path");
        for cmd in path {
            if let PathCmd::ArcTo(cx, cy, r, a0, a1) = cmd {
                let mid = (a0 + a1) / 2.0;
                let top = Point::new(cx + r * mid.cos(), cy + r * mid.sin());
                assert!(top.y < 100.0, "bump should sit above the wire");
            }
        }
    }

    #[test]
    fn zero_length_segment_is_finite() {
        let p = Point::new(30.0, 30.0);
        for kind in [ComponentKind::Resistor, ComponentKind::Inductor, ComponentKind::Capacitor] {
            let g = glyph(kind, Mount::Segment { from: p, to: p }, &style());
            assert!(all_points(&g).iter().all(|q| q.is_finite()));
            assert_eq!(g.primitives.len(), 1);
        }
        assert_eq!(unit_direction(p, p), Point::new(1.0, 0.0));
    }

    #[test]
    fn opamp_terminals_are_fixed() {
        let a = opamp(Point::new(0.0, 0.0), &style());
        let b = opamp(Point::new(100.0, 40.0), &style());
        let offset = Point::new(100.0, 40.0);
        assert_eq!(b.inverting, a.inverting + offset);
        assert_eq!(b.output, a.output + offset);
        assert!(a.inverting.y > a.non_inverting.y);
        assert!(a.output.x > a.non_inverting.x);
    }

    #[test]
    fn ground_bars_shrink() {
        let bars = ground(Point::new(0.0, 0.0), &style());
        let widths: Vec<f32> = bars
            .iter()
            .map(|p| match p {
                Primitive::Line { from, to } => from.distance(*to),
                _ => 0.0,
            })
            .collect();
        assert_eq!(widths.len(), 3);
        assert!(widths[0] > widths[1] && widths[1] > widths[2]);
    }
}
