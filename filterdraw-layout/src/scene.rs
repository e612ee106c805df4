//! Scene assembly.
//!
//! Every layout strategy emits through a [`SceneBuilder`] in one forward
//! pass and then fixes the canvas size with [`SceneBuilder::finish`].

use crate::config::LayoutConfig;
use crate::types::*;

/// Two points closer than this are treated as the same terminal.
pub const COINCIDENT: f32 = 1e-3;

#[derive(Debug, Default)]
pub struct SceneBuilder {
    primitives: Vec<Primitive>,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn extend(&mut self, primitives: impl IntoIterator<Item = Primitive>) {
        self.primitives.extend(primitives);
    }

    pub fn line(&mut self, from: Point, to: Point) {
        self.push(Primitive::Line { from, to });
    }

    /// Connecting wire; skipped when the endpoints already coincide.
    pub fn wire(&mut self, from: Point, to: Point) {
        if from.distance(to) > COINCIDENT {
            self.line(from, to);
        }
    }

    pub fn polyline(&mut self, points: Vec<Point>) {
        match points.len() {
            0 | 1 => {}
            2 => self.wire(points[0], points[1]),
            _ => self.push(Primitive::Polyline { points }),
        }
    }

    /// Filled junction dot.
    pub fn dot(&mut self, center: Point, radius: f32) {
        self.push(Primitive::Circle {
            center,
            radius,
            filled: true,
        });
    }

    /// Open port terminal.
    pub fn port(&mut self, center: Point, radius: f32) {
        self.push(Primitive::Circle {
            center,
            radius,
            filled: false,
        });
    }

    pub fn text(&mut self, at: Point, content: impl Into<String>, anchor: TextAnchor, size: f32) {
        self.push(Primitive::Text {
            at,
            content: content.into(),
            anchor,
            size,
        });
    }

    /// Two-line label: `name` on the first baseline, `value` one line below.
    /// An empty `value` emits only the name.
    pub fn label(&mut self, cfg: &LayoutConfig, at: Point, name: &str, value: &str, anchor: TextAnchor) {
        let size = cfg.label.font_size;
        self.text(at, name, anchor, size);
        if !value.is_empty() {
            self.text(Point::new(at.x, at.y + cfg.label.line_height), value, anchor, size);
        }
    }

    /// Emit a named group whose children are produced by `build`.
    pub fn group(&mut self, name: impl Into<String>, build: impl FnOnce(&mut SceneBuilder)) {
        let mut inner = SceneBuilder::new();
        build(&mut inner);
        self.push(Primitive::Group {
            name: name.into(),
            children: inner.primitives,
        });
    }

    pub fn finish(self, width: f32, height: f32) -> Scene {
        Scene {
            width,
            height,
            primitives: self.primitives,
        }
    }
}

/// Scene shown in place of a diagram when there is nothing to lay out.
pub fn placeholder(cfg: &LayoutConfig, message: &str) -> Scene {
    let width = 320.0;
    let height = 120.0;
    let mut scene = SceneBuilder::new();
    scene.text(
        Point::new(width / 2.0, height / 2.0),
        message,
        TextAnchor::Middle,
        cfg.label.header_size,
    );
    scene.finish(width, height)
}
