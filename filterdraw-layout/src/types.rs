//! Output types for the schematic layout engine.
//!
//! All types derive [`serde::Serialize`] and [`serde::Deserialize`] so a
//! scene can be written to JSON and handed to any vector renderer without
//! further layout decisions.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Complete schematic scene, the output of [`crate::render`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Canvas width in layout units.
    pub width: f32,
    /// Canvas height in layout units.
    pub height: f32,
    /// Draw primitives in emission order.
    pub primitives: Vec<Primitive>,
}

impl Scene {
    /// Depth-first iterator over every primitive, descending into groups.
    pub fn walk(&self) -> impl Iterator<Item = &Primitive> {
        let mut stack: Vec<&Primitive> = self.primitives.iter().rev().collect();
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            if let Primitive::Group { children, .. } = next {
                stack.extend(children.iter().rev());
            }
            Some(next)
        })
    }

    /// All text contents in emission order.
    pub fn texts(&self) -> Vec<&str> {
        self.walk()
            .filter_map(|p| match p {
                Primitive::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of text primitives whose content is exactly `label`.
    pub fn count_text(&self, label: &str) -> usize {
        self.texts().into_iter().filter(|t| *t == label).count()
    }

    /// Find a top-level or nested group by name.
    pub fn group(&self, name: &str) -> Option<&Primitive> {
        self.walk()
            .find(|p| matches!(p, Primitive::Group { name: n, .. } if n == name))
    }
}

/// A single vector draw primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    /// Straight wire or stroke.
    Line { from: Point, to: Point },
    /// Open polyline through the given points.
    Polyline { points: Vec<Point> },
    /// Vector path (used for coil arcs).
    Path { commands: Vec<PathCmd> },
    /// Connection dot (`filled`) or open port terminal.
    Circle {
        center: Point,
        radius: f32,
        filled: bool,
    },
    /// Text label.
    Text {
        at: Point,
        content: String,
        anchor: TextAnchor,
        size: f32,
    },
    /// Named group of primitives (one component, section or stage).
    Group {
        name: String,
        children: Vec<Primitive>,
    },
}

impl Primitive {
    /// Every coordinate this primitive references, groups included.
    pub fn points(&self) -> Vec<Point> {
        match self {
            Primitive::Line { from, to } => vec![*from, *to],
            Primitive::Polyline { points } => points.clone(),
            Primitive::Path { commands } => commands.iter().flat_map(PathCmd::points).collect(),
            Primitive::Circle { center, .. } => vec![*center],
            Primitive::Text { at, .. } => vec![*at],
            Primitive::Group { children, .. } => children.iter().flat_map(Primitive::points).collect(),
        }
    }
}

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// A path command for vector symbol rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCmd {
    /// Move to (x, y) without drawing.
    MoveTo(f32, f32),
    /// Draw a line to (x, y).
    LineTo(f32, f32),
    /// Draw an arc: center (cx, cy), radius, start_angle, end_angle (radians).
    ///
    /// Angles follow screen coordinates (y down), so increasing angle turns
    /// clockwise on screen.
    ArcTo(f32, f32, f32, f32, f32),
    /// Close the current sub-path.
    Close,
}

impl PathCmd {
    fn points(&self) -> Vec<Point> {
        match *self {
            PathCmd::MoveTo(x, y) | PathCmd::LineTo(x, y) => vec![Point::new(x, y)],
            PathCmd::ArcTo(cx, cy, r, a0, a1) => vec![
                Point::new(cx, cy),
                Point::new(cx + r * a0.cos(), cy + r * a0.sin()),
                Point::new(cx + r * a1.cos(), cy + r * a1.sin()),
            ],
            PathCmd::Close => Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Geometry helpers
// ---------------------------------------------------------------------------

/// Point in 2D layout space (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Point) -> f32 {
        (other - self).length()
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Perpendicular vector, rotated a quarter turn counter-clockwise on screen.
    pub fn perpendicular(self) -> Point {
        Point::new(self.y, -self.x)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Point {
    type Output = Point;

    fn mul(self, rhs: f32) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}
