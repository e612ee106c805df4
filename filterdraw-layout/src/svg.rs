//! Standalone SVG writer for a [`Scene`].
//!
//! Strokes are black on a transparent canvas. Junction dots are filled,
//! ports are hollow. Groups become `<g data-name="…">` so a front end can
//! target individual components.

use crate::scene::COINCIDENT;
use crate::types::*;
use std::f32::consts::PI;
use std::fmt::{self, Write};

const STROKE_WIDTH: f32 = 1.5;

/// Render a scene as an SVG document.
pub fn to_svg(scene: &Scene) -> String {
    let mut out = String::new();
    write_svg(&mut out, scene).expect("writing to a String should not fail");
    out
}

fn write_svg(out: &mut String, scene: &Scene) -> fmt::Result {
    let (w, h) = (fmt_num(scene.width), fmt_num(scene.height));
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    )?;
    writeln!(
        out,
        r#"<g fill="none" stroke="black" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round" font-family="sans-serif">"#,
        fmt_num(STROKE_WIDTH)
    )?;
    for primitive in &scene.primitives {
        write_primitive(out, primitive, 1)?;
    }
    writeln!(out, "</g>")?;
    writeln!(out, "</svg>")
}

fn write_primitive(out: &mut String, primitive: &Primitive, depth: usize) -> fmt::Result {
    let indent = "  ".repeat(depth);
    match primitive {
        Primitive::Line { from, to } => writeln!(
            out,
            r#"{indent}<line x1="{}" y1="{}" x2="{}" y2="{}"/>"#,
            fmt_num(from.x),
            fmt_num(from.y),
            fmt_num(to.x),
            fmt_num(to.y)
        ),
        Primitive::Polyline { points } => {
            let points: Vec<String> = points
                .iter()
                .map(|p| format!("{},{}", fmt_num(p.x), fmt_num(p.y)))
                .collect();
            writeln!(out, r#"{indent}<polyline points="{}"/>"#, points.join(" "))
        }
        Primitive::Path { commands } => {
            writeln!(out, r#"{indent}<path d="{}"/>"#, path_data(commands))
        }
        Primitive::Circle { center, radius, filled } => {
            let fill = if *filled { "black" } else { "white" };
            writeln!(
                out,
                r#"{indent}<circle cx="{}" cy="{}" r="{}" fill="{fill}"/>"#,
                fmt_num(center.x),
                fmt_num(center.y),
                fmt_num(*radius)
            )
        }
        Primitive::Text { at, content, anchor, size } => {
            let anchor = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            writeln!(
                out,
                r#"{indent}<text x="{}" y="{}" text-anchor="{anchor}" font-size="{}" fill="black" stroke="none">{}</text>"#,
                fmt_num(at.x),
                fmt_num(at.y),
                fmt_num(*size),
                escape_xml(content)
            )
        }
        Primitive::Group { name, children } => {
            writeln!(out, r#"{indent}<g data-name="{}">"#, escape_xml(name))?;
            for child in children {
                write_primitive(out, child, depth + 1)?;
            }
            writeln!(out, "{indent}</g>")
        }
    }
}

/// SVG path data. Arcs become `A` commands; a connecting `L` is inserted only
/// when the arc does not start at the current pen position.
fn path_data(commands: &[PathCmd]) -> String {
    let mut d = Vec::with_capacity(commands.len());
    let mut pen: Option<Point> = None;

    for cmd in commands {
        match *cmd {
            PathCmd::MoveTo(x, y) => {
                d.push(format!("M{},{}", fmt_num(x), fmt_num(y)));
                pen = Some(Point::new(x, y));
            }
            PathCmd::LineTo(x, y) => {
                d.push(format!("L{},{}", fmt_num(x), fmt_num(y)));
                pen = Some(Point::new(x, y));
            }
            PathCmd::ArcTo(cx, cy, r, a0, a1) => {
                let start = Point::new(cx + r * a0.cos(), cy + r * a0.sin());
                let end = Point::new(cx + r * a1.cos(), cy + r * a1.sin());
                match pen {
                    None => d.push(format!("M{},{}", fmt_num(start.x), fmt_num(start.y))),
                    Some(p) if p.distance(start) > COINCIDENT => {
                        d.push(format!("L{},{}", fmt_num(start.x), fmt_num(start.y)))
                    }
                    Some(_) => {}
                }
                let large_arc = u8::from((a1 - a0).abs() > PI);
                let sweep = u8::from(a1 > a0);
                d.push(format!(
                    "A{r},{r} 0 {large_arc} {sweep} {},{}",
                    fmt_num(end.x),
                    fmt_num(end.y),
                    r = fmt_num(r)
                ));
                pen = Some(end);
            }
            PathCmd::Close => d.push("Z".to_string()),
        }
    }
    d.join(" ")
}

/// At most two decimals, trailing zeros trimmed, no negative zero.
pub fn fmt_num(v: f32) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        _ => s.to_string(),
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
