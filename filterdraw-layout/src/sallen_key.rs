//! Sallen-Key cascade layout.
//!
//! Phases:
//! 1. [`stages::group_stages`] splits the flat list into stages
//! 2. [`plan`] resolves every junction of every stage, left to right
//! 3. [`draw`] emits one group per stage plus the Vin/Vout ports
//!
//! Stage anatomy (signal line at `signal_y`):
//!
//! ```text
//!            A ───────[feedback]──────── ┐
//!            │                           │
//!  in ──[R1]─●──[R2]─● B ───┤+ ▷ ├── out ●──── exit
//!                    │      ┌┤−          │
//!                  [shunt]  └────────────┘  unity loop
//!                    ⏚
//! ```

use crate::config::LayoutConfig;
use crate::format::ValueFormatter;
use crate::glyphs::{self, Mount, OpAmpGlyph};
use crate::model::{Component, Role};
use crate::scene::{SceneBuilder, COINCIDENT};
use crate::stages::{self, Stage};
use crate::types::*;

/// Resolved geometry of one stage.
#[derive(Debug, Clone)]
pub struct StagePlan<'a> {
    pub number: u32,
    pub entry: Point,
    /// Series components with their left terminal.
    pub series: Vec<(&'a Component, Point)>,
    /// After the first series component.
    pub junction_a: Point,
    /// After the last series component.
    pub junction_b: Point,
    pub feedback: Option<&'a Component>,
    pub shunt: Option<&'a Component>,
    pub opamp: Option<(&'a Component, OpAmpGlyph)>,
    /// Output branch point where feedback and unity loop land.
    pub branch: Point,
    pub exit: Point,
}

/// Resolved cascade.
#[derive(Debug, Clone)]
pub struct SallenKeyPlan<'a> {
    pub stages: Vec<StagePlan<'a>>,
    pub width: f32,
    pub height: f32,
}

/// First member with `role`; surplus members are skipped with a warning.
fn single<'a>(stage: &Stage<'a>, role: Role) -> Option<&'a Component> {
    let members = stage.with_role(role);
    for extra in members.iter().skip(1) {
        tracing::warn!(id = %extra.id, stage = stage.number, ?role, "surplus stage member skipped");
    }
    members.first().copied()
}

fn plan_stage<'a>(stage: &Stage<'a>, entry: Point, cfg: &LayoutConfig) -> StagePlan<'a> {
    let sk = &cfg.sallen_key;
    let sy = entry.y;

    let mut x = entry.x + sk.input_lead;
    let lead_end = Point::new(x, sy);
    let mut series = Vec::new();
    for component in stage.series() {
        series.push((component, Point::new(x, sy)));
        x += sk.series_slot;
    }

    let junction_a = match series.first() {
        Some((_, start)) => *start + Point::new(sk.series_slot, 0.0),
        None => lead_end,
    };
    let junction_b = Point::new(x, sy);

    let plus_input = Point::new(junction_b.x + sk.opamp_gap, sy);
    let opamp = stage
        .opamp
        .map(|component| (component, glyphs::opamp(plus_input, &cfg.glyph)));
    let branch = match &opamp {
        Some((_, glyph)) => glyph.output + Point::new(sk.branch_offset, 0.0),
        None => plus_input,
    };

    StagePlan {
        number: stage.number,
        entry,
        series,
        junction_a,
        junction_b,
        feedback: single(stage, Role::Feedback),
        shunt: single(stage, Role::Shunt),
        opamp,
        branch,
        exit: branch + Point::new(sk.output_lead, 0.0),
    }
}

/// Resolve every stage without drawing anything.
pub fn plan<'a>(components: &'a [Component], cfg: &LayoutConfig) -> SallenKeyPlan<'a> {
    let sk = &cfg.sallen_key;
    let mut entry = Point::new(sk.side_margin, sk.signal_y);
    let mut plans = Vec::new();

    for stage in stages::group_stages(components) {
        let planned = plan_stage(&stage, entry, cfg);
        tracing::trace!(stage = planned.number, x = planned.entry.x, "sallen-key stage");
        entry = Point::new(planned.exit.x + sk.stage_connector, sk.signal_y);
        plans.push(planned);
    }

    let right = plans.last().map_or(sk.side_margin, |s| s.exit.x);
    let ground_depth = 2.0 * cfg.glyph.ground_spacing;
    SallenKeyPlan {
        stages: plans,
        width: right + sk.side_margin,
        height: sk.signal_y + sk.rail_drop + ground_depth + sk.bottom_margin,
    }
}

/// Draw a resolved cascade.
pub fn draw(plan: &SallenKeyPlan<'_>, cfg: &LayoutConfig, formatter: &dyn ValueFormatter) -> Scene {
    let mut scene = SceneBuilder::new();
    let (Some(first), Some(last)) = (plan.stages.first(), plan.stages.last()) else {
        return scene.finish(plan.width, plan.height);
    };
    let style = &cfg.glyph;
    let size = cfg.label.font_size;

    scene.group("input", |g| {
        g.port(first.entry, style.port_radius);
        g.text(
            first.entry - Point::new(cfg.label.offset, 0.0),
            "Vin",
            TextAnchor::End,
            size,
        );
    });

    for (i, stage) in plan.stages.iter().enumerate() {
        if i > 0 {
            connect(&mut scene, plan.stages[i - 1].exit, stage.entry);
        }
        scene.group(format!("stage-{}", i + 1), |g| draw_stage(g, stage, cfg, formatter));
    }

    scene.group("output", |g| {
        g.port(last.exit, style.port_radius);
        g.text(
            last.exit + Point::new(cfg.label.offset, 0.0),
            "Vout",
            TextAnchor::Start,
            size,
        );
    });

    scene.finish(plan.width, plan.height)
}

/// Connector from one stage's output (op-amp output height) to the next
/// stage's input on the signal line.
fn connect(scene: &mut SceneBuilder, from: Point, to: Point) {
    if (from.y - to.y).abs() < COINCIDENT {
        scene.wire(from, to);
        return;
    }
    let mid_x = (from.x + to.x) / 2.0;
    scene.polyline(vec![
        from,
        Point::new(mid_x, from.y),
        Point::new(mid_x, to.y),
        to,
    ]);
}

fn draw_stage(
    g: &mut SceneBuilder,
    stage: &StagePlan<'_>,
    cfg: &LayoutConfig,
    formatter: &dyn ValueFormatter,
) {
    let sk = &cfg.sallen_key;
    let style = &cfg.glyph;
    let label = &cfg.label;
    let sy = stage.entry.y;
    let label_lift = label.offset + label.line_height;
    let feedback_y = sy - sk.feedback_clearance;

    // Signal path
    let lead_end = Point::new(stage.entry.x + sk.input_lead, sy);
    g.wire(stage.entry, lead_end);
    for (component, start) in &stage.series {
        let glyph = glyphs::glyph(
            component.kind,
            Mount::Horizontal { origin: *start, slot: sk.series_slot },
            style,
        );
        g.extend(glyph.primitives);
        g.label(
            cfg,
            Point::new(start.x + sk.series_slot / 2.0, sy - label_lift),
            stages::strip_prefix(&component.id),
            &formatter.format(component.value, component.kind),
            TextAnchor::Middle,
        );
    }

    match &stage.opamp {
        Some((component, glyph)) => {
            g.wire(stage.junction_b, glyph.non_inverting);
            g.extend(glyph.primitives.iter().cloned());
            g.wire(glyph.output, stage.branch);

            let top = glyph.output.y - style.opamp_height / 2.0;
            let middle = (glyph.non_inverting.x + glyph.output.x) / 2.0;
            g.text(
                Point::new(middle, top - label.offset / 2.0),
                stages::strip_prefix(&component.id),
                TextAnchor::Middle,
                label.font_size,
            );

            // Unity-gain loop: inverting input back to the branch point, below
            // the signal line.
            let loop_x = glyph.inverting.x - sk.loop_inset;
            let loop_y = sy + sk.loop_drop;
            g.polyline(vec![
                glyph.inverting,
                Point::new(loop_x, glyph.inverting.y),
                Point::new(loop_x, loop_y),
                Point::new(stage.branch.x, loop_y),
                stage.branch,
            ]);
        }
        None => g.wire(stage.junction_b, stage.branch),
    }
    g.wire(stage.branch, stage.exit);

    if let Some(component) = stage.feedback {
        let a = stage.junction_a;
        let run_start = Point::new(a.x, feedback_y);
        let run_end = Point::new(stage.branch.x, feedback_y);
        g.wire(a, run_start);
        let glyph = glyphs::glyph(
            component.kind,
            Mount::Horizontal { origin: run_start, slot: run_end.x - run_start.x },
            style,
        );
        g.extend(glyph.primitives);
        g.wire(run_end, stage.branch);
        g.dot(a, style.dot_radius);
        g.label(
            cfg,
            Point::new(run_start.midpoint(run_end).x, feedback_y - label_lift),
            stages::strip_prefix(&component.id),
            &formatter.format(component.value, component.kind),
            TextAnchor::Middle,
        );
    }

    if stage.feedback.is_some() || stage.opamp.is_some() {
        g.dot(stage.branch, style.dot_radius);
    }

    if let Some(component) = stage.shunt {
        let b = stage.junction_b;
        let foot = Point::new(b.x, sy + sk.rail_drop);
        let glyph = glyphs::glyph(
            component.kind,
            Mount::Vertical { origin: b, slot: sk.rail_drop },
            style,
        );
        g.extend(glyph.primitives);
        g.extend(glyphs::ground(foot, style));
        g.dot(b, style.dot_radius);
        // Left of the drop, clear of the unity loop on the right.
        let dx = style.plate_half_length + label.offset / 2.0;
        g.label(
            cfg,
            Point::new(b.x - dx, b.midpoint(foot).y - label.line_height / 2.0),
            stages::strip_prefix(&component.id),
            &formatter.format(component.value, component.kind),
            TextAnchor::End,
        );
    }

    let header_y = feedback_y - sk.header_clearance;
    g.text(
        Point::new(stage.entry.midpoint(stage.exit).x, header_y),
        format!("Stage {}", stage.number),
        TextAnchor::Middle,
        label.header_size,
    );
}

/// Lay out a Sallen-Key cascade.
pub fn layout(components: &[Component], cfg: &LayoutConfig, formatter: &dyn ValueFormatter) -> Scene {
    let plan = plan(components, cfg);
    tracing::debug!(
        components = components.len(),
        stages = plan.stages.len(),
        width = plan.width,
        height = plan.height,
        "sallen-key layout"
    );
    draw(&plan, cfg, formatter)
}
