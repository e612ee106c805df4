//! Sallen-Key stage grouping.
//!
//! Runs before any geometry. Stage membership comes only from the id prefix
//! (`S2_C1` belongs to stage 2); role decides placement inside the stage.
//!
//! Grouping rules, in input order:
//! - a change of tag closes the open stage
//! - an op-amp joins the open stage and closes it
//! - a passive after a closed stage opens a new one, even with the same tag
//! - an op-amp with no open stage forms an op-amp-only stage

use crate::model::{Component, ComponentKind, Role};

/// Stage number used when an id carries no parseable tag.
pub const UNTAGGED: u32 = 0;

/// One second-order active section.
#[derive(Debug, Clone, PartialEq)]
pub struct Stage<'a> {
    pub number: u32,
    /// Passive members in input order.
    pub passives: Vec<&'a Component>,
    pub opamp: Option<&'a Component>,
}

impl<'a> Stage<'a> {
    fn new(number: u32) -> Self {
        Self {
            number,
            passives: Vec::new(),
            opamp: None,
        }
    }

    /// Passive members with the given role, in input order.
    pub fn with_role(&self, role: Role) -> Vec<&'a Component> {
        self.passives
            .iter()
            .copied()
            .filter(|c| c.role == role)
            .collect()
    }

    /// Series members; anything not feedback or shunt rides the signal path.
    pub fn series(&self) -> Vec<&'a Component> {
        self.passives
            .iter()
            .copied()
            .filter(|c| !matches!(c.role, Role::Feedback | Role::Shunt))
            .collect()
    }
}

fn is_amplifier(component: &Component) -> bool {
    component.kind == ComponentKind::Opamp || component.role == Role::Active
}

/// Numeric stage tag of an id: `S1_R1` → 1, `3_C2` → 3.
///
/// Ids without a prefix, or with a non-numeric one, map to [`UNTAGGED`].
pub fn stage_tag(id: &str) -> u32 {
    let Some((prefix, _)) = id.split_once('_') else {
        return UNTAGGED;
    };
    let digits = prefix
        .strip_prefix('S')
        .or_else(|| prefix.strip_prefix('s'))
        .unwrap_or(prefix);
    digits.parse().unwrap_or(UNTAGGED)
}

/// Display name of an id: everything after the first `_`.
pub fn strip_prefix(id: &str) -> &str {
    id.split_once('_').map_or(id, |(_, rest)| rest)
}

/// Split a flat component list into stages.
pub fn group_stages(components: &[Component]) -> Vec<Stage<'_>> {
    let mut stages = Vec::new();
    let mut open: Option<Stage<'_>> = None;

    for component in components {
        let tag = stage_tag(&component.id);
        if open.as_ref().is_some_and(|s| s.number != tag) {
            stages.extend(open.take());
        }

        let stage = open.get_or_insert_with(|| Stage::new(tag));
        if is_amplifier(component) {
            stage.opamp = Some(component);
            stages.extend(open.take());
        } else {
            stage.passives.push(component);
        }
    }
    stages.extend(open);

    tracing::trace!(stages = stages.len(), "sallen-key stages grouped");
    stages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(id: &str, role: Role) -> Component {
        Component::new(id, ComponentKind::Resistor, 10e3, role)
    }

    fn u(id: &str) -> Component {
        Component::new(id, ComponentKind::Opamp, 0.0, Role::Active)
    }

    fn ids<'a>(stage: &'a Stage<'a>) -> Vec<&'a str> {
        stage.passives.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn tags() {
        assert_eq!(stage_tag("S1_R1"), 1);
        assert_eq!(stage_tag("s12_C2"), 12);
        assert_eq!(stage_tag("4_R1"), 4);
        assert_eq!(stage_tag("R1"), UNTAGGED);
        assert_eq!(stage_tag("Sx_R1"), UNTAGGED);
        assert_eq!(stage_tag("_R1"), UNTAGGED);
    }

    #[test]
    fn prefix_stripping() {
        assert_eq!(strip_prefix("S1_R1"), "R1");
        assert_eq!(strip_prefix("S1_U_A"), "U_A");
        assert_eq!(strip_prefix("R1"), "R1");
    }

    #[test]
    fn two_stage_cascade() {
        let comps = vec![
            r("S1_R1", Role::Series),
            r("S1_R2", Role::Series),
            r("S1_C1", Role::Feedback),
            r("S1_C2", Role::Shunt),
            u("S1_U"),
            r("S2_R1", Role::Series),
            u("S2_U"),
        ];
        let stages = group_stages(&comps);
        assert_eq!(stages.len(), 2);
        assert_eq!(stages[0].number, 1);
        assert_eq!(ids(&stages[0]), ["S1_R1", "S1_R2", "S1_C1", "S1_C2"]);
        assert_eq!(stages[0].opamp.map(|c| c.id.as_str()), Some("S1_U"));
        assert_eq!(stages[1].number, 2);
        assert_eq!(ids(&stages[1]), ["S2_R1"]);
    }

    #[test]
    fn opamp_closes_stage_without_tag_change() {
        // Same tag throughout: the op-amp still ends its stage.
        let comps = vec![
            r("S1_R1", Role::Series),
            u("S1_U"),
            r("S1_R3", Role::Series),
            u("S1_U2"),
        ];
        let stages = group_stages(&comps);
        assert_eq!(stages.len(), 2);
        assert!(stages.iter().all(|s| s.number == 1));
        assert_eq!(ids(&stages[1]), ["S1_R3"]);
        assert_eq!(stages[1].opamp.map(|c| c.id.as_str()), Some("S1_U2"));
    }

    #[test]
    fn tag_change_closes_stage_without_opamp() {
        let comps = vec![r("S1_R1", Role::Series), r("S2_R1", Role::Series), u("S2_U")];
        let stages = group_stages(&comps);
        assert_eq!(stages.len(), 2);
        assert!(stages[0].opamp.is_none());
        assert!(stages[1].opamp.is_some());
    }

    #[test]
    fn lone_opamp_forms_its_own_stage() {
        let comps = vec![u("S1_U"), u("S1_V")];
        let stages = group_stages(&comps);
        assert_eq!(stages.len(), 2);
        assert!(stages.iter().all(|s| s.passives.is_empty() && s.opamp.is_some()));
    }

    #[test]
    fn untagged_ids_share_stage_zero() {
        let comps = vec![r("R1", Role::Series), r("C1", Role::Shunt)];
        let stages = group_stages(&comps);
        assert_eq!(stages.len(), 1);
        assert_eq!(stages[0].number, UNTAGGED);
    }

    #[test]
    fn role_selectors() {
        let comps = vec![
            r("S1_R1", Role::Series),
            r("S1_C1", Role::Feedback),
            r("S1_R2", Role::Series),
            r("S1_C2", Role::Shunt),
        ];
        let stages = group_stages(&comps);
        let series: Vec<_> = stages[0].series().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(series, ["S1_R1", "S1_R2"]);
        assert_eq!(stages[0].with_role(Role::Feedback).len(), 1);
        assert_eq!(stages[0].with_role(Role::Shunt).len(), 1);
    }
}
