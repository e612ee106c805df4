//! Engineering-notation value labels (`7.96 mH`, `318 nF`, `50 Ω`).

use crate::model::ComponentKind;

/// Formats a component value for display.
///
/// Layout strategies only ever talk to this trait; they never do unit
/// arithmetic themselves.
pub trait ValueFormatter {
    fn format(&self, value: f64, kind: ComponentKind) -> String;
}

/// SI-prefix formatter: largest prefix keeping the mantissa ≥ 1, at most
/// three significant figures, trailing zeros stripped.
#[derive(Debug, Clone, Copy, Default)]
pub struct SiFormatter;

impl ValueFormatter for SiFormatter {
    fn format(&self, value: f64, kind: ComponentKind) -> String {
        match kind {
            ComponentKind::Opamp => String::new(),
            _ => format_si(value, kind.unit()),
        }
    }
}

/// Decimal exponent and symbol of each supported prefix, smallest first.
const PREFIXES: [(i32, &str); 10] = [
    (-15, "f"),
    (-12, "p"),
    (-9, "n"),
    (-6, "µ"),
    (-3, "m"),
    (0, ""),
    (3, "k"),
    (6, "M"),
    (9, "G"),
    (12, "T"),
];

/// Format `value` with an SI prefix and `unit`.
pub fn format_si(value: f64, unit: &str) -> String {
    if !value.is_finite() {
        return "—".into();
    }
    if value == 0.0 {
        return format!("0 {unit}");
    }

    let magnitude = value.abs();
    let mut idx = PREFIXES
        .iter()
        .rposition(|&(exp, _)| magnitude >= 10f64.powi(exp))
        .unwrap_or(0);

    loop {
        let (exp, prefix) = PREFIXES[idx];
        let mantissa = three_significant(value / 10f64.powi(exp));

        // Rounding may carry into the next prefix (999.7 → "1000").
        let carried = mantissa
            .trim_start_matches('-')
            .parse::<f64>()
            .map(|m| m >= 1000.0)
            .unwrap_or(false);
        if carried && idx + 1 < PREFIXES.len() {
            idx += 1;
            continue;
        }

        return format!("{mantissa} {prefix}{unit}");
    }
}

fn three_significant(x: f64) -> String {
    let digits = x.abs().log10().floor() as i32;
    let decimals = (2 - digits).max(0) as usize;
    strip_trailing_zeros(format!("{x:.decimals$}"))
}

fn strip_trailing_zeros(s: String) -> String {
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
