use serde::Serialize;

/// Traffic light for the share of reports received in under five minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Light {
    Green,
    Yellow,
    Red,
}

impl Light {
    pub fn symbol(self) -> &'static str {
        match self {
            Light::Green => "🟢",
            Light::Yellow => "🟡",
            Light::Red => "🔴",
        }
    }
}

/// Converts a percentage (0–100) into a traffic light.
///
/// | Range    | Light  |
/// |----------|--------|
/// | >= 85    | Green  |
/// | >= 70    | Yellow |
/// | < 70     | Red    |
pub fn grade(pct: f64) -> Light {
    match pct {
        p if p >= 85.0 => Light::Green,
        p if p >= 70.0 => Light::Yellow,
        _ => Light::Red,
    }
}
