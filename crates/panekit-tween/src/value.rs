//! Numeric style values with a unit suffix

/// A number plus its unit, e.g. `12px`, `0.5`, `50%`
#[derive(Debug, Clone, PartialEq)]
pub struct TweenValue {
    pub number: f64,
    pub unit: String,
}

impl TweenValue {
    pub fn new(number: f64, unit: &str) -> Self {
        Self {
            number,
            unit: unit.to_string(),
        }
    }

    /// Parse a leading number and keep the rest as unit.
    /// Non-numeric values (`auto`, colors) yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let split = value
            .char_indices()
            .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || (i == 0 && (c == '-' || c == '+'))))
            .map_or(value.len(), |(i, _)| i);
        let number = value[..split].parse::<f64>().ok()?;
        Some(Self::new(number, value[split..].trim()))
    }

    /// Value at `progress` between `self` and `to`, in `to`'s unit
    pub fn lerp(&self, to: &TweenValue, progress: f64) -> TweenValue {
        TweenValue::new(self.number + (to.number - self.number) * progress, &to.unit)
    }
}

impl std::fmt::Display for TweenValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Trim float noise so styles read `0.5` rather than `0.5000000001`
        let rounded = (self.number * 10_000.0).round() / 10_000.0;
        write!(f, "{}{}", rounded, self.unit)
    }
}
