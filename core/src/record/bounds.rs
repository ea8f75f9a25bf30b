use crate::prelude::{SelectorError, SelectorResult};
use crate::record::InputRecord;
use serde::Serialize;
use std::fmt;

/// Identifies one numeric control of the form.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    DistanceM,
    NumWalls,
    FrequencyMhz,
}

/// Declared bounds and advisory threshold for a numeric control.
///
/// `min`/`max` describe the widget range, `advisory_above` marks where the
/// model's training data ends. Neither is enforced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub field: Field,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
    pub advisory_above: Option<f64>,
    advisory_message: &'static str,
}

pub const DISTANCE: FieldSpec = FieldSpec {
    field: Field::DistanceM,
    label: "Distance (m)",
    min: 1.0,
    max: 1000.0,
    step: 1.0,
    default: 100.0,
    advisory_above: Some(500.0),
    advisory_message: "Distance beyond 500 m — prediction may be less accurate.",
};

pub const WALLS: FieldSpec = FieldSpec {
    field: Field::NumWalls,
    label: "Number of Walls",
    min: 0.0,
    max: 40.0,
    step: 1.0,
    default: 0.0,
    advisory_above: Some(10.0),
    advisory_message:
        "Number of walls is outside the training range — prediction may be less accurate.",
};

pub const FREQUENCY: FieldSpec = FieldSpec {
    field: Field::FrequencyMhz,
    label: "Frequency (MHz)",
    min: 0.0,
    max: 6000.0,
    step: 10.0,
    default: 2400.0,
    advisory_above: Some(2400.0),
    advisory_message: "Frequency beyond 2400 MHz — prediction may be less accurate.",
};

impl FieldSpec {
    pub fn spec_for(field: Field) -> &'static FieldSpec {
        match field {
            Field::DistanceM => &DISTANCE,
            Field::NumWalls => &WALLS,
            Field::FrequencyMhz => &FREQUENCY,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Advisories raised by `value`; empty when it sits comfortably in range.
    pub fn check(&self, value: f64) -> Vec<Advisory> {
        let mut out = Vec::new();
        if !self.contains(value) {
            out.push(Advisory {
                field: self.field,
                message: format!(
                    "{} {} is outside the declared range [{}, {}].",
                    self.label, value, self.min, self.max
                ),
            });
        }
        if matches!(self.advisory_above, Some(limit) if value > limit) {
            out.push(Advisory {
                field: self.field,
                message: self.advisory_message.to_string(),
            });
        }
        out
    }
}

/// Soft warning attached to a field. Never blocks a prediction.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Advisory {
    pub field: Field,
    pub message: String,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Parses a measurement typed by the operator. NaN and infinities are
/// refused; any finite value passes, however far out of range.
pub fn parse_finite(text: &str) -> SelectorResult<f64> {
    let trimmed = text.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| SelectorError::InvalidInput(format!("'{trimmed}' is not a finite number")))
}

/// Collects every advisory for a record, in form order.
pub fn advisories(record: &InputRecord) -> Vec<Advisory> {
    let mut out = DISTANCE.check(record.distance_m);
    out.extend(WALLS.check(record.num_walls as f64));
    out.extend(FREQUENCY.check(record.frequency_mhz));
    out
}
