use crate::record::InputRecord;
use serde::Serialize;
use std::fmt;

pub const COLUMNS: [&str; 5] = [
    "env_type",
    "distance_m",
    "num_walls",
    "has_metal",
    "frequency_mhz",
];

/// Single-row tabular echo of a submitted record.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct InputSummary {
    pub columns: [&'static str; 5],
    pub values: [String; 5],
}

impl InputSummary {
    pub fn rows(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.columns
            .iter()
            .copied()
            .zip(self.values.iter().map(String::as_str))
    }
}

impl From<&InputRecord> for InputSummary {
    fn from(record: &InputRecord) -> Self {
        Self {
            columns: COLUMNS,
            values: [
                record.env_type.to_string(),
                format_float(record.distance_m),
                record.num_walls.to_string(),
                record.metal_code().to_string(),
                format_float(record.frequency_mhz),
            ],
        }
    }
}

fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

impl fmt::Display for InputSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths: Vec<usize> = self
            .rows()
            .map(|(column, value)| column.len().max(value.len()))
            .collect();

        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(column, width)| format!("{column:<width$}"))
            .collect();
        let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
        let values: Vec<String> = self
            .values
            .iter()
            .zip(&widths)
            .map(|(value, width)| format!("{value:<width$}"))
            .collect();

        writeln!(f, "{}", header.join(" | "))?;
        writeln!(f, "{}", rule.join("-+-"))?;
        write!(f, "{}", values.join(" | "))
    }
}
