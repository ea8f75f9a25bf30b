use crate::prelude::{SelectorError, SelectorResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Propagation environment offered by the form's first control.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnvType {
    #[default]
    Urban,
    Rural,
    Indoor,
}

impl EnvType {
    /// Options in the order the form lists them.
    pub const ALL: [EnvType; 3] = [EnvType::Urban, EnvType::Rural, EnvType::Indoor];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnvType::Urban => "urban",
            EnvType::Rural => "rural",
            EnvType::Indoor => "indoor",
        }
    }
}

impl fmt::Display for EnvType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnvType {
    type Err = SelectorError;

    fn from_str(s: &str) -> SelectorResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "urban" => Ok(EnvType::Urban),
            "rural" => Ok(EnvType::Rural),
            "indoor" => Ok(EnvType::Indoor),
            other => Err(SelectorError::InvalidInput(format!(
                "unknown environment type '{other}' (expected urban, rural or indoor)"
            ))),
        }
    }
}

/// Yes/No answer for the metal obstruction control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetalObstruction {
    #[default]
    No,
    Yes,
}

impl MetalObstruction {
    pub const ALL: [MetalObstruction; 2] = [MetalObstruction::No, MetalObstruction::Yes];

    pub fn is_present(&self) -> bool {
        matches!(self, MetalObstruction::Yes)
    }
}

impl From<bool> for MetalObstruction {
    fn from(present: bool) -> Self {
        if present {
            MetalObstruction::Yes
        } else {
            MetalObstruction::No
        }
    }
}

impl fmt::Display for MetalObstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetalObstruction::No => f.write_str("No"),
            MetalObstruction::Yes => f.write_str("Yes"),
        }
    }
}

impl FromStr for MetalObstruction {
    type Err = SelectorError;

    fn from_str(s: &str) -> SelectorResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" | "1" | "true" => Ok(MetalObstruction::Yes),
            "no" | "n" | "0" | "false" => Ok(MetalObstruction::No),
            other => Err(SelectorError::InvalidInput(format!(
                "unknown metal obstruction answer '{other}' (expected yes or no)"
            ))),
        }
    }
}

/// One prediction request, assembled from the form on submit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct InputRecord {
    pub env_type: EnvType,
    pub distance_m: f64,
    pub num_walls: i64,
    #[serde(with = "metal_code")]
    pub has_metal: bool,
    pub frequency_mhz: f64,
}

impl InputRecord {
    pub fn new(
        env_type: EnvType,
        distance_m: f64,
        num_walls: i64,
        has_metal: bool,
        frequency_mhz: f64,
    ) -> Self {
        Self {
            env_type,
            distance_m,
            num_walls,
            has_metal,
            frequency_mhz,
        }
    }

    /// Rejects NaN or infinite measurements before they reach a classifier.
    pub fn ensure_finite(&self) -> SelectorResult<()> {
        for (name, value) in [
            ("distance_m", self.distance_m),
            ("frequency_mhz", self.frequency_mhz),
        ] {
            if !value.is_finite() {
                return Err(SelectorError::InvalidInput(format!(
                    "{name} must be a finite number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// The 0/1 encoding the classifier and the summary see.
    pub fn metal_code(&self) -> u8 {
        u8::from(self.has_metal)
    }
}

impl Default for InputRecord {
    fn default() -> Self {
        Self::new(EnvType::Urban, 100.0, 0, false, 2400.0)
    }
}

mod metal_code {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(D::Error::custom(format!(
                "has_metal must be 0 or 1, got {other}"
            ))),
        }
    }
}
