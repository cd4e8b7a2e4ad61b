pub mod presets;
pub mod store;

pub use presets::{Preset, PresetInfo};
pub use store::{ParameterStore, RangePolicy};

use crate::errors::AppError;

// ── Parameter Fields ──

/// One of the three inputs of the adjusted-return formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    IndexLevel,
    BaseReturn,
    Sensitivity,
}

/// Static metadata for a field: range, default and slider settings.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct FieldSpec {
    pub field: Field,
    pub name: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

impl FieldSpec {
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

const INDEX_LEVEL: FieldSpec = FieldSpec {
    field: Field::IndexLevel,
    name: "index_level",
    label: "VIX Level",
    min: 10.0,
    max: 50.0,
    default: 20.0,
    step: 0.1,
};

const BASE_RETURN: FieldSpec = FieldSpec {
    field: Field::BaseReturn,
    name: "base_return",
    label: "Market Return (E(R_m))",
    min: -0.1,
    max: 0.2,
    default: 0.08,
    step: 0.01,
};

const SENSITIVITY: FieldSpec = FieldSpec {
    field: Field::Sensitivity,
    name: "sensitivity",
    label: "Volatility Impact Factor",
    min: 0.5,
    max: 2.0,
    default: 1.0,
    step: 0.01,
};

impl Field {
    pub const ALL: [Field; 3] = [Field::IndexLevel, Field::BaseReturn, Field::Sensitivity];

    pub fn spec(self) -> &'static FieldSpec {
        match self {
            Self::IndexLevel => &INDEX_LEVEL,
            Self::BaseReturn => &BASE_RETURN,
            Self::Sensitivity => &SENSITIVITY,
        }
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.spec().name
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Field {
    type Err = AppError;

    /// Accepts the wire names plus the dashboard slider keys.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "index_level" | "vix_level" | "vix" => Ok(Self::IndexLevel),
            "base_return" | "market_return" => Ok(Self::BaseReturn),
            "sensitivity" | "volatility_impact" => Ok(Self::Sensitivity),
            _ => Err(AppError::UnknownField(s.to_string())),
        }
    }
}

// ── Parameters ──

/// The session's current inputs. Plain Copy record; the store decides
/// which values may land here.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Parameters {
    pub index_level: f64,
    pub base_return: f64,
    pub sensitivity: f64,
}

impl Parameters {
    pub const fn new(index_level: f64, base_return: f64, sensitivity: f64) -> Self {
        Self {
            index_level,
            base_return,
            sensitivity,
        }
    }

    #[inline]
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::IndexLevel => self.index_level,
            Field::BaseReturn => self.base_return,
            Field::Sensitivity => self.sensitivity,
        }
    }

    #[inline]
    pub(crate) fn put(&mut self, field: Field, value: f64) {
        match field {
            Field::IndexLevel => self.index_level = value,
            Field::BaseReturn => self.base_return = value,
            Field::Sensitivity => self.sensitivity = value,
        }
    }

    /// True when every field sits inside its declared range.
    pub fn in_range(&self) -> bool {
        Field::ALL.iter().all(|f| f.spec().contains(self.get(*f)))
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Preset::Default.parameters()
    }
}
