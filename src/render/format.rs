//! Display formatting for the Interactive Tool panel.
//! Matches the dashboard's conventions: returns as percentages with two
//! decimals, VIX with one decimal, impact factor with two.

use crate::params::Parameters;

/// `-0.12` -> `"-12.00%"`
pub fn percent(value: f64) -> String {
    let pct = value * 100.0;
    // Avoid "-0.00%" for tiny negatives
    let pct = if pct.abs() < 0.005 { 0.0 } else { pct };
    format!("{pct:.2}%")
}

pub fn index_level(value: f64) -> String {
    format!("{value:.1}")
}

pub fn sensitivity(value: f64) -> String {
    format!("{value:.2}")
}

/// The "Key Parameters" list shown beside the result.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct KeyParameters {
    pub index_level: String,
    pub base_return: String,
    pub sensitivity: String,
}

impl From<&Parameters> for KeyParameters {
    fn from(p: &Parameters) -> Self {
        Self {
            index_level: index_level(p.index_level),
            base_return: percent(p.base_return),
            sensitivity: sensitivity(p.sensitivity),
        }
    }
}
