use super::{Field, Parameters, Preset};
use crate::errors::{AppError, AppResult};

/// How `ParameterStore::set` treats values outside a field's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangePolicy {
    /// Store whatever is given. Only the dashboard sliders constrain values.
    Permit,
    /// Pull finite values back to the nearest bound.
    Clamp,
    /// Refuse out-of-range values and leave the store unchanged.
    #[default]
    Reject,
}

impl std::fmt::Display for RangePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Permit => write!(f, "permit"),
            Self::Clamp => write!(f, "clamp"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

impl std::str::FromStr for RangePolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permit" => Ok(Self::Permit),
            "clamp" => Ok(Self::Clamp),
            "reject" => Ok(Self::Reject),
            other => Err(AppError::Config(format!(
                "RANGE_POLICY must be permit, clamp or reject, got {other:?}"
            ))),
        }
    }
}

/// Session-scoped parameter record. Always holds exactly one triple.
#[derive(Debug, Clone)]
pub struct ParameterStore {
    params: Parameters,
    policy: RangePolicy,
}

impl ParameterStore {
    pub fn new(policy: RangePolicy) -> Self {
        Self {
            params: Parameters::default(),
            policy,
        }
    }

    #[inline]
    pub fn get(&self) -> Parameters {
        self.params
    }

    #[inline]
    pub fn get_field(&self, field: Field) -> f64 {
        self.params.get(field)
    }

    #[inline]
    pub fn policy(&self) -> RangePolicy {
        self.policy
    }

    /// Overwrite all fields with the default preset.
    pub fn reset(&mut self) {
        self.apply_preset(Preset::Default);
    }

    /// Overwrite all fields with the preset's values.
    pub fn apply_preset(&mut self, preset: Preset) {
        self.params = preset.parameters();
    }

    /// Write a single field. Returns the value actually stored, which
    /// differs from `value` only under `RangePolicy::Clamp`.
    pub fn set(&mut self, field: Field, value: f64) -> AppResult<f64> {
        let spec = field.spec();
        let stored = match self.policy {
            RangePolicy::Permit => value,
            RangePolicy::Clamp | RangePolicy::Reject if !value.is_finite() => {
                return Err(AppError::InvalidInput(format!(
                    "{field} must be a finite number, got {value}"
                )));
            }
            RangePolicy::Clamp => spec.clamp(value),
            RangePolicy::Reject => {
                if !spec.contains(value) {
                    return Err(AppError::OutOfRange {
                        field: spec.name,
                        value,
                        min: spec.min,
                        max: spec.max,
                    });
                }
                value
            }
        };
        self.params.put(field, stored);
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_store_holds_defaults() {
        let store = ParameterStore::new(RangePolicy::default());
        assert_eq!(store.get(), Parameters::new(20.0, 0.08, 1.0));
        assert_eq!(store.policy(), RangePolicy::Reject);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut store = ParameterStore::new(RangePolicy::Clamp);
        store.apply_preset(Preset::Lab3);
        store.reset();
        let once = store.get();
        store.reset();
        assert_eq!(store.get(), once);
    }

    #[test]
    fn test_preset_then_reset_restores_defaults() {
        let mut store = ParameterStore::new(RangePolicy::Reject);
        store.apply_preset(Preset::Lab1);
        assert_eq!(store.get(), Parameters::new(30.0, -0.05, 1.5));
        store.reset();
        assert_eq!(store.get(), Parameters::new(20.0, 0.08, 1.0));
    }

    #[test]
    fn test_reject_policy_leaves_store_unchanged() {
        let mut store = ParameterStore::new(RangePolicy::Reject);
        let err = store.set(Field::IndexLevel, 60.0).unwrap_err();
        assert!(matches!(err, AppError::OutOfRange { field: "index_level", .. }));
        assert_eq!(store.get_field(Field::IndexLevel), 20.0);

        assert_eq!(store.set(Field::IndexLevel, 50.0).unwrap(), 50.0);
        assert_eq!(store.get_field(Field::IndexLevel), 50.0);
    }

    #[test]
    fn test_clamp_policy_pulls_to_bounds() {
        let mut store = ParameterStore::new(RangePolicy::Clamp);
        assert_eq!(store.set(Field::Sensitivity, 3.0).unwrap(), 2.0);
        assert_eq!(store.set(Field::BaseReturn, -0.5).unwrap(), -0.1);
        assert_eq!(store.get(), Parameters::new(20.0, -0.1, 2.0));
    }

    #[test]
    fn test_non_finite_rejected_unless_permit() {
        let mut clamp = ParameterStore::new(RangePolicy::Clamp);
        assert!(matches!(
            clamp.set(Field::IndexLevel, f64::NAN),
            Err(AppError::InvalidInput(_))
        ));
        assert_eq!(clamp.get_field(Field::IndexLevel), 20.0);

        let mut permit = ParameterStore::new(RangePolicy::Permit);
        assert!(permit.set(Field::IndexLevel, f64::INFINITY).is_ok());
    }

    #[test]
    fn test_permit_policy_stores_out_of_range() {
        let mut store = ParameterStore::new(RangePolicy::Permit);
        store.set(Field::IndexLevel, 80.0).unwrap();
        assert_eq!(store.get_field(Field::IndexLevel), 80.0);
        assert!(!store.get().in_range());
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("Clamp".parse::<RangePolicy>().unwrap(), RangePolicy::Clamp);
        assert!(matches!(
            "strict".parse::<RangePolicy>(),
            Err(AppError::Config(_))
        ));
    }
}
