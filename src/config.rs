use crate::errors::{AppError, AppResult};
use crate::models::impact::DEFAULT_SAMPLES;
use crate::params::RangePolicy;
use std::path::PathBuf;

/// Upper bound on samples for any one sweep request.
pub const MAX_SWEEP_SAMPLES: usize = 10_000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_host: String,
    pub server_port: u16,
    pub range_policy: RangePolicy,
    pub sweep_samples: usize,
    pub dashboard_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let server_port = var_or("SERVER_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| AppError::Config(format!("SERVER_PORT: {e}")))?;

        let range_policy = var_or("RANGE_POLICY", "reject").parse::<RangePolicy>()?;

        let sweep_samples = var_or("SWEEP_SAMPLES", &DEFAULT_SAMPLES.to_string())
            .parse::<usize>()
            .map_err(|e| AppError::Config(format!("SWEEP_SAMPLES: {e}")))?;
        if sweep_samples == 0 || sweep_samples > MAX_SWEEP_SAMPLES {
            return Err(AppError::Config(format!(
                "SWEEP_SAMPLES must be in 1..={MAX_SWEEP_SAMPLES}, got {sweep_samples}"
            )));
        }

        Ok(Self {
            bind_host: var_or("BIND_HOST", "0.0.0.0"),
            server_port,
            range_policy,
            sweep_samples,
            dashboard_dir: PathBuf::from(var_or("DASHBOARD_DIR", "dashboard/dist")),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_host, self.server_port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".into(),
            server_port: 3001,
            range_policy: RangePolicy::default(),
            sweep_samples: DEFAULT_SAMPLES,
            dashboard_dir: PathBuf::from("dashboard/dist"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.server_port, 3001);
        assert_eq!(cfg.range_policy, RangePolicy::Reject);
        assert_eq!(cfg.sweep_samples, 100);
        assert_eq!(cfg.bind_addr(), "0.0.0.0:3001");
    }

    #[test]
    fn test_overrides() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("SERVER_PORT", "8080"),
            ("RANGE_POLICY", "clamp"),
            ("SWEEP_SAMPLES", "250"),
            ("BIND_HOST", "127.0.0.1"),
        ]))
        .unwrap();
        assert_eq!(cfg.range_policy, RangePolicy::Clamp);
        assert_eq!(cfg.sweep_samples, 250);
        assert_eq!(cfg.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_invalid_values_fail() {
        for pairs in [
            [("SERVER_PORT", "abc")],
            [("RANGE_POLICY", "strict")],
            [("SWEEP_SAMPLES", "0")],
            [("SWEEP_SAMPLES", "20000")],
        ] {
            let err = AppConfig::from_lookup(lookup(&pairs)).unwrap_err();
            assert!(matches!(err, AppError::Config(_)), "{pairs:?}");
        }
    }
}
