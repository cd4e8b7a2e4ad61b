use crate::params::Parameters;

/// Default sweep domain: the full VIX slider range.
pub const DEFAULT_DOMAIN: SweepDomain = SweepDomain { min: 10.0, max: 50.0 };

/// Default number of sweep samples, matching the dashboard chart resolution.
pub const DEFAULT_SAMPLES: usize = 100;

/// Adjusted market return under a volatility drag.
///
/// adjusted = base_return - (index_level / 100) * sensitivity
///
/// Pure and total. No range checks: callers that need bounded inputs go
/// through `ParameterStore`. This is a teaching simplification, not the CBOE
/// VIX computation.
#[inline]
pub fn adjusted_return(index_level: f64, base_return: f64, sensitivity: f64) -> f64 {
    base_return - volatility_drag(index_level, sensitivity)
}

/// The amount subtracted from the base return.
#[inline]
pub fn volatility_drag(index_level: f64, sensitivity: f64) -> f64 {
    (index_level / 100.0) * sensitivity
}

/// Closed index-level interval swept for the chart.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SweepDomain {
    pub min: f64,
    pub max: f64,
}

impl SweepDomain {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Index level of sample `i` out of `count`, evenly spaced with both
    /// endpoints included. The last sample lands on `max` exactly.
    #[inline]
    fn sample(&self, i: usize, count: usize) -> f64 {
        if count <= 1 || i == 0 {
            return self.min;
        }
        if i == count - 1 {
            return self.max;
        }
        let step = (self.max - self.min) / (count - 1) as f64;
        self.min + step * i as f64
    }
}

impl Default for SweepDomain {
    fn default() -> Self {
        DEFAULT_DOMAIN
    }
}

/// One (index_level, adjusted_return) pair of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ImpactPoint {
    pub index_level: f64,
    pub adjusted_return: f64,
}

/// Evaluate the formula at `sample_count` evenly spaced index levels across
/// `domain`, holding the other two inputs fixed.
///
/// `sample_count == 0` yields an empty vector; `1` yields the domain start.
pub fn sweep(
    base_return: f64,
    sensitivity: f64,
    domain: SweepDomain,
    sample_count: usize,
) -> Vec<ImpactPoint> {
    (0..sample_count)
        .map(|i| {
            let index_level = domain.sample(i, sample_count);
            ImpactPoint {
                index_level,
                adjusted_return: adjusted_return(index_level, base_return, sensitivity),
            }
        })
        .collect()
}

/// Point estimate for the current parameters.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ImpactEstimate {
    pub parameters: Parameters,
    pub volatility_drag: f64,
    pub adjusted_return: f64,
}

pub fn estimate(params: &Parameters) -> ImpactEstimate {
    ImpactEstimate {
        parameters: *params,
        volatility_drag: volatility_drag(params.index_level, params.sensitivity),
        adjusted_return: adjusted_return(
            params.index_level,
            params.base_return,
            params.sensitivity,
        ),
    }
}
