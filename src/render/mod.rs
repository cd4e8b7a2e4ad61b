pub mod chart;
pub mod format;
pub mod panels;

use crate::models::{self, ImpactEstimate, SweepDomain};
use crate::state::SessionSnapshot;

/// Everything the Interactive Tool tab shows for one parameter state.
#[derive(Debug, Clone, serde::Serialize)]
pub struct InteractiveView {
    pub revision: u64,
    pub estimate: ImpactEstimate,
    pub adjusted_return_display: String,
    pub key_parameters: format::KeyParameters,
    pub chart: chart::ImpactChart,
}

/// One full recompute-and-render cycle: point estimate plus sweep.
pub fn interactive_view(snapshot: &SessionSnapshot, sample_count: usize) -> InteractiveView {
    let params = snapshot.parameters;
    let estimate = models::estimate(&params);
    let points = models::sweep(
        params.base_return,
        params.sensitivity,
        SweepDomain::default(),
        sample_count,
    );

    InteractiveView {
        revision: snapshot.revision,
        adjusted_return_display: format::percent(estimate.adjusted_return),
        key_parameters: format::KeyParameters::from(&params),
        chart: chart::impact_chart(&estimate, points),
        estimate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Parameters, Preset, RangePolicy};
    use crate::state::LastAction;
    use uuid::Uuid;

    fn snapshot_of(parameters: Parameters) -> SessionSnapshot {
        SessionSnapshot::build(Uuid::new_v4(), 0, parameters, RangePolicy::Reject, LastAction::Created)
    }

    #[test]
    fn test_view_for_lab2() {
        let snap = snapshot_of(Preset::Lab2.parameters());
        let view = interactive_view(&snap, 100);
        assert_eq!(view.adjusted_return_display, "-2.00%");
        assert_eq!(view.key_parameters.index_level, "15.0");
        assert_eq!(view.key_parameters.base_return, "10.00%");
        assert_eq!(view.key_parameters.sensitivity, "0.80");
        assert_eq!(view.chart.series.points.len(), 100);
    }

    #[test]
    fn test_view_respects_sample_count() {
        let snap = snapshot_of(Parameters::default());
        assert_eq!(interactive_view(&snap, 7).chart.series.points.len(), 7);
    }
}
