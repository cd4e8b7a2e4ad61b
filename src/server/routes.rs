use crate::config::MAX_SWEEP_SAMPLES;
use crate::errors::{AppError, AppResult};
use crate::models::{self, ImpactPoint, SweepDomain};
use crate::params::{Field, FieldSpec, Preset, PresetInfo};
use crate::render::panels::{self, Panel};
use crate::render::{self, InteractiveView};
use crate::state::{AppState, SessionCommand, SessionSnapshot};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Json, Response};
use portable_atomic::Ordering;
use std::sync::Arc;

#[derive(Debug, serde::Deserialize)]
pub struct SweepQuery {
    pub samples: Option<usize>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Debug, serde::Deserialize)]
pub struct SetFieldBody {
    pub value: f64,
}

#[derive(Debug, serde::Serialize)]
pub struct SweepResponse {
    pub base_return: f64,
    pub sensitivity: f64,
    pub domain: SweepDomain,
    pub points: Vec<ImpactPoint>,
}

/// GET /api/state -- current session snapshot (from watch channel, no lock)
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<SessionSnapshot> {
    Json(state.snapshot())
}

/// GET /api/view -- Interactive Tool panel for the current parameters
pub async fn get_view(State(state): State<Arc<AppState>>) -> Json<InteractiveView> {
    Json(render_view(&state))
}

fn render_view(state: &AppState) -> InteractiveView {
    state.counters.views_rendered.fetch_add(1, Ordering::Relaxed);
    render::interactive_view(&state.snapshot(), state.config.sweep_samples)
}

/// GET /api/sweep -- raw sweep for the current base return and sensitivity
pub async fn get_sweep(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SweepQuery>, QueryRejection>,
) -> AppResult<Json<SweepResponse>> {
    let Query(q) = query?;
    let samples = q.samples.unwrap_or(state.config.sweep_samples);
    if samples > MAX_SWEEP_SAMPLES {
        return Err(AppError::InvalidInput(format!(
            "samples must be at most {MAX_SWEEP_SAMPLES}, got {samples}"
        )));
    }

    let default = SweepDomain::default();
    let domain = SweepDomain::new(q.min.unwrap_or(default.min), q.max.unwrap_or(default.max));
    if !domain.min.is_finite() || !domain.max.is_finite() {
        return Err(AppError::InvalidInput("sweep bounds must be finite".into()));
    }

    let params = state.snapshot().parameters;
    Ok(Json(SweepResponse {
        base_return: params.base_return,
        sensitivity: params.sensitivity,
        domain,
        points: models::sweep(params.base_return, params.sensitivity, domain, samples),
    }))
}

/// GET /api/fields -- slider metadata for every parameter
pub async fn get_fields() -> Json<Vec<FieldSpec>> {
    Json(Field::ALL.iter().map(|f| *f.spec()).collect())
}

/// PUT /api/params/{field} -- write one parameter under the range policy
pub async fn put_param(
    State(state): State<Arc<AppState>>,
    field: Result<Path<String>, PathRejection>,
    body: Result<Json<SetFieldBody>, JsonRejection>,
) -> AppResult<Json<SessionSnapshot>> {
    let Path(field) = field?;
    let field: Field = field.parse()?;
    let Json(body) = body?;
    let snapshot = state
        .request(|reply| SessionCommand::SetField {
            field,
            value: body.value,
            reply,
        })
        .await??;
    Ok(Json(snapshot))
}

/// POST /api/reset -- restore default parameters
pub async fn post_reset(State(state): State<Arc<AppState>>) -> AppResult<Json<SessionSnapshot>> {
    let snapshot = state.request(|reply| SessionCommand::Reset { reply }).await?;
    Ok(Json(snapshot))
}

/// GET /api/presets -- all presets with their values and lab guides
pub async fn get_presets() -> Json<Vec<PresetInfo>> {
    Json(Preset::ALL.into_iter().map(PresetInfo::from).collect())
}

/// POST /api/presets/{name} -- bulk-overwrite parameters from a preset
pub async fn post_preset(
    State(state): State<Arc<AppState>>,
    name: Result<Path<String>, PathRejection>,
) -> AppResult<Json<SessionSnapshot>> {
    let Path(name) = name?;
    let preset: Preset = name.parse()?;
    let snapshot = state
        .request(|reply| SessionCommand::ApplyPreset { preset, reply })
        .await?;
    Ok(Json(snapshot))
}

/// GET /api/panels -- tab list for the dashboard
pub async fn get_panels() -> Json<serde_json::Value> {
    let tabs: Vec<_> = Panel::TABS
        .iter()
        .map(|p| serde_json::json!({ "panel": p, "title": p.title() }))
        .collect();
    Json(serde_json::json!({ "tabs": tabs, "intro": panels::INTRO }))
}

/// GET /api/panels/{panel} -- panel content; the interactive tab is computed
pub async fn get_panel(
    State(state): State<Arc<AppState>>,
    name: Result<Path<String>, PathRejection>,
) -> AppResult<Response> {
    let Path(name) = name?;
    let panel: Panel = name.parse()?;
    let response = match panels::static_panel(panel) {
        Some(content) => Json(content).into_response(),
        None => Json(render_view(&state)).into_response(),
    };
    Ok(response)
}

/// GET /api/counters -- session counters (lock-free reads)
pub async fn get_counters(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    use portable_atomic::Ordering::Relaxed;
    Json(serde_json::json!({
        "commands_processed": state.counters.commands_processed.load(Relaxed),
        "recomputations": state.counters.recomputations.load(Relaxed),
        "rejected_writes": state.counters.rejected_writes.load(Relaxed),
        "views_rendered": state.counters.views_rendered.load(Relaxed),
        "ws_messages_sent": state.counters.ws_messages_sent.load(Relaxed),
    }))
}
