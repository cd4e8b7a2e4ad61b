use crate::config::AppConfig;
use crate::errors::AppResult;
use crate::models;
use crate::params::{Field, Parameters, Preset, RangePolicy};
use crate::render::format;
use portable_atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use uuid::Uuid;

// ── Commands INTO the session task (bounded channel) ──

/// One discrete input event. Each carries a reply channel so the HTTP
/// handler can return the post-update snapshot.
#[derive(Debug)]
pub enum SessionCommand {
    SetField {
        field: Field,
        value: f64,
        reply: oneshot::Sender<AppResult<SessionSnapshot>>,
    },
    Reset {
        reply: oneshot::Sender<SessionSnapshot>,
    },
    ApplyPreset {
        preset: Preset,
        reply: oneshot::Sender<SessionSnapshot>,
    },
    Shutdown,
}

// ── What changed last ──

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LastAction {
    Created,
    Set { field: Field, requested: f64, stored: f64 },
    Reset,
    Preset { preset: Preset },
}

impl std::fmt::Display for LastAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Set { field, stored, .. } => write!(f, "set {field}={stored}"),
            Self::Reset => write!(f, "reset"),
            Self::Preset { preset } => write!(f, "preset {preset}"),
        }
    }
}

// ── Session snapshot for dashboard (sent via watch channel) ──

#[derive(Debug, Clone, serde::Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    /// Incremented once per applied mutation
    pub revision: u64,
    pub parameters: Parameters,
    pub adjusted_return: f64,
    pub adjusted_return_display: String,
    pub in_range: bool,
    pub range_policy: RangePolicy,
    pub last_action: LastAction,
    pub updated_at: String,
}

impl SessionSnapshot {
    pub fn build(
        session_id: Uuid,
        revision: u64,
        parameters: Parameters,
        range_policy: RangePolicy,
        last_action: LastAction,
    ) -> Self {
        let adjusted_return = models::estimate(&parameters).adjusted_return;
        Self {
            session_id,
            revision,
            parameters,
            adjusted_return,
            adjusted_return_display: format::percent(adjusted_return),
            in_range: parameters.in_range(),
            range_policy,
            last_action,
            updated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

// ── Messages OUT to WebSocket clients ──

#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "type")]
pub enum WsMessage {
    #[serde(rename = "snapshot")]
    Snapshot(SessionSnapshot),

    #[serde(rename = "write_rejected")]
    WriteRejected {
        field: Field,
        value: f64,
        reason: String,
    },
}

// ── Counters (lock-free) ──

pub struct PerfCounters {
    pub commands_processed: AtomicU64,
    pub recomputations: AtomicU64,
    pub rejected_writes: AtomicU64,
    pub views_rendered: AtomicU64,
    pub ws_messages_sent: AtomicU64,
}

impl PerfCounters {
    pub fn new() -> Self {
        Self {
            commands_processed: AtomicU64::new(0),
            recomputations: AtomicU64::new(0),
            rejected_writes: AtomicU64::new(0),
            views_rendered: AtomicU64::new(0),
            ws_messages_sent: AtomicU64::new(0),
        }
    }
}

// ── Application shared state (channels, not locks) ──

pub struct AppState {
    pub config: AppConfig,
    pub session_id: Uuid,

    // Session -> Dashboard: latest snapshot (watch = single producer, multi consumer)
    pub snapshot_tx: watch::Sender<SessionSnapshot>,
    pub snapshot_rx: watch::Receiver<SessionSnapshot>,

    // Session -> Dashboard: event stream (broadcast for WS clients)
    pub ws_tx: broadcast::Sender<WsMessage>,

    // Handlers -> Session: bounded command channel
    pub session_tx: mpsc::Sender<SessionCommand>,

    pub counters: PerfCounters,
}

impl AppState {
    pub fn new(config: AppConfig, session_tx: mpsc::Sender<SessionCommand>) -> Arc<Self> {
        let session_id = Uuid::new_v4();
        let initial = SessionSnapshot::build(
            session_id,
            0,
            Parameters::default(),
            config.range_policy,
            LastAction::Created,
        );
        let (ws_tx, _) = broadcast::channel(256);
        let (snapshot_tx, snapshot_rx) = watch::channel(initial);

        Arc::new(Self {
            config,
            session_id,
            snapshot_tx,
            snapshot_rx,
            ws_tx,
            session_tx,
            counters: PerfCounters::new(),
        })
    }

    #[inline]
    pub fn broadcast(&self, msg: WsMessage) {
        self.counters.ws_messages_sent.fetch_add(1, Ordering::Relaxed);
        let _ = self.ws_tx.send(msg);
    }

    #[inline]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Send a command built around a fresh reply channel and await the reply.
    pub async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> SessionCommand,
    ) -> AppResult<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.session_tx.send(build(reply_tx)).await?;
        Ok(reply_rx.await?)
    }
}
