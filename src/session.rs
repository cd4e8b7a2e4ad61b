use crate::errors::AppResult;
use crate::params::{Field, ParameterStore};
use crate::state::{AppState, LastAction, SessionCommand, SessionSnapshot, WsMessage};
use portable_atomic::Ordering;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Session loop. Owns the parameter store; commands are applied strictly
/// one at a time so each input event gets a full recompute before the next.
pub async fn run_session(state: Arc<AppState>, mut rx: mpsc::Receiver<SessionCommand>) {
    tracing::info!(
        session = %state.session_id,
        policy = %state.config.range_policy,
        "session task started"
    );

    let mut session = Session::new(&state);

    while let Some(cmd) = rx.recv().await {
        state.counters.commands_processed.fetch_add(1, Ordering::Relaxed);
        if !session.process(cmd, &state) {
            break;
        }
    }

    tracing::info!(session = %state.session_id, "session task shutting down");
}

/// Local session state (owned, no locks needed).
struct Session {
    store: ParameterStore,
    revision: u64,
}

impl Session {
    fn new(state: &AppState) -> Self {
        Self {
            store: ParameterStore::new(state.config.range_policy),
            revision: 0,
        }
    }

    /// Apply one command. Returns false when the loop should stop.
    fn process(&mut self, cmd: SessionCommand, state: &AppState) -> bool {
        match cmd {
            SessionCommand::SetField { field, value, reply } => {
                let result = self.set_field(field, value, state);
                if let Err(e) = &result {
                    state.counters.rejected_writes.fetch_add(1, Ordering::Relaxed);
                    tracing::warn!(field = %field, value, error = %e, "parameter write rejected");
                    state.broadcast(WsMessage::WriteRejected {
                        field,
                        value,
                        reason: e.to_string(),
                    });
                }
                let _ = reply.send(result);
            }

            SessionCommand::Reset { reply } => {
                self.store.reset();
                let _ = reply.send(self.publish(LastAction::Reset, state));
            }

            SessionCommand::ApplyPreset { preset, reply } => {
                self.store.apply_preset(preset);
                let _ = reply.send(self.publish(LastAction::Preset { preset }, state));
            }

            SessionCommand::Shutdown => {
                tracing::info!("shutdown command received");
                return false;
            }
        }
        true
    }

    fn set_field(
        &mut self,
        field: Field,
        value: f64,
        state: &AppState,
    ) -> AppResult<SessionSnapshot> {
        let previous = self.store.get_field(field);
        let stored = self.store.set(field, value)?;
        if stored != value {
            tracing::debug!(field = %field, requested = value, stored, "value clamped");
        }
        tracing::debug!(field = %field, previous, stored, "parameter written");
        let action = LastAction::Set {
            field,
            requested: value,
            stored,
        };
        Ok(self.publish(action, state))
    }

    /// Recompute, bump the revision and push the new snapshot out.
    fn publish(&mut self, action: LastAction, state: &AppState) -> SessionSnapshot {
        self.revision += 1;
        let snapshot = SessionSnapshot::build(
            state.session_id,
            self.revision,
            self.store.get(),
            self.store.policy(),
            action,
        );
        state.counters.recomputations.fetch_add(1, Ordering::Relaxed);

        tracing::info!(
            revision = snapshot.revision,
            action = %action,
            index_level = snapshot.parameters.index_level,
            base_return = snapshot.parameters.base_return,
            sensitivity = snapshot.parameters.sensitivity,
            adjusted_return = snapshot.adjusted_return,
            "parameters updated"
        );

        let _ = state.snapshot_tx.send(snapshot.clone());
        state.broadcast(WsMessage::Snapshot(snapshot.clone()));
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::errors::AppError;
    use crate::params::{Field, Parameters, Preset, RangePolicy};

    fn spawn_session(policy: RangePolicy) -> Arc<AppState> {
        let (tx, rx) = mpsc::channel(16);
        let config = AppConfig {
            range_policy: policy,
            ..AppConfig::default()
        };
        let state = AppState::new(config, tx);
        tokio::spawn(run_session(state.clone(), rx));
        state
    }

    #[tokio::test]
    async fn test_preset_then_reset() {
        let state = spawn_session(RangePolicy::Reject);

        let snap = state
            .request(|reply| SessionCommand::ApplyPreset { preset: Preset::Lab1, reply })
            .await
            .unwrap();
        assert_eq!(snap.parameters, Parameters::new(30.0, -0.05, 1.5));
        assert_eq!(snap.adjusted_return_display, "-50.00%");
        assert_eq!(snap.revision, 1);

        let snap = state
            .request(|reply| SessionCommand::Reset { reply })
            .await
            .unwrap();
        assert_eq!(snap.parameters, Parameters::new(20.0, 0.08, 1.0));
        assert_eq!(snap.revision, 2);

        // Watch channel carries the latest snapshot
        assert_eq!(state.snapshot().revision, 2);
    }

    #[tokio::test]
    async fn test_rejected_write_keeps_revision() {
        let state = spawn_session(RangePolicy::Reject);

        let result = state
            .request(|reply| SessionCommand::SetField {
                field: Field::BaseReturn,
                value: 0.5,
                reply,
            })
            .await
            .unwrap();
        assert!(matches!(result, Err(AppError::OutOfRange { .. })));
        assert_eq!(state.snapshot().revision, 0);
        assert_eq!(state.counters.rejected_writes.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn test_clamped_write_reports_stored_value() {
        let state = spawn_session(RangePolicy::Clamp);

        let snap = state
            .request(|reply| SessionCommand::SetField {
                field: Field::IndexLevel,
                value: 5.0,
                reply,
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(snap.parameters.index_level, 10.0);
        assert_eq!(
            snap.last_action,
            LastAction::Set {
                field: Field::IndexLevel,
                requested: 5.0,
                stored: 10.0
            }
        );
    }

    #[tokio::test]
    async fn test_ws_subscribers_see_updates() {
        let state = spawn_session(RangePolicy::Permit);
        let mut rx = state.ws_tx.subscribe();

        state
            .request(|reply| SessionCommand::ApplyPreset { preset: Preset::Lab3, reply })
            .await
            .unwrap();

        match rx.recv().await.unwrap() {
            WsMessage::Snapshot(snap) => {
                assert_eq!(snap.parameters, Preset::Lab3.parameters());
                assert_eq!(snap.adjusted_return_display, "-90.00%");
            }
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_shutdown_closes_session() {
        let state = spawn_session(RangePolicy::Reject);
        state.session_tx.send(SessionCommand::Shutdown).await.unwrap();

        let err = state
            .request(|reply| SessionCommand::Reset { reply })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ChannelClosed(_)));
    }
}
