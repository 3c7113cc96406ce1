//! Per-session baseline store.
//!
//! Each session owns its baseline panel; writes are last-writer-wins within
//! a session and reads hand out a complete snapshot, so a simulation never
//! observes a partial update. Score history is retained for trend display
//! only and has no influence on scoring.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vitalyx_common::entities::{BehavioralProfile, BiomarkerPanel, Demographics};
use vitalyx_common::error::{Result, VitalyxError};

use crate::scorer::RiskLevel;

/// The immutable baseline context of one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineRecord {
    pub biomarkers: BiomarkerPanel,
    pub behavioral: Option<BehavioralProfile>,
    pub demographics: Option<Demographics>,
    pub established_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug)]
struct SessionEntry {
    baseline: BaselineRecord,
    history: Vec<ScoreRecord>,
}

/// Keyed store of session baselines. Safe to share behind an `Arc`; the
/// lock only serialises per-store access, the engine itself stays pure.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace (last-writer-wins) the baseline for a session.
    /// Replacing the baseline keeps the session's score history.
    pub fn establish_baseline(
        &self,
        session_id: Uuid,
        biomarkers: BiomarkerPanel,
        behavioral: Option<BehavioralProfile>,
        demographics: Option<Demographics>,
    ) {
        let record = BaselineRecord {
            biomarkers,
            behavioral,
            demographics,
            established_at: Utc::now(),
        };
        let mut sessions = self.sessions.write().expect("session lock poisoned");
        match sessions.get_mut(&session_id) {
            Some(entry) => entry.baseline = record,
            None => {
                sessions.insert(
                    session_id,
                    SessionEntry {
                        baseline: record,
                        history: Vec::new(),
                    },
                );
            }
        }
        tracing::info!(%session_id, "baseline established");
    }

    /// Consistent snapshot of the session baseline.
    pub fn baseline(&self, session_id: Uuid) -> Result<BaselineRecord> {
        let sessions = self.sessions.read().expect("session lock poisoned");
        sessions
            .get(&session_id)
            .map(|entry| entry.baseline.clone())
            .ok_or(VitalyxError::MissingBaseline(session_id))
    }

    pub fn has_baseline(&self, session_id: Uuid) -> bool {
        self.sessions
            .read()
            .expect("session lock poisoned")
            .contains_key(&session_id)
    }

    /// Append a computed score to the session's trend history.
    pub fn record_score(&self, session_id: Uuid, risk_score: u8, risk_level: RiskLevel) {
        let mut sessions = self.sessions.write().expect("session lock poisoned");
        if let Some(entry) = sessions.get_mut(&session_id) {
            entry.history.push(ScoreRecord {
                risk_score,
                risk_level,
                recorded_at: Utc::now(),
            });
        }
    }

    pub fn history(&self, session_id: Uuid) -> Result<Vec<ScoreRecord>> {
        let sessions = self.sessions.read().expect("session lock poisoned");
        sessions
            .get(&session_id)
            .map(|entry| entry.history.clone())
            .ok_or(VitalyxError::MissingBaseline(session_id))
    }

    /// Tear down a session. Returns false when the session did not exist.
    pub fn end_session(&self, session_id: Uuid) -> bool {
        let removed = self
            .sessions
            .write()
            .expect("session lock poisoned")
            .remove(&session_id)
            .is_some();
        if removed {
            tracing::info!(%session_id, "session ended");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel(ldl: f64) -> BiomarkerPanel {
        BiomarkerPanel {
            ldl: Some(ldl),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_baseline_is_an_error() {
        let store = SessionStore::new();
        let err = store.baseline(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, VitalyxError::MissingBaseline(_)));
    }

    #[test]
    fn test_establish_then_read_snapshot() {
        let store = SessionStore::new();
        let id = Uuid::new_v4();
        store.establish_baseline(id, panel(150.0), None, None);
        let baseline = store.baseline(id).unwrap();
        assert_eq!(baseline.biomarkers.ldl, Some(150.0));
    }

    #[test]
    fn test_replace_is_last_writer_wins_and_keeps_history() {
        let store = SessionStore::new();
        let id = Uuid::new_v4();
        store.establish_baseline(id, panel(150.0), None, None);
        store.record_score(id, 40, RiskLevel::Moderate);
        store.establish_baseline(id, panel(110.0), None, None);
        assert_eq!(store.baseline(id).unwrap().biomarkers.ldl, Some(110.0));
        assert_eq!(store.history(id).unwrap().len(), 1);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        store.establish_baseline(a, panel(150.0), None, None);
        store.establish_baseline(b, panel(90.0), None, None);
        assert_eq!(store.baseline(a).unwrap().biomarkers.ldl, Some(150.0));
        assert_eq!(store.baseline(b).unwrap().biomarkers.ldl, Some(90.0));
    }

    #[test]
    fn test_end_session_removes_baseline() {
        let store = SessionStore::new();
        let id = Uuid::new_v4();
        store.establish_baseline(id, panel(150.0), None, None);
        assert!(store.end_session(id));
        assert!(!store.end_session(id));
        assert!(store.baseline(id).is_err());
    }

    #[test]
    fn test_record_score_on_unknown_session_is_ignored() {
        let store = SessionStore::new();
        store.record_score(Uuid::new_v4(), 40, RiskLevel::Moderate);
        // No panic, no phantom session.
        assert!(!store.has_baseline(Uuid::new_v4()));
    }
}
