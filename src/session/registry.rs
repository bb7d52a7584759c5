//! Registry of live bot sessions

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use uuid::Uuid;

/// Shared counters for one session, readable from HTTP handlers
#[derive(Debug)]
pub struct SessionHandle {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    ticks: AtomicU64,
    actions: AtomicU64,
    decision_micros: AtomicU64,
}

impl SessionHandle {
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            started_at: Utc::now(),
            ticks: AtomicU64::new(0),
            actions: AtomicU64::new(0),
            decision_micros: AtomicU64::new(0),
        }
    }

    /// Record one answered player view
    pub fn record_tick(&self, actions: usize, elapsed_micros: u64) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
        self.actions.fetch_add(actions as u64, Ordering::Relaxed);
        self.decision_micros
            .fetch_add(elapsed_micros, Ordering::Relaxed);
    }

    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    pub fn actions(&self) -> u64 {
        self.actions.load(Ordering::Relaxed)
    }

    pub fn summary(&self) -> SessionSummary {
        let ticks = self.ticks();
        let total_micros = self.decision_micros.load(Ordering::Relaxed);
        SessionSummary {
            session_id: self.id,
            started_at: self.started_at,
            ticks,
            actions: self.actions(),
            avg_decision_micros: if ticks == 0 { 0 } else { total_micros / ticks },
        }
    }
}

/// Point-in-time view of a session for the HTTP API
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub ticks: u64,
    pub actions: u64,
    pub avg_decision_micros: u64,
}

/// Registry of all live sessions
pub struct SessionRegistry {
    sessions: DashMap<Uuid, Arc<SessionHandle>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Create and register a handle under a fresh id
    pub fn open(&self) -> Arc<SessionHandle> {
        let handle = Arc::new(SessionHandle::new(Uuid::new_v4()));
        self.sessions.insert(handle.id, handle.clone());
        handle
    }

    pub fn get(&self, id: &Uuid) -> Option<Arc<SessionHandle>> {
        self.sessions.get(id).map(|s| s.value().clone())
    }

    pub fn remove(&self, id: &Uuid) -> Option<Arc<SessionHandle>> {
        self.sessions.remove(id).map(|(_, h)| h)
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Ticks answered across all live sessions
    pub fn total_ticks(&self) -> u64 {
        self.sessions.iter().map(|s| s.value().ticks()).sum()
    }

    /// Summaries ordered by start time
    pub fn summaries(&self) -> Vec<SessionSummary> {
        let mut out: Vec<SessionSummary> =
            self.sessions.iter().map(|s| s.value().summary()).collect();
        out.sort_by(|a, b| a.started_at.cmp(&b.started_at));
        out
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_and_remove_track_active_count() {
        let registry = SessionRegistry::new();
        let a = registry.open();
        let b = registry.open();
        assert_eq!(registry.active_sessions(), 2);

        a.record_tick(2, 100);
        b.record_tick(1, 50);
        b.record_tick(1, 150);
        assert_eq!(registry.total_ticks(), 3);
        assert_eq!(b.summary().avg_decision_micros, 100);

        assert!(registry.remove(&a.id).is_some());
        assert!(registry.get(&a.id).is_none());
        assert_eq!(registry.active_sessions(), 1);
    }
}
