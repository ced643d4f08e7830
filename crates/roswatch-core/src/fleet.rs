// ── Fleet aggregation ──
//
// The central failure-isolation layer: one unreachable device must never
// abort or blank out the scrape for the others. Sessions are iterated in
// registration order so results stay deterministic for a fixed fleet.

use futures_util::future::join_all;
use tracing::{debug, warn};

use crate::convert::Record;
use crate::session::{DeviceSession, Facet};

/// The set of configured device sessions, in registration order.
pub struct Fleet {
    sessions: Vec<DeviceSession>,
}

impl Fleet {
    pub fn new(sessions: Vec<DeviceSession>) -> Self {
        Self { sessions }
    }

    /// The registered sessions, in registration order.
    pub fn sessions(&self) -> &[DeviceSession] {
        &self.sessions
    }

    /// Collect one facet from every connected session.
    ///
    /// Disconnected sessions are skipped without being called. The calls
    /// run concurrently across sessions (each owns its own connection);
    /// `join_all` preserves registration order. A session that errors
    /// contributes nothing for this facet -- the failure is logged here,
    /// once, and a lost connection additionally marks the session
    /// disconnected so the remaining facets of this cycle skip it.
    pub async fn collect(&mut self, facet: Facet) -> Vec<Record> {
        let calls = self
            .sessions
            .iter_mut()
            .filter(|s| s.is_connected())
            .map(|session| async move {
                let result = session.fetch(facet).await;
                (session, result)
            });

        let mut records = Vec::new();
        for (session, result) in join_all(calls).await {
            match result {
                Ok(batch) => records.extend(batch),
                Err(err) => {
                    warn!(device = %session.name(), facet = %facet, error = %err,
                        "collection failed; no records from this device this cycle");
                    if err.is_connection_lost() {
                        session.mark_disconnected();
                    }
                }
            }
        }
        records
    }

    /// Attempt to reconnect every session. Called exactly once at the end
    /// of each full collection pass, however many facets failed.
    pub async fn reconnect_all(&mut self) {
        for session in &mut self.sessions {
            session.reconnect().await;
        }
        debug!(
            connected = self.sessions.iter().filter(|s| s.is_connected()).count(),
            total = self.sessions.len(),
            "reconnect pass complete"
        );
    }
}
