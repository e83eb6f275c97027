//! Per-session analysis state.
//!
//! Each session key holds exactly one report and its digest text, replaced
//! together by every completed analysis. Clients that send no session header
//! share the default key, which gives the single-user, last-write-wins
//! behaviour; distinct keys are fully isolated.

use http::HeaderMap;
use pulse_core::report::RawReport;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

pub const DEFAULT_SESSION: &str = "default";

/// Request header selecting a session
pub const SESSION_HEADER: &str = "x-pulse-session";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey(String);

impl SessionKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Key from the session header, falling back to the shared default
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(Self::new)
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionKey {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION)
    }
}

impl std::fmt::Display for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of one completed analysis
#[derive(Debug)]
pub struct AnalysisSnapshot {
    pub url: String,
    pub report: RawReport,
    pub digest_text: String,
}

/// Sessions kept before the least recently written one is evicted
pub const DEFAULT_MAX_SESSIONS: usize = 64;

#[derive(Debug)]
struct Slot {
    snapshot: Arc<AnalysisSnapshot>,
    written: u64,
}

#[derive(Debug, Default)]
struct Slots {
    entries: HashMap<SessionKey, Slot>,
    writes: u64,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    slots: Arc<RwLock<Slots>>,
    max_sessions: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_MAX_SESSIONS)
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding at most `max_sessions` keys (at least one)
    pub fn with_capacity(max_sessions: usize) -> Self {
        Self {
            slots: Arc::new(RwLock::new(Slots::default())),
            max_sessions: max_sessions.max(1),
        }
    }

    /// Replace report and digest for `key` in one write
    pub async fn record_analysis(
        &self,
        key: &SessionKey,
        url: impl Into<String>,
        report: RawReport,
        digest_text: String,
    ) {
        let snapshot = Arc::new(AnalysisSnapshot {
            url: url.into(),
            report,
            digest_text,
        });

        tracing::debug!("Recording analysis of {} for session {}", snapshot.url, key);

        let mut slots = self.slots.write().await;
        slots.writes += 1;
        let written = slots.writes;

        if !slots.entries.contains_key(key) && slots.entries.len() >= self.max_sessions {
            let oldest = slots
                .entries
                .iter()
                .min_by_key(|(_, slot)| slot.written)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                tracing::info!("Session limit {} reached, evicting {}", self.max_sessions, oldest);
                slots.entries.remove(&oldest);
            }
        }

        slots.entries.insert(key.clone(), Slot { snapshot, written });
    }

    pub async fn snapshot(&self, key: &SessionKey) -> Option<Arc<AnalysisSnapshot>> {
        self.slots
            .read()
            .await
            .entries
            .get(key)
            .map(|slot| slot.snapshot.clone())
    }

    pub async fn current_digest(&self, key: &SessionKey) -> Option<String> {
        self.snapshot(key).await.map(|s| s.digest_text.clone())
    }

    pub async fn current_report(&self, key: &SessionKey) -> Option<Arc<AnalysisSnapshot>> {
        self.snapshot(key).await
    }

    pub async fn session_count(&self) -> usize {
        self.slots.read().await.entries.len()
    }
}
