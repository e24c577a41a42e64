/// Per-session preferences
use songinfo_core::ResultsLimit;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory results-limit preference of each browser session
///
/// Preferences live as long as the process; nothing is persisted.
pub struct SessionStore {
    limits: RwLock<HashMap<Uuid, ResultsLimit>>,
    default_limit: ResultsLimit,
}

impl SessionStore {
    pub fn new(default_limit: ResultsLimit) -> Self {
        Self {
            limits: RwLock::new(HashMap::new()),
            default_limit,
        }
    }

    /// Limit used for sessions that have not chosen one
    pub fn default_limit(&self) -> ResultsLimit {
        self.default_limit
    }

    /// Results limit of a session
    pub async fn results_limit(&self, session: Uuid) -> ResultsLimit {
        self.limits
            .read()
            .await
            .get(&session)
            .copied()
            .unwrap_or(self.default_limit)
    }

    /// Store a session's results limit
    pub async fn set_results_limit(&self, session: Uuid, limit: ResultsLimit) {
        self.limits.write().await.insert(session, limit);
        tracing::debug!(%session, limit = limit.get(), "Results limit updated");
    }
}
