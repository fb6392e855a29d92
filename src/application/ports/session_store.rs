use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Server-side session state, keyed by the opaque token the client holds in
/// its `sid` cookie. `user_id` is `None` for anonymous sessions (created only
/// to carry flash notices across a redirect).
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub token: String,
    pub user_id: Option<Uuid>,
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

impl SessionRecord {
    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashKind {
    Success,
    Error,
}

/// One-shot notice: pushed by a write route, drained on the next page view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Mints a fresh session. Login passes `Some(user_id)`; flash-only
    /// sessions pass `None`.
    async fn create(
        &self,
        user_id: Option<Uuid>,
        ttl_secs: i64,
    ) -> anyhow::Result<SessionRecord>;
    /// Expired sessions are indistinguishable from absent ones.
    async fn find(&self, token: &str) -> anyhow::Result<Option<SessionRecord>>;
    async fn destroy(&self, token: &str) -> anyhow::Result<bool>;
    async fn push_flash(
        &self,
        token: &str,
        kind: FlashKind,
        message: &str,
    ) -> anyhow::Result<()>;
    /// Drains atomically; a second call returns nothing.
    async fn take_flash(&self, token: &str) -> anyhow::Result<Vec<Flash>>;
    async fn purge_expired(&self) -> anyhow::Result<u64>;
}
