use async_trait::async_trait;
use base64::Engine as _;
use rand::RngCore;
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::session_store::{Flash, FlashKind, SessionRecord, SessionStore};
use crate::infrastructure::db::PgPool;

pub struct SqlxSessionStore {
    pub pool: PgPool,
}

impl SqlxSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// 32 random bytes, URL-safe encoded; the token is the session's only key.
fn mint_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

#[async_trait]
impl SessionStore for SqlxSessionStore {
    async fn create(
        &self,
        user_id: Option<Uuid>,
        ttl_secs: i64,
    ) -> anyhow::Result<SessionRecord> {
        let token = mint_token();
        let expires_at = chrono::Utc::now() + chrono::Duration::seconds(ttl_secs.max(0));
        sqlx::query(
            r#"INSERT INTO sessions (token, user_id, flash, expires_at)
               VALUES ($1, $2, '[]'::jsonb, $3)"#,
        )
        .bind(&token)
        .bind(user_id)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;
        Ok(SessionRecord {
            token,
            user_id,
            expires_at,
        })
    }

    async fn find(&self, token: &str) -> anyhow::Result<Option<SessionRecord>> {
        let row = sqlx::query(
            r#"SELECT token, user_id, expires_at FROM sessions
               WHERE token = $1 AND expires_at > now()"#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| SessionRecord {
            token: r.get("token"),
            user_id: r.get("user_id"),
            expires_at: r.get("expires_at"),
        }))
    }

    async fn destroy(&self, token: &str) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    async fn push_flash(
        &self,
        token: &str,
        kind: FlashKind,
        message: &str,
    ) -> anyhow::Result<()> {
        let flash = Flash {
            kind,
            message: message.to_string(),
        };
        sqlx::query(
            r#"UPDATE sessions SET flash = flash || $2::jsonb
               WHERE token = $1 AND expires_at > now()"#,
        )
        .bind(token)
        .bind(serde_json::to_value([flash])?)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn take_flash(&self, token: &str) -> anyhow::Result<Vec<Flash>> {
        // Clear and return the old value in one statement so a notice is
        // delivered exactly once.
        let row = sqlx::query(
            r#"UPDATE sessions s SET flash = '[]'::jsonb
               FROM (SELECT token, flash FROM sessions WHERE token = $1 FOR UPDATE) old
               WHERE s.token = old.token
               RETURNING old.flash AS flash"#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        match row {
            Some(r) => Ok(serde_json::from_value(r.get("flash"))?),
            None => Ok(Vec::new()),
        }
    }

    async fn purge_expired(&self) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM sessions WHERE expires_at <= now()")
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn tokens_are_long_unique_and_cookie_safe() {
        let mut seen = HashSet::new();
        for _ in 0..64 {
            let t = mint_token();
            assert_eq!(t.len(), 43);
            assert!(
                t.chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            );
            assert!(seen.insert(t));
        }
    }
}
