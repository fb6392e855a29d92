use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::refs::UserRef;

#[derive(Debug, Clone)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: UserRef,
    pub comments: Vec<Comment>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Embedded in the post document; no lifecycle of its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub author: UserRef,
    pub content: String,
}
