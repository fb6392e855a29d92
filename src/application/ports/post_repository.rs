use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::blog::post::{Comment, Post};
use crate::domain::refs::UserRef;

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create_post(
        &self,
        author: UserRef,
        title: &str,
        content: &str,
    ) -> anyhow::Result<Post>;
    async fn list_all(&self) -> anyhow::Result<Vec<Post>>;
    async fn list_by_author(&self, author: UserRef) -> anyhow::Result<Vec<Post>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Post>>;
    /// Appends atomically at the store; returns false when the post is gone.
    async fn append_comment(&self, post_id: Uuid, comment: &Comment) -> anyhow::Result<bool>;
}
