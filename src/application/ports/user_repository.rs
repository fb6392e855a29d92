use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::refs::UserRef;

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// Argon2 hash in the blog and money-tracker apps; the registration-form
    /// app writes the submitted string verbatim (see DESIGN.md).
    pub password: Option<String>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> anyhow::Result<UserRow>;
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<UserRow>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserRow>>;
}

impl UserRef {
    /// Follow the reference; `None` means it dangles.
    pub async fn resolve<R: UserRepository + ?Sized>(
        &self,
        repo: &R,
    ) -> anyhow::Result<Option<UserRow>> {
        repo.find_by_id(self.id()).await
    }
}
