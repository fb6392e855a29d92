use uuid::Uuid;

use crate::application::ports::post_repository::PostRepository;
use crate::application::ports::user_repository::{UserRepository, UserRow};
use crate::domain::blog::post::Post;
use crate::domain::refs::UserRef;

/// The caller's own record plus every post they authored.
pub struct GetProfile<'a, U: UserRepository + ?Sized, P: PostRepository + ?Sized> {
    pub users: &'a U,
    pub posts: &'a P,
}

#[derive(Debug)]
pub struct Profile {
    pub user: UserRow,
    pub posts: Vec<Post>,
}

impl<'a, U: UserRepository + ?Sized, P: PostRepository + ?Sized> GetProfile<'a, U, P> {
    pub async fn execute(&self, user_id: Uuid) -> anyhow::Result<Option<Profile>> {
        let user = match self.users.find_by_id(user_id).await? {
            Some(u) => u,
            None => return Ok(None),
        };
        let posts = self.posts.list_by_author(UserRef(user_id)).await?;
        Ok(Some(Profile { user, posts }))
    }
}
