use uuid::Uuid;

use crate::application::ports::post_repository::PostRepository;
use crate::domain::blog::post::Comment;
use crate::domain::refs::UserRef;

pub struct AddComment<'a, R: PostRepository + ?Sized> {
    pub posts: &'a R,
}

impl<'a, R: PostRepository + ?Sized> AddComment<'a, R> {
    /// Returns false when the post no longer exists.
    pub async fn execute(
        &self,
        post_id: Uuid,
        author: UserRef,
        content: &str,
    ) -> anyhow::Result<bool> {
        let comment = Comment {
            author,
            content: content.to_string(),
        };
        self.posts.append_comment(post_id, &comment).await
    }
}
