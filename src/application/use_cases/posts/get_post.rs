use uuid::Uuid;

use crate::application::ports::post_repository::PostRepository;
use crate::application::ports::user_repository::{UserRepository, UserRow};
use crate::domain::blog::post::{Comment, Post};

/// Single post, fully hydrated: the post author and every comment author
/// resolved. A dangling reference hydrates to `None`.
pub struct GetPost<'a, P: PostRepository + ?Sized, U: UserRepository + ?Sized> {
    pub posts: &'a P,
    pub users: &'a U,
}

#[derive(Debug)]
pub struct HydratedComment {
    pub comment: Comment,
    pub author: Option<UserRow>,
}

#[derive(Debug)]
pub struct HydratedPost {
    pub post: Post,
    pub author: Option<UserRow>,
    pub comments: Vec<HydratedComment>,
}

impl<'a, P: PostRepository + ?Sized, U: UserRepository + ?Sized> GetPost<'a, P, U> {
    pub async fn execute(&self, id: Uuid) -> anyhow::Result<Option<HydratedPost>> {
        let post = match self.posts.find_by_id(id).await? {
            Some(p) => p,
            None => return Ok(None),
        };
        let author = post.author.resolve(self.users).await?;
        let mut comments = Vec::with_capacity(post.comments.len());
        for comment in &post.comments {
            let author = comment.author.resolve(self.users).await?;
            comments.push(HydratedComment {
                comment: comment.clone(),
                author,
            });
        }
        Ok(Some(HydratedPost {
            post,
            author,
            comments,
        }))
    }
}
