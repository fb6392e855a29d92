use crate::application::ports::post_repository::PostRepository;
use crate::application::ports::user_repository::{UserRepository, UserRow};
use crate::domain::blog::post::Post;

/// Public feed: author references resolved, embedded comments left raw.
pub struct ListPosts<'a, P: PostRepository + ?Sized, U: UserRepository + ?Sized> {
    pub posts: &'a P,
    pub users: &'a U,
}

#[derive(Debug)]
pub struct FeedItem {
    pub post: Post,
    pub author: Option<UserRow>,
}

impl<'a, P: PostRepository + ?Sized, U: UserRepository + ?Sized> ListPosts<'a, P, U> {
    pub async fn execute(&self) -> anyhow::Result<Vec<FeedItem>> {
        let posts = self.posts.list_all().await?;
        let mut items = Vec::with_capacity(posts.len());
        for post in posts {
            let author = post.author.resolve(self.users).await?;
            items.push(FeedItem { post, author });
        }
        Ok(items)
    }
}
