use crate::application::ports::post_repository::PostRepository;
use crate::domain::blog::post::Post;
use crate::domain::refs::UserRef;

pub struct CreatePost<'a, R: PostRepository + ?Sized> {
    pub posts: &'a R,
}

impl<'a, R: PostRepository + ?Sized> CreatePost<'a, R> {
    pub async fn execute(
        &self,
        author: UserRef,
        title: &str,
        content: &str,
    ) -> anyhow::Result<Post> {
        self.posts.create_post(author, title, content).await
    }
}
