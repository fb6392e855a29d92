use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::post_repository::PostRepository;
use crate::domain::blog::post::{Comment, Post};
use crate::domain::refs::UserRef;
use crate::infrastructure::db::PgPool;

pub struct SqlxPostRepository {
    pub pool: PgPool,
}

impl SqlxPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn post_from_row(row: &sqlx::postgres::PgRow) -> anyhow::Result<Post> {
    let comments: Vec<Comment> = serde_json::from_value(row.get("comments"))?;
    Ok(Post {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        author: UserRef(row.get("author_id")),
        comments,
        created_at: row.get("created_at"),
    })
}

const POST_COLUMNS: &str = "id, title, content, author_id, comments, created_at";

#[async_trait]
impl PostRepository for SqlxPostRepository {
    async fn create_post(
        &self,
        author: UserRef,
        title: &str,
        content: &str,
    ) -> anyhow::Result<Post> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO posts (id, title, content, author_id, comments, created_at)
               VALUES ($1, $2, $3, $4, '[]'::jsonb, now())
               RETURNING {POST_COLUMNS}"#
        ))
        .bind(Uuid::new_v4())
        .bind(title)
        .bind(content)
        .bind(author.id())
        .fetch_one(&self.pool)
        .await?;
        post_from_row(&row)
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Post>> {
        let rows = sqlx::query(&format!(
            r#"SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC"#
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(post_from_row).collect()
    }

    async fn list_by_author(&self, author: UserRef) -> anyhow::Result<Vec<Post>> {
        let rows = sqlx::query(&format!(
            r#"SELECT {POST_COLUMNS} FROM posts WHERE author_id = $1 ORDER BY created_at DESC"#
        ))
        .bind(author.id())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(post_from_row).collect()
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Post>> {
        let row = sqlx::query(&format!(
            r#"SELECT {POST_COLUMNS} FROM posts WHERE id = $1"#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(post_from_row).transpose()
    }

    async fn append_comment(&self, post_id: Uuid, comment: &Comment) -> anyhow::Result<bool> {
        // Single-statement array concat: concurrent appenders cannot lose
        // each other's comment.
        let res = sqlx::query(r#"UPDATE posts SET comments = comments || $2::jsonb WHERE id = $1"#)
            .bind(post_id)
            .bind(serde_json::to_value([comment])?)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
