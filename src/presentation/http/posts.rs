use axum::{
    Form, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::ports::user_repository::UserRow;
use crate::application::use_cases::auth::profile::GetProfile;
use crate::application::use_cases::posts::add_comment::AddComment;
use crate::application::use_cases::posts::create_post::CreatePost;
use crate::application::use_cases::posts::get_post::GetPost;
use crate::application::use_cases::posts::list_posts::ListPosts;
use crate::bootstrap::app_context::AppContext;
use crate::domain::refs::UserRef;
use crate::presentation::http::session::CurrentUser;

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthorResponse {
    pub id: Uuid,
    pub username: String,
}

impl From<UserRow> for AuthorResponse {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
        }
    }
}

/// Feed shape: author hydrated, embedded comments raw.
#[derive(Debug, Serialize, ToSchema)]
pub struct CommentSummary {
    pub author_id: Uuid,
    pub content: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PostSummary {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: Option<AuthorResponse>,
    pub comments: Vec<CommentSummary>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PostListResponse {
    pub items: Vec<PostSummary>,
}

/// Single-post shape: every reference resolved; a deleted author reads as
/// null rather than failing the request.
#[derive(Debug, Serialize, ToSchema)]
pub struct CommentResponse {
    pub author: Option<AuthorResponse>,
    pub content: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: Option<AuthorResponse>,
    pub comments: Vec<CommentResponse>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub posts: Vec<PostSummary>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewPostForm {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewCommentForm {
    pub content: String,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/post/:id", get(get_post))
        .route("/post/:id/comments", axum::routing::post(add_comment))
        .route("/profile", get(profile))
        .with_state(ctx)
}

fn summarize(item: crate::application::use_cases::posts::list_posts::FeedItem) -> PostSummary {
    PostSummary {
        id: item.post.id,
        title: item.post.title,
        content: item.post.content,
        author: item.author.map(AuthorResponse::from),
        comments: item
            .post
            .comments
            .into_iter()
            .map(|c| CommentSummary {
                author_id: c.author.id(),
                content: c.content,
            })
            .collect(),
        created_at: item.post.created_at,
    }
}

#[utoipa::path(get, path = "/posts", tag = "Posts",
    responses((status = 200, body = PostListResponse)))]
pub async fn list_posts(
    State(ctx): State<AppContext>,
) -> Result<Json<PostListResponse>, StatusCode> {
    let posts = ctx.posts();
    let users = ctx.users();
    let uc = ListPosts {
        posts: posts.as_ref(),
        users: users.as_ref(),
    };
    let items = uc
        .execute()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .into_iter()
        .map(summarize)
        .collect();
    Ok(Json(PostListResponse { items }))
}

#[utoipa::path(post, path = "/posts", tag = "Posts",
    request_body(content = NewPostForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 303, description = "Redirects to / after creating")))]
pub async fn create_post(
    State(ctx): State<AppContext>,
    user: CurrentUser,
    Form(form): Form<NewPostForm>,
) -> Response {
    let posts = ctx.posts();
    let uc = CreatePost {
        posts: posts.as_ref(),
    };
    match uc
        .execute(UserRef(user.user_id), &form.title, &form.content)
        .await
    {
        Ok(post) => {
            tracing::info!(post_id = %post.id, author = %user.user_id, "post_created");
            Redirect::to("/").into_response()
        }
        Err(e) => {
            tracing::error!(error = ?e, "post_create_failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(get, path = "/post/{id}", tag = "Posts",
    params(("id" = Uuid, Path, description = "Post ID")),
    responses((status = 200, body = PostResponse), (status = 404)))]
pub async fn get_post(
    State(ctx): State<AppContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<PostResponse>, StatusCode> {
    let posts = ctx.posts();
    let users = ctx.users();
    let uc = GetPost {
        posts: posts.as_ref(),
        users: users.as_ref(),
    };
    let hydrated = uc
        .execute(id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(PostResponse {
        id: hydrated.post.id,
        title: hydrated.post.title,
        content: hydrated.post.content,
        author: hydrated.author.map(AuthorResponse::from),
        comments: hydrated
            .comments
            .into_iter()
            .map(|c| CommentResponse {
                author: c.author.map(AuthorResponse::from),
                content: c.comment.content,
            })
            .collect(),
        created_at: hydrated.post.created_at,
    }))
}

#[utoipa::path(post, path = "/post/{id}/comments", tag = "Posts",
    params(("id" = Uuid, Path, description = "Post ID")),
    request_body(content = NewCommentForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 303, description = "Redirects back to the post"), (status = 404)))]
pub async fn add_comment(
    State(ctx): State<AppContext>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Form(form): Form<NewCommentForm>,
) -> Response {
    let posts = ctx.posts();
    let uc = AddComment {
        posts: posts.as_ref(),
    };
    match uc.execute(id, UserRef(user.user_id), &form.content).await {
        Ok(true) => Redirect::to(&format!("/post/{id}")).into_response(),
        Ok(false) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            tracing::error!(error = ?e, post_id = %id, "comment_append_failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(get, path = "/profile", tag = "Posts",
    responses((status = 200, body = ProfileResponse)))]
pub async fn profile(
    State(ctx): State<AppContext>,
    user: CurrentUser,
) -> Result<Json<ProfileResponse>, StatusCode> {
    let users = ctx.users();
    let posts = ctx.posts();
    let uc = GetProfile {
        users: users.as_ref(),
        posts: posts.as_ref(),
    };
    let profile = uc
        .execute(user.user_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;
    let posts = profile
        .posts
        .into_iter()
        .map(|post| {
            let author = Some(AuthorResponse {
                id: profile.user.id,
                username: profile.user.username.clone(),
            });
            PostSummary {
                id: post.id,
                title: post.title,
                content: post.content,
                author,
                comments: post
                    .comments
                    .into_iter()
                    .map(|c| CommentSummary {
                        author_id: c.author.id(),
                        content: c.content,
                    })
                    .collect(),
                created_at: post.created_at,
            }
        })
        .collect();
    Ok(Json(ProfileResponse {
        id: profile.user.id,
        username: profile.user.username,
        email: profile.user.email,
        posts,
    }))
}
