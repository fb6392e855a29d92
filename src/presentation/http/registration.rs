use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::application::use_cases::registration::create_account::CreateAccount;
use crate::bootstrap::app_context::AppContext;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/register", post(register_account))
        .with_state(ctx)
}

/// The minimal app has no session layer; the landing page is served as-is.
pub async fn index(State(ctx): State<AppContext>) -> Response {
    let path = std::path::Path::new(&ctx.cfg.static_dir).join("index.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            tracing::error!(error = ?e, page = %path.display(), "page_read_failed");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

#[utoipa::path(post, path = "/register", tag = "Registration",
    request_body(content = SignupForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Plain-text confirmation"),
        (status = 500, description = "Plain-text error")
    ))]
pub async fn register_account(
    State(ctx): State<AppContext>,
    Form(form): Form<SignupForm>,
) -> Response {
    let users = ctx.users();
    let uc = CreateAccount {
        users: users.as_ref(),
    };
    match uc
        .execute(&form.username, &form.email, &form.password)
        .await
    {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "account_created");
            "User registered successfully!".into_response()
        }
        Err(e) => {
            tracing::warn!(error = ?e, "account_create_failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Error registering user.").into_response()
        }
    }
}
