use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::application::ports::session_store::FlashKind;
use crate::application::use_cases::auth::login::{
    Login as LoginUc, LoginOutcome, LoginRequest as LoginDto,
};
use crate::application::use_cases::auth::register::{
    Register as RegisterUc, RegisterRequest as RegisterDto,
};
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::pages;
use crate::presentation::http::session::{
    MaybeSession, build_session_cookie, clear_session_cookie, flash_redirect, set_cookie,
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/register", get(pages::register_page).post(register))
        .route("/login", get(pages::login_page).post(login))
        .route("/logout", get(logout))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/register", tag = "Auth",
    request_body(content = RegisterForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 303, description = "Redirects to /login on success, back to /register on failure")))]
pub async fn register(
    State(ctx): State<AppContext>,
    session: MaybeSession,
    Form(form): Form<RegisterForm>,
) -> Response {
    let users = ctx.users();
    let uc = RegisterUc {
        users: users.as_ref(),
    };
    let dto = RegisterDto {
        username: form.username,
        email: form.email,
        password: form.password,
    };
    match uc.execute(&dto).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "user_registered");
            flash_redirect(
                &ctx,
                session.0,
                FlashKind::Success,
                "You are now registered and can log in.",
                "/login",
            )
            .await
        }
        // Duplicate usernames land here too: the unique index refuses them.
        Err(e) => {
            tracing::warn!(error = ?e, "register_failed");
            flash_redirect(
                &ctx,
                session.0,
                FlashKind::Error,
                "Error registering user.",
                "/register",
            )
            .await
        }
    }
}

#[utoipa::path(post, path = "/login", tag = "Auth",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 303, description = "Redirects to the app landing page on success, back to /login on failure")))]
pub async fn login(
    State(ctx): State<AppContext>,
    session: MaybeSession,
    Form(form): Form<LoginForm>,
) -> Response {
    let users = ctx.users();
    let uc = LoginUc {
        users: users.as_ref(),
    };
    let dto = LoginDto {
        username: form.username,
        password: form.password,
    };
    match uc.execute(&dto).await {
        Ok(LoginOutcome::Authenticated(user)) => {
            // Rotate: the pre-login session (and its token) never carries an
            // authenticated identity.
            if let Some(old) = session.0 {
                if let Err(e) = ctx.sessions().destroy(&old.token).await {
                    tracing::warn!(error = ?e, "stale_session_destroy_failed");
                }
            }
            let rec = match ctx
                .sessions()
                .create(Some(user.id), ctx.cfg.session_ttl_secs)
                .await
            {
                Ok(rec) => rec,
                Err(e) => {
                    tracing::error!(error = ?e, "session_create_failed");
                    return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                }
            };
            tracing::info!(user_id = %user.id, "login_succeeded");
            let cookie = build_session_cookie(
                &rec.token,
                ctx.cfg.session_ttl_secs,
                ctx.cfg.is_production,
            );
            let mut res = Redirect::to(&ctx.cfg.login_landing).into_response();
            set_cookie(&mut res, &cookie);
            res
        }
        Ok(LoginOutcome::Denied(reason)) => {
            // One message for both branches; the reason stays in the logs.
            tracing::debug!(%reason, "login_denied");
            flash_redirect(
                &ctx,
                session.0,
                FlashKind::Error,
                "Invalid username or password.",
                "/login",
            )
            .await
        }
        Err(e) => {
            tracing::error!(error = ?e, "login_failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(get, path = "/logout", tag = "Auth",
    responses((status = 303, description = "Session destroyed, redirects to /")))]
pub async fn logout(State(ctx): State<AppContext>, session: MaybeSession) -> Response {
    if let Some(rec) = session.0 {
        if let Err(e) = ctx.sessions().destroy(&rec.token).await {
            tracing::error!(error = ?e, "session_destroy_failed");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    }
    let mut res = Redirect::to("/").into_response();
    set_cookie(&mut res, &clear_session_cookie(ctx.cfg.is_production));
    res
}
