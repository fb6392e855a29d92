use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::application::ports::session_store::SessionRecord;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::session::{CurrentUser, MaybeSession, append_flash_headers};

/// Serves a static page and drains the caller's flash notices onto the
/// response headers.
async fn serve_page(
    ctx: &AppContext,
    session: Option<SessionRecord>,
    file: &'static str,
) -> Response {
    let path = std::path::Path::new(&ctx.cfg.static_dir).join(file);
    let body = match tokio::fs::read_to_string(&path).await {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = ?e, page = %path.display(), "page_read_failed");
            return StatusCode::NOT_FOUND.into_response();
        }
    };
    let mut res = Html(body).into_response();
    if let Some(rec) = session {
        match ctx.sessions().take_flash(&rec.token).await {
            Ok(flashes) => append_flash_headers(&flashes, res.headers_mut()),
            // Losing a notice is not worth failing the page for.
            Err(e) => tracing::warn!(error = ?e, "flash_drain_failed"),
        }
    }
    res
}

pub async fn index(State(ctx): State<AppContext>, session: MaybeSession) -> Response {
    serve_page(&ctx, session.0, "index.html").await
}

pub async fn register_page(State(ctx): State<AppContext>, session: MaybeSession) -> Response {
    serve_page(&ctx, session.0, "register.html").await
}

pub async fn login_page(State(ctx): State<AppContext>, session: MaybeSession) -> Response {
    serve_page(&ctx, session.0, "login.html").await
}

pub async fn new_post_page(State(ctx): State<AppContext>, user: CurrentUser) -> Response {
    serve_page(&ctx, Some(user.session), "new.html").await
}

pub async fn dashboard_page(State(ctx): State<AppContext>, user: CurrentUser) -> Response {
    serve_page(&ctx, Some(user.session), "dashboard.html").await
}
