use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use uuid::Uuid;

use crate::application::ports::session_store::{Flash, FlashKind, SessionRecord};
use crate::bootstrap::app_context::AppContext;

pub const SESSION_COOKIE: &str = "sid";

/// Flash notices ride on page responses as headers; the page bodies
/// themselves are static files.
pub const FLASH_SUCCESS_HEADER: &str = "x-flash-success";
pub const FLASH_ERROR_HEADER: &str = "x-flash-error";

// --- Cookie helpers ---

fn get_cookie(cookie_header: &str, name: &str) -> Option<String> {
    for part in cookie_header.split(';') {
        let kv = part.trim();
        if let Some((k, v)) = kv.split_once('=') {
            if k.trim() == name {
                return Some(v.trim().to_string());
            }
        }
    }
    None
}

pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| get_cookie(h, SESSION_COOKIE))
}

pub fn build_session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    // SameSite=Lax: all forms post same-site.
    let secure_attr = if secure { "; Secure" } else { "" };
    format!(
        "{}={}; HttpOnly{}; Path=/; Max-Age={}; SameSite=Lax",
        SESSION_COOKIE,
        token,
        secure_attr,
        max_age_secs.max(0)
    )
}

pub fn clear_session_cookie(secure: bool) -> String {
    let secure_attr = if secure { "; Secure" } else { "" };
    format!(
        "{}=; HttpOnly{}; Path=/; Max-Age=0; SameSite=Lax",
        SESSION_COOKIE, secure_attr
    )
}

pub fn set_cookie(res: &mut Response, cookie: &str) {
    res.headers_mut().insert(
        axum::http::header::SET_COOKIE,
        HeaderValue::from_str(cookie).unwrap_or(HeaderValue::from_static("")),
    );
}

pub fn append_flash_headers(flashes: &[Flash], headers: &mut HeaderMap) {
    for flash in flashes {
        let name = match flash.kind {
            FlashKind::Success => HeaderName::from_static(FLASH_SUCCESS_HEADER),
            FlashKind::Error => HeaderName::from_static(FLASH_ERROR_HEADER),
        };
        if let Ok(value) = HeaderValue::from_str(&flash.message) {
            headers.append(name, value);
        }
    }
}

// --- Extractors ---

/// Whatever live session the request carries, if any.
pub struct MaybeSession(pub Option<SessionRecord>);

#[axum::async_trait]
impl FromRequestParts<AppContext> for MaybeSession {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = session_token(&parts.headers) else {
            return Ok(MaybeSession(None));
        };
        let rec = ctx
            .sessions()
            .find(&token)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
        Ok(MaybeSession(rec))
    }
}

/// Authentication gate. Unauthenticated callers are redirected to the login
/// page rather than refused with a 401; every gated route in these apps is
/// reached from a browser.
pub struct CurrentUser {
    pub user_id: Uuid,
    pub session: SessionRecord,
}

fn login_redirect() -> Response {
    Redirect::to("/login").into_response()
}

#[axum::async_trait]
impl FromRequestParts<AppContext> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = session_token(&parts.headers) else {
            return Err(login_redirect());
        };
        let rec = ctx
            .sessions()
            .find(&token)
            .await
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())?;
        match rec {
            Some(session) if session.is_authenticated() => match session.user_id {
                Some(user_id) => Ok(CurrentUser { user_id, session }),
                None => Err(login_redirect()),
            },
            _ => Err(login_redirect()),
        }
    }
}

// --- Flash-carrying redirects ---

/// Leaves a one-shot notice for the next page view, minting an anonymous
/// session when the caller doesn't have one yet.
pub async fn flash_redirect(
    ctx: &AppContext,
    incoming: Option<SessionRecord>,
    kind: FlashKind,
    message: &str,
    to: &str,
) -> Response {
    let (token, fresh_cookie) = match incoming {
        Some(rec) => (rec.token, None),
        None => match ctx.sessions().create(None, ctx.cfg.session_ttl_secs).await {
            Ok(rec) => {
                let cookie = build_session_cookie(
                    &rec.token,
                    ctx.cfg.session_ttl_secs,
                    ctx.cfg.is_production,
                );
                (rec.token, Some(cookie))
            }
            Err(e) => {
                tracing::error!(error = ?e, "session_create_failed");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        },
    };
    if let Err(e) = ctx.sessions().push_flash(&token, kind, message).await {
        tracing::error!(error = ?e, "flash_push_failed");
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let mut res = Redirect::to(to).into_response();
    if let Some(cookie) = fresh_cookie {
        set_cookie(&mut res, &cookie);
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_header_parsing_picks_the_right_pair() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::COOKIE,
            HeaderValue::from_static("theme=dark; sid=abc123; lang=en"),
        );
        assert_eq!(session_token(&headers).as_deref(), Some("abc123"));

        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::COOKIE,
            HeaderValue::from_static("theme=dark"),
        );
        assert_eq!(session_token(&headers), None);
    }

    #[test]
    fn session_cookie_attributes() {
        let cookie = build_session_cookie("tok", 3600, false);
        assert!(cookie.starts_with("sid=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=3600"));
        assert!(!cookie.contains("Secure"));

        let cookie = build_session_cookie("tok", -5, true);
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("Max-Age=0"));

        assert!(clear_session_cookie(false).contains("Max-Age=0"));
    }
}
