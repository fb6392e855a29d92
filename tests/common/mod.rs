#![allow(dead_code)]

//! In-memory port implementations and router builders shared by the
//! integration tests. The routers mirror the binaries' wiring.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, header};
use axum::{Router, routing::get};
use uuid::Uuid;

use miniweb::application::ports::post_repository::PostRepository;
use miniweb::application::ports::session_store::{Flash, FlashKind, SessionRecord, SessionStore};
use miniweb::application::ports::transaction_repository::TransactionRepository;
use miniweb::application::ports::user_repository::{UserRepository, UserRow};
use miniweb::bootstrap::app_context::{AppContext, AppServices};
use miniweb::bootstrap::config::Config;
use miniweb::domain::blog::post::{Comment, Post};
use miniweb::domain::ledger::transaction::{Transaction, TransactionKind};
use miniweb::domain::refs::UserRef;
use miniweb::presentation::http::{auth, pages, posts, registration, transactions};

// --- Users ---

#[derive(Default)]
pub struct MemoryUsers {
    pub rows: Mutex<Vec<UserRow>>,
}

impl MemoryUsers {
    pub fn stored_password(&self, username: &str) -> Option<String> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .and_then(|u| u.password.clone())
    }
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn create_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> anyhow::Result<UserRow> {
        let mut rows = self.rows.lock().unwrap();
        // Same contract as the unique index in the real store.
        if rows.iter().any(|u| u.username == username) {
            anyhow::bail!("duplicate key value violates unique constraint \"users_username_key\"");
        }
        let row = UserRow {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: email.to_string(),
            password: Some(password.to_string()),
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<UserRow>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserRow>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .map(|u| UserRow {
                password: None,
                ..u.clone()
            }))
    }
}

// --- Posts ---

#[derive(Default)]
pub struct MemoryPosts {
    pub rows: Mutex<Vec<Post>>,
}

#[async_trait]
impl PostRepository for MemoryPosts {
    async fn create_post(
        &self,
        author: UserRef,
        title: &str,
        content: &str,
    ) -> anyhow::Result<Post> {
        let post = Post {
            id: Uuid::new_v4(),
            title: title.to_string(),
            content: content.to_string(),
            author,
            comments: Vec::new(),
            created_at: chrono::Utc::now(),
        };
        self.rows.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Post>> {
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn list_by_author(&self, author: UserRef) -> anyhow::Result<Vec<Post>> {
        let mut rows: Vec<Post> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.author == author)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Post>> {
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn append_comment(&self, post_id: Uuid, comment: &Comment) -> anyhow::Result<bool> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|p| p.id == post_id) {
            Some(post) => {
                post.comments.push(comment.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// --- Transactions ---

#[derive(Default)]
pub struct MemoryTransactions {
    pub rows: Mutex<Vec<Transaction>>,
}

#[async_trait]
impl TransactionRepository for MemoryTransactions {
    async fn create_transaction(
        &self,
        user: UserRef,
        kind: TransactionKind,
        amount: f64,
        description: &str,
    ) -> anyhow::Result<Transaction> {
        let tx = Transaction {
            id: Uuid::new_v4(),
            kind,
            amount,
            description: description.to_string(),
            user,
            date: chrono::Utc::now(),
        };
        self.rows.lock().unwrap().push(tx.clone());
        Ok(tx)
    }

    async fn list_for_user(&self, user: UserRef) -> anyhow::Result<Vec<Transaction>> {
        let mut rows: Vec<Transaction> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user == user)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows)
    }
}

// --- Sessions ---

struct SessionEntry {
    user_id: Option<Uuid>,
    expires_at: chrono::DateTime<chrono::Utc>,
    flash: Vec<Flash>,
}

#[derive(Default)]
pub struct MemorySessions {
    entries: Mutex<HashMap<String, SessionEntry>>,
}

#[async_trait]
impl SessionStore for MemorySessions {
    async fn create(
        &self,
        user_id: Option<Uuid>,
        ttl_secs: i64,
    ) -> anyhow::Result<SessionRecord> {
        let token = Uuid::new_v4().simple().to_string();
        let expires_at = chrono::Utc::now() + chrono::Duration::seconds(ttl_secs);
        self.entries.lock().unwrap().insert(
            token.clone(),
            SessionEntry {
                user_id,
                expires_at,
                flash: Vec::new(),
            },
        );
        Ok(SessionRecord {
            token,
            user_id,
            expires_at,
        })
    }

    async fn find(&self, token: &str) -> anyhow::Result<Option<SessionRecord>> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.get(token).and_then(|e| {
            (e.expires_at > chrono::Utc::now()).then(|| SessionRecord {
                token: token.to_string(),
                user_id: e.user_id,
                expires_at: e.expires_at,
            })
        }))
    }

    async fn destroy(&self, token: &str) -> anyhow::Result<bool> {
        Ok(self.entries.lock().unwrap().remove(token).is_some())
    }

    async fn push_flash(
        &self,
        token: &str,
        kind: FlashKind,
        message: &str,
    ) -> anyhow::Result<()> {
        if let Some(entry) = self.entries.lock().unwrap().get_mut(token) {
            entry.flash.push(Flash {
                kind,
                message: message.to_string(),
            });
        }
        Ok(())
    }

    async fn take_flash(&self, token: &str) -> anyhow::Result<Vec<Flash>> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get_mut(token)
            .map(|e| std::mem::take(&mut e.flash))
            .unwrap_or_default())
    }

    async fn purge_expired(&self) -> anyhow::Result<u64> {
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|_, e| e.expires_at > chrono::Utc::now());
        Ok((before - entries.len()) as u64)
    }
}

// --- App builders ---

pub struct TestApp {
    pub router: Router,
    pub users: Arc<MemoryUsers>,
    pub posts: Arc<MemoryPosts>,
    pub transactions: Arc<MemoryTransactions>,
    pub sessions: Arc<MemorySessions>,
}

fn test_config(static_dir: &str, login_landing: &str) -> Config {
    Config {
        port: 0,
        database_url: "postgres://unused".into(),
        static_dir: static_dir.into(),
        session_ttl_secs: 3600,
        session_sweep_secs: 300,
        login_landing: login_landing.into(),
        is_production: false,
    }
}

fn build(cfg: Config) -> (TestApp, AppContext) {
    let users = Arc::new(MemoryUsers::default());
    let posts = Arc::new(MemoryPosts::default());
    let transactions = Arc::new(MemoryTransactions::default());
    let sessions = Arc::new(MemorySessions::default());
    let services = AppServices::new(
        users.clone(),
        posts.clone(),
        transactions.clone(),
        sessions.clone(),
    );
    let ctx = AppContext::new(cfg, services);
    let app = TestApp {
        router: Router::new(),
        users,
        posts,
        transactions,
        sessions,
    };
    (app, ctx)
}

pub fn blog_app() -> TestApp {
    let (mut app, ctx) = build(test_config("public/blog", "/"));
    let page_routes = Router::new()
        .route("/", get(pages::index))
        .route("/new", get(pages::new_post_page))
        .with_state(ctx.clone());
    app.router = Router::new()
        .merge(auth::routes(ctx.clone()))
        .merge(posts::routes(ctx))
        .merge(page_routes);
    app
}

pub fn tracker_app() -> TestApp {
    let (mut app, ctx) = build(test_config("public/money_tracker", "/dashboard"));
    let page_routes = Router::new()
        .route("/", get(pages::index))
        .route("/dashboard", get(pages::dashboard_page))
        .with_state(ctx.clone());
    app.router = Router::new()
        .merge(auth::routes(ctx.clone()))
        .merge(transactions::routes(ctx))
        .merge(page_routes);
    app
}

pub fn registration_app() -> TestApp {
    let (mut app, ctx) = build(test_config("public/registration_form", "/"));
    app.router = registration::routes(ctx);
    app
}

// --- Request helpers ---

pub fn get_req(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn form_post(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Pulls the `sid=...` pair out of a Set-Cookie header.
pub fn session_cookie(res: &Response<axum::body::Body>) -> Option<String> {
    res.headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|s| s.to_string())
}

pub async fn body_string(res: Response<axum::body::Body>) -> String {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(res: Response<axum::body::Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Registers through the form route and logs in; returns the session cookie.
pub async fn register_and_login(app: &TestApp, username: &str, password: &str) -> String {
    use tower::util::ServiceExt;

    let body = format!("username={username}&email={username}%40example.com&password={password}");
    let res = app
        .router
        .clone()
        .oneshot(form_post("/register", &body, None))
        .await
        .unwrap();
    assert_eq!(res.status(), axum::http::StatusCode::SEE_OTHER);

    let body = format!("username={username}&password={password}");
    let res = app
        .router
        .clone()
        .oneshot(form_post("/login", &body, None))
        .await
        .unwrap();
    assert_eq!(res.status(), axum::http::StatusCode::SEE_OTHER);
    session_cookie(&res).expect("login should set a session cookie")
}
