use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::MatchedPath;
use axum::{Router, routing::get};
use dotenvy::dotenv;
use tokio::task::JoinHandle;
use tokio::time::{Duration, sleep};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use miniweb::bootstrap::app_context::{AppContext, AppServices};
use miniweb::bootstrap::config::{AppDefaults, Config};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        miniweb::presentation::http::auth::register,
        miniweb::presentation::http::auth::login,
        miniweb::presentation::http::auth::logout,
        miniweb::presentation::http::posts::list_posts,
        miniweb::presentation::http::posts::create_post,
        miniweb::presentation::http::posts::get_post,
        miniweb::presentation::http::posts::add_comment,
        miniweb::presentation::http::posts::profile,
        miniweb::presentation::http::health::health,
    ),
    components(schemas(
        miniweb::presentation::http::auth::RegisterForm,
        miniweb::presentation::http::auth::LoginForm,
        miniweb::presentation::http::posts::AuthorResponse,
        miniweb::presentation::http::posts::CommentSummary,
        miniweb::presentation::http::posts::CommentResponse,
        miniweb::presentation::http::posts::PostSummary,
        miniweb::presentation::http::posts::PostResponse,
        miniweb::presentation::http::posts::PostListResponse,
        miniweb::presentation::http::posts::ProfileResponse,
        miniweb::presentation::http::posts::NewPostForm,
        miniweb::presentation::http::posts::NewCommentForm,
        miniweb::presentation::http::health::HealthResp,
    )),
    tags(
        (name = "Auth", description = "Registration, login, sessions"),
        (name = "Posts", description = "Public feed and authenticated writes"),
        (name = "Health", description = "System health checks")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "miniweb=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env(AppDefaults {
        port: 3000,
        database: "blog",
        static_dir: "public/blog",
        login_landing: "/",
    })?;
    info!(?cfg, "Starting blog backend");

    let pool = miniweb::infrastructure::db::connect_pool(&cfg.database_url).await?;
    miniweb::infrastructure::db::migrate_blog(&pool).await?;

    let users = Arc::new(
        miniweb::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository::new(
            pool.clone(),
        ),
    );
    let posts = Arc::new(
        miniweb::infrastructure::db::repositories::post_repository_sqlx::SqlxPostRepository::new(
            pool.clone(),
        ),
    );
    let transactions = Arc::new(
        miniweb::infrastructure::db::repositories::transaction_repository_sqlx::SqlxTransactionRepository::new(
            pool.clone(),
        ),
    );
    let sessions = Arc::new(
        miniweb::infrastructure::db::repositories::session_store_sqlx::SqlxSessionStore::new(
            pool.clone(),
        ),
    );

    let services = AppServices::new(users, posts, transactions, sessions);
    let ctx = AppContext::new(cfg.clone(), services);

    let pages = Router::new()
        .route("/", get(miniweb::presentation::http::pages::index))
        .route("/new", get(miniweb::presentation::http::pages::new_post_page))
        .with_state(ctx.clone());

    let app = Router::new()
        .nest(
            "/api",
            miniweb::presentation::http::health::routes(pool.clone(), "blog"),
        )
        .merge(miniweb::presentation::http::auth::routes(ctx.clone()))
        .merge(miniweb::presentation::http::posts::routes(ctx.clone()))
        .merge(pages)
        .nest_service("/assets", ServeDir::new(&cfg.static_dir))
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    // Background reaping of expired sessions
    let sweep_sessions = ctx.sessions();
    let sweep_interval = Duration::from_secs(cfg.session_sweep_secs);
    let sweep_handle = tokio::spawn(async move {
        loop {
            match sweep_sessions.purge_expired().await {
                Ok(purged) if purged > 0 => tracing::debug!(purged, "sessions_purged"),
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "session_sweep_failed"),
            }
            sleep(sweep_interval).await;
        }
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    info!(%addr, "HTTP listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    let api_handle: JoinHandle<anyhow::Result<()>> = tokio::spawn(async move {
        axum::serve(listener, app).await?;
        Ok(())
    });

    match api_handle.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!(?e, "HTTP server task failed"),
        Err(e) => error!(?e, "HTTP server task panicked"),
    }
    sweep_handle.abort();
    Ok(())
}
