use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::MatchedPath;
use dotenvy::dotenv;
use tokio::task::JoinHandle;
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
        miniweb::presentation::http::registration::register_account,
        miniweb::presentation::http::health::health,
    ),
    components(schemas(
        miniweb::presentation::http::registration::SignupForm,
        miniweb::presentation::http::health::HealthResp,
    )),
    tags(
        (name = "Registration", description = "Account creation"),
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
        port: 3002,
        database: "users",
        static_dir: "public/registration_form",
        login_landing: "/",
    })?;
    info!(?cfg, "Starting registration-form backend");

    let pool = miniweb::infrastructure::db::connect_pool(&cfg.database_url).await?;
    miniweb::infrastructure::db::migrate_registration_form(&pool).await?;

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

    let app = Router::new()
        .nest(
            "/api",
            miniweb::presentation::http::health::routes(pool.clone(), "registration-form"),
        )
        .merge(miniweb::presentation::http::registration::routes(ctx))
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
    Ok(())
}
