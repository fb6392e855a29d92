use sqlx::{Pool, Postgres};

pub type PgPool = Pool<Postgres>;

pub async fn connect_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    Ok(pool)
}

// One database per app; each binary runs only its own embedded migrations.

pub async fn migrate_blog(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations/blog").run(pool).await?;
    Ok(())
}

pub async fn migrate_money_tracker(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations/money_tracker").run(pool).await?;
    Ok(())
}

pub async fn migrate_registration_form(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations/registration_form")
        .run(pool)
        .await?;
    Ok(())
}

pub mod repositories;
