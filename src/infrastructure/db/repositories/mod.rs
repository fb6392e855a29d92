pub mod post_repository_sqlx;
pub mod session_store_sqlx;
pub mod transaction_repository_sqlx;
pub mod user_repository_sqlx;
