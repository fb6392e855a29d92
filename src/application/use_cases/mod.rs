pub mod auth;
pub mod posts;
pub mod registration;
pub mod transactions;
