pub mod auth;
pub mod health;
pub mod pages;
pub mod posts;
pub mod registration;
pub mod session;
pub mod transactions;
