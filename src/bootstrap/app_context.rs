use std::sync::Arc;

use crate::application::ports::post_repository::PostRepository;
use crate::application::ports::session_store::SessionStore;
use crate::application::ports::transaction_repository::TransactionRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

/// Every binary wires the full set against its own pool; routes only reach
/// the collections their app actually mounts.
#[derive(Clone)]
pub struct AppServices {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    transactions: Arc<dyn TransactionRepository>,
    sessions: Arc<dyn SessionStore>,
}

impl AppServices {
    pub fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        transactions: Arc<dyn TransactionRepository>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            users,
            posts,
            transactions,
            sessions,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn users(&self) -> Arc<dyn UserRepository> {
        self.services.users.clone()
    }

    pub fn posts(&self) -> Arc<dyn PostRepository> {
        self.services.posts.clone()
    }

    pub fn transactions(&self) -> Arc<dyn TransactionRepository> {
        self.services.transactions.clone()
    }

    pub fn sessions(&self) -> Arc<dyn SessionStore> {
        self.services.sessions.clone()
    }
}
