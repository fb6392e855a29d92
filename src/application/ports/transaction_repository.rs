use async_trait::async_trait;

use crate::domain::ledger::transaction::{Transaction, TransactionKind};
use crate::domain::refs::UserRef;

#[async_trait]
pub trait TransactionRepository: Send + Sync {
    async fn create_transaction(
        &self,
        user: UserRef,
        kind: TransactionKind,
        amount: f64,
        description: &str,
    ) -> anyhow::Result<Transaction>;
    /// The caller's ledger only, newest first.
    async fn list_for_user(&self, user: UserRef) -> anyhow::Result<Vec<Transaction>>;
}
