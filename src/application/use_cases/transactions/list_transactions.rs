use crate::application::ports::transaction_repository::TransactionRepository;
use crate::domain::ledger::transaction::Transaction;
use crate::domain::refs::UserRef;

/// Private ledger: the caller's records only, newest first. Unbounded; the
/// dataset is assumed small.
pub struct ListTransactions<'a, R: TransactionRepository + ?Sized> {
    pub transactions: &'a R,
}

impl<'a, R: TransactionRepository + ?Sized> ListTransactions<'a, R> {
    pub async fn execute(&self, user: UserRef) -> anyhow::Result<Vec<Transaction>> {
        self.transactions.list_for_user(user).await
    }
}
