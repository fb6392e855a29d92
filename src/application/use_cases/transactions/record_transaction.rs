use crate::application::ports::transaction_repository::TransactionRepository;
use crate::domain::ledger::transaction::{Transaction, TransactionKind};
use crate::domain::refs::UserRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidTransaction {
    #[error("type must be income or expense")]
    UnknownKind,
    #[error("amount must be a finite number")]
    NonFiniteAmount,
}

#[derive(Debug)]
pub enum RecordOutcome {
    Recorded(Transaction),
    Rejected(InvalidTransaction),
}

pub struct RecordTransaction<'a, R: TransactionRepository + ?Sized> {
    pub transactions: &'a R,
}

#[derive(Debug, Clone)]
pub struct RecordRequest {
    pub kind: String,
    pub amount: f64,
    pub description: String,
}

impl<'a, R: TransactionRepository + ?Sized> RecordTransaction<'a, R> {
    pub async fn execute(&self, user: UserRef, req: &RecordRequest) -> anyhow::Result<RecordOutcome> {
        let kind = match TransactionKind::parse(&req.kind) {
            Some(k) => k,
            None => return Ok(RecordOutcome::Rejected(InvalidTransaction::UnknownKind)),
        };
        if !req.amount.is_finite() {
            return Ok(RecordOutcome::Rejected(InvalidTransaction::NonFiniteAmount));
        }
        let tx = self
            .transactions
            .create_transaction(user, kind, req.amount, &req.description)
            .await?;
        Ok(RecordOutcome::Recorded(tx))
    }
}
