use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::transaction_repository::TransactionRepository;
use crate::domain::ledger::transaction::{Transaction, TransactionKind};
use crate::domain::refs::UserRef;
use crate::infrastructure::db::PgPool;

pub struct SqlxTransactionRepository {
    pub pool: PgPool,
}

impl SqlxTransactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn transaction_from_row(row: &sqlx::postgres::PgRow) -> anyhow::Result<Transaction> {
    let kind: String = row.get("kind");
    let kind = TransactionKind::parse(&kind)
        .ok_or_else(|| anyhow::anyhow!("unknown transaction kind in store: {kind}"))?;
    Ok(Transaction {
        id: row.get("id"),
        kind,
        amount: row.get("amount"),
        description: row.get("description"),
        user: UserRef(row.get("user_id")),
        date: row.get("date"),
    })
}

#[async_trait]
impl TransactionRepository for SqlxTransactionRepository {
    async fn create_transaction(
        &self,
        user: UserRef,
        kind: TransactionKind,
        amount: f64,
        description: &str,
    ) -> anyhow::Result<Transaction> {
        let row = sqlx::query(
            r#"INSERT INTO transactions (id, kind, amount, description, user_id, date)
               VALUES ($1, $2, $3, $4, $5, now())
               RETURNING id, kind, amount, description, user_id, date"#,
        )
        .bind(Uuid::new_v4())
        .bind(kind.as_str())
        .bind(amount)
        .bind(description)
        .bind(user.id())
        .fetch_one(&self.pool)
        .await?;
        transaction_from_row(&row)
    }

    async fn list_for_user(&self, user: UserRef) -> anyhow::Result<Vec<Transaction>> {
        let rows = sqlx::query(
            r#"SELECT id, kind, amount, description, user_id, date
               FROM transactions WHERE user_id = $1 ORDER BY date DESC"#,
        )
        .bind(user.id())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(transaction_from_row).collect()
    }
}
