use axum::{
    Form, Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::ports::session_store::FlashKind;
use crate::application::use_cases::transactions::list_transactions::ListTransactions;
use crate::application::use_cases::transactions::record_transaction::{
    RecordOutcome, RecordRequest, RecordTransaction,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::ledger::transaction::Transaction;
use crate::domain::refs::UserRef;
use crate::presentation::http::session::{CurrentUser, flash_redirect};

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionResponse {
    pub id: Uuid,
    pub r#type: String,
    pub amount: f64,
    pub description: String,
    pub user_id: Uuid,
    pub date: chrono::DateTime<chrono::Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(tx: Transaction) -> Self {
        Self {
            id: tx.id,
            r#type: tx.kind.as_str().to_string(),
            amount: tx.amount,
            description: tx.description,
            user_id: tx.user.id(),
            date: tx.date,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionListResponse {
    pub items: Vec<TransactionResponse>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewTransactionForm {
    pub r#type: String,
    pub amount: f64,
    pub description: String,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/transactions", get(list_transactions).post(create_transaction))
        .with_state(ctx)
}

#[utoipa::path(post, path = "/transactions", tag = "Transactions",
    request_body(content = NewTransactionForm, content_type = "application/x-www-form-urlencoded"),
    responses((status = 303, description = "Redirects to /dashboard")))]
pub async fn create_transaction(
    State(ctx): State<AppContext>,
    user: CurrentUser,
    Form(form): Form<NewTransactionForm>,
) -> Response {
    let transactions = ctx.transactions();
    let uc = RecordTransaction {
        transactions: transactions.as_ref(),
    };
    let req = RecordRequest {
        kind: form.r#type,
        amount: form.amount,
        description: form.description,
    };
    match uc.execute(UserRef(user.user_id), &req).await {
        Ok(RecordOutcome::Recorded(tx)) => {
            tracing::info!(transaction_id = %tx.id, user_id = %user.user_id, "transaction_recorded");
            Redirect::to("/dashboard").into_response()
        }
        Ok(RecordOutcome::Rejected(reason)) => {
            flash_redirect(
                &ctx,
                Some(user.session),
                FlashKind::Error,
                &reason.to_string(),
                "/dashboard",
            )
            .await
        }
        Err(e) => {
            tracing::error!(error = ?e, "transaction_create_failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(get, path = "/transactions", tag = "Transactions",
    responses((status = 200, body = TransactionListResponse)))]
pub async fn list_transactions(
    State(ctx): State<AppContext>,
    user: CurrentUser,
) -> Result<Json<TransactionListResponse>, StatusCode> {
    let transactions = ctx.transactions();
    let uc = ListTransactions {
        transactions: transactions.as_ref(),
    };
    let items = uc
        .execute(UserRef(user.user_id))
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .into_iter()
        .map(TransactionResponse::from)
        .collect();
    Ok(Json(TransactionListResponse { items }))
}
