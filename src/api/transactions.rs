//! Lending endpoints: issue, return and history

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::transaction::{IssueCopy, ReturnCopy, Transaction, TransactionDetails, TransactionQuery},
    AppState,
};

/// Transaction history, newest first
#[utoipa::path(
    get,
    path = "/transactions",
    tag = "lending",
    params(TransactionQuery),
    responses(
        (status = 200, description = "Transactions", body = Vec<TransactionDetails>)
    )
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionQuery>,
) -> AppResult<Json<Vec<TransactionDetails>>> {
    let transactions = state.services.lending.history(&query).await?;
    Ok(Json(transactions))
}

/// Get transaction by ID
#[utoipa::path(
    get,
    path = "/transactions/{id}",
    tag = "lending",
    params(
        ("id" = i64, Path, description = "Transaction ID")
    ),
    responses(
        (status = 200, description = "Transaction", body = Transaction),
        (status = 404, description = "Transaction not found")
    )
)]
pub async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Transaction>> {
    let transaction = state.services.lending.get_transaction(id).await?;
    Ok(Json(transaction))
}

/// Issue a copy to a member
#[utoipa::path(
    post,
    path = "/transactions",
    tag = "lending",
    request_body = IssueCopy,
    responses(
        (status = 201, description = "Copy issued", body = Transaction),
        (status = 400, description = "Invalid dates or no copy given"),
        (status = 404, description = "Copy or member not found"),
        (status = 409, description = "Copy is already issued")
    )
)]
pub async fn issue_copy(
    State(state): State<AppState>,
    Json(request): Json<IssueCopy>,
) -> AppResult<(StatusCode, Json<Transaction>)> {
    let transaction = state.services.lending.issue(request).await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

/// Return an issued copy
#[utoipa::path(
    post,
    path = "/transactions/{id}/return",
    tag = "lending",
    params(
        ("id" = i64, Path, description = "Transaction ID")
    ),
    request_body(content = ReturnCopy, description = "Return date, today when omitted"),
    responses(
        (status = 200, description = "Copy returned", body = Transaction),
        (status = 400, description = "Malformed body or return date before issue date"),
        (status = 404, description = "Transaction not found"),
        (status = 409, description = "Already returned")
    )
)]
pub async fn return_copy(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Bytes,
) -> AppResult<Json<Transaction>> {
    // An empty body means "today"; anything else must be a valid ReturnCopy
    let return_date = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        let Json(request) = Json::<ReturnCopy>::from_bytes(&body)
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        request.return_date
    };
    let transaction = state
        .services
        .lending
        .return_transaction(id, return_date)
        .await?;
    Ok(Json(transaction))
}
