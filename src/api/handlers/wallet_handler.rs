//! Wallet handlers.

use axum::{extract::State, response::Json, routing::post, Router};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::types::MessageResponse;

/// Wallet recharge request.
///
/// Amount range is validated by the ledger service so that the rule
/// lives in one place.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RechargeRequest {
    /// Wallet to credit
    pub wallet_id: Uuid,
    /// Amount to add, must be positive
    #[schema(value_type = f64, example = 25.50)]
    pub amount: Decimal,
}

/// Fund transfer request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct TransferRequest {
    /// Sender wallet
    pub from_wallet_id: Uuid,
    /// Receiver wallet
    pub to_wallet_id: Uuid,
    /// Amount to move, must be positive
    #[schema(value_type = f64, example = 10.00)]
    pub amount: Decimal,
}

/// Create wallet routes
pub fn wallet_routes() -> Router<AppState> {
    Router::new()
        .route("/recharge", post(recharge))
        .route("/transfer", post(transfer))
}

/// Recharge a wallet
#[utoipa::path(
    post,
    path = "/api/v1/wallets/recharge",
    tag = "Wallets",
    request_body = RechargeRequest,
    responses(
        (status = 200, description = "Recharge successful", body = MessageResponse),
        (status = 400, description = "Invalid amount"),
        (status = 404, description = "Wallet not found")
    )
)]
pub async fn recharge(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RechargeRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .wallet_service
        .recharge(payload.wallet_id, payload.amount)
        .await?;

    Ok(Json(MessageResponse::new("recharge successful")))
}

/// Transfer funds between two wallets
#[utoipa::path(
    post,
    path = "/api/v1/wallets/transfer",
    tag = "Wallets",
    request_body = TransferRequest,
    responses(
        (status = 200, description = "Transfer successful", body = MessageResponse),
        (status = 400, description = "Invalid amount, same wallet, or insufficient funds"),
        (status = 404, description = "Sender or receiver wallet not found")
    )
)]
pub async fn transfer(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<TransferRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .wallet_service
        .transfer(payload.from_wallet_id, payload.to_wallet_id, payload.amount)
        .await?;

    Ok(Json(MessageResponse::new("transfer successful")))
}
