//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{user_handler, wallet_handler};
use crate::domain::UserResponse;
use crate::types::MessageResponse;

/// OpenAPI documentation for the Wallet API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Wallet API",
        version = "0.1.0",
        description = "Ledger-backed wallet service: user provisioning, recharges, and atomic transfers",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    paths(
        // User endpoints
        user_handler::create_user,
        user_handler::get_user,
        // Wallet endpoints
        wallet_handler::recharge,
        wallet_handler::transfer,
    ),
    components(
        schemas(
            UserResponse,
            MessageResponse,
            user_handler::CreateUserRequest,
            wallet_handler::RechargeRequest,
            wallet_handler::TransferRequest,
        )
    ),
    tags(
        (name = "Users", description = "User provisioning"),
        (name = "Wallets", description = "Wallet ledger operations")
    )
)]
pub struct ApiDoc;
