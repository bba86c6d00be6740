use serde::Serialize;
use utoipa::ToSchema;

/// Message-only response for operations with no payload
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable confirmation
    #[schema(example = "transfer successful")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
