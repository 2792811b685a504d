use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Acknowledgement body for mutations that return no data.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
