//! Request and response bodies

pub mod auth;
pub mod claims;
pub mod flights;

use serde::Serialize;
use utoipa::ToSchema;

/// Plain confirmation body
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
