use serde::{Deserialize, Serialize};

/// Envelope returned by every write endpoint.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Which branch an upsert took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UpsertAction {
    Inserted,
    Updated,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpsertResponse {
    pub success: bool,
    pub message: String,
    pub action: UpsertAction,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct InsertResult {
    #[serde(rename = "insertedId")]
    pub inserted_id: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct InsertResponse {
    pub success: bool,
    pub message: String,
    pub result: InsertResult,
}

impl InsertResponse {
    pub fn new(message: impl Into<String>, inserted_id: String) -> Self {
        Self {
            success: true,
            message: message.into(),
            result: InsertResult { inserted_id },
        }
    }
}
