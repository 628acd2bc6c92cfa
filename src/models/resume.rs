use serde::Deserialize;

/// Body of `PUT /resume`
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ResumeRequest {
    /// Public URL of the resume document
    pub link: Option<String>,
}
