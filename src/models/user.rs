use mongodb::bson::Document;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ROLE: &str = "user";

/// Body of `POST /users`. Everything except `email` is optional; provided
/// fields overwrite whatever the stored user has.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserUpsertRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub login_type: Option<String>,
    pub country: Option<String>,
    pub location: Option<String>,
    pub device_type: Option<String>,
    pub device_name: Option<String>,
    pub last_login: Option<String>,
    pub role: Option<String>,
}

impl UserUpsertRequest {
    /// Trimmed email, if one was supplied.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().map(str::trim).filter(|e| !e.is_empty())
    }

    /// Fields to `$set` on both upsert branches. The key field and the
    /// insert-only stamps are not included.
    pub fn update_fields(&self) -> Document {
        let mut fields = Document::new();
        let optional = [
            ("name", &self.name),
            ("loginType", &self.login_type),
            ("country", &self.country),
            ("location", &self.location),
            ("deviceType", &self.device_type),
            ("deviceName", &self.device_name),
            ("lastLogin", &self.last_login),
            ("role", &self.role),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                fields.insert(key, value.as_str());
            }
        }
        fields
    }
}

/// Body of `POST /users/delete`
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct DeleteUsersRequest {
    pub ids: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RoleResponse {
    pub role: String,
}
