use chrono::{DateTime, Utc};
use mongodb::bson::{doc, Document};
use serde::Deserialize;

/// Body of `POST /contact`
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct ContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

/// A validated contact-form submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl ContactMessage {
    /// Returns `None` when any of the three fields is missing or blank.
    pub fn from_request(request: ContactRequest, now: DateTime<Utc>) -> Option<Self> {
        let present = |v: Option<String>| v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        Some(Self {
            name: present(request.name)?,
            email: present(request.email)?,
            message: present(request.message)?,
            created_at: now,
        })
    }

    pub fn to_document(&self) -> Document {
        doc! {
            "name": self.name.as_str(),
            "email": self.email.as_str(),
            "message": self.message.as_str(),
            "createdAt": mongodb::bson::DateTime::from_millis(self.created_at.timestamp_millis()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, message: &str) -> ContactRequest {
        ContactRequest {
            name: Some(name.into()),
            email: Some(email.into()),
            message: Some(message.into()),
        }
    }

    #[test]
    fn requires_all_fields() {
        let now = Utc::now();
        assert!(ContactMessage::from_request(request("Ada", "a@b.c", "hi"), now).is_some());
        assert!(ContactMessage::from_request(request("", "a@b.c", "hi"), now).is_none());
        assert!(ContactMessage::from_request(request("Ada", "  ", "hi"), now).is_none());
        assert!(ContactMessage::from_request(ContactRequest::default(), now).is_none());
    }

    #[test]
    fn document_carries_timestamp() {
        let now = Utc::now();
        let msg = ContactMessage::from_request(request("Ada", "a@b.c", "hi"), now).unwrap();
        let doc = msg.to_document();
        assert_eq!(doc.get_str("email").unwrap(), "a@b.c");
        assert!(doc.get_datetime("createdAt").is_ok());
    }
}
