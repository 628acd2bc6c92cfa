use actix_web::{web, HttpResponse};
use chrono::Utc;

use crate::database::{CollectionName, Store};
use crate::models::{ContactMessage, ContactRequest, InsertResponse, MessageResponse};
use crate::services::ContactNotifier;
use crate::utils::AppError;

/// Persists the message first, then sends both emails. A mail failure still
/// answers 500 even though the record is already stored.
#[utoipa::path(
    post,
    path = "/contact",
    tag = "Contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Message stored and emails sent", body = InsertResponse),
        (status = 400, description = "Missing name, email or message", body = MessageResponse),
        (status = 500, description = "Storage or mail failure", body = MessageResponse)
    )
)]
pub async fn submit_contact(
    db: web::Data<dyn Store>,
    notifier: web::Data<ContactNotifier>,
    body: web::Json<ContactRequest>,
) -> Result<HttpResponse, AppError> {
    let message = ContactMessage::from_request(body.into_inner(), Utc::now())
        .ok_or_else(|| AppError::validation("Name, email and message are required"))?;

    log::info!("✉️  POST /contact from {}", message.email);

    let id = db
        .insert(CollectionName::Contacts, message.to_document())
        .await
        .map_err(AppError::operation("Failed to send message"))?;

    notifier
        .notify(&message)
        .await
        .map_err(AppError::operation("Failed to send message"))?;

    Ok(HttpResponse::Ok().json(InsertResponse::new("Message sent successfully", id.to_hex())))
}
