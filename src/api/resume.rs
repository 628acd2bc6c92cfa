use actix_web::{web, HttpResponse};
use mongodb::bson::doc;

use crate::database::{CollectionName, Lookup, Store, UpsertOutcome};
use crate::models::{ResumeRequest, UpsertAction, UpsertResponse};
use crate::utils::{document_to_json, AppError};

#[utoipa::path(
    get,
    path = "/resume",
    tag = "Resume",
    responses(
        (status = 200, description = "Current resume document, or an empty link"),
        (status = 500, description = "Database failure", body = crate::models::MessageResponse)
    )
)]
pub async fn get_resume(db: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    let resume = db
        .find_one(CollectionName::Resume, &Lookup::First)
        .await
        .map_err(AppError::operation("Failed to fetch resume link"))?;

    Ok(match resume {
        Some(doc) => HttpResponse::Ok().json(document_to_json(doc)),
        None => HttpResponse::Ok().json(serde_json::json!({ "link": "" })),
    })
}

#[utoipa::path(
    put,
    path = "/resume",
    tag = "Resume",
    request_body = ResumeRequest,
    responses(
        (status = 200, description = "Resume link stored", body = UpsertResponse),
        (status = 400, description = "Missing link", body = crate::models::MessageResponse)
    )
)]
pub async fn put_resume(
    db: web::Data<dyn Store>,
    body: web::Json<ResumeRequest>,
) -> Result<HttpResponse, AppError> {
    let link = body
        .into_inner()
        .link
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .ok_or_else(|| AppError::validation("Resume link is required"))?;

    let outcome = db
        .upsert_by_key(CollectionName::Resume, &Lookup::First, doc! { "link": link.as_str() }, doc! {})
        .await
        .map_err(AppError::operation("Failed to update resume"))?;

    let action = match outcome {
        UpsertOutcome::Inserted(id) => {
            log::info!("📄 Resume document created: {}", id);
            UpsertAction::Inserted
        }
        UpsertOutcome::Updated { modified } => {
            log::info!("📄 Resume link updated ({} modified)", modified);
            UpsertAction::Updated
        }
    };
    Ok(HttpResponse::Ok().json(UpsertResponse {
        success: true,
        message: "Resume link updated successfully".to_string(),
        action,
    }))
}
