use actix_web::{web, HttpResponse};
use mongodb::bson::{Bson, Document};

use crate::api::parse_object_id;
use crate::database::{CollectionName, Mutation, Store};
use crate::models::{AddItemRequest, InsertResponse, MessageResponse, ProjectArrayField};
use crate::utils::{document_to_json, documents_to_json, payload_to_document, AppError};

const PROJECTS: CollectionName = CollectionName::Projects;

#[utoipa::path(
    get,
    path = "/projects",
    tag = "Projects",
    responses(
        (status = 200, description = "All project documents"),
        (status = 500, description = "Database failure", body = MessageResponse)
    )
)]
pub async fn list_projects(db: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    let projects = db
        .find_all(PROJECTS)
        .await
        .map_err(AppError::operation("Failed to fetch projects"))?;

    log::info!("📋 GET /projects - {} projects", projects.len());
    Ok(HttpResponse::Ok().json(documents_to_json(projects)))
}

#[utoipa::path(
    get,
    path = "/projects/{id}",
    tag = "Projects",
    params(("id" = String, Path, description = "Project ObjectId")),
    responses(
        (status = 200, description = "Project document"),
        (status = 400, description = "Invalid id", body = MessageResponse),
        (status = 404, description = "Project not found", body = MessageResponse)
    )
)]
pub async fn get_project(db: web::Data<dyn Store>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path)?;

    match db
        .find_by_id(PROJECTS, id)
        .await
        .map_err(AppError::operation("Failed to fetch project"))?
    {
        Some(project) => Ok(HttpResponse::Ok().json(document_to_json(project))),
        None => Err(AppError::not_found("Project not found")),
    }
}

#[utoipa::path(
    post,
    path = "/projects",
    tag = "Projects",
    request_body = Object,
    responses(
        (status = 200, description = "Project stored", body = InsertResponse),
        (status = 400, description = "Body is not a JSON object or has invalid keys", body = MessageResponse)
    )
)]
pub async fn create_project(
    db: web::Data<dyn Store>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, AppError> {
    let project = payload_to_document(body.into_inner())?;
    ensure_top_level(&project)?;

    let id = db
        .insert(PROJECTS, project)
        .await
        .map_err(AppError::operation("Failed to add project"))?;

    log::info!("✅ Project added: {}", id);
    Ok(HttpResponse::Ok().json(InsertResponse::new("Project added successfully", id.to_hex())))
}

/// Only the submitted top-level fields are overwritten.
#[utoipa::path(
    put,
    path = "/projects/{id}",
    tag = "Projects",
    params(("id" = String, Path, description = "Project ObjectId")),
    request_body = Object,
    responses(
        (status = 200, description = "Project updated", body = MessageResponse),
        (status = 400, description = "Invalid id or body", body = MessageResponse),
        (status = 404, description = "No matching project or nothing changed", body = MessageResponse)
    )
)]
pub async fn update_project(
    db: web::Data<dyn Store>,
    path: web::Path<String>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path)?;
    let fields = payload_to_document(body.into_inner())?;
    ensure_top_level(&fields)?;

    if fields.is_empty() {
        return Err(AppError::validation("No fields to update"));
    }

    let outcome = db
        .update_by_id(PROJECTS, id, Mutation::Merge(fields))
        .await
        .map_err(AppError::operation("Failed to update project"))?;

    if outcome.modified == 0 {
        if outcome.matched > 0 {
            log::info!("ℹ️  Project {} already up to date", id);
        }
        return Err(AppError::not_found("No matching project found or no changes made"));
    }

    log::info!("✅ Project updated: {}", id);
    Ok(HttpResponse::Ok().json(MessageResponse::ok("Project updated successfully")))
}

/// Appends one item to an allow-listed array field.
#[utoipa::path(
    put,
    path = "/projects/{id}/add/{field}",
    tag = "Projects",
    params(
        ("id" = String, Path, description = "Project ObjectId"),
        ("field" = String, Path, description = "frontendTech, backendTech, features or challenges")
    ),
    request_body = AddItemRequest,
    responses(
        (status = 200, description = "Item appended", body = MessageResponse),
        (status = 400, description = "Missing item, unknown field or invalid id", body = MessageResponse),
        (status = 404, description = "Project not found", body = MessageResponse)
    )
)]
pub async fn add_item(
    db: web::Data<dyn Store>,
    path: web::Path<(String, String)>,
    body: web::Json<AddItemRequest>,
) -> Result<HttpResponse, AppError> {
    let (raw_id, raw_field) = path.into_inner();

    let item = body
        .into_inner()
        .new_item
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .ok_or_else(|| AppError::validation("New item is required"))?;

    let field: ProjectArrayField = raw_field
        .parse()
        .map_err(|_| AppError::validation("Invalid field"))?;

    let id = parse_object_id(&raw_id)?;

    let outcome = db
        .update_by_id(PROJECTS, id, Mutation::Push { field, item: Bson::String(item) })
        .await
        .map_err(AppError::operation("Failed to add item"))?;

    if outcome.modified == 0 {
        return Err(AppError::not_found("Project not found"));
    }

    Ok(HttpResponse::Ok().json(MessageResponse::ok(format!("New item added to {}", field))))
}

#[utoipa::path(
    delete,
    path = "/projects/{id}",
    tag = "Projects",
    params(("id" = String, Path, description = "Project ObjectId")),
    responses(
        (status = 200, description = "Project deleted", body = MessageResponse),
        (status = 404, description = "Project not found", body = MessageResponse)
    )
)]
pub async fn delete_project(db: web::Data<dyn Store>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path)?;

    let deleted = db
        .delete_by_id(PROJECTS, id)
        .await
        .map_err(AppError::operation("Failed to delete project"))?;

    if deleted == 0 {
        return Err(AppError::not_found("Project not found"));
    }

    log::info!("🗑️  Project deleted: {}", id);
    Ok(HttpResponse::Ok().json(MessageResponse::ok("Project deleted successfully")))
}

/// Stored keys must name top-level fields; no dotted paths or operators.
fn ensure_top_level(fields: &Document) -> Result<(), AppError> {
    match fields.keys().find(|k| k.contains('.') || k.starts_with('$')) {
        Some(key) => Err(AppError::validation(format!("Invalid field name: {}", key))),
        None => Ok(()),
    }
}
