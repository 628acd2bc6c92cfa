use actix_web::{web, HttpResponse};
use mongodb::bson::Bson;

use crate::api::parse_object_id;
use crate::database::{CollectionName, Mutation, Store};
use crate::models::{ColorPath, ColorUpdateRequest, MessageResponse};
use crate::utils::{documents_to_json, AppError};

#[utoipa::path(
    get,
    path = "/colors",
    tag = "Colors",
    responses(
        (status = 200, description = "All color theme documents"),
        (status = 500, description = "Database failure", body = MessageResponse)
    )
)]
pub async fn list_colors(db: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    let themes = db
        .find_all(CollectionName::Colors)
        .await
        .map_err(AppError::operation("Failed to fetch colors"))?;

    Ok(HttpResponse::Ok().json(documents_to_json(themes)))
}

/// Sets a single `theme.key` leaf.
#[utoipa::path(
    put,
    path = "/colors/{id}/{theme}/{key}",
    tag = "Colors",
    params(
        ("id" = String, Path, description = "Color document ObjectId"),
        ("theme" = String, Path, description = "Theme name"),
        ("key" = String, Path, description = "Color key inside the theme")
    ),
    request_body = ColorUpdateRequest,
    responses(
        (status = 200, description = "Color updated", body = MessageResponse),
        (status = 400, description = "Missing color, invalid path or id", body = MessageResponse),
        (status = 404, description = "No matching document or nothing changed", body = MessageResponse)
    )
)]
pub async fn set_color(
    db: web::Data<dyn Store>,
    path: web::Path<(String, String, String)>,
    body: web::Json<ColorUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    let (raw_id, theme, key) = path.into_inner();

    let color = body
        .into_inner()
        .new_color
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::validation("New color value is required"))?;

    let path = ColorPath::new(&theme, &key).ok_or_else(|| AppError::validation("Invalid color path"))?;
    let id = parse_object_id(&raw_id)?;

    let outcome = db
        .update_by_id(
            CollectionName::Colors,
            id,
            Mutation::SetPath {
                path: path.clone(),
                value: Bson::String(color),
            },
        )
        .await
        .map_err(AppError::operation("Failed to update color"))?;

    if outcome.modified == 0 {
        if outcome.matched > 0 {
            log::info!("ℹ️  Color {} on {} already set", path, id);
        }
        return Err(AppError::not_found("No matching document found or no change made"));
    }

    log::info!("🎨 Color {} updated on {}", path, id);
    Ok(HttpResponse::Ok().json(MessageResponse::ok(format!("{} updated successfully", path))))
}
