use actix_web::{web, HttpResponse};
use mongodb::bson::{doc, oid::ObjectId, DateTime};

use crate::api::parse_object_id;
use crate::database::{CollectionName, Lookup, Store, UpsertOutcome};
use crate::models::{
    DeleteUsersRequest, MessageResponse, RoleResponse, UpsertAction, UpsertResponse, UserUpsertRequest,
    DEFAULT_ROLE,
};
use crate::utils::{documents_to_json, AppError};

const USERS: CollectionName = CollectionName::Users;

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All user documents"),
        (status = 500, description = "Database failure", body = MessageResponse)
    )
)]
pub async fn list_users(db: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    let users = db
        .find_all(USERS)
        .await
        .map_err(AppError::operation("Failed to fetch users"))?;

    Ok(HttpResponse::Ok().json(documents_to_json(users)))
}

#[utoipa::path(
    get,
    path = "/users/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "Role of the user", body = RoleResponse),
        (status = 404, description = "Unknown email", body = MessageResponse)
    )
)]
pub async fn get_user_role(db: web::Data<dyn Store>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let email = path.into_inner();

    let user = db
        .find_one(USERS, &Lookup::field("email", email.trim()))
        .await
        .map_err(AppError::operation("Failed to fetch user role"))?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let role = user.get_str("role").unwrap_or(DEFAULT_ROLE).to_string();
    Ok(HttpResponse::Ok().json(RoleResponse { role }))
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = UserUpsertRequest,
    responses(
        (status = 200, description = "User inserted or updated", body = UpsertResponse),
        (status = 400, description = "Missing email", body = MessageResponse)
    )
)]
pub async fn upsert_user(
    db: web::Data<dyn Store>,
    body: web::Json<UserUpsertRequest>,
) -> Result<HttpResponse, AppError> {
    let request = body.into_inner();
    let email = request
        .email()
        .ok_or_else(|| AppError::validation("Email is required"))?
        .to_string();

    let set = request.update_fields();
    let mut set_on_insert = doc! { "createdAt": DateTime::now() };
    if !set.contains_key("role") {
        set_on_insert.insert("role", DEFAULT_ROLE);
    }

    let outcome = db
        .upsert_by_key(USERS, &Lookup::field("email", email.as_str()), set, set_on_insert)
        .await
        .map_err(AppError::operation("Failed to save user"))?;

    let (action, message) = match outcome {
        UpsertOutcome::Inserted(id) => {
            log::info!("👤 New user {} ({})", email, id);
            (UpsertAction::Inserted, "User created successfully")
        }
        UpsertOutcome::Updated { modified } => {
            log::info!("👤 User {} refreshed ({} modified)", email, modified);
            (UpsertAction::Updated, "User updated successfully")
        }
    };
    Ok(HttpResponse::Ok().json(UpsertResponse {
        success: true,
        message: message.to_string(),
        action,
    }))
}

#[utoipa::path(
    post,
    path = "/users/delete",
    tag = "Users",
    request_body = DeleteUsersRequest,
    responses(
        (status = 200, description = "Users deleted, with deletedCount"),
        (status = 400, description = "Missing or invalid ids", body = MessageResponse),
        (status = 404, description = "No users found to delete", body = MessageResponse)
    )
)]
pub async fn delete_users(
    db: web::Data<dyn Store>,
    body: web::Json<DeleteUsersRequest>,
) -> Result<HttpResponse, AppError> {
    let raw_ids = body
        .into_inner()
        .ids
        .filter(|ids| !ids.is_empty())
        .ok_or_else(|| AppError::validation("User ids are required"))?;

    let ids = raw_ids
        .iter()
        .map(|id| parse_object_id(id).map_err(|_| AppError::validation("Invalid user id")))
        .collect::<Result<Vec<ObjectId>, _>>()?;

    let deleted = db
        .delete_many(USERS, &ids)
        .await
        .map_err(AppError::operation("Failed to delete users"))?;

    if deleted == 0 {
        return Err(AppError::not_found("No users found to delete"));
    }

    log::info!("🗑️  Deleted {} users", deleted);
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": format!("{} user(s) deleted successfully", deleted),
        "deletedCount": deleted
    })))
}
