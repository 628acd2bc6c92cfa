pub mod colors;
pub mod contact;
pub mod health;
pub mod location;
pub mod projects;
pub mod resume;
pub mod swagger;
pub mod users;

use actix_web::web;
use mongodb::bson::oid::ObjectId;

use crate::utils::AppError;

/// Registers every route of the gateway. Shared state (`Store`,
/// `ContactNotifier`, `GeoLocator`) is attached by the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/", web::get().to(health::root))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/projects")
                .route("", web::get().to(projects::list_projects))
                .route("", web::post().to(projects::create_project))
                .route("/{id}", web::get().to(projects::get_project))
                .route("/{id}", web::put().to(projects::update_project))
                .route("/{id}", web::delete().to(projects::delete_project))
                .route("/{id}/add/{field}", web::put().to(projects::add_item)),
        )
        .service(
            web::scope("/resume")
                .route("", web::get().to(resume::get_resume))
                .route("", web::put().to(resume::put_resume)),
        )
        .service(
            web::scope("/colors")
                .route("", web::get().to(colors::list_colors))
                .route("/{id}/{theme}/{key}", web::put().to(colors::set_color)),
        )
        .service(
            web::scope("/users")
                .route("", web::get().to(users::list_users))
                .route("", web::post().to(users::upsert_user))
                .route("/delete", web::post().to(users::delete_users))
                .route("/{email}", web::get().to(users::get_user_role)),
        )
        .route("/contact", web::post().to(contact::submit_contact))
        .route("/api/location", web::get().to(location::get_location));
}

/// Malformed or missing JSON bodies become validation errors with the
/// usual envelope instead of actix's plain-text 400.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::validation(format!("Invalid JSON body: {}", err)).into()
    })
}

pub(crate) fn parse_object_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw.trim()).map_err(|_| AppError::validation("Invalid id"))
}
