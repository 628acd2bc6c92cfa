use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Portfolio Server API",
        version = "1.0.0",
        description = "REST API behind the portfolio website.\n\n**Features:**\n- Projects, resume link, users and color themes stored in MongoDB\n- Contact form with owner notification and visitor acknowledgement emails\n- Caller geolocation"
    ),
    paths(
        crate::api::health::health_check,
        crate::api::projects::list_projects,
        crate::api::projects::get_project,
        crate::api::projects::create_project,
        crate::api::projects::update_project,
        crate::api::projects::add_item,
        crate::api::projects::delete_project,
        crate::api::resume::get_resume,
        crate::api::resume::put_resume,
        crate::api::colors::list_colors,
        crate::api::colors::set_color,
        crate::api::users::list_users,
        crate::api::users::get_user_role,
        crate::api::users::upsert_user,
        crate::api::users::delete_users,
        crate::api::contact::submit_contact,
        crate::api::location::get_location,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::MessageResponse,
            crate::models::UpsertAction,
            crate::models::UpsertResponse,
            crate::models::InsertResult,
            crate::models::InsertResponse,
            crate::models::AddItemRequest,
            crate::models::ColorUpdateRequest,
            crate::models::ResumeRequest,
            crate::models::UserUpsertRequest,
            crate::models::DeleteUsersRequest,
            crate::models::RoleResponse,
            crate::models::ContactRequest,
            crate::models::Location,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and health endpoints."),
        (name = "Projects", description = "Portfolio projects."),
        (name = "Resume", description = "Singleton resume link."),
        (name = "Colors", description = "Site color themes."),
        (name = "Users", description = "Site users keyed by email."),
        (name = "Contact", description = "Contact form submissions."),
        (name = "Location", description = "Caller geolocation."),
    )
)]
pub struct ApiDoc;
