use utoipa::OpenApi;

use crate::api::problem::{Problem, ValidationError};
use crate::api::rest::dto::{PatchUserReq, UserDto, UserReq};
use crate::api::rest::handlers::{self, HealthResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users API",
        description = "CRUD over users with partial updates and a minimum-age rule on birth dates."
    ),
    paths(
        handlers::create_user,
        handlers::get_user,
        handlers::replace_user,
        handlers::patch_user,
        handlers::delete_user,
        handlers::search_users,
        handlers::health_check,
    ),
    components(schemas(
        UserDto,
        UserReq,
        PatchUserReq,
        Problem,
        ValidationError,
        HealthResponse,
    )),
    tags(
        (name = "users", description = "User management"),
        (name = "health", description = "Liveness"),
    )
)]
pub struct ApiDoc;
