use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::Json,
    Extension,
};
use serde::Serialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::api::problem::{Problem, ProblemResponse};
use crate::api::rest::dto::{PatchUserReq, SearchQuery, UserDto, UserReq};
use crate::api::rest::error::{
    map_domain_error, map_json_rejection, map_path_rejection, map_query_rejection, ProblemCtx,
};
use crate::domain::error::DomainError;
use crate::domain::service::Service;

type ApiResult<T> = Result<T, ProblemResponse>;

fn user_id(path: Result<Path<i64>, PathRejection>, ctx: &ProblemCtx) -> ApiResult<i64> {
    path.map(|Path(id)| id).map_err(|rej| {
        warn!("Rejected path parameter: {}", rej.body_text());
        map_path_rejection(&rej, ctx)
    })
}

fn json_body<T>(body: Result<Json<T>, JsonRejection>, ctx: &ProblemCtx) -> ApiResult<T> {
    body.map(|Json(v)| v).map_err(|rej| {
        warn!("Rejected request body: {}", rej.body_text());
        map_json_rejection(&rej, ctx)
    })
}

fn failure(op: &str, e: &DomainError, ctx: &ProblemCtx) -> ProblemResponse {
    if e.is_validation() {
        warn!("{op} rejected: {e}");
    } else {
        error!("{op} failed: {e}");
    }
    map_domain_error(e, ctx)
}

/// Create a new user
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = UserReq,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 400, description = "Invalid input or age below minimum", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn create_user(
    ctx: ProblemCtx,
    Extension(svc): Extension<Arc<Service>>,
    body: Result<Json<UserReq>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<UserDto>)> {
    let req = json_body(body, &ctx)?;
    info!("Creating user: {}", req.email);

    match svc.create_user(req.into()).await {
        Ok(user) => Ok((StatusCode::CREATED, Json(UserDto::from(user)))),
        Err(e) => Err(failure("Create user", &e, &ctx)),
    }
}

/// Get a specific user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 404, description = "No user with this id", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn get_user(
    ctx: ProblemCtx,
    Extension(svc): Extension<Arc<Service>>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<UserDto>> {
    let id = user_id(path, &ctx)?;
    info!("Getting user with id: {}", id);

    match svc.get_user(id).await {
        Ok(user) => Ok(Json(UserDto::from(user))),
        Err(e) => Err(failure("Get user", &e, &ctx)),
    }
}

/// Replace every field of an existing user
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    request_body = UserReq,
    responses(
        (status = 200, description = "User replaced", body = UserDto),
        (status = 400, description = "Invalid input or age below minimum", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "No user with this id", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn replace_user(
    ctx: ProblemCtx,
    Extension(svc): Extension<Arc<Service>>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<UserReq>, JsonRejection>,
) -> ApiResult<Json<UserDto>> {
    let id = user_id(path, &ctx)?;
    let req = json_body(body, &ctx)?;
    info!("Replacing user {}", id);

    match svc.replace_user(id, req.into()).await {
        Ok(user) => Ok(Json(UserDto::from(user))),
        Err(e) => Err(failure("Replace user", &e, &ctx)),
    }
}

/// Update the provided fields of an existing user
#[utoipa::path(
    patch,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    request_body = PatchUserReq,
    responses(
        (status = 200, description = "User updated", body = UserDto),
        (status = 400, description = "Blank value, invalid input or age below minimum", body = Problem, content_type = "application/problem+json"),
        (status = 404, description = "No user with this id", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn patch_user(
    ctx: ProblemCtx,
    Extension(svc): Extension<Arc<Service>>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<PatchUserReq>, JsonRejection>,
) -> ApiResult<Json<UserDto>> {
    let id = user_id(path, &ctx)?;
    let req = json_body(body, &ctx)?;
    info!("Patching user {}", id);

    match svc.patch_user(id, req.into()).await {
        Ok(user) => Ok(Json(UserDto::from(user))),
        Err(e) => Err(failure("Patch user", &e, &ctx)),
    }
}

/// Delete a user by ID
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "No user with this id", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn delete_user(
    ctx: ProblemCtx,
    Extension(svc): Extension<Arc<Service>>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let id = user_id(path, &ctx)?;
    info!("Deleting user: {}", id);

    match svc.delete_user(id).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(failure("Delete user", &e, &ctx)),
    }
}

/// Users born within the given range
#[utoipa::path(
    get,
    path = "/users/search",
    tag = "users",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching users ordered by id", body = [UserDto]),
        (status = 400, description = "Start is after end or a date is malformed", body = Problem, content_type = "application/problem+json")
    )
)]
pub async fn search_users(
    ctx: ProblemCtx,
    Extension(svc): Extension<Arc<Service>>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<UserDto>>> {
    let Query(query) = query.map_err(|rej| {
        warn!("Rejected search query: {}", rej.body_text());
        map_query_rejection(&rej, &ctx)
    })?;
    info!("Searching users by birth date: {:?}", query);

    match svc.find_by_birth_date_range(query.into()).await {
        Ok(users) => Ok(Json(users.into_iter().map(UserDto::from).collect())),
        Err(e) => Err(failure("Search users", &e, &ctx)),
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}
