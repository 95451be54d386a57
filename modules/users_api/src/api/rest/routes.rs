use std::sync::Arc;
use std::time::Duration;

use axum::middleware::from_fn;
use axum::routing::get;
use axum::{Extension, Json, Router};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use utoipa::OpenApi;

use crate::api::request_id;
use crate::api::rest::handlers;
use crate::api::rest::openapi::ApiDoc;
use crate::domain::service::Service;

/// Request bodies larger than this are rejected before deserialization.
const BODY_LIMIT_BYTES: usize = 1024 * 1024;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Users routes, health and the OpenAPI document, wrapped in the HTTP middleware stack.
pub fn router(service: Arc<Service>, timeout: Duration) -> Router {
    let mut router = Router::new()
        .route("/users", axum::routing::post(handlers::create_user))
        .route("/users/search", get(handlers::search_users))
        .route(
            "/users/{id}",
            get(handlers::get_user)
                .put(handlers::replace_user)
                .patch(handlers::patch_user)
                .delete(handlers::delete_user),
        )
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(openapi_json))
        .layer(Extension(service));

    // Layers added last run first:
    // SetRequestId -> PropagateRequestId -> Trace -> push_req_id_to_extensions -> Timeout -> BodyLimit
    let x_request_id = request_id::header();
    router = router.layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES));
    router = router.layer(TimeoutLayer::new(timeout));
    router = router.layer(from_fn(request_id::push_req_id_to_extensions));
    router = router.layer(request_id::create_trace_layer());
    router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
    router = router.layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId));

    router
}
