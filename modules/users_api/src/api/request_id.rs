use std::time::Duration;

use axum::http::{HeaderName, Request, Response};
use axum::{body::Body, middleware::Next};
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::request_id::{MakeRequestId, RequestId};
use tower_http::trace::{DefaultOnRequest, MakeSpan, OnResponse, TraceLayer};
use tracing::field::Empty;
use tracing::Span;

/// Request id as seen by handlers and problem responses.
#[derive(Clone, Debug)]
pub struct XRequestId(pub String);

pub fn header() -> HeaderName {
    HeaderName::from_static("x-request-id")
}

/// Generates `x-request-id` values for requests that arrive without one.
#[derive(Clone, Default)]
pub struct MakeReqId;

impl MakeRequestId for MakeReqId {
    fn make_request_id<B>(&mut self, _req: &Request<B>) -> Option<RequestId> {
        let id = nanoid::nanoid!();
        Some(RequestId::new(id.parse().ok()?))
    }
}

fn request_id_of<B>(req: &Request<B>) -> Option<&str> {
    req.headers().get(header()).and_then(|v| v.to_str().ok())
}

/// Id segment of `/users/{id}` paths, when it is a valid id.
fn user_id_of(path: &str) -> Option<i64> {
    path.strip_prefix("/users/")?.parse().ok()
}

/// Makes the request id available to handlers through `XRequestId`.
pub async fn push_req_id_to_extensions(mut req: Request<Body>, next: Next) -> axum::response::Response {
    let rid = request_id_of(&req).unwrap_or("n/a").to_owned();
    req.extensions_mut().insert(XRequestId(rid));
    next.run(req).await
}

/// One `users_api.request` span per request. `user_id` is filled for
/// single-user routes; `status` and `latency_ms` once the response is ready.
#[derive(Clone, Copy, Debug, Default)]
pub struct UsersRequestSpan;

impl<B> MakeSpan<B> for UsersRequestSpan {
    fn make_span(&mut self, req: &Request<B>) -> Span {
        let span = tracing::info_span!(
            "users_api.request",
            method = %req.method(),
            path = %req.uri().path(),
            request_id = request_id_of(req).unwrap_or("n/a"),
            user_id = Empty,
            status = Empty,
            latency_ms = Empty,
        );
        if let Some(id) = user_id_of(req.uri().path()) {
            span.record("user_id", id);
        }
        span
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RecordOutcome;

impl<B> OnResponse<B> for RecordOutcome {
    fn on_response(self, res: &Response<B>, latency: Duration, span: &Span) {
        let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
        span.record("status", res.status().as_u16());
        span.record("latency_ms", latency_ms);
        if res.status().is_server_error() {
            tracing::error!(parent: span, "Request failed");
        } else {
            tracing::info!(parent: span, "Request completed");
        }
    }
}

pub type UsersTraceLayer = TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    UsersRequestSpan,
    DefaultOnRequest,
    RecordOutcome,
>;

pub fn create_trace_layer() -> UsersTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(UsersRequestSpan)
        .on_response(RecordOutcome)
}
