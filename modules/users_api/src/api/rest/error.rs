use std::convert::Infallible;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;

use crate::api::problem::{Problem, ProblemResponse, ValidationError};
use crate::api::request_id::XRequestId;
use crate::domain::error::{DomainError, FieldViolation};

/// Request facts every problem response carries: the path and the request id.
#[derive(Debug, Clone, Default)]
pub struct ProblemCtx {
    pub instance: String,
    pub request_id: Option<String>,
}

impl<S: Send + Sync> FromRequestParts<S> for ProblemCtx {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self {
            instance: parts.uri.path().to_owned(),
            request_id: parts.extensions.get::<XRequestId>().map(|r| r.0.clone()),
        })
    }
}

/// Helper to create a ProblemResponse with less boilerplate
pub fn from_parts(
    status: StatusCode,
    code: &str,
    title: &str,
    detail: impl Into<String>,
    ctx: &ProblemCtx,
) -> ProblemResponse {
    let problem = Problem::new(status, title, detail)
        .with_type(format!("https://errors.example.com/{code}"))
        .with_code(code)
        .with_instance(&ctx.instance);

    let problem = match &ctx.request_id {
        Some(id) => problem.with_request_id(id),
        None => problem,
    };

    ProblemResponse(problem)
}

/// JSON pointer of a domain field in the camelCase wire format.
fn pointer(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 1);
    out.push('/');
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn to_validation_errors(violations: &[FieldViolation]) -> Vec<ValidationError> {
    violations
        .iter()
        .map(|v| ValidationError {
            detail: v.message.clone(),
            pointer: pointer(v.field),
        })
        .collect()
}

/// Map domain error to RFC9457 ProblemResponse
pub fn map_domain_error(e: &DomainError, ctx: &ProblemCtx) -> ProblemResponse {
    match e {
        DomainError::UserNotFound { .. } => from_parts(
            StatusCode::NOT_FOUND,
            "USERS_NOT_FOUND",
            "User not found",
            e.to_string(),
            ctx,
        ),
        DomainError::InvalidInput { violations } => {
            let ProblemResponse(problem) = from_parts(
                StatusCode::BAD_REQUEST,
                "USERS_VALIDATION",
                "Input data is not valid",
                e.to_string(),
                ctx,
            );
            ProblemResponse(problem.with_errors(to_validation_errors(violations)))
        }
        DomainError::BlankValueNotAllowed { field } => {
            let ProblemResponse(problem) = from_parts(
                StatusCode::BAD_REQUEST,
                "USERS_BLANK_VALUE",
                "Blank value not allowed",
                e.to_string(),
                ctx,
            );
            ProblemResponse(problem.with_errors(vec![ValidationError {
                detail: "must not be blank".to_string(),
                pointer: pointer(field),
            }]))
        }
        DomainError::AgeBelowMinimum { .. } => from_parts(
            StatusCode::BAD_REQUEST,
            "USERS_AGE_BELOW_MINIMUM",
            "Age below minimum",
            e.to_string(),
            ctx,
        ),
        DomainError::InvalidRange { .. } => from_parts(
            StatusCode::BAD_REQUEST,
            "USERS_INVALID_RANGE",
            "Invalid date range",
            e.to_string(),
            ctx,
        ),
        DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Database error occurred");
            from_parts(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_DB",
                "Internal error",
                "An internal database error occurred",
                ctx,
            )
        }
    }
}

/// Unreadable or mistyped JSON bodies are client errors.
pub fn map_json_rejection(rej: &JsonRejection, ctx: &ProblemCtx) -> ProblemResponse {
    let status = match rej {
        JsonRejection::JsonDataError(_) | JsonRejection::JsonSyntaxError(_) => {
            StatusCode::BAD_REQUEST
        }
        other => other.status(),
    };
    from_parts(
        status,
        "USERS_MALFORMED_BODY",
        "Input data is not valid",
        rej.body_text(),
        ctx,
    )
}

pub fn map_query_rejection(rej: &QueryRejection, ctx: &ProblemCtx) -> ProblemResponse {
    from_parts(
        StatusCode::BAD_REQUEST,
        "USERS_MALFORMED_QUERY",
        "Invalid query parameters",
        rej.body_text(),
        ctx,
    )
}

pub fn map_path_rejection(rej: &PathRejection, ctx: &ProblemCtx) -> ProblemResponse {
    from_parts(
        StatusCode::BAD_REQUEST,
        "USERS_MALFORMED_PATH",
        "Invalid path parameter",
        rej.body_text(),
        ctx,
    )
}
