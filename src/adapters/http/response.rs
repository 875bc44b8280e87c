//! JSON envelope shared by every endpoint.
//!
//! ```text
//! { "success": true,  "data": ..., "count"?: n, "pagination"?: {...}, "message"?: "..." }
//! { "success": false, "error": "...", "errors"?: [{ "field": "...", "message": "..." }] }
//! ```
//!
//! Every module error enum converts into `ApiError`, which picks the HTTP
//! status from the domain `ErrorCode`. Infrastructure failures are logged
//! with their detail and answered with a generic message.

use axum::response::{IntoResponse, Response};
use axum::Json;
use http::StatusCode;
use serde::Serialize;

use crate::domain::account::UserError;
use crate::domain::booking::BookingError;
use crate::domain::catalog::CatalogError;
use crate::domain::event::EventError;
use crate::domain::foundation::{AuthError, DomainError, ErrorCode, ValidationError};
use crate::ports::{Page, PageRequest};

// ════════════════════════════════════════════════════════════════════════════════
// Success envelope
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            count: None,
            pagination: None,
            message: None,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<U> ApiResponse<Vec<U>> {
    /// Envelope for a list, with `count` set to its length.
    pub fn list<T>(items: impl IntoIterator<Item = T>) -> Self
    where
        U: From<T>,
    {
        let data: Vec<U> = items.into_iter().map(U::from).collect();
        let count = data.len();
        Self::ok(data).with_count(count)
    }

    /// Envelope for one page of a listing.
    pub fn page<T>(page: Page<T>) -> Self
    where
        U: From<T>,
    {
        let pagination = Pagination::from_page(&page);
        Self::list(page.items).with_pagination(pagination)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// `data` of a response that has nothing to return, e.g. after a delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Empty {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub page: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<PageLink>,
    pub total: u64,
}

impl Pagination {
    pub fn from_page<T>(page: &Page<T>) -> Self {
        let PageRequest { page: current, limit } = page.request;
        Self {
            next: page.has_next().then_some(PageLink {
                page: current + 1,
                limit,
            }),
            prev: page.has_prev().then_some(PageLink {
                page: current - 1,
                limit,
            }),
            total: page.total,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Error envelope
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl From<&ValidationError> for FieldError {
    fn from(err: &ValidationError) -> Self {
        Self {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<FieldError>,
}

/// Error returned from every HTTP handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub errors: Vec<FieldError>,
}

const SERVER_ERROR: &str = "Server Error";

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    /// 400 carrying one entry per failing field.
    pub fn validation<'a>(errors: impl IntoIterator<Item = &'a ValidationError>) -> Self {
        let errors: Vec<FieldError> = errors.into_iter().map(FieldError::from).collect();
        let message = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
            errors,
        }
    }

    fn field(field: &str, message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.to_string(),
            errors: vec![FieldError {
                field: field.to_string(),
                message: message.to_string(),
            }],
        }
    }

    /// Logs `detail` and hides it from the client.
    pub fn internal(detail: &str) -> Self {
        tracing::error!(detail, "request failed");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR)
    }

    fn from_code(code: ErrorCode, message: String) -> Self {
        match status_for(code) {
            StatusCode::INTERNAL_SERVER_ERROR => Self::internal(&message),
            status => Self::new(status, message),
        }
    }
}

/// HTTP status for a domain error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::InvalidStateTransition
        | ErrorCode::InsufficientInventory
        | ErrorCode::AlreadyCancelled
        | ErrorCode::EventHasBookings
        | ErrorCode::EmailTaken
        | ErrorCode::DuplicateName => StatusCode::BAD_REQUEST,
        ErrorCode::EventNotFound
        | ErrorCode::BookingNotFound
        | ErrorCode::UserNotFound
        | ErrorCode::CategoryNotFound
        | ErrorCode::TagNotFound => StatusCode::NOT_FOUND,
        ErrorCode::Unauthorized | ErrorCode::InvalidCredentials => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::DuplicateReference | ErrorCode::DatabaseError | ErrorCode::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            error: self.message,
            errors: self.errors,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        match &err {
            BookingError::ValidationFailed { field, message } => Self::field(field, message),
            _ => Self::from_code(err.code(), err.message()),
        }
    }
}

impl From<EventError> for ApiError {
    fn from(err: EventError) -> Self {
        match &err {
            EventError::ValidationFailed(errors) => Self::validation(errors),
            _ => Self::from_code(err.code(), err.message()),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match &err {
            CatalogError::ValidationFailed { field, message } => Self::field(field, message),
            _ => Self::from_code(err.code(), err.message()),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match &err {
            UserError::ValidationFailed(errors) => Self::validation(errors),
            _ => Self::from_code(err.code(), err.message()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::validation([&err])
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::from_code(err.code, err.message)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match &err {
            AuthError::ServiceUnavailable(detail) => {
                tracing::error!(detail = %detail, "auth service unavailable");
                Self::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Authentication service unavailable",
                )
            }
            AuthError::InsufficientPermissions => {
                Self::new(StatusCode::FORBIDDEN, err.to_string())
            }
            _ => Self::unauthorized(err.to_string()),
        }
    }
}
