//! Bearer-token authentication.
//!
//! `auth_middleware` resolves an `Authorization: Bearer <token>` header into
//! an [`AuthenticatedUser`] stored in the request extensions. Requests without
//! a token pass through untouched so public routes keep working; handlers that
//! need a caller take [`RequireAuth`], which rejects with 401 when the
//! middleware found nobody.
//!
//! ```text
//! Request → auth_middleware → extensions[AuthenticatedUser]
//!                                      ↓
//!                              RequireAuth in the handler
//! ```
//!
//! Tokens are checked through the `SessionValidator` port, so tests can swap
//! in `MockSessionValidator` for real JWTs.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::response::ApiError;
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::SessionValidator;

/// State for [`auth_middleware`].
pub type AuthState = Arc<dyn SessionValidator>;

const NOT_AUTHORIZED: &str = "Not authorized to access this route";

/// Token from the `Authorization` header. The scheme is matched
/// case-insensitively; a blank token counts as no token.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Resolves the bearer token, if any, into an `AuthenticatedUser`.
///
/// A token that fails validation ends the request here with the error's
/// status (401, or 503 when the validator cannot reach its user store).
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(request.headers()) else {
        return next.run(request).await;
    };

    match validator.validate(token).await {
        Ok(user) => {
            tracing::debug!(user_id = %user.id, role = %user.role, "request authenticated");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                path = %request.uri().path(),
                "bearer token rejected"
            );
            ApiError::from(e).into_response()
        }
    }
}

/// The caller resolved by [`auth_middleware`]; 401 when there is none.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or_else(|| ApiError::unauthorized(NOT_AUTHORIZED))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockSessionValidator;
    use crate::domain::access::Role;
    use crate::domain::foundation::{AuthError, UserId};
    use axum::body::{to_bytes, Body};
    use axum::http::{HeaderValue, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    fn organizer() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new(), "olu@example.com", "Olu", Role::Organizer)
    }

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Header parsing
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn bearer_token_reads_scheme_case_insensitively() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")), Some("abc.def"));
        assert_eq!(bearer_token(&headers("bearer abc.def")), Some("abc.def"));
    }

    #[test]
    fn bearer_token_ignores_other_schemes_and_blanks() {
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&headers("abc.def")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Extractor
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn require_auth_reads_user_from_extensions() {
        let mut request = axum::http::Request::builder().uri("/").body(()).unwrap();
        request.extensions_mut().insert(organizer());
        let (mut parts, _) = request.into_parts();

        let RequireAuth(user) = RequireAuth::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(user.role, Role::Organizer);
    }

    #[tokio::test]
    async fn require_auth_without_user_is_401() {
        let request = axum::http::Request::builder().uri("/").body(()).unwrap();
        let (mut parts, _) = request.into_parts();

        let rejection = RequireAuth::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert_eq!(rejection.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Middleware
    // ════════════════════════════════════════════════════════════════════════════

    fn protected_app(validator: MockSessionValidator) -> Router {
        async fn whoami(RequireAuth(user): RequireAuth) -> String {
            user.name
        }

        let state: AuthState = Arc::new(validator);
        Router::new()
            .route("/me", get(whoami))
            .route("/open", get(|| async { "open" }))
            .layer(axum::middleware::from_fn_with_state(state, auth_middleware))
    }

    async fn call(app: Router, uri: &str, auth: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut builder = axum::http::Request::builder().uri(uri);
        if let Some(value) = auth {
            builder = builder.header("Authorization", value);
        }
        let response = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn valid_token_reaches_handler() {
        let app = protected_app(MockSessionValidator::new().with_user("good", organizer()));
        let (status, _) = call(app, "/me", Some("Bearer good")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn rejected_token_uses_error_envelope() {
        let app = protected_app(MockSessionValidator::new());
        let (status, json) = call(app, "/me", Some("Bearer nope")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["success"], false);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn missing_token_passes_public_routes() {
        let (status, _) = call(protected_app(MockSessionValidator::new()), "/open", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, json) = call(protected_app(MockSessionValidator::new()), "/me", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["error"], NOT_AUTHORIZED);
    }

    #[tokio::test]
    async fn unavailable_validator_is_503() {
        let app = protected_app(
            MockSessionValidator::new()
                .with_user("good", organizer())
                .with_error(AuthError::service_unavailable("db down")),
        );
        let (status, _) = call(app, "/me", Some("Bearer good")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
