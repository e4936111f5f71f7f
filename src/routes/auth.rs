use axum::extract::{Query, Request, State};
use axum::http::{header::AUTHORIZATION, Method};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::app_state::AppState;
use crate::routes::error::ApiError;
use crate::services::auth::{AuthError, Claims};

/// `?access_token=` for clients that cannot set headers (browser `EventSource`).
#[derive(Debug, Default, Deserialize)]
pub struct TokenQuery {
    pub access_token: Option<String>,
}

/// Require a valid bearer token on function routes when a JWT secret is
/// configured. Preflight requests always pass.
pub async fn require_bearer(State(state): State<AppState>, request: Request, next: Next) -> Response {
    authorize(&state, None, request, next).await
}

/// Like [`require_bearer`], but also accepts the token as an `access_token`
/// query parameter. Used for the admin event stream.
pub async fn require_bearer_or_query(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
    request: Request,
    next: Next,
) -> Response {
    authorize(&state, query.access_token, request, next).await
}

async fn authorize(
    state: &AppState,
    query_token: Option<String>,
    request: Request,
    next: Next,
) -> Response {
    let Some(verifier) = state.jwt.as_ref() else {
        return next.run(request).await;
    };
    if request.method() == Method::OPTIONS {
        return next.run(request).await;
    }

    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let verified: Result<Claims, AuthError> = match (header, query_token.as_deref()) {
        (None, Some(token)) => verifier.verify(token),
        (header, _) => verifier.verify_header(header),
    };

    match verified {
        Ok(claims) => {
            tracing::debug!(
                subject = claims.sub.as_deref().unwrap_or(""),
                role = claims.role.as_deref().unwrap_or(""),
                path = %request.uri().path(),
                "Caller authenticated"
            );
            next.run(request).await
        }
        Err(e) => {
            tracing::warn!(error = %e, path = %request.uri().path(), "Rejected unauthenticated call");
            ApiError::Unauthorized(e.to_string()).into_response()
        }
    }
}
