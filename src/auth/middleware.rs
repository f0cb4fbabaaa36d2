//! Authentication extractors
//!
//! Identity is resolved before a handler body runs; handlers only see a
//! verified `Session`.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, request::Parts},
};
use axum_extra::extract::CookieJar;

use super::session::{ADMIN_SCOPE, Session, verify_session_token};
use crate::AppState;
use crate::error::AppError;

fn extract_token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(ToOwned::to_owned)
        .or_else(|| {
            let jar = CookieJar::from_headers(headers);
            jar.get("session").map(|cookie| cookie.value().to_owned())
        })
}

/// Extractor for an authenticated admin
///
/// Rejects with 401 when no valid token is present and 403 when the session
/// lacks the `admin` scope.
///
/// # Usage
/// ```ignore
/// async fn handler(AdminUser(session): AdminUser) -> impl IntoResponse {
///     format!("Hello, {}", session.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AdminUser(pub Session);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = match parts.extensions.get::<Session>().cloned() {
            Some(session) => session,
            None => {
                let state = AppState::from_ref(state);
                let token =
                    extract_token_from_headers(&parts.headers).ok_or(AppError::Unauthorized)?;
                let session = verify_session_token(&token, &state.config.auth.session_secret)?;
                parts.extensions.insert(session.clone());
                session
            }
        };

        if !session.has_scope(ADMIN_SCOPE) {
            tracing::warn!(username = %session.username, "Session lacks admin scope");
            return Err(AppError::Forbidden);
        }

        Ok(AdminUser(session))
    }
}
