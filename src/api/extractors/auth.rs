use axum::{
    extract::{FromRequestParts, FromRef},
    http::request::Parts,
};
use crate::state::AppState;
use crate::domain::models::auth::HostIdentity;
use crate::domain::services::auth_service::SESSION_COOKIE;
use crate::error::AppError;
use std::sync::Arc;
use tower_cookies::Cookies;
use tracing::Span;

/// A host with a valid `session` cookie. Anything else is rejected with 401.
pub struct AuthUser(pub HostIdentity);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let cookies = parts.extensions.get::<Cookies>()
            .ok_or_else(|| AppError::InternalWithMsg("CookieManagerLayer missing".into()))?;

        let token = cookies.get(SESSION_COOKIE)
            .ok_or(AppError::Unauthorized)?
            .value()
            .to_string();

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let host = app_state.auth_service.verify_session(&token)
            .ok_or(AppError::Unauthorized)?;

        Span::current().record("user_id", &host.user_id);

        Ok(AuthUser(host))
    }
}
