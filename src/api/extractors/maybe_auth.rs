use axum::{
    extract::{FromRequestParts, FromRef},
    http::request::Parts,
};
use crate::state::AppState;
use crate::domain::models::auth::HostIdentity;
use crate::domain::services::auth_service::SESSION_COOKIE;
use std::convert::Infallible;
use std::sync::Arc;
use tower_cookies::Cookies;
use tracing::{debug, Span};

/// Session if present and valid; anonymous otherwise. Never rejects.
pub struct MaybeAuthUser(pub Option<HostIdentity>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(cookies) = parts.extensions.get::<Cookies>() else {
            return Ok(MaybeAuthUser(None));
        };

        let Some(token) = cookies.get(SESSION_COOKIE).map(|c| c.value().to_string()) else {
            return Ok(MaybeAuthUser(None));
        };

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        match app_state.auth_service.verify_session(&token) {
            Some(host) => {
                Span::current().record("user_id", &host.user_id);
                Ok(MaybeAuthUser(Some(host)))
            }
            None => {
                // expired or forged cookie, treat as anonymous
                debug!("MaybeAuth: ignoring invalid session cookie");
                Ok(MaybeAuthUser(None))
            }
        }
    }
}
