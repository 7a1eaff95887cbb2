use axum::{extract::State, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{LoginRequest, RegisterRequest};
use crate::api::dtos::responses::ActionResult;
use crate::domain::models::{auth::UserProfile, user::User};
use crate::domain::services::auth_service::{RegisterInput, SESSION_COOKIE, SESSION_TTL_DAYS};
use std::sync::Arc;
use tower_cookies::{Cookies, Cookie};
use tower_cookies::cookie::SameSite;
use time::Duration;
use tracing::info;

pub async fn register(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(payload): Json<RegisterRequest>,
) -> ActionResult {
    let input = RegisterInput {
        email: payload.email,
        password: payload.password,
        first_name: payload.first_name,
        last_name: payload.last_name,
    };

    match state.auth_service.register(input).await {
        Ok(user) => start_session(&state, &cookies, user),
        Err(e) => ActionResult::from_error(e, "Inscription impossible"),
    }
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
    Json(payload): Json<LoginRequest>,
) -> ActionResult {
    match state.auth_service.login(&payload.email, &payload.password).await {
        Ok(user) => start_session(&state, &cookies, user),
        Err(e) => ActionResult::from_error(e, "Connexion impossible"),
    }
}

pub async fn logout(cookies: Cookies) -> ActionResult {
    cookies.remove(Cookie::build((SESSION_COOKIE, "")).path("/").into());
    info!("Host logged out");
    ActionResult::done()
}

fn start_session(state: &AppState, cookies: &Cookies, user: User) -> ActionResult {
    let token = match state.auth_service.issue_session(&user.id) {
        Ok(token) => token,
        Err(e) => return ActionResult::from_error(e, "Connexion impossible"),
    };

    set_session_cookie(cookies, token, !state.config.is_development());

    ActionResult::with(
        "user",
        UserProfile {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        },
    )
}

fn set_session_cookie(cookies: &Cookies, token: String, secure: bool) {
    let mut session = Cookie::new(SESSION_COOKIE, token);
    session.set_http_only(true);
    session.set_secure(secure);
    session.set_same_site(SameSite::Lax);
    session.set_path("/");
    session.set_max_age(Duration::days(SESSION_TTL_DAYS));
    cookies.add(session);
}
