use invitation_backend::{
    api::router::create_router,
    config::{AppEnv, Config},
    infra::factory::{build_state, Repositories},
    state::AppState,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
    Router,
};
use std::str::FromStr;
use tower::ServiceExt;
use serde_json::{json, Value};
use chrono::{Duration, Utc};

pub const BASE_URL: &str = "https://teeky.vercel.app";

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            session_secret: Some("test-session-secret".to_string()),
            app_base_url: BASE_URL.to_string(),
            app_env: AppEnv::Production,
            display_timezone: "Africa/Kinshasa".to_string(),
            font_dir: None,
            draft_ttl_secs: 600,
        };

        let fontdb = Arc::new(resvg::usvg::fontdb::Database::new());
        let state = Arc::new(build_state(&config, Repositories::sqlite(&pool), fontdb));
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn post_action(&self, uri: &str, body: Value, session: Option<&str>) -> Value {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = session {
            builder = builder.header(header::COOKIE, format!("session={}", token));
        }

        let response = self.send(builder.body(Body::from(body.to_string())).unwrap()).await;
        assert_eq!(response.status(), StatusCode::OK, "actions always answer 200");
        parse_body(response).await
    }

    pub async fn get(&self, uri: &str, session: Option<&str>) -> Response {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = session {
            builder = builder.header(header::COOKIE, format!("session={}", token));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// Registers a host and returns the raw session cookie value.
    pub async fn register(&self, email: &str) -> String {
        let payload = json!({
            "email": email,
            "password": "secret123",
            "firstName": "Jean",
            "lastName": "Dupont"
        });

        let response = self.send(
            Request::builder()
                .method("POST")
                .uri("/actions/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap()
        ).await;

        session_cookie(&response).expect("No session cookie returned on register")
    }

    /// Creates an invitation starting in 30 days and returns `(id, slug)`.
    pub async fn create_invitation(&self, session: &str, theme: &str) -> (String, String) {
        let body = self.post_action("/actions/invitations", json!({
            "hostManName": "Jean",
            "hostWomanName": "Marie",
            "description": "Nous vous attendons",
            "location": "Kinshasa, Gombe",
            "startsAt": (Utc::now() + Duration::days(30)).to_rfc3339(),
            "theme": theme
        }), Some(session)).await;

        assert_eq!(body["success"], true, "create failed: {}", body);
        (
            body["invitation"]["id"].as_str().unwrap().to_string(),
            body["invitation"]["slug"].as_str().unwrap().to_string(),
        )
    }

    /// Activates and publishes an invitation so its public page is viewable.
    pub async fn make_public(&self, session: &str, id: &str) {
        let body = self.post_action(&format!("/actions/invitations/{}/activate", id), json!({}), Some(session)).await;
        assert_eq!(body["success"], true);
        let body = self.post_action(&format!("/actions/invitations/{}/publish", id), json!({}), Some(session)).await;
        assert_eq!(body["success"], true);
    }
}

#[allow(dead_code)]
pub fn session_cookie(response: &Response) -> Option<String> {
    response.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .find(|c| c.starts_with("session="))
        .map(|c| {
            let value = &c["session=".len()..];
            value.split(';').next().unwrap_or_default().to_string()
        })
}

#[allow(dead_code)]
pub async fn parse_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[allow(dead_code)]
pub async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
}

#[allow(dead_code)]
pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
