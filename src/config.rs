use std::env;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub session_secret: Option<String>, // absent => every request is unauthenticated
    pub app_base_url: String,
    pub app_env: AppEnv,
    pub display_timezone: String,
    pub font_dir: Option<String>,
    pub draft_ttl_secs: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            session_secret: env::var("SESSION_SECRET").ok().filter(|s| !s.is_empty()),
            app_base_url: trim_trailing_slash(
                &env::var("APP_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string()),
            ),
            app_env: match env::var("APP_ENV").as_deref() {
                Ok("development") => AppEnv::Development,
                _ => AppEnv::Production,
            },
            display_timezone: env::var("DISPLAY_TIMEZONE").unwrap_or_else(|_| "Africa/Kinshasa".to_string()),
            font_dir: env::var("FONT_DIR").ok(),
            draft_ttl_secs: env::var("DRAFT_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(600),
        }
    }

    pub fn is_development(&self) -> bool {
        self.app_env == AppEnv::Development
    }

    pub fn invitation_url(&self, slug: &str) -> String {
        format!("{}/inv/{}", self.app_base_url, slug)
    }
}

fn trim_trailing_slash(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
