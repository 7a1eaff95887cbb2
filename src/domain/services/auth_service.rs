use std::sync::Arc;
use crate::domain::{
    models::{auth::{Claims, HostIdentity}, user::{normalize_email, User}},
    ports::UserRepository,
};
use crate::error::AppError;
use argon2::{password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString}, Argon2};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use tracing::{debug, info, warn};

pub const SESSION_COOKIE: &str = "session";
pub const SESSION_TTL_DAYS: i64 = 7;
pub const MIN_PASSWORD_LEN: usize = 6;

pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Host accounts and the signed `session` cookie.
///
/// Without a secret no session can be issued or verified, so every request is treated
/// as anonymous.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    keys: Option<SessionKeys>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, secret: Option<&str>) -> Self {
        if secret.is_none() {
            warn!("SESSION_SECRET is not set, sessions are disabled");
        }

        let keys = secret.map(|s| SessionKeys {
            encoding: EncodingKey::from_secret(s.as_bytes()),
            decoding: DecodingKey::from_secret(s.as_bytes()),
        });

        Self { users, keys }
    }

    pub async fn register(&self, input: RegisterInput) -> Result<User, AppError> {
        let email = normalize_email(&input.email);
        let first_name = input.first_name.trim().to_string();
        let last_name = input.last_name.trim().to_string();

        if email.is_empty() || input.password.is_empty() || first_name.is_empty() || last_name.is_empty() {
            return Err(AppError::Validation("Tous les champs sont requis".into()));
        }
        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(format!("Password trop court (min {})", MIN_PASSWORD_LEN)));
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("Un compte existe déjà avec cet email".into()));
        }

        let password_hash = hash_password(&input.password)?;
        let user = User::new(&email, password_hash, first_name, last_name);

        let created = self.users.create(&user).await.map_err(|e| {
            if e.is_unique_violation_on("email") {
                AppError::Conflict("Un compte existe déjà avec cet email".into())
            } else {
                e
            }
        })?;

        info!("Registered host account {}", created.id);
        Ok(created)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, AppError> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(AppError::Validation("Email et mot de passe requis".into()));
        }

        let invalid = || AppError::Validation("Identifiants invalides".into());

        let user = self.users.find_by_email(&email).await?.ok_or_else(invalid)?;

        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|_| AppError::InternalWithMsg(format!("Corrupt password hash for user {}", user.id)))?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| invalid())?;

        info!("Host logged in: {}", user.id);
        Ok(user)
    }

    pub fn issue_session(&self, user_id: &str) -> Result<String, AppError> {
        let keys = self
            .keys
            .as_ref()
            .ok_or_else(|| AppError::InternalWithMsg("SESSION_SECRET is not configured".into()))?;

        let now = Utc::now();
        let claims = Claims {
            user_id: user_id.to_string(),
            iat: now.timestamp() as usize,
            exp: (now + Duration::days(SESSION_TTL_DAYS)).timestamp() as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &keys.encoding).map_err(|e| {
            tracing::error!("Session encoding failed: {}", e);
            AppError::Internal
        })
    }

    /// `None` for a missing secret, a bad signature or an expired token.
    pub fn verify_session(&self, token: &str) -> Option<HostIdentity> {
        let keys = self.keys.as_ref()?;

        match decode::<Claims>(token, &keys.decoding, &Validation::new(Algorithm::HS256)) {
            Ok(data) if !data.claims.user_id.is_empty() => Some(HostIdentity { user_id: data.claims.user_id }),
            Ok(_) => None,
            Err(e) => {
                debug!("Rejected session token: {}", e);
                None
            }
        }
    }

    pub async fn current_user(&self, identity: &HostIdentity) -> Result<Option<User>, AppError> {
        self.users.find_by_id(&identity.user_id).await
    }
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|_| AppError::Internal)
}
