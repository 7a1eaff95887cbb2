use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub exp: usize,
    pub iat: usize,
}

/// The authenticated host behind a request.
#[derive(Debug, Clone)]
pub struct HostIdentity {
    pub user_id: String,
}

#[derive(Serialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}
