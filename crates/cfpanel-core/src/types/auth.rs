use serde::{Deserialize, Serialize};

/// Body of `POST /login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Panel account name
    pub username: String,

    /// Panel account password
    pub password: String,
}

/// Body of `POST /api/change_password`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    /// Current password
    pub old_password: String,

    /// Replacement password (the backend requires at least 8 characters)
    pub new_password: String,
}
