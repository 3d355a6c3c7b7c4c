/**
 * Authentication Handler Types
 *
 * Request and response bodies shared by the register, login and me handlers.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::auth::users::User;

/// Registration request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RegisterRequest {
    /// User's email address
    pub email: String,
    /// User's chosen username (at least 3 chars)
    pub username: String,
    /// User's password (at least 6 chars, hashed before storage)
    pub password: String,
}

/// Login request
///
/// `username` may also hold an email address.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Auth response
///
/// Returned by register and login. Contains the JWT token and user
/// information for immediate authentication.
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    /// JWT token for authentication
    pub token: String,
    /// User information (without sensitive data)
    pub user: UserResponse,
}

/// User response (without sensitive data)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    /// User's unique ID (UUID)
    pub id: String,
    pub username: String,
    pub email: String,
    pub name: String,
    pub bio: String,
    pub skills: String,
    pub batch: String,
    pub location: String,
    pub avatar_url: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            email: user.email,
            name: user.name,
            bio: user.bio,
            skills: user.skills,
            batch: user.batch,
            location: user.location,
            avatar_url: user.avatar_url,
            created_at: user.created_at,
        }
    }
}
