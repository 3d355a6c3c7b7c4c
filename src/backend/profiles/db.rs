/**
 * Profile Database Operations
 *
 * Profiles are the public columns of the `users` table. Searches use
 * case-insensitive substring matching; every filter is optional and the
 * filters combine with AND.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::shared::SharedError;

const PROFILE_COLUMNS: &str =
    "id, username, name, bio, skills, batch, location, avatar_url, created_at";

/// Largest page returned by a search
pub const SEARCH_LIMIT: i64 = 100;

/// Public view of a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub bio: String,
    pub skills: String,
    pub batch: String,
    pub location: String,
    pub avatar_url: String,
    pub created_at: DateTime<Utc>,
}

/// Search filters for `GET /api/profiles`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileQuery {
    /// Matches name, username or bio
    pub q: Option<String>,
    pub skill: Option<String>,
    pub batch: Option<String>,
    pub location: Option<String>,
}

/// Partial profile update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub skills: Option<String>,
    pub batch: Option<String>,
    pub location: Option<String>,
    pub avatar_url: Option<String>,
}

impl ProfileUpdate {
    pub fn validate(&self) -> Result<(), SharedError> {
        check_len("name", &self.name, 100)?;
        check_len("bio", &self.bio, 2000)?;
        check_len("skills", &self.skills, 500)?;
        check_len("batch", &self.batch, 50)?;
        check_len("location", &self.location, 100)?;
        check_len("avatar_url", &self.avatar_url, 500)?;

        if let Some(url) = self.avatar_url.as_deref() {
            if !url.is_empty() && !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(SharedError::validation(
                    "avatar_url",
                    "Avatar URL must start with http:// or https://",
                ));
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.bio.is_none()
            && self.skills.is_none()
            && self.batch.is_none()
            && self.location.is_none()
            && self.avatar_url.is_none()
    }
}

fn check_len(field: &str, value: &Option<String>, max: usize) -> Result<(), SharedError> {
    match value {
        Some(v) if v.chars().count() > max => Err(SharedError::validation(
            field,
            format!("{} must be at most {} characters", field, max),
        )),
        _ => Ok(()),
    }
}

/// Turn a search term into an ILIKE pattern matching it anywhere
///
/// Blank terms become `None`; `%`, `_` and `\` in the term match literally.
pub fn like_pattern(term: Option<&str>) -> Option<String> {
    let term = term?.trim();
    if term.is_empty() {
        return None;
    }
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    Some(pattern)
}

/// Search profiles, newest first
pub async fn search_profiles(pool: &PgPool, query: &ProfileQuery) -> Result<Vec<Profile>, sqlx::Error> {
    let sql = format!(
        "SELECT {PROFILE_COLUMNS} FROM users \
         WHERE ($1::text IS NULL OR name ILIKE $1 OR username ILIKE $1 OR bio ILIKE $1) \
           AND ($2::text IS NULL OR skills ILIKE $2) \
           AND ($3::text IS NULL OR batch ILIKE $3) \
           AND ($4::text IS NULL OR location ILIKE $4) \
         ORDER BY created_at DESC \
         LIMIT $5"
    );

    sqlx::query_as::<_, Profile>(&sql)
        .bind(like_pattern(query.q.as_deref()))
        .bind(like_pattern(query.skill.as_deref()))
        .bind(like_pattern(query.batch.as_deref()))
        .bind(like_pattern(query.location.as_deref()))
        .bind(SEARCH_LIMIT)
        .fetch_all(pool)
        .await
}

pub async fn get_profile(pool: &PgPool, id: Uuid) -> Result<Option<Profile>, sqlx::Error> {
    let sql = format!("SELECT {PROFILE_COLUMNS} FROM users WHERE id = $1");
    sqlx::query_as::<_, Profile>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Apply a partial update; `None` if the user does not exist
pub async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    update: &ProfileUpdate,
) -> Result<Option<Profile>, sqlx::Error> {
    let sql = format!(
        "UPDATE users SET \
           name = COALESCE($2, name), \
           bio = COALESCE($3, bio), \
           skills = COALESCE($4, skills), \
           batch = COALESCE($5, batch), \
           location = COALESCE($6, location), \
           avatar_url = COALESCE($7, avatar_url), \
           updated_at = NOW() \
         WHERE id = $1 \
         RETURNING {PROFILE_COLUMNS}"
    );

    sqlx::query_as::<_, Profile>(&sql)
        .bind(id)
        .bind(update.name.as_deref())
        .bind(update.bio.as_deref())
        .bind(update.skills.as_deref())
        .bind(update.batch.as_deref())
        .bind(update.location.as_deref())
        .bind(update.avatar_url.as_deref())
        .fetch_optional(pool)
        .await
}
