/**
 * Resource Database Operations
 *
 * Shared notes, links and snippets. Each resource has one owner; only the
 * owner may edit or delete it, anyone may like it.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::shared::SharedError;

const RESOURCE_COLUMNS: &str = "id, title, body, link, likes, owner_id, created_at, updated_at";

/// Number of resources returned by the list endpoint
pub const LIST_LIMIT: i64 = 50;

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_BODY_LEN: usize = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct Resource {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub link: Option<String>,
    pub likes: i32,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/resources`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewResource {
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub link: Option<String>,
}

/// Body of `PUT /api/resources/{id}`; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
    pub link: Option<String>,
}

impl NewResource {
    pub fn validate(&self) -> Result<(), SharedError> {
        validate_title(&self.title)?;
        validate_body(&self.body)?;
        validate_link(self.link.as_deref())
    }
}

impl ResourceUpdate {
    pub fn validate(&self) -> Result<(), SharedError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(body) = &self.body {
            validate_body(body)?;
        }
        validate_link(self.link.as_deref())
    }
}

fn validate_title(title: &str) -> Result<(), SharedError> {
    if title.trim().is_empty() {
        return Err(SharedError::validation("title", "Title cannot be empty"));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(SharedError::validation(
            "title",
            format!("Title must be at most {} characters", MAX_TITLE_LEN),
        ));
    }
    Ok(())
}

fn validate_body(body: &str) -> Result<(), SharedError> {
    if body.chars().count() > MAX_BODY_LEN {
        return Err(SharedError::validation(
            "body",
            format!("Body must be at most {} characters", MAX_BODY_LEN),
        ));
    }
    Ok(())
}

fn validate_link(link: Option<&str>) -> Result<(), SharedError> {
    match link {
        Some(url) if !(url.starts_with("https://") || url.starts_with("http://")) => Err(
            SharedError::validation("link", "Link must start with http:// or https://"),
        ),
        _ => Ok(()),
    }
}

/// Newest resources first
pub async fn list_resources(pool: &PgPool) -> Result<Vec<Resource>, sqlx::Error> {
    let sql = format!(
        "SELECT {RESOURCE_COLUMNS} FROM resources ORDER BY created_at DESC LIMIT $1"
    );
    sqlx::query_as::<_, Resource>(&sql)
        .bind(LIST_LIMIT)
        .fetch_all(pool)
        .await
}

pub async fn get_resource(pool: &PgPool, id: Uuid) -> Result<Option<Resource>, sqlx::Error> {
    let sql = format!("SELECT {RESOURCE_COLUMNS} FROM resources WHERE id = $1");
    sqlx::query_as::<_, Resource>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn create_resource(
    pool: &PgPool,
    owner_id: Uuid,
    new: &NewResource,
) -> Result<Resource, sqlx::Error> {
    let sql = format!(
        "INSERT INTO resources (id, title, body, link, owner_id) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING {RESOURCE_COLUMNS}"
    );
    sqlx::query_as::<_, Resource>(&sql)
        .bind(Uuid::new_v4())
        .bind(new.title.trim())
        .bind(&new.body)
        .bind(new.link.as_deref())
        .bind(owner_id)
        .fetch_one(pool)
        .await
}

/// Update a resource owned by `owner_id`; `None` if no such owned resource
pub async fn update_resource(
    pool: &PgPool,
    id: Uuid,
    owner_id: Uuid,
    update: &ResourceUpdate,
) -> Result<Option<Resource>, sqlx::Error> {
    let sql = format!(
        "UPDATE resources SET \
           title = COALESCE($3, title), \
           body = COALESCE($4, body), \
           link = COALESCE($5, link), \
           updated_at = NOW() \
         WHERE id = $1 AND owner_id = $2 \
         RETURNING {RESOURCE_COLUMNS}"
    );
    sqlx::query_as::<_, Resource>(&sql)
        .bind(id)
        .bind(owner_id)
        .bind(update.title.as_deref().map(str::trim))
        .bind(update.body.as_deref())
        .bind(update.link.as_deref())
        .fetch_optional(pool)
        .await
}

/// Delete a resource owned by `owner_id`; `true` if a row was removed
pub async fn delete_resource(pool: &PgPool, id: Uuid, owner_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM resources WHERE id = $1 AND owner_id = $2")
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Add one like; `None` if the resource does not exist
pub async fn like_resource(pool: &PgPool, id: Uuid) -> Result<Option<Resource>, sqlx::Error> {
    let sql = format!(
        "UPDATE resources SET likes = likes + 1 WHERE id = $1 RETURNING {RESOURCE_COLUMNS}"
    );
    sqlx::query_as::<_, Resource>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
}
