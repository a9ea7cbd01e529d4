//! User endpoints

use axum::extract::Path;
use tracing::debug;

use crate::api::middleware::Backend;
use crate::api::types::{ApiError, Json};
use crate::domain::{NewUser, UpdateUser, User};

/// POST /users
pub async fn create_user(
    Backend(db): Backend,
    Json(request): Json<NewUser>,
) -> Result<Json<User>, ApiError> {
    debug!(user_id = %request.id, "Creating user");

    request.validate()?;
    let user = db.insert_user(request).await?;

    Ok(Json(user))
}

/// GET /users
pub async fn list_users(Backend(db): Backend) -> Result<Json<Vec<User>>, ApiError> {
    debug!("Listing users");

    let users = db.select_users().await?;

    Ok(Json(users))
}

/// GET /users/{user_id}
pub async fn get_user(
    Backend(db): Backend,
    Path(user_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    debug!(user_id = %user_id, "Getting user");

    let user = db
        .select_user(&user_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User '{}' not found", user_id)))?;

    Ok(Json(user))
}

/// PUT /users/{user_id}
pub async fn update_user(
    Backend(db): Backend,
    Path(user_id): Path<String>,
    Json(request): Json<UpdateUser>,
) -> Result<Json<User>, ApiError> {
    debug!(user_id = %user_id, update = ?request, "Updating user");

    request.validate()?;
    let user = db.update_user(&user_id, request).await?;

    Ok(Json(user))
}

/// DELETE /users/{user_id}
pub async fn delete_user(
    Backend(db): Backend,
    Path(user_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    debug!(user_id = %user_id, "Deleting user");

    let user = db.delete_user(&user_id).await?;

    Ok(Json(user))
}
