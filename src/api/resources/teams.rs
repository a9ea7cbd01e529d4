//! Team endpoints

use axum::extract::Path;
use tracing::debug;

use crate::api::middleware::Backend;
use crate::api::types::{ApiError, Json};
use crate::domain::{NewTeam, Team, UpdateTeam};

/// POST /teams
pub async fn create_team(
    Backend(db): Backend,
    Json(request): Json<NewTeam>,
) -> Result<Json<Team>, ApiError> {
    debug!(team_id = %request.id, name = %request.name, "Creating team");

    request.validate()?;
    let team = db.insert_team(request).await?;

    Ok(Json(team))
}

/// GET /teams
pub async fn list_teams(Backend(db): Backend) -> Result<Json<Vec<Team>>, ApiError> {
    debug!("Listing teams");

    Ok(Json(db.select_teams().await?))
}

/// GET /teams/{team_id}
pub async fn get_team(
    Backend(db): Backend,
    Path(team_id): Path<String>,
) -> Result<Json<Team>, ApiError> {
    debug!(team_id = %team_id, "Getting team");

    let team = db
        .select_team(&team_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Team '{}' not found", team_id)))?;

    Ok(Json(team))
}

/// PUT /teams/{team_id}
pub async fn update_team(
    Backend(db): Backend,
    Path(team_id): Path<String>,
    Json(request): Json<UpdateTeam>,
) -> Result<Json<Team>, ApiError> {
    debug!(team_id = %team_id, "Updating team");

    request.validate()?;
    let team = db.update_team(&team_id, request).await?;

    Ok(Json(team))
}

/// DELETE /teams/{team_id}
pub async fn delete_team(
    Backend(db): Backend,
    Path(team_id): Path<String>,
) -> Result<Json<Team>, ApiError> {
    debug!(team_id = %team_id, "Deleting team");

    let team = db.delete_team(&team_id).await?;

    Ok(Json(team))
}
