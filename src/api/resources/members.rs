//! Team membership endpoints

use axum::extract::Path;
use serde::Deserialize;
use tracing::debug;

use crate::api::middleware::Backend;
use crate::api::types::{ApiError, Json};
use crate::domain::{validate_identifier, Team, TeamMember, User};

/// Body of POST /teams/{team_id}/members
#[derive(Debug, Clone, Deserialize)]
pub struct AddMemberRequest {
    pub user_id: String,
}

/// GET /users/{user_id}/teams
pub async fn list_user_teams(
    Backend(db): Backend,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Team>>, ApiError> {
    debug!(user_id = %user_id, "Listing user teams");

    Ok(Json(db.select_user_teams(&user_id).await?))
}

/// GET /teams/{team_id}/members
pub async fn list_team_members(
    Backend(db): Backend,
    Path(team_id): Path<String>,
) -> Result<Json<Vec<User>>, ApiError> {
    debug!(team_id = %team_id, "Listing team members");

    Ok(Json(db.select_team_members(&team_id).await?))
}

/// POST /teams/{team_id}/members
pub async fn add_team_member(
    Backend(db): Backend,
    Path(team_id): Path<String>,
    Json(request): Json<AddMemberRequest>,
) -> Result<Json<TeamMember>, ApiError> {
    debug!(team_id = %team_id, user_id = %request.user_id, "Adding team member");

    validate_identifier("user_id", &request.user_id)?;
    let member = db.insert_team_member(&team_id, &request.user_id).await?;

    Ok(Json(member))
}

/// DELETE /teams/{team_id}/members/{user_id}
pub async fn remove_team_member(
    Backend(db): Backend,
    Path((team_id, user_id)): Path<(String, String)>,
) -> Result<Json<TeamMember>, ApiError> {
    debug!(team_id = %team_id, user_id = %user_id, "Removing team member");

    let member = db.delete_team_member(&team_id, &user_id).await?;

    Ok(Json(member))
}
