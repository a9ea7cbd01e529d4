//! Resource endpoints for users, teams and memberships
//!
//! Every endpoint accepts an optional `?backend=` query parameter selecting
//! the database handler that serves the request.

pub mod members;
pub mod teams;
pub mod users;

use axum::{
    routing::{delete, get},
    Router,
};

use crate::api::state::AppState;

pub fn create_resource_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{user_id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/users/{user_id}/teams", get(members::list_user_teams))
        .route("/teams", get(teams::list_teams).post(teams::create_team))
        .route(
            "/teams/{team_id}",
            get(teams::get_team)
                .put(teams::update_team)
                .delete(teams::delete_team),
        )
        .route(
            "/teams/{team_id}/members",
            get(members::list_team_members).post(members::add_team_member),
        )
        .route(
            "/teams/{team_id}/members/{user_id}",
            delete(members::remove_team_member),
        )
}
