//! Database handler contract
//!
//! Every storage backend exposes the same fourteen operations over users,
//! teams and memberships. Request handlers only ever talk to this trait, so
//! the concrete backend can be chosen per request.

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::team::{NewTeam, Team, TeamMember, UpdateTeam};
use crate::domain::user::{NewUser, UpdateUser, User};

#[cfg(test)]
use mockall::automock;

/// Storage operations for users, teams and team memberships
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DatabaseHandler: Send + Sync {
    /// Finds a user by ID
    async fn select_user(&self, user_id: &str) -> Result<Option<User>, DomainError>;

    /// Lists all users
    async fn select_users(&self) -> Result<Vec<User>, DomainError>;

    /// Creates a user, storing a hash of its password
    async fn insert_user(&self, user: NewUser) -> Result<User, DomainError>;

    /// Applies the supplied fields to an existing user
    async fn update_user(&self, user_id: &str, update: UpdateUser) -> Result<User, DomainError>;

    /// Deletes a user and every membership referencing it
    async fn delete_user(&self, user_id: &str) -> Result<User, DomainError>;

    async fn select_team(&self, team_id: &str) -> Result<Option<Team>, DomainError>;

    async fn select_teams(&self) -> Result<Vec<Team>, DomainError>;

    async fn insert_team(&self, team: NewTeam) -> Result<Team, DomainError>;

    async fn update_team(&self, team_id: &str, update: UpdateTeam) -> Result<Team, DomainError>;

    /// Deletes a team and every membership referencing it
    async fn delete_team(&self, team_id: &str) -> Result<Team, DomainError>;

    /// Teams the user belongs to, in membership creation order
    async fn select_user_teams(&self, user_id: &str) -> Result<Vec<Team>, DomainError>;

    /// Users belonging to the team, in membership creation order
    async fn select_team_members(&self, team_id: &str) -> Result<Vec<User>, DomainError>;

    async fn insert_team_member(
        &self,
        team_id: &str,
        user_id: &str,
    ) -> Result<TeamMember, DomainError>;

    async fn delete_team_member(
        &self,
        team_id: &str,
        user_id: &str,
    ) -> Result<TeamMember, DomainError>;
}
