//! Handlers that never touch storage
//!
//! `FixtureDatabaseHandler` answers every read with canned records and echoes
//! writes back. `FailingDatabaseHandler` behaves the same but rejects every
//! insert and update as if the store had refused it.

use async_trait::async_trait;

use crate::domain::{
    DatabaseHandler, DomainError, NewTeam, NewUser, Team, TeamMember, UpdateTeam, UpdateUser,
    User,
};

const FIXTURE_NAME: &str = "my_name";
const FIXTURE_EMAIL: &str = "my_email";
const FIXTURE_DESCRIPTION: &str = "my_description";

fn fixture_users() -> Vec<User> {
    (1..=2)
        .map(|i| User::new(format!("my_id_{i}"), format!("my_name_{i}"), format!("my_email_{i}")))
        .collect()
}

fn fixture_teams() -> Vec<Team> {
    (1..=2)
        .map(|i| {
            Team::new(
                format!("my_id_{i}"),
                format!("my_name_{i}"),
                format!("my_description_{i}"),
            )
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct FixtureDatabaseHandler;

impl FixtureDatabaseHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DatabaseHandler for FixtureDatabaseHandler {
    async fn select_user(&self, user_id: &str) -> Result<Option<User>, DomainError> {
        Ok(Some(User::new(user_id, FIXTURE_NAME, FIXTURE_EMAIL)))
    }

    async fn select_users(&self) -> Result<Vec<User>, DomainError> {
        Ok(fixture_users())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, DomainError> {
        Ok(User::new(user.id, user.name, user.email))
    }

    async fn update_user(&self, user_id: &str, update: UpdateUser) -> Result<User, DomainError> {
        Ok(User::new(
            user_id,
            update.name.unwrap_or_else(|| FIXTURE_NAME.to_string()),
            update.email.unwrap_or_else(|| FIXTURE_EMAIL.to_string()),
        ))
    }

    async fn delete_user(&self, user_id: &str) -> Result<User, DomainError> {
        Ok(User::new(user_id, FIXTURE_NAME, FIXTURE_EMAIL))
    }

    async fn select_team(&self, team_id: &str) -> Result<Option<Team>, DomainError> {
        Ok(Some(Team::new(team_id, FIXTURE_NAME, FIXTURE_DESCRIPTION)))
    }

    async fn select_teams(&self) -> Result<Vec<Team>, DomainError> {
        Ok(fixture_teams())
    }

    async fn insert_team(&self, team: NewTeam) -> Result<Team, DomainError> {
        Ok(team.into())
    }

    async fn update_team(&self, team_id: &str, update: UpdateTeam) -> Result<Team, DomainError> {
        Ok(Team::new(
            team_id,
            update.name.unwrap_or_else(|| FIXTURE_NAME.to_string()),
            update
                .description
                .unwrap_or_else(|| FIXTURE_DESCRIPTION.to_string()),
        ))
    }

    async fn delete_team(&self, team_id: &str) -> Result<Team, DomainError> {
        Ok(Team::new(team_id, FIXTURE_NAME, FIXTURE_DESCRIPTION))
    }

    async fn select_user_teams(&self, _user_id: &str) -> Result<Vec<Team>, DomainError> {
        Ok(fixture_teams())
    }

    async fn select_team_members(&self, _team_id: &str) -> Result<Vec<User>, DomainError> {
        Ok(fixture_users())
    }

    async fn insert_team_member(
        &self,
        team_id: &str,
        user_id: &str,
    ) -> Result<TeamMember, DomainError> {
        Ok(TeamMember::new(team_id, user_id))
    }

    async fn delete_team_member(
        &self,
        team_id: &str,
        user_id: &str,
    ) -> Result<TeamMember, DomainError> {
        Ok(TeamMember::new(team_id, user_id))
    }
}

/// Fixture handler whose inserts and updates always hit a constraint violation
#[derive(Debug, Clone, Default)]
pub struct FailingDatabaseHandler {
    inner: FixtureDatabaseHandler,
}

impl FailingDatabaseHandler {
    pub fn new() -> Self {
        Self::default()
    }

    fn rejected(operation: &str) -> DomainError {
        DomainError::constraint_violation(format!("{} rejected by storage", operation))
    }
}

#[async_trait]
impl DatabaseHandler for FailingDatabaseHandler {
    async fn select_user(&self, user_id: &str) -> Result<Option<User>, DomainError> {
        self.inner.select_user(user_id).await
    }

    async fn select_users(&self) -> Result<Vec<User>, DomainError> {
        self.inner.select_users().await
    }

    async fn insert_user(&self, _user: NewUser) -> Result<User, DomainError> {
        Err(Self::rejected("insert_user"))
    }

    async fn update_user(&self, _user_id: &str, _update: UpdateUser) -> Result<User, DomainError> {
        Err(Self::rejected("update_user"))
    }

    async fn delete_user(&self, user_id: &str) -> Result<User, DomainError> {
        self.inner.delete_user(user_id).await
    }

    async fn select_team(&self, team_id: &str) -> Result<Option<Team>, DomainError> {
        self.inner.select_team(team_id).await
    }

    async fn select_teams(&self) -> Result<Vec<Team>, DomainError> {
        self.inner.select_teams().await
    }

    async fn insert_team(&self, _team: NewTeam) -> Result<Team, DomainError> {
        Err(Self::rejected("insert_team"))
    }

    async fn update_team(&self, _team_id: &str, _update: UpdateTeam) -> Result<Team, DomainError> {
        Err(Self::rejected("update_team"))
    }

    async fn delete_team(&self, team_id: &str) -> Result<Team, DomainError> {
        self.inner.delete_team(team_id).await
    }

    async fn select_user_teams(&self, user_id: &str) -> Result<Vec<Team>, DomainError> {
        self.inner.select_user_teams(user_id).await
    }

    async fn select_team_members(&self, team_id: &str) -> Result<Vec<User>, DomainError> {
        self.inner.select_team_members(team_id).await
    }

    async fn insert_team_member(
        &self,
        _team_id: &str,
        _user_id: &str,
    ) -> Result<TeamMember, DomainError> {
        Err(Self::rejected("insert_team_member"))
    }

    async fn delete_team_member(
        &self,
        team_id: &str,
        user_id: &str,
    ) -> Result<TeamMember, DomainError> {
        self.inner.delete_team_member(team_id, user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixture_reads() {
        let handler = FixtureDatabaseHandler::new();

        assert_eq!(
            handler.select_user("abc").await.unwrap(),
            Some(User::new("abc", "my_name", "my_email"))
        );
        assert_eq!(
            handler.select_teams().await.unwrap(),
            vec![
                Team::new("my_id_1", "my_name_1", "my_description_1"),
                Team::new("my_id_2", "my_name_2", "my_description_2"),
            ]
        );
        assert_eq!(handler.select_team_members("t").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_fixture_update_falls_back_to_fixtures() {
        let handler = FixtureDatabaseHandler::new();

        let user = handler
            .update_user("u1", UpdateUser::new().with_email("new@x.com"))
            .await
            .unwrap();

        assert_eq!(user, User::new("u1", "my_name", "new@x.com"));
    }

    #[tokio::test]
    async fn test_fixture_insert_echoes_without_password() {
        let handler = FixtureDatabaseHandler::new();

        let user = handler
            .insert_user(NewUser::new("u1", "John", "j@x.com", "pw"))
            .await
            .unwrap();

        assert_eq!(user, User::new("u1", "John", "j@x.com"));
    }

    #[tokio::test]
    async fn test_failing_handler_rejects_writes() {
        let handler = FailingDatabaseHandler::new();

        assert!(handler
            .insert_user(NewUser::new("u1", "John", "j@x.com", "pw"))
            .await
            .unwrap_err()
            .is_constraint_violation());
        assert!(handler
            .update_team("t1", UpdateTeam::new())
            .await
            .unwrap_err()
            .is_constraint_violation());
        assert!(handler
            .insert_team_member("t1", "u1")
            .await
            .unwrap_err()
            .is_constraint_violation());
    }

    #[tokio::test]
    async fn test_failing_handler_delegates_reads_and_deletes() {
        let handler = FailingDatabaseHandler::new();

        assert_eq!(handler.select_users().await.unwrap().len(), 2);
        assert_eq!(
            handler.delete_team("t1").await.unwrap(),
            Team::new("t1", "my_name", "my_description")
        );
        assert_eq!(
            handler.delete_team_member("t1", "u1").await.unwrap(),
            TeamMember::new("t1", "u1")
        );
    }
}
