//! SQLite-backed database handler

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::error::ErrorKind;
use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::{Connection, Row};
use tracing::{debug, info, warn};

use super::connection::SqliteConfig;
use super::update::UpdateStatement;
use crate::domain::{
    DatabaseHandler, DomainError, NewTeam, NewUser, Team, TeamMember, UpdateTeam, UpdateUser,
    User, UserField,
};
use crate::infrastructure::password::PasswordHasher;

const SCHEMA: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        password TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS teams (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS team_members (
        id_team TEXT NOT NULL REFERENCES teams(id),
        id_user TEXT NOT NULL REFERENCES users(id),
        PRIMARY KEY (id_team, id_user)
    )",
];

/// Relational handler. Every operation opens its own connection and closes it
/// before returning; error paths drop the connection instead.
#[derive(Debug, Clone)]
pub struct SqliteDatabaseHandler {
    config: SqliteConfig,
    hasher: Arc<dyn PasswordHasher>,
}

impl SqliteDatabaseHandler {
    pub fn new(config: SqliteConfig, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { config, hasher }
    }

    /// Build the handler and make sure the schema exists
    pub async fn open(
        config: SqliteConfig,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Result<Self, DomainError> {
        config.ensure_parent_dir()?;

        let handler = Self::new(config, hasher);
        handler.ensure_schema().await?;

        info!(path = %handler.config.path().display(), "SQLite database handler ready");
        Ok(handler)
    }

    pub fn config(&self) -> &SqliteConfig {
        &self.config
    }

    /// Argon2 is CPU-bound, so it runs on the blocking pool
    async fn hash_password(&self, password: &str) -> Result<String, DomainError> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| DomainError::internal(format!("Password hashing task failed: {}", e)))?
    }

    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        let mut conn = self.config.connect().await?;

        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&mut conn)
                .await
                .map_err(|e| map_sqlx_error("Failed to create schema", e))?;
        }

        release(conn).await;
        Ok(())
    }
}

#[async_trait]
impl DatabaseHandler for SqliteDatabaseHandler {
    async fn select_user(&self, user_id: &str) -> Result<Option<User>, DomainError> {
        let mut conn = self.config.connect().await?;
        let user = fetch_user(&mut conn, user_id).await?;

        release(conn).await;
        Ok(user)
    }

    async fn select_users(&self) -> Result<Vec<User>, DomainError> {
        let mut conn = self.config.connect().await?;

        let rows = sqlx::query("SELECT id, name, email FROM users ORDER BY rowid")
            .fetch_all(&mut conn)
            .await
            .map_err(|e| map_sqlx_error("Failed to list users", e))?;
        let users = rows.iter().map(row_to_user).collect::<Result<Vec<_>, _>>()?;

        release(conn).await;
        Ok(users)
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, DomainError> {
        let password_hash = self.hash_password(&user.password).await?;
        let mut conn = self.config.connect().await?;

        sqlx::query("INSERT INTO users (id, name, email, password) VALUES (?, ?, ?, ?)")
            .bind(&user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&password_hash)
            .execute(&mut conn)
            .await
            .map_err(|e| map_sqlx_error("Failed to insert user", e))?;

        let inserted = fetch_user(&mut conn, &user.id)
            .await?
            .ok_or_else(|| DomainError::internal(format!("User '{}' vanished after insert", user.id)))?;

        release(conn).await;
        debug!(user_id = %inserted.id, "Inserted user");
        Ok(inserted)
    }

    async fn update_user(&self, user_id: &str, update: UpdateUser) -> Result<User, DomainError> {
        let mut statement = UpdateStatement::new("users", "id");
        for (field, value) in update.assignments() {
            let value = match field {
                UserField::Password => self.hash_password(value).await?,
                UserField::Name | UserField::Email => value.to_string(),
            };
            statement = statement.set(field, value);
        }

        let mut conn = self.config.connect().await?;

        if !statement.is_empty() {
            let affected = statement
                .execute(&mut conn, user_id)
                .await
                .map_err(|e| map_sqlx_error("Failed to update user", e))?;

            if affected == 0 {
                return Err(user_not_found(user_id));
            }
        }

        let updated = fetch_user(&mut conn, user_id)
            .await?
            .ok_or_else(|| user_not_found(user_id))?;

        release(conn).await;
        debug!(user_id = %user_id, "Updated user");
        Ok(updated)
    }

    async fn delete_user(&self, user_id: &str) -> Result<User, DomainError> {
        let mut conn = self.config.connect().await?;
        let mut tx = conn
            .begin()
            .await
            .map_err(|e| map_sqlx_error("Failed to begin transaction", e))?;

        let user = fetch_user(&mut tx, user_id)
            .await?
            .ok_or_else(|| user_not_found(user_id))?;

        sqlx::query("DELETE FROM team_members WHERE id_user = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete user memberships", e))?;

        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete user", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("Failed to commit user deletion", e))?;

        release(conn).await;
        debug!(user_id = %user_id, "Deleted user");
        Ok(user)
    }

    async fn select_team(&self, team_id: &str) -> Result<Option<Team>, DomainError> {
        let mut conn = self.config.connect().await?;
        let team = fetch_team(&mut conn, team_id).await?;

        release(conn).await;
        Ok(team)
    }

    async fn select_teams(&self) -> Result<Vec<Team>, DomainError> {
        let mut conn = self.config.connect().await?;

        let rows = sqlx::query("SELECT id, name, description FROM teams ORDER BY rowid")
            .fetch_all(&mut conn)
            .await
            .map_err(|e| map_sqlx_error("Failed to list teams", e))?;
        let teams = rows.iter().map(row_to_team).collect::<Result<Vec<_>, _>>()?;

        release(conn).await;
        Ok(teams)
    }

    async fn insert_team(&self, team: NewTeam) -> Result<Team, DomainError> {
        let mut conn = self.config.connect().await?;

        sqlx::query("INSERT INTO teams (id, name, description) VALUES (?, ?, ?)")
            .bind(&team.id)
            .bind(&team.name)
            .bind(&team.description)
            .execute(&mut conn)
            .await
            .map_err(|e| map_sqlx_error("Failed to insert team", e))?;

        let inserted = fetch_team(&mut conn, &team.id)
            .await?
            .ok_or_else(|| DomainError::internal(format!("Team '{}' vanished after insert", team.id)))?;

        release(conn).await;
        debug!(team_id = %inserted.id, "Inserted team");
        Ok(inserted)
    }

    async fn update_team(&self, team_id: &str, update: UpdateTeam) -> Result<Team, DomainError> {
        let statement = update
            .assignments()
            .into_iter()
            .fold(UpdateStatement::new("teams", "id"), |statement, (field, value)| {
                statement.set(field, value)
            });

        let mut conn = self.config.connect().await?;

        if !statement.is_empty() {
            let affected = statement
                .execute(&mut conn, team_id)
                .await
                .map_err(|e| map_sqlx_error("Failed to update team", e))?;

            if affected == 0 {
                return Err(team_not_found(team_id));
            }
        }

        let updated = fetch_team(&mut conn, team_id)
            .await?
            .ok_or_else(|| team_not_found(team_id))?;

        release(conn).await;
        debug!(team_id = %team_id, "Updated team");
        Ok(updated)
    }

    async fn delete_team(&self, team_id: &str) -> Result<Team, DomainError> {
        let mut conn = self.config.connect().await?;
        let mut tx = conn
            .begin()
            .await
            .map_err(|e| map_sqlx_error("Failed to begin transaction", e))?;

        let team = fetch_team(&mut tx, team_id)
            .await?
            .ok_or_else(|| team_not_found(team_id))?;

        sqlx::query("DELETE FROM team_members WHERE id_team = ?")
            .bind(team_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete team memberships", e))?;

        sqlx::query("DELETE FROM teams WHERE id = ?")
            .bind(team_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("Failed to delete team", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("Failed to commit team deletion", e))?;

        release(conn).await;
        debug!(team_id = %team_id, "Deleted team");
        Ok(team)
    }

    async fn select_user_teams(&self, user_id: &str) -> Result<Vec<Team>, DomainError> {
        let mut conn = self.config.connect().await?;

        let rows = sqlx::query(
            "SELECT teams.id, teams.name, teams.description
             FROM teams
             INNER JOIN team_members ON team_members.id_team = teams.id
             WHERE team_members.id_user = ?
             ORDER BY team_members.rowid",
        )
        .bind(user_id)
        .fetch_all(&mut conn)
        .await
        .map_err(|e| map_sqlx_error("Failed to list user teams", e))?;
        let teams = rows.iter().map(row_to_team).collect::<Result<Vec<_>, _>>()?;

        release(conn).await;
        Ok(teams)
    }

    async fn select_team_members(&self, team_id: &str) -> Result<Vec<User>, DomainError> {
        let mut conn = self.config.connect().await?;

        let rows = sqlx::query(
            "SELECT users.id, users.name, users.email
             FROM users
             INNER JOIN team_members ON team_members.id_user = users.id
             WHERE team_members.id_team = ?
             ORDER BY team_members.rowid",
        )
        .bind(team_id)
        .fetch_all(&mut conn)
        .await
        .map_err(|e| map_sqlx_error("Failed to list team members", e))?;
        let users = rows.iter().map(row_to_user).collect::<Result<Vec<_>, _>>()?;

        release(conn).await;
        Ok(users)
    }

    async fn insert_team_member(
        &self,
        team_id: &str,
        user_id: &str,
    ) -> Result<TeamMember, DomainError> {
        let mut conn = self.config.connect().await?;

        sqlx::query("INSERT INTO team_members (id_team, id_user) VALUES (?, ?)")
            .bind(team_id)
            .bind(user_id)
            .execute(&mut conn)
            .await
            .map_err(|e| map_sqlx_error("Failed to add team member", e))?;

        let row = sqlx::query(
            "SELECT id_team, id_user FROM team_members WHERE id_team = ? AND id_user = ?",
        )
        .bind(team_id)
        .bind(user_id)
        .fetch_one(&mut conn)
        .await
        .map_err(|e| map_sqlx_error("Failed to read team member", e))?;
        let member = row_to_member(&row)?;

        release(conn).await;
        debug!(team_id = %team_id, user_id = %user_id, "Added team member");
        Ok(member)
    }

    async fn delete_team_member(
        &self,
        team_id: &str,
        user_id: &str,
    ) -> Result<TeamMember, DomainError> {
        let mut conn = self.config.connect().await?;

        let result = sqlx::query("DELETE FROM team_members WHERE id_team = ? AND id_user = ?")
            .bind(team_id)
            .bind(user_id)
            .execute(&mut conn)
            .await
            .map_err(|e| map_sqlx_error("Failed to remove team member", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "User '{}' is not a member of team '{}'",
                user_id, team_id
            )));
        }

        release(conn).await;
        debug!(team_id = %team_id, user_id = %user_id, "Removed team member");
        Ok(TeamMember::new(team_id, user_id))
    }
}

async fn fetch_user(conn: &mut SqliteConnection, user_id: &str) -> Result<Option<User>, DomainError> {
    let row = sqlx::query("SELECT id, name, email FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(conn)
        .await
        .map_err(|e| map_sqlx_error("Failed to select user", e))?;

    row.as_ref().map(row_to_user).transpose()
}

async fn fetch_team(conn: &mut SqliteConnection, team_id: &str) -> Result<Option<Team>, DomainError> {
    let row = sqlx::query("SELECT id, name, description FROM teams WHERE id = ?")
        .bind(team_id)
        .fetch_optional(conn)
        .await
        .map_err(|e| map_sqlx_error("Failed to select team", e))?;

    row.as_ref().map(row_to_team).transpose()
}

fn row_to_user(row: &SqliteRow) -> Result<User, DomainError> {
    Ok(User {
        id: column(row, "id")?,
        name: column(row, "name")?,
        email: column(row, "email")?,
    })
}

fn row_to_team(row: &SqliteRow) -> Result<Team, DomainError> {
    Ok(Team {
        id: column(row, "id")?,
        name: column(row, "name")?,
        description: column(row, "description")?,
    })
}

fn row_to_member(row: &SqliteRow) -> Result<TeamMember, DomainError> {
    Ok(TeamMember {
        id_team: column(row, "id_team")?,
        id_user: column(row, "id_user")?,
    })
}

fn column(row: &SqliteRow, name: &str) -> Result<String, DomainError> {
    row.try_get(name)
        .map_err(|e| DomainError::storage(format!("Failed to read column '{}': {}", name, e)))
}

fn user_not_found(user_id: &str) -> DomainError {
    DomainError::not_found(format!("User '{}' not found", user_id))
}

fn team_not_found(team_id: &str) -> DomainError {
    DomainError::not_found(format!("Team '{}' not found", team_id))
}

/// Integrity failures become `ConstraintViolation`, everything else is a storage fault
fn map_sqlx_error(context: &str, err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err {
        let is_constraint = match db_err.kind() {
            ErrorKind::UniqueViolation
            | ErrorKind::ForeignKeyViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation => true,
            _ => db_err.message().contains("constraint failed"),
        };

        if is_constraint {
            return DomainError::constraint_violation(format!("{}: {}", context, db_err.message()));
        }
    }

    DomainError::storage(format!("{}: {}", context, err))
}

async fn release(conn: SqliteConnection) {
    if let Err(e) = conn.close().await {
        warn!(error = %e, "Failed to close SQLite connection");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::password::Argon2Hasher;
    use tempfile::TempDir;

    async fn open_handler() -> (TempDir, SqliteDatabaseHandler) {
        let dir = tempfile::tempdir().unwrap();
        let config = SqliteConfig::new(dir.path().join("roster.db"));
        let handler = SqliteDatabaseHandler::open(config, Arc::new(Argon2Hasher::new()))
            .await
            .unwrap();

        (dir, handler)
    }

    async fn membership_rows(handler: &SqliteDatabaseHandler, user_id: &str) -> i64 {
        let mut conn = handler.config().connect().await.unwrap();
        sqlx::query_scalar("SELECT COUNT(*) FROM team_members WHERE id_user = ?")
            .bind(user_id)
            .fetch_one(&mut conn)
            .await
            .unwrap()
    }

    async fn stored_password(handler: &SqliteDatabaseHandler, user_id: &str) -> String {
        let mut conn = handler.config().connect().await.unwrap();
        let row = sqlx::query("SELECT password FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_one(&mut conn)
            .await
            .unwrap();

        row.get("password")
    }

    fn john() -> NewUser {
        NewUser::new("u1", "John", "j@x.com", "pw")
    }

    fn the_team() -> NewTeam {
        NewTeam::new("t1", "THE TEAM", "Cool team")
    }

    #[tokio::test]
    async fn test_fresh_database_is_empty() {
        let (_dir, handler) = open_handler().await;

        assert!(handler.select_users().await.unwrap().is_empty());
        assert!(handler.select_teams().await.unwrap().is_empty());
        assert!(handler.select_user("u1").await.unwrap().is_none());
        assert!(handler.select_team("t1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_open_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let config = SqliteConfig::new(dir.path().join("roster.db"));
        let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2Hasher::new());

        let first = SqliteDatabaseHandler::open(config.clone(), hasher.clone())
            .await
            .unwrap();
        first.insert_user(john()).await.unwrap();

        let second = SqliteDatabaseHandler::open(config, hasher).await.unwrap();
        assert_eq!(second.select_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_insert_and_select_user() {
        let (_dir, handler) = open_handler().await;

        let inserted = handler.insert_user(john()).await.unwrap();
        assert_eq!(inserted, User::new("u1", "John", "j@x.com"));

        let selected = handler.select_user("u1").await.unwrap();
        assert_eq!(selected, Some(User::new("u1", "John", "j@x.com")));
    }

    #[tokio::test]
    async fn test_password_is_stored_hashed() {
        let (_dir, handler) = open_handler().await;
        handler.insert_user(john()).await.unwrap();

        let stored = stored_password(&handler, "u1").await;

        assert_ne!(stored, "pw");
        assert!(Argon2Hasher::new().verify("pw", &stored));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_inserts_hash_each_password() {
        let (_dir, handler) = open_handler().await;
        let handler = Arc::new(handler);

        let tasks = (0..4).map(|i| {
            let handler = Arc::clone(&handler);
            tokio::spawn(async move {
                handler
                    .insert_user(NewUser::new(format!("u{i}"), "John", "j@x.com", format!("pw{i}")))
                    .await
            })
        });
        for task in tasks.collect::<Vec<_>>() {
            task.await.unwrap().unwrap();
        }

        let hasher = Argon2Hasher::new();
        for i in 0..4 {
            let stored = stored_password(&handler, &format!("u{i}")).await;
            assert!(hasher.verify(&format!("pw{i}"), &stored));
        }
    }

    #[tokio::test]
    async fn test_duplicate_user_is_constraint_violation() {
        let (_dir, handler) = open_handler().await;
        handler.insert_user(john()).await.unwrap();

        let err = handler.insert_user(john()).await.unwrap_err();

        assert!(err.is_constraint_violation());
        assert_eq!(handler.select_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_select_users_in_insertion_order() {
        let (_dir, handler) = open_handler().await;

        for id in ["zed", "amy", "mid"] {
            handler
                .insert_user(NewUser::new(id, "Name", "e@x.com", "pw"))
                .await
                .unwrap();
        }

        let ids: Vec<String> = handler
            .select_users()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(ids, vec!["zed", "amy", "mid"]);
    }

    #[tokio::test]
    async fn test_update_name_only_keeps_other_fields() {
        let (_dir, handler) = open_handler().await;
        handler.insert_user(john()).await.unwrap();
        let hash_before = stored_password(&handler, "u1").await;

        let updated = handler
            .update_user("u1", UpdateUser::new().with_name("Johnathan"))
            .await
            .unwrap();

        assert_eq!(updated, User::new("u1", "Johnathan", "j@x.com"));
        assert_eq!(stored_password(&handler, "u1").await, hash_before);
    }

    #[tokio::test]
    async fn test_update_password_rehashes() {
        let (_dir, handler) = open_handler().await;
        handler.insert_user(john()).await.unwrap();

        handler
            .update_user("u1", UpdateUser::new().with_password("new-pw"))
            .await
            .unwrap();

        let stored = stored_password(&handler, "u1").await;
        let hasher = Argon2Hasher::new();
        assert!(hasher.verify("new-pw", &stored));
        assert!(!hasher.verify("pw", &stored));
    }

    #[tokio::test]
    async fn test_empty_update_returns_current_row() {
        let (_dir, handler) = open_handler().await;
        handler.insert_user(john()).await.unwrap();

        let updated = handler.update_user("u1", UpdateUser::new()).await.unwrap();

        assert_eq!(updated, User::new("u1", "John", "j@x.com"));
    }

    #[tokio::test]
    async fn test_update_missing_user_is_not_found() {
        let (_dir, handler) = open_handler().await;

        let err = handler
            .update_user("ghost", UpdateUser::new().with_name("Boo"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = handler
            .update_user("ghost", UpdateUser::new())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_delete_user_returns_snapshot() {
        let (_dir, handler) = open_handler().await;
        handler.insert_user(john()).await.unwrap();

        let deleted = handler.delete_user("u1").await.unwrap();

        assert_eq!(deleted, User::new("u1", "John", "j@x.com"));
        assert!(handler.select_user("u1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_user_is_not_found() {
        let (_dir, handler) = open_handler().await;

        let err = handler.delete_user("ghost").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_team_crud() {
        let (_dir, handler) = open_handler().await;

        let inserted = handler.insert_team(the_team()).await.unwrap();
        assert_eq!(inserted, Team::new("t1", "THE TEAM", "Cool team"));

        let updated = handler
            .update_team("t1", UpdateTeam::new().with_description("Cooler team"))
            .await
            .unwrap();
        assert_eq!(updated, Team::new("t1", "THE TEAM", "Cooler team"));

        let err = handler.insert_team(the_team()).await.unwrap_err();
        assert!(err.is_constraint_violation());

        let deleted = handler.delete_team("t1").await.unwrap();
        assert_eq!(deleted.description, "Cooler team");
        assert!(handler.select_teams().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_memberships_and_joins() {
        let (_dir, handler) = open_handler().await;
        handler.insert_user(john()).await.unwrap();
        handler
            .insert_user(NewUser::new("u2", "Jane", "jane@x.com", "pw"))
            .await
            .unwrap();
        handler.insert_team(the_team()).await.unwrap();
        handler
            .insert_team(NewTeam::new("t2", "Other", "Second team"))
            .await
            .unwrap();

        let member = handler.insert_team_member("t1", "u1").await.unwrap();
        assert_eq!(member, TeamMember::new("t1", "u1"));
        handler.insert_team_member("t1", "u2").await.unwrap();
        handler.insert_team_member("t2", "u1").await.unwrap();

        let members: Vec<String> = handler
            .select_team_members("t1")
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(members, vec!["u1", "u2"]);

        let teams: Vec<String> = handler
            .select_user_teams("u1")
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(teams, vec!["t1", "t2"]);

        assert!(handler.select_user_teams("nobody").await.unwrap().is_empty());
        assert!(handler.select_team_members("none").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_membership_is_constraint_violation() {
        let (_dir, handler) = open_handler().await;
        handler.insert_user(john()).await.unwrap();
        handler.insert_team(the_team()).await.unwrap();
        handler.insert_team_member("t1", "u1").await.unwrap();

        let err = handler.insert_team_member("t1", "u1").await.unwrap_err();
        assert!(err.is_constraint_violation());
    }

    #[tokio::test]
    async fn test_membership_requires_existing_rows() {
        let (_dir, handler) = open_handler().await;
        handler.insert_team(the_team()).await.unwrap();

        let err = handler.insert_team_member("t1", "ghost").await.unwrap_err();
        assert!(err.is_constraint_violation());
    }

    #[tokio::test]
    async fn test_delete_user_cascades_memberships() {
        let (_dir, handler) = open_handler().await;
        handler.insert_user(john()).await.unwrap();
        handler.insert_team(the_team()).await.unwrap();
        handler
            .insert_team(NewTeam::new("t2", "Other", "Second team"))
            .await
            .unwrap();
        handler.insert_team_member("t1", "u1").await.unwrap();
        handler.insert_team_member("t2", "u1").await.unwrap();

        handler.delete_user("u1").await.unwrap();

        assert!(handler.select_team_members("t1").await.unwrap().is_empty());
        assert!(handler.select_team_members("t2").await.unwrap().is_empty());
        assert!(handler.select_user_teams("u1").await.unwrap().is_empty());
        assert_eq!(membership_rows(&handler, "u1").await, 0);
        assert_eq!(handler.select_teams().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_team_cascades_memberships() {
        let (_dir, handler) = open_handler().await;
        handler.insert_user(john()).await.unwrap();
        handler.insert_team(the_team()).await.unwrap();
        handler.insert_team_member("t1", "u1").await.unwrap();

        handler.delete_team("t1").await.unwrap();

        assert!(handler.select_user_teams("u1").await.unwrap().is_empty());
        assert!(handler.select_user("u1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_delete_team_member() {
        let (_dir, handler) = open_handler().await;
        handler.insert_user(john()).await.unwrap();
        handler.insert_team(the_team()).await.unwrap();
        handler.insert_team_member("t1", "u1").await.unwrap();

        let removed = handler.delete_team_member("t1", "u1").await.unwrap();
        assert_eq!(removed, TeamMember::new("t1", "u1"));
        assert!(handler.select_team_members("t1").await.unwrap().is_empty());

        let err = handler.delete_team_member("t1", "u1").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
