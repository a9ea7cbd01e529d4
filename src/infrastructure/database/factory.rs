//! Backend selection for database handlers

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::info;

use crate::config::DatabaseConfig;
use crate::domain::{DatabaseHandler, DomainError};
use crate::infrastructure::password::{Argon2Hasher, PasswordHasher};

use super::connection::SqliteConfig;
use super::mock::{FailingDatabaseHandler, FixtureDatabaseHandler};
use super::sqlite::SqliteDatabaseHandler;

/// Supported handler backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    /// SQLite storage
    Sqlite,
    /// Canned fixture responses
    Mock,
    /// Fixture responses with rejected writes
    MockError,
}

impl HandlerKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" | "relational" | "sql" => Some(Self::Sqlite),
            "mock" => Some(Self::Mock),
            "mock-error" | "mock_error" => Some(Self::MockError),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Mock => "mock",
            Self::MockError => "mock-error",
        }
    }
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registered handlers keyed by backend, plus the one used when a request names none
#[derive(Clone)]
pub struct HandlerRegistry {
    default: HandlerKind,
    handlers: HashMap<HandlerKind, Arc<dyn DatabaseHandler>>,
}

impl HandlerRegistry {
    pub fn new(default: HandlerKind, handler: Arc<dyn DatabaseHandler>) -> Self {
        let mut handlers: HashMap<HandlerKind, Arc<dyn DatabaseHandler>> = HashMap::new();
        handlers.insert(default, handler);

        Self { default, handlers }
    }

    pub fn with_handler(mut self, kind: HandlerKind, handler: Arc<dyn DatabaseHandler>) -> Self {
        self.handlers.insert(kind, handler);
        self
    }

    /// Build the registry described by the configuration, creating the SQLite schema on the way
    pub async fn from_config(config: &DatabaseConfig) -> Result<Self, DomainError> {
        let default = HandlerKind::parse(&config.backend).ok_or_else(|| {
            DomainError::configuration(format!("Unknown database backend '{}'", config.backend))
        })?;

        let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2Hasher::new());
        let sqlite =
            SqliteDatabaseHandler::open(SqliteConfig::from_config(config), hasher).await?;

        let mut registry = Self::new(HandlerKind::Sqlite, Arc::new(sqlite));

        if config.enable_mock_backends {
            registry = registry
                .with_handler(HandlerKind::Mock, Arc::new(FixtureDatabaseHandler::new()))
                .with_handler(HandlerKind::MockError, Arc::new(FailingDatabaseHandler::new()));
        }

        if !registry.handlers.contains_key(&default) {
            return Err(DomainError::configuration(format!(
                "Default backend '{}' requires database.enable_mock_backends",
                default
            )));
        }
        registry.default = default;

        info!(
            default = %registry.default,
            mode = ?config.mode,
            mock_backends = config.enable_mock_backends,
            "Database handlers initialized"
        );

        Ok(registry)
    }

    pub fn default_kind(&self) -> HandlerKind {
        self.default
    }

    pub fn default_handler(&self) -> Result<Arc<dyn DatabaseHandler>, DomainError> {
        self.get(self.default).ok_or_else(|| {
            DomainError::configuration(format!("Default backend '{}' is not registered", self.default))
        })
    }

    pub fn get(&self, kind: HandlerKind) -> Option<Arc<dyn DatabaseHandler>> {
        self.handlers.get(&kind).cloned()
    }

    /// Handler for an optional backend name; `None` selects the default
    pub fn resolve(&self, backend: Option<&str>) -> Result<Arc<dyn DatabaseHandler>, DomainError> {
        let Some(name) = backend else {
            return self.default_handler();
        };

        let kind = HandlerKind::parse(name).ok_or_else(|| {
            DomainError::configuration(format!("Unknown database backend '{}'", name))
        })?;

        self.get(kind).ok_or_else(|| {
            DomainError::configuration(format!("Database backend '{}' is not enabled", kind))
        })
    }

    pub fn kinds(&self) -> Vec<HandlerKind> {
        let mut kinds: Vec<HandlerKind> = self.handlers.keys().copied().collect();
        kinds.sort_by_key(|kind| kind.as_str());
        kinds
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("default", &self.default)
            .field("handlers", &self.kinds())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseMode;

    fn mock_registry() -> HandlerRegistry {
        HandlerRegistry::new(HandlerKind::Mock, Arc::new(FixtureDatabaseHandler::new()))
            .with_handler(HandlerKind::MockError, Arc::new(FailingDatabaseHandler::new()))
    }

    fn temp_config(dir: &tempfile::TempDir) -> DatabaseConfig {
        DatabaseConfig {
            mode: DatabaseMode::Test,
            test_file: dir.path().join("roster.db"),
            ..DatabaseConfig::default()
        }
    }

    #[test]
    fn test_handler_kind_parse() {
        assert_eq!(HandlerKind::parse("sqlite"), Some(HandlerKind::Sqlite));
        assert_eq!(HandlerKind::parse("Relational"), Some(HandlerKind::Sqlite));
        assert_eq!(HandlerKind::parse("sql"), Some(HandlerKind::Sqlite));
        assert_eq!(HandlerKind::parse("mock"), Some(HandlerKind::Mock));
        assert_eq!(HandlerKind::parse("mock-error"), Some(HandlerKind::MockError));
        assert_eq!(HandlerKind::parse("mock_error"), Some(HandlerKind::MockError));
        assert_eq!(HandlerKind::parse("oracle"), None);
    }

    #[test]
    fn test_handler_kind_display_round_trips() {
        for kind in [HandlerKind::Sqlite, HandlerKind::Mock, HandlerKind::MockError] {
            assert_eq!(HandlerKind::parse(&kind.to_string()), Some(kind));
        }
    }

    #[tokio::test]
    async fn test_resolve_default_and_named() {
        let registry = mock_registry();

        let default = registry.resolve(None).unwrap();
        assert!(default.insert_team_member("t1", "u1").await.is_ok());

        let failing = registry.resolve(Some("mock-error")).unwrap();
        assert!(failing.insert_team_member("t1", "u1").await.is_err());
    }

    #[test]
    fn test_resolve_unknown_or_disabled_backend() {
        let registry = mock_registry();

        let err = registry.resolve(Some("oracle")).err().unwrap();
        assert!(matches!(err, DomainError::Configuration { .. }));

        let err = registry.resolve(Some("sqlite")).err().unwrap();
        assert!(matches!(err, DomainError::Configuration { .. }));
    }

    #[tokio::test]
    async fn test_from_config_registers_sqlite_only_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let registry = HandlerRegistry::from_config(&temp_config(&dir)).await.unwrap();

        assert_eq!(registry.default_kind(), HandlerKind::Sqlite);
        assert_eq!(registry.kinds(), vec![HandlerKind::Sqlite]);
        assert!(dir.path().join("roster.db").exists());
    }

    #[tokio::test]
    async fn test_from_config_with_mock_backends() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            backend: "mock".to_string(),
            enable_mock_backends: true,
            ..temp_config(&dir)
        };

        let registry = HandlerRegistry::from_config(&config).await.unwrap();

        assert_eq!(registry.default_kind(), HandlerKind::Mock);
        assert_eq!(registry.kinds().len(), 3);
    }

    #[tokio::test]
    async fn test_from_config_rejects_disabled_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            backend: "mock".to_string(),
            ..temp_config(&dir)
        };

        let err = HandlerRegistry::from_config(&config).await.unwrap_err();
        assert!(matches!(err, DomainError::Configuration { .. }));
    }
}
