//! Team and membership records

use serde::{Deserialize, Serialize};

use crate::domain::validation::{validate_identifier, validate_name, ValidationError};

/// Team as stored and returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl Team {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Payload for creating a team
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewTeam {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl NewTeam {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_identifier("id", &self.id)?;
        validate_name("name", &self.name)
    }
}

impl From<NewTeam> for Team {
    fn from(new_team: NewTeam) -> Self {
        Self {
            id: new_team.id,
            name: new_team.name,
            description: new_team.description,
        }
    }
}

/// Columns of a team row that a partial update may touch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamField {
    Name,
    Description,
}

impl TeamField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
        }
    }
}

/// Partial update for a team. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UpdateTeam {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UpdateTeam {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Fields explicitly set by the caller, in column order
    pub fn assignments(&self) -> Vec<(TeamField, &str)> {
        [
            (TeamField::Name, self.name.as_deref()),
            (TeamField::Description, self.description.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            validate_name("name", name)?;
        }

        Ok(())
    }
}

/// Association between one team and one user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamMember {
    pub id_team: String,
    pub id_user: String,
}

impl TeamMember {
    pub fn new(id_team: impl Into<String>, id_user: impl Into<String>) -> Self {
        Self {
            id_team: id_team.into(),
            id_user: id_user.into(),
        }
    }
}
