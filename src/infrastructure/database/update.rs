//! Partial UPDATE construction
//!
//! Only column identifiers known at compile time are interpolated into the
//! statement text. Values are always bound as parameters.

use sqlx::sqlite::SqliteConnection;

use crate::domain::{TeamField, UserField};

/// Column that may appear in the SET list of an update
pub trait Column: Copy {
    fn name(self) -> &'static str;
}

impl Column for UserField {
    fn name(self) -> &'static str {
        self.as_str()
    }
}

impl Column for TeamField {
    fn name(self) -> &'static str {
        self.as_str()
    }
}

/// `UPDATE <table> SET <col> = ?, ... WHERE <key> = ?`
#[derive(Debug, Clone)]
pub struct UpdateStatement<C: Column> {
    table: &'static str,
    key: &'static str,
    assignments: Vec<(C, String)>,
}

impl<C: Column> UpdateStatement<C> {
    pub fn new(table: &'static str, key: &'static str) -> Self {
        Self {
            table,
            key,
            assignments: Vec::new(),
        }
    }

    pub fn set(mut self, column: C, value: impl Into<String>) -> Self {
        self.assignments.push((column, value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Rendered statement, or `None` when there is nothing to set
    pub fn sql(&self) -> Option<String> {
        if self.assignments.is_empty() {
            return None;
        }

        let set_clause = self
            .assignments
            .iter()
            .map(|(column, _)| format!("{} = ?", column.name()))
            .collect::<Vec<_>>()
            .join(", ");

        Some(format!(
            "UPDATE {} SET {} WHERE {} = ?",
            self.table, set_clause, self.key
        ))
    }

    /// Run the update for the row identified by `key_value`, returning rows affected
    pub async fn execute(
        &self,
        conn: &mut SqliteConnection,
        key_value: &str,
    ) -> Result<u64, sqlx::Error> {
        let Some(sql) = self.sql() else {
            return Ok(0);
        };

        let mut query = sqlx::query(&sql);
        for (_, value) in &self.assignments {
            query = query.bind(value.as_str());
        }

        let result = query.bind(key_value).execute(conn).await?;
        Ok(result.rows_affected())
    }
}
