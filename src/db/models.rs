//! Domain models for the todo service.
//!
//! These are the core entities shared by the repository and HTTP layers.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Maximum title length, counted in characters.
pub const TITLE_MAX_LEN: usize = 25;

// =============================================================================
// Status
// =============================================================================

/// Lifecycle state of a todo.
///
/// The set of values is closed: anything outside [`Status::ALL`] is rejected
/// by [`Status::parse`]. No transition rules are enforced between values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Complete,
    Incomplete,
}

/// Error returned when text does not name a registered status.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatusError {
    #[error("invalid status type {0:?}")]
    Invalid(String),
}

impl Status {
    /// Registry of canonical values, looked up by [`Status::parse`].
    pub const ALL: [Status; 2] = [Status::Complete, Status::Incomplete];

    /// Canonical text form, used on the wire and in storage.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Status::Complete => "COMPLETE",
            Status::Incomplete => "INCOMPLETE",
        }
    }

    pub fn parse(value: &str) -> Result<Status, StatusError> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| StatusError::Invalid(value.to_string()))
    }

    /// Parse a status known at compile time.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not registered. Never call this with user input.
    pub fn must_parse(value: &str) -> Status {
        match Status::parse(value) {
            Ok(status) => status,
            Err(e) => panic!("{}", e),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = StatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::parse(s)
    }
}

// =============================================================================
// Todo
// =============================================================================

/// A todo item.
///
/// `id`, `created_at` and `updated_at` are assigned by the store. Empty
/// values are omitted when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Todo {
    /// Store-assigned identifier (0 until persisted)
    #[serde(default, skip_serializing_if = "is_unassigned")]
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Buy milk")]
    pub title: String,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expired_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn is_unassigned(id: &i64) -> bool {
    *id == 0
}

impl Todo {
    /// Build an unsaved todo.
    pub fn new(title: impl Into<String>, status: Status) -> Self {
        Self {
            id: 0,
            title: title.into(),
            status,
            expired_at: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn with_expiry(mut self, expired_at: DateTime<Utc>) -> Self {
        self.expired_at = Some(expired_at);
        self
    }
}

// =============================================================================
// Write payload
// =============================================================================

/// Body of a create or update request.
///
/// Fields are kept raw so that decoding only rejects malformed JSON, while
/// business rules are checked by [`TodoPayload::validate`]. Server-assigned
/// fields in the body are ignored.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, ToSchema)]
pub struct TodoPayload {
    /// 1 to 25 characters
    #[schema(example = "Buy milk")]
    pub title: Option<String>,
    /// COMPLETE or INCOMPLETE
    #[schema(example = "INCOMPLETE")]
    pub status: Option<String>,
    /// Missing keeps the current expiry, `null` clears it
    #[serde(default, deserialize_with = "crate::serde_utils::double_option")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub expired_at: Option<Option<DateTime<Utc>>>,
}

/// One failed rule on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All rule violations found in a payload, in field order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("validate: {}", join_violations(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Names of the failing fields.
    pub fn fields(&self) -> Vec<&'static str> {
        self.violations.iter().map(|v| v.field).collect()
    }
}

impl TodoPayload {
    /// Decode a JSON request body. Does not check business rules.
    pub fn decode(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Check title and status rules, reporting every violation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut violations = Vec::new();

        match self.title.as_deref() {
            None => violations.push(FieldViolation {
                field: "title",
                message: "is required".to_string(),
            }),
            Some("") => violations.push(FieldViolation {
                field: "title",
                message: "must not be empty".to_string(),
            }),
            Some(title) if title.chars().count() > TITLE_MAX_LEN => {
                violations.push(FieldViolation {
                    field: "title",
                    message: format!("must be at most {} characters", TITLE_MAX_LEN),
                })
            }
            Some(title) if title.chars().any(char::is_control) => {
                violations.push(FieldViolation {
                    field: "title",
                    message: "must not contain control characters".to_string(),
                })
            }
            Some(_) => {}
        }

        match self.status.as_deref() {
            None => violations.push(FieldViolation {
                field: "status",
                message: "is required".to_string(),
            }),
            Some(status) => {
                if let Err(e) = Status::parse(status) {
                    violations.push(FieldViolation {
                        field: "status",
                        message: e.to_string(),
                    });
                }
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations })
        }
    }

    /// Validate and convert into an unsaved todo.
    pub fn into_todo(self) -> Result<Todo, ValidationError> {
        self.validate()?;

        let status = Status::parse(self.status.as_deref().unwrap_or_default()).map_err(|e| {
            ValidationError {
                violations: vec![FieldViolation {
                    field: "status",
                    message: e.to_string(),
                }],
            }
        })?;

        Ok(Todo {
            id: 0,
            title: self.title.unwrap_or_default(),
            status,
            expired_at: self.expired_at.flatten(),
            created_at: None,
            updated_at: None,
        })
    }

    /// Overlay the provided fields onto `current` and validate the result.
    ///
    /// Missing fields keep their stored value. Identity and timestamps
    /// come from `current`.
    pub fn merge_into(self, current: &Todo) -> Result<Todo, ValidationError> {
        let stored = TodoPayload::from(current);
        let merged = TodoPayload {
            title: self.title.or(stored.title),
            status: self.status.or(stored.status),
            expired_at: self.expired_at.or(stored.expired_at),
        };

        let mut todo = merged.into_todo()?;
        todo.id = current.id;
        todo.created_at = current.created_at;
        todo.updated_at = current.updated_at;
        Ok(todo)
    }
}

impl From<&Todo> for TodoPayload {
    fn from(todo: &Todo) -> Self {
        Self {
            title: Some(todo.title.clone()),
            status: Some(todo.status.to_string()),
            expired_at: Some(todo.expired_at),
        }
    }
}

// =============================================================================
// Health
// =============================================================================

/// Reachability of the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Up,
    Down,
}

/// Snapshot returned by [`crate::db::Database::health_check`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub status: HealthState,
    #[schema(example = "It's healthy")]
    pub message: String,
    pub open_connections: u32,
    pub idle_connections: usize,
}

impl HealthStatus {
    pub fn is_up(&self) -> bool {
        self.status == HealthState::Up
    }
}
