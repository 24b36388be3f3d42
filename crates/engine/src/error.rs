//! The module contains the errors the engine can throw.
use sea_orm::DbErr;
use serde::Serialize;
use serde::ser::SerializeMap;
use thiserror::Error;

/// Per-field validation messages, kept in insertion order.
///
/// Serializes to the wire shape `{"field": ["message", ...]}` so handlers
/// can return it verbatim as a 400 body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<(String, String)>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-entry constructor.
    pub fn with(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push((field.to_string(), message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.0.iter().any(|(f, _)| f == field)
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (field, message)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

impl Serialize for FieldErrors {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Group repeated fields while preserving first-seen order.
        let mut grouped: Vec<(&str, Vec<&str>)> = Vec::new();
        for (field, message) in &self.0 {
            match grouped.iter_mut().find(|(name, _)| *name == field.as_str()) {
                Some((_, messages)) => messages.push(message),
                None => grouped.push((field, vec![message])),
            }
        }

        let mut map = serializer.serialize_map(Some(grouped.len()))?;
        for (field, messages) in grouped {
            map.serialize_entry(field, &messages)?;
        }
        map.end()
    }
}

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("password hashing failed: {0}")]
    PasswordHash(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::PasswordHash(a), Self::PasswordHash(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_fields_group_into_one_json_entry() {
        let mut errors = FieldErrors::new();
        errors.push("email", "must not be empty");
        errors.push("username", "already taken");
        errors.push("email", "domain is invalid");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "email": ["must not be empty", "domain is invalid"],
                "username": ["already taken"],
            })
        );
    }

    #[test]
    fn display_joins_entries() {
        let mut errors = FieldErrors::new();
        errors.push("poll", "poll 9 does not exist");
        errors.push("team", "team 4 does not exist");
        assert_eq!(
            errors.to_string(),
            "poll: poll 9 does not exist; team: team 4 does not exist"
        );
    }
}
