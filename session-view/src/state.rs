//! Typed state snapshot read by [`crate::SessionView`].
//!
//! The owning store serializes its state as JSON shaped like
//! `{"entities": [{"entity": "...", "color": "..."}], "token": "..."}`.
//! Everything is validated into strong types here, once, so the query layer
//! never touches untyped values.

use std::io::Read;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::StateError;

/// A named, colored item from the application's domain list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Label of the entity. Not guaranteed unique.
    #[serde(rename = "entity", alias = "name")]
    pub name: String,
    /// Display color, typically a CSS color string
    pub color: String,
}

impl Entity {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// The held credential. An empty token means no credential is held.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.token.is_empty()
    }
}

/// Snapshot of the application state owned by the external store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(flatten)]
    pub session: Session,
}

impl AppState {
    pub fn new(entities: Vec<Entity>, token: impl Into<String>) -> Self {
        Self {
            entities,
            session: Session::new(token),
        }
    }

    /// Parse and validate a JSON snapshot
    pub fn from_json(json: &str) -> Result<Self, StateError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse and validate a JSON snapshot from any reader
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, StateError> {
        let mut contents = String::new();
        reader.read_to_string(&mut contents)?;
        Self::from_json(&contents)
    }
}

/// Read access to the state a [`crate::SessionView`] derives from.
///
/// Implementors must not mutate the snapshot while a query is reading it.
pub trait StateStore {
    /// Entities in insertion order
    fn entities(&self) -> &[Entity];

    /// Raw credential, empty when none is held
    fn token(&self) -> &str;
}

impl StateStore for AppState {
    fn entities(&self) -> &[Entity] {
        &self.entities
    }

    fn token(&self) -> &str {
        &self.session.token
    }
}

impl<S: StateStore + ?Sized> StateStore for &S {
    fn entities(&self) -> &[Entity] {
        (**self).entities()
    }

    fn token(&self) -> &str {
        (**self).token()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
