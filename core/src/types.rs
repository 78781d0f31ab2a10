//! Domain DTOs for the character API.
//!
//! # Design
//! A character is identified by a numeric `id`; every other attribute is an
//! opaque payload field carried through unmodified. The payload lives in a
//! flattened JSON map so the client never has to track the remote schema.
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any drift between the two crates.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Numeric character identifier.
pub type CharacterId = i64;

/// A single character returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Character {
    pub id: CharacterId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Character {
    pub fn new(id: CharacterId, fields: Map<String, Value>) -> Self {
        Self { id, fields }
    }

    /// Returns the payload field `key`, if present.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Shallow merge: every field of `other` overwrites the field of the same
    /// name in `self`, fields only present in `self` survive. `id` is kept.
    pub fn merge(&mut self, other: &Character) {
        for (key, value) in &other.fields {
            self.fields.insert(key.clone(), value.clone());
        }
    }
}

/// Request payload for creating a character. The server assigns the id.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CharacterDraft {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl CharacterDraft {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Attach an id, producing a full character.
    pub fn with_id(self, id: CharacterId) -> Character {
        Character::new(id, self.fields)
    }
}

/// The `{ "character": ... }` wrapper used by create and update bodies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CharacterEnvelope<T> {
    pub character: T,
}

/// Paging metadata of the list response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PageInfo {
    pub count: u64,
    pub pages: u64,
    pub next: Option<String>,
    pub prev: Option<String>,
}

/// Raw list response: an object with the entity list nested under `results`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CharacterPage {
    #[serde(default)]
    pub info: PageInfo,
    pub results: Vec<Character>,
}

impl CharacterPage {
    /// Adapt the raw list response into domain characters, preserving order.
    pub fn into_characters(self) -> Vec<Character> {
        self.results
    }
}
