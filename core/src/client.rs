//! Stateless HTTP request builder and response parser for the character API.
//!
//! # Design
//! `CharacterClient` holds only a `base_url` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. A `Transport` executes the round-trip in between.
//!
//! Any 2xx status counts as success: the remote API does not promise a
//! particular code for writes, and their bodies are mostly ignored.

use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Character, CharacterDraft, CharacterEnvelope, CharacterId, CharacterPage};

const RESOURCE: &str = "character";

/// Stateless request builder and response parser for `/character`.
#[derive(Debug, Clone)]
pub struct CharacterClient {
    base_url: String,
}

impl CharacterClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/{RESOURCE}", self.base_url)
    }

    pub fn build_list_characters(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.collection_url(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_character(&self, draft: &CharacterDraft) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Post, self.collection_url(), draft)
    }

    /// The id travels inside the envelope, not in the path.
    pub fn build_update_character(&self, character: &Character) -> Result<HttpRequest, ApiError> {
        json_request(HttpMethod::Put, self.collection_url(), character)
    }

    pub fn build_delete_character(&self, id: CharacterId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/{id}", self.collection_url()),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_characters(&self, response: HttpResponse) -> Result<Vec<Character>, ApiError> {
        check_status(&response)?;
        let page: CharacterPage = decode(&response.body)?;
        Ok(page.into_characters())
    }

    /// Returns the server-assigned character, or `None` when the server
    /// acknowledged the create with an empty body.
    pub fn parse_create_character(&self, response: HttpResponse) -> Result<Option<Character>, ApiError> {
        check_status(&response)?;
        if response.body.trim().is_empty() {
            return Ok(None);
        }
        let envelope: CharacterEnvelope<Character> = decode(&response.body)?;
        Ok(Some(envelope.character))
    }

    pub fn parse_update_character(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_delete_character(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

fn json_request<T: serde::Serialize>(
    method: HttpMethod,
    path: String,
    character: &T,
) -> Result<HttpRequest, ApiError> {
    let body = serde_json::to_string(&CharacterEnvelope { character })
        .map_err(|e| ApiError::Serialization(e.to_string()))?;
    Ok(HttpRequest {
        method,
        path,
        headers: vec![("content-type".to_string(), "application/json".to_string())],
        body: Some(body),
    })
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
