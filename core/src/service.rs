//! Resource client: the four character operations over a `Transport`.
//!
//! Each call is a single attempt. Failures are logged here and handed back
//! to the caller as `Err`; nothing is converted into an empty success.

use tracing::{debug, error};

use crate::client::CharacterClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::transport::{Transport, UreqTransport};
use crate::types::{Character, CharacterDraft, CharacterId};

/// Async client for the remote character resource.
#[derive(Clone)]
pub struct CharacterService<T = UreqTransport> {
    client: CharacterClient,
    transport: T,
}

impl CharacterService<UreqTransport> {
    /// Service over the default `ureq` transport.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(CharacterClient::from_config(config), UreqTransport::new())
    }
}

impl<T: Transport> CharacterService<T> {
    pub fn new(client: CharacterClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &CharacterClient {
        &self.client
    }

    /// Fetch the full collection.
    pub async fn list_all(&self) -> Result<Vec<Character>, ApiError> {
        let request = self.client.build_list_characters();
        let response = self.transport.execute(request).await?;
        let characters = self.client.parse_list_characters(response)?;
        debug!(count = characters.len(), "listed characters");
        Ok(characters)
    }

    /// Create a character. Returns the server's copy when it sends one back.
    pub async fn create(&self, draft: &CharacterDraft) -> Result<Option<Character>, ApiError> {
        let result = async {
            let request = self.client.build_create_character(draft)?;
            let response = self.transport.execute(request).await?;
            self.client.parse_create_character(response)
        }
        .await;
        if let Err(e) = &result {
            error!(error = %e, "error adding character");
        }
        result
    }

    pub async fn remove(&self, id: CharacterId) -> Result<(), ApiError> {
        let result = async {
            let request = self.client.build_delete_character(id);
            let response = self.transport.execute(request).await?;
            self.client.parse_delete_character(response)
        }
        .await;
        if let Err(e) = &result {
            error!(id, error = %e, "error removing character");
        }
        result
    }

    pub async fn update(&self, character: &Character) -> Result<(), ApiError> {
        let result = async {
            let request = self.client.build_update_character(character)?;
            let response = self.transport.execute(request).await?;
            self.client.parse_update_character(response)
        }
        .await;
        if let Err(e) = &result {
            error!(id = character.id, error = %e, "error updating character");
        }
        result
    }
}
