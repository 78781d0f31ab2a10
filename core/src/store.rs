//! Reactive character store.
//!
//! # Design
//! `CharacterStore` owns the current snapshot in a `tokio::sync::watch`
//! channel. Every write goes to the remote API first; only after it
//! succeeds is the local snapshot patched and republished as a fresh
//! immutable `Arc<StoreState>`. Readers either take a point-in-time
//! snapshot or subscribe to every change.
//!
//! Mutations are not coordinated with each other. Two racing writes both
//! hit the server and both patch the snapshot; the last patch wins.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::{ApiError, StoreError};
use crate::service::CharacterService;
use crate::transport::{Transport, UreqTransport};
use crate::types::{Character, CharacterDraft, CharacterId};

/// Everything the store knows at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    pub characters: Vec<Character>,
}

/// Immutable, cheaply clonable view of the store.
pub type Snapshot = Arc<StoreState>;

/// Single source of truth for the characters shown to the UI.
pub struct CharacterStore<T = UreqTransport> {
    service: CharacterService<T>,
    state: watch::Sender<Snapshot>,
}

impl<T: Transport> CharacterStore<T> {
    /// Build the store and run the initial fetch-all. A failed load means
    /// there is no store to use.
    pub async fn load(service: CharacterService<T>) -> Result<Self, StoreError> {
        let (state, _) = watch::channel(Snapshot::default());
        let store = Self { service, state };
        store.replace_all().await.map_err(StoreError::InitialLoad)?;
        Ok(store)
    }

    /// Re-fetch the collection and replace the snapshot wholesale.
    pub async fn refresh(&self) -> Result<(), StoreError> {
        Ok(self.replace_all().await?)
    }

    async fn replace_all(&self) -> Result<(), ApiError> {
        let characters = self.service.list_all().await?;
        info!(count = characters.len(), "loaded character snapshot");
        self.state.send_replace(Arc::new(StoreState { characters }));
        Ok(())
    }

    /// Current snapshot.
    pub fn characters(&self) -> Snapshot {
        Arc::clone(&self.state.borrow())
    }

    /// Receiver that observes every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.state.subscribe()
    }

    pub fn get_by_id(&self, id: CharacterId) -> Option<Character> {
        self.state
            .borrow()
            .characters
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    /// Create remotely, then append. Returns the character as stored.
    ///
    /// The draft's fields are kept and overlaid with whatever the server
    /// echoed back, so a partial echo never loses data. Without an echo the
    /// character gets a timestamp id that is unique within the snapshot.
    pub async fn add_character(&self, draft: CharacterDraft) -> Result<Character, StoreError> {
        let created = self.service.create(&draft).await?;
        let mut character = draft.with_id(created.as_ref().map_or(0, |c| c.id));
        if let Some(created) = &created {
            character.merge(created);
        }
        self.patch(|characters| {
            if created.is_none() {
                character.id = placeholder_id(characters);
            }
            characters.push(character.clone());
        });
        if created.is_none() {
            warn!(id = character.id, "create returned no entity; using a timestamp id");
        }
        Ok(character)
    }

    /// Delete remotely, then drop every local character with `id`.
    pub async fn remove_character(&self, id: CharacterId) -> Result<(), StoreError> {
        self.service.remove(id).await?;
        self.patch(|characters| characters.retain(|c| c.id != id));
        Ok(())
    }

    /// Update remotely, then shallow-merge into the local character with the
    /// same id. Other characters are left alone.
    pub async fn update_character(&self, character: Character) -> Result<(), StoreError> {
        self.service.update(&character).await?;
        self.patch(|characters| {
            characters
                .iter_mut()
                .filter(|c| c.id == character.id)
                .for_each(|c| c.merge(&character));
        });
        Ok(())
    }

    fn patch(&self, apply: impl FnOnce(&mut Vec<Character>)) {
        self.state.send_modify(|snapshot| {
            let mut characters = snapshot.characters.clone();
            apply(&mut characters);
            *snapshot = Arc::new(StoreState { characters });
        });
    }
}

/// Current time in milliseconds, bumped past every id already present.
fn placeholder_id(characters: &[Character]) -> CharacterId {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| CharacterId::try_from(d.as_millis()).unwrap_or(CharacterId::MAX))
        .unwrap_or_default();
    match characters.iter().map(|c| c.id).max() {
        Some(max) => now.max(max.saturating_add(1)),
        None => now,
    }
}
