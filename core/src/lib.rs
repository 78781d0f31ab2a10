//! Async data-access and state layer for the character admin panel.
//!
//! # Overview
//! Two layers, leaves first:
//! - `CharacterService` translates list/create/delete/update into HTTP
//!   requests against one base URL and decodes the results.
//! - `CharacterStore` holds the current character snapshot, routes every
//!   write through the service and patches its snapshot only after the
//!   remote call succeeded.
//!
//! # Design
//! - `CharacterClient` is sans-IO: `build_*` produces an `HttpRequest`,
//!   `parse_*` consumes an `HttpResponse`. A `Transport` sits in between,
//!   so every layer above it can be tested with scripted responses.
//! - The store is an explicitly constructed value owned by the caller; it
//!   publishes immutable snapshots through a `tokio::sync::watch` channel.
//! - Failures are returned to the caller. What to show the user is the UI's
//!   decision.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod service;
pub mod store;
pub mod transport;
pub mod types;

#[cfg(test)]
mod testing;

pub use client::CharacterClient;
pub use config::ClientConfig;
pub use error::{ApiError, StoreError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::CharacterService;
pub use store::{CharacterStore, Snapshot, StoreState};
pub use transport::{Transport, UreqTransport};
pub use types::{Character, CharacterDraft, CharacterEnvelope, CharacterId, CharacterPage, PageInfo};
