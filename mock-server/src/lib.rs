use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Character {
    pub id: i64,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Deserialize)]
pub struct NewCharacter {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Serialize, Deserialize)]
pub struct Envelope<T> {
    pub character: T,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Info {
    pub count: usize,
    pub pages: usize,
    pub next: Option<String>,
    pub prev: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Page {
    pub info: Info,
    pub results: Vec<Character>,
}

pub struct Roster {
    characters: Vec<Character>,
    next_id: i64,
}

impl Roster {
    pub fn seeded(characters: Vec<Character>) -> Self {
        let next_id = characters.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        Self {
            characters,
            next_id,
        }
    }
}

pub type Db = Arc<RwLock<Roster>>;

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router whose roster starts with `characters`.
pub fn app_with(characters: Vec<Character>) -> Router {
    let db: Db = Arc::new(RwLock::new(Roster::seeded(characters)));
    Router::new()
        .route(
            "/character",
            get(list_characters)
                .post(create_character)
                .put(update_character),
        )
        .route("/character/{id}", delete(delete_character))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Vec::new()).await
}

pub async fn run_with(listener: TcpListener, characters: Vec<Character>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(characters)).await
}

async fn list_characters(State(db): State<Db>) -> Json<Page> {
    let roster = db.read().await;
    let results = roster.characters.clone();
    Json(Page {
        info: Info {
            count: results.len(),
            pages: 1,
            next: None,
            prev: None,
        },
        results,
    })
}

async fn create_character(
    State(db): State<Db>,
    Json(input): Json<Envelope<NewCharacter>>,
) -> (StatusCode, Json<Envelope<Character>>) {
    let mut fields = input.character.fields;
    // The server owns ids.
    fields.remove("id");
    let mut roster = db.write().await;
    let character = Character {
        id: roster.next_id,
        fields,
    };
    roster.next_id += 1;
    roster.characters.push(character.clone());
    info!(id = character.id, "created character");
    (StatusCode::CREATED, Json(Envelope { character }))
}

async fn update_character(
    State(db): State<Db>,
    Json(input): Json<Envelope<Character>>,
) -> Result<Json<Envelope<Character>>, StatusCode> {
    let mut roster = db.write().await;
    let update = input.character;
    let character = roster
        .characters
        .iter_mut()
        .find(|c| c.id == update.id)
        .ok_or(StatusCode::NOT_FOUND)?;
    character.fields.extend(update.fields);
    info!(id = character.id, "updated character");
    Ok(Json(Envelope {
        character: character.clone(),
    }))
}

async fn delete_character(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<StatusCode, StatusCode> {
    let mut roster = db.write().await;
    let before = roster.characters.len();
    roster.characters.retain(|c| c.id != id);
    if roster.characters.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    info!(id, "deleted character");
    Ok(StatusCode::NO_CONTENT)
}
