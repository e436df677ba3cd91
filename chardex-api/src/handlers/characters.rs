//! Handlers for the character CRUD endpoints.
//!
//! `{name}` path segments are matched against stored names ignoring case. When several
//! characters share a name, the first one in store order is the one returned, updated
//! or deleted.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::models::{CharacterEnvelope, CharacterRecord, CharacterResponse, MessageResponse};
use crate::state::AppState;

pub const CREATED_MESSAGE: &str = "Character created successfully";
pub const UPDATED_MESSAGE: &str = "Character updated successfully";
pub const DELETED_MESSAGE: &str = "Character deleted successfully";

/// GET /characters
///
/// List every character.
#[utoipa::path(
    get,
    path = "/characters",
    tag = "characters",
    responses(
        (status = 200, description = "All characters, possibly none", body = [CharacterResponse]),
        (status = 503, description = "Document store unreachable", body = MessageResponse),
        (status = 500, description = "Unexpected failure", body = MessageResponse),
    )
)]
pub async fn list_characters(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CharacterResponse>>> {
    let characters = state.characters().list().await?;

    Ok(Json(characters.into_iter().map(CharacterResponse::from).collect()))
}

/// GET /characters/{name}
#[utoipa::path(
    get,
    path = "/characters/{name}",
    tag = "characters",
    params(("name" = String, Path, description = "Character name, matched ignoring case")),
    responses(
        (status = 200, description = "The first character with this name", body = CharacterResponse),
        (status = 404, description = "No character has this name", body = MessageResponse),
        (status = 503, description = "Document store unreachable", body = MessageResponse),
        (status = 500, description = "Unexpected failure", body = MessageResponse),
    )
)]
pub async fn get_character(
    State(state): State<AppState>,
    AppPath(name): AppPath<String>,
) -> AppResult<Json<CharacterResponse>> {
    let character = state
        .characters()
        .find_by_name(&name)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok(Json(character.into()))
}

/// POST /characters
///
/// Store a new character. Names are not checked for duplicates unless unique names
/// are enabled.
#[utoipa::path(
    post,
    path = "/characters",
    tag = "characters",
    request_body = CharacterRecord,
    responses(
        (status = 201, description = "Character created", body = CharacterEnvelope),
        (status = 400, description = "Body is not a valid character", body = MessageResponse),
        (status = 409, description = "Name already taken (unique names only)", body = MessageResponse),
        (status = 503, description = "Document store unreachable", body = MessageResponse),
        (status = 500, description = "Unexpected failure", body = MessageResponse),
    )
)]
pub async fn create_character(
    State(state): State<AppState>,
    AppJson(record): AppJson<CharacterRecord>,
) -> AppResult<(StatusCode, Json<CharacterEnvelope>)> {
    let name = record.name.clone().unwrap_or_default();
    let created = state
        .characters()
        .create(record)
        .await
        .map_err(|e| AppError::from_write(e, &name))?;

    tracing::info!(id = %created.id, name = %name, "Character created");

    Ok((
        StatusCode::CREATED,
        Json(CharacterEnvelope::new(CREATED_MESSAGE, created)),
    ))
}

/// PUT /characters/{name}
///
/// Merge the supplied fields into the character; fields not sent are left unchanged.
#[utoipa::path(
    put,
    path = "/characters/{name}",
    tag = "characters",
    params(("name" = String, Path, description = "Character name, matched ignoring case")),
    request_body = CharacterRecord,
    responses(
        (status = 200, description = "Character after the update", body = CharacterEnvelope),
        (status = 400, description = "Body is not a valid character", body = MessageResponse),
        (status = 404, description = "No character has this name", body = MessageResponse),
        (status = 409, description = "New name already taken (unique names only)", body = MessageResponse),
        (status = 503, description = "Document store unreachable", body = MessageResponse),
        (status = 500, description = "Unexpected failure", body = MessageResponse),
    )
)]
pub async fn update_character(
    State(state): State<AppState>,
    AppPath(name): AppPath<String>,
    AppJson(patch): AppJson<CharacterRecord>,
) -> AppResult<Json<CharacterEnvelope>> {
    let written_name = patch.name.clone().unwrap_or_else(|| name.clone());
    let updated = state
        .characters()
        .update_by_name(&name, patch)
        .await
        .map_err(|e| AppError::from_write(e, &written_name))?
        .ok_or(AppError::NotFound)?;

    tracing::info!(id = %updated.id, name = %name, "Character updated");

    Ok(Json(CharacterEnvelope::new(UPDATED_MESSAGE, updated)))
}

/// DELETE /characters/{name}
#[utoipa::path(
    delete,
    path = "/characters/{name}",
    tag = "characters",
    params(("name" = String, Path, description = "Character name, matched ignoring case")),
    responses(
        (status = 200, description = "The deleted character", body = CharacterEnvelope),
        (status = 404, description = "No character has this name", body = MessageResponse),
        (status = 503, description = "Document store unreachable", body = MessageResponse),
        (status = 500, description = "Unexpected failure", body = MessageResponse),
    )
)]
pub async fn delete_character(
    State(state): State<AppState>,
    AppPath(name): AppPath<String>,
) -> AppResult<Json<CharacterEnvelope>> {
    let deleted = state
        .characters()
        .delete_by_name(&name)
        .await?
        .ok_or(AppError::NotFound)?;

    tracing::info!(id = %deleted.id, name = %name, "Character deleted");

    Ok(Json(CharacterEnvelope::new(DELETED_MESSAGE, deleted)))
}
