use axum::routing::get;
use axum::Router;

use crate::handlers::characters;
use crate::state::AppState;

/// Character routes.
///
/// ```text
/// GET    /characters          -> list_characters
/// POST   /characters          -> create_character
/// GET    /characters/{name}   -> get_character
/// PUT    /characters/{name}   -> update_character
/// DELETE /characters/{name}   -> delete_character
/// ```
pub fn characters_router() -> Router<AppState> {
    Router::new()
        .route(
            "/characters",
            get(characters::list_characters).post(characters::create_character),
        )
        .route(
            "/characters/{name}",
            get(characters::get_character)
                .put(characters::update_character)
                .delete(characters::delete_character),
        )
}
