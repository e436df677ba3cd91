//! OpenAPI document and Swagger UI.

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::characters;
use crate::models::{CharacterEnvelope, CharacterRecord, CharacterResponse, MessageResponse};

pub const SWAGGER_UI_PATH: &str = "/api-docs";
pub const OPENAPI_JSON_PATH: &str = "/openapi.json";

/// OpenAPI documentation for the characters API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Characters API",
        description = "CRUD over character documents, looked up by case-insensitive name",
    ),
    paths(
        characters::list_characters,
        characters::get_character,
        characters::create_character,
        characters::update_character,
        characters::delete_character,
    ),
    components(schemas(
        CharacterRecord,
        CharacterResponse,
        CharacterEnvelope,
        MessageResponse,
    )),
    tags(
        (name = "characters", description = "Character management")
    )
)]
pub struct ApiDoc;

/// Swagger UI at [`SWAGGER_UI_PATH`], backed by the JSON document at [`OPENAPI_JSON_PATH`].
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi())
}
