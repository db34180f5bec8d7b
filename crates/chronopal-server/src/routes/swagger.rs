//! OpenAPI Documentation
//!
//! Centralized API documentation using utoipa.

use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::models::{ChatRequest, ChatResponse, CreatePetRequest, PetResponse, TeachRequest};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::pet::get_my_pet,
        super::pet::create_pet,
        super::pet::reset_pet,
        super::pet::get_pet,
        super::pet::delete_pet,
        super::pet::feed_pet,
        super::pet::play_with_pet,
        super::pet::teach_pet,
        super::pet::chat_with_pet,
    ),
    components(schemas(
        PetResponse,
        CreatePetRequest,
        TeachRequest,
        ChatRequest,
        ChatResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Pet", description = "Virtual pet lifecycle and interactions")
    ),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
            components.add_security_scheme(
                "owner",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-Owner-Id"))),
            );
        }
    }
}
