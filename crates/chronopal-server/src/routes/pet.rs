//! Pet Routes - Lifecycle and interactions
//!
//! HTTP handlers that delegate to PetService for business logic.
//! Request bodies are validated first, then ownership and battery are
//! checked before any mutation.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use chronopal::domain::services::lifecycle::require_text;
use chronopal::Pet;

use super::error::{api_error, ApiError};
use crate::auth::OwnerId;
use crate::models::{ChatRequest, ChatResponse, CreatePetRequest, PetResponse, TeachRequest};
use crate::AppState;

/// Reconciled pet, provided the caller owns it
async fn owned_pet(state: &AppState, owner: &OwnerId, id: Uuid) -> Result<Pet, ApiError> {
    let pet = state.pet_service.get_snapshot(id).await.map_err(api_error)?;
    if pet.owner_id != owner.as_str() {
        tracing::warn!(pet_id = %id, owner = owner.as_str(), "Pet belongs to another owner");
        return Err((
            StatusCode::FORBIDDEN,
            "Pet belongs to another owner".to_string(),
        ));
    }
    Ok(pet)
}

/// Owned pet that still has battery left
async fn live_pet(state: &AppState, owner: &OwnerId, id: Uuid) -> Result<Pet, ApiError> {
    let pet = owned_pet(state, owner, id).await?;
    if pet.is_depleted() {
        return Err((
            StatusCode::CONFLICT,
            "BatteryDepleted: reset the pet to continue".to_string(),
        ));
    }
    Ok(pet)
}

/// Get the caller's pet, hatching one on first visit
#[utoipa::path(
    get,
    path = "/chronopal/pet",
    responses(
        (status = 200, description = "The caller's pet", body = PetResponse),
        (status = 401, description = "Missing credentials or X-Owner-Id")
    ),
    tag = "Pet"
)]
pub async fn get_my_pet(
    State(state): State<AppState>,
    owner: OwnerId,
) -> Result<Json<PetResponse>, ApiError> {
    let pet = state
        .pet_service
        .get_or_create_for_owner(owner.as_str())
        .await
        .map_err(api_error)?;

    Ok(Json(pet.into()))
}

/// Hatch a named pet
#[utoipa::path(
    post,
    path = "/chronopal/pet",
    request_body = CreatePetRequest,
    responses(
        (status = 200, description = "Pet hatched", body = PetResponse),
        (status = 400, description = "Blank name or species"),
        (status = 409, description = "Owner already has a pet")
    ),
    tag = "Pet"
)]
pub async fn create_pet(
    State(state): State<AppState>,
    owner: OwnerId,
    Json(payload): Json<CreatePetRequest>,
) -> Result<Json<PetResponse>, ApiError> {
    let pet = state
        .pet_service
        .create_pet(owner.as_str(), &payload.name, &payload.species)
        .await
        .map_err(api_error)?;

    Ok(Json(pet.into()))
}

/// Replace the caller's drained pet with a fresh one
#[utoipa::path(
    post,
    path = "/chronopal/pet/reset",
    responses(
        (status = 200, description = "Fresh pet", body = PetResponse),
        (status = 404, description = "Caller has no pet"),
        (status = 412, description = "Battery above the reset threshold")
    ),
    tag = "Pet"
)]
pub async fn reset_pet(
    State(state): State<AppState>,
    owner: OwnerId,
) -> Result<Json<PetResponse>, ApiError> {
    let pet = state
        .pet_service
        .reset_depleted_pet(owner.as_str())
        .await
        .map_err(api_error)?;

    Ok(Json(pet.into()))
}

/// Get pet snapshot by ID
#[utoipa::path(
    get,
    path = "/chronopal/pets/{id}",
    params(
        ("id" = Uuid, Path, description = "Pet ID")
    ),
    responses(
        (status = 200, description = "Pet found", body = PetResponse),
        (status = 403, description = "Pet belongs to another owner"),
        (status = 404, description = "Pet not found")
    ),
    tag = "Pet"
)]
pub async fn get_pet(
    State(state): State<AppState>,
    owner: OwnerId,
    Path(id): Path<Uuid>,
) -> Result<Json<PetResponse>, ApiError> {
    let pet = owned_pet(&state, &owner, id).await?;
    Ok(Json(pet.into()))
}

/// Delete pet
#[utoipa::path(
    delete,
    path = "/chronopal/pets/{id}",
    params(
        ("id" = Uuid, Path, description = "Pet ID")
    ),
    responses(
        (status = 200, description = "Pet deleted"),
        (status = 403, description = "Pet belongs to another owner"),
        (status = 404, description = "Pet not found")
    ),
    tag = "Pet"
)]
pub async fn delete_pet(
    State(state): State<AppState>,
    owner: OwnerId,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    owned_pet(&state, &owner, id).await?;
    state.pet_service.delete_pet(id).await.map_err(api_error)?;

    Ok(Json(serde_json::json!({
        "status": "ok",
        "message": "Pet deleted"
    })))
}

/// Feed the pet
#[utoipa::path(
    post,
    path = "/chronopal/pets/{id}/feed",
    params(
        ("id" = Uuid, Path, description = "Pet ID")
    ),
    responses(
        (status = 200, description = "Pet fed", body = PetResponse),
        (status = 403, description = "Pet belongs to another owner"),
        (status = 404, description = "Pet not found"),
        (status = 409, description = "Battery depleted")
    ),
    tag = "Pet"
)]
pub async fn feed_pet(
    State(state): State<AppState>,
    owner: OwnerId,
    Path(id): Path<Uuid>,
) -> Result<Json<PetResponse>, ApiError> {
    live_pet(&state, &owner, id).await?;
    let pet = state.pet_service.feed(id).await.map_err(api_error)?;
    Ok(Json(pet.into()))
}

/// Play with the pet
#[utoipa::path(
    post,
    path = "/chronopal/pets/{id}/play",
    params(
        ("id" = Uuid, Path, description = "Pet ID")
    ),
    responses(
        (status = 200, description = "Played with pet", body = PetResponse),
        (status = 403, description = "Pet belongs to another owner"),
        (status = 404, description = "Pet not found"),
        (status = 409, description = "Battery depleted")
    ),
    tag = "Pet"
)]
pub async fn play_with_pet(
    State(state): State<AppState>,
    owner: OwnerId,
    Path(id): Path<Uuid>,
) -> Result<Json<PetResponse>, ApiError> {
    live_pet(&state, &owner, id).await?;
    let pet = state.pet_service.play(id).await.map_err(api_error)?;
    Ok(Json(pet.into()))
}

/// Teach the pet something
#[utoipa::path(
    post,
    path = "/chronopal/pets/{id}/teach",
    params(
        ("id" = Uuid, Path, description = "Pet ID")
    ),
    request_body = TeachRequest,
    responses(
        (status = 200, description = "Lesson learned", body = PetResponse),
        (status = 400, description = "Blank lesson"),
        (status = 403, description = "Pet belongs to another owner"),
        (status = 404, description = "Pet not found"),
        (status = 409, description = "Battery depleted")
    ),
    tag = "Pet"
)]
pub async fn teach_pet(
    State(state): State<AppState>,
    owner: OwnerId,
    Path(id): Path<Uuid>,
    Json(payload): Json<TeachRequest>,
) -> Result<Json<PetResponse>, ApiError> {
    require_text("lesson", &payload.lesson).map_err(api_error)?;
    live_pet(&state, &owner, id).await?;
    let pet = state
        .pet_service
        .teach(id, &payload.lesson)
        .await
        .map_err(api_error)?;
    Ok(Json(pet.into()))
}

/// Chat with the pet
#[utoipa::path(
    post,
    path = "/chronopal/pets/{id}/chat",
    params(
        ("id" = Uuid, Path, description = "Pet ID")
    ),
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Pet replied", body = ChatResponse),
        (status = 400, description = "Blank message"),
        (status = 403, description = "Pet belongs to another owner"),
        (status = 404, description = "Pet not found"),
        (status = 409, description = "Battery depleted")
    ),
    tag = "Pet"
)]
pub async fn chat_with_pet(
    State(state): State<AppState>,
    owner: OwnerId,
    Path(id): Path<Uuid>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    require_text("message", &payload.message).map_err(api_error)?;
    live_pet(&state, &owner, id).await?;
    let response = state
        .pet_service
        .chat(id, &payload.message)
        .await
        .map_err(api_error)?;
    Ok(Json(ChatResponse { response }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/chronopal/pet", get(get_my_pet).post(create_pet))
        .route("/chronopal/pet/reset", post(reset_pet))
        .route("/chronopal/pets/:id", get(get_pet).delete(delete_pet))
        .route("/chronopal/pets/:id/feed", post(feed_pet))
        .route("/chronopal/pets/:id/play", post(play_with_pet))
        .route("/chronopal/pets/:id/teach", post(teach_pet))
        .route("/chronopal/pets/:id/chat", post(chat_with_pet))
}
