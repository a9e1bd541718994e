//! Axum route handlers for the Interview API.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::controller::{create_interview, update_interview, SubmissionResponse};
use crate::interview::form::InterviewRequest;
use crate::models::interview::Interview;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    pub user_id: String,
}

/// Owner id from `?user_id=`. Missing or blank ids are rejected in the API error shape.
fn owner(query: Result<Query<UserIdQuery>, QueryRejection>) -> Result<String, AppError> {
    let Query(params) = query.map_err(|e| AppError::Validation(e.body_text()))?;
    if params.user_id.trim().is_empty() {
        return Err(AppError::Validation("user_id cannot be empty".to_string()));
    }
    Ok(params.user_id)
}

fn interview_id(path: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, AppError> {
    let Path(id) = path.map_err(|e| AppError::Validation(e.body_text()))?;
    Ok(id)
}

/// POST /api/v1/interviews?user_id=
///
/// Generates a question set for the submitted job description and stores it.
pub async fn handle_create_interview(
    State(state): State<AppState>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
    payload: Result<Json<InterviewRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmissionResponse>), AppError> {
    let user_id = owner(query)?;
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let response = create_interview(
        state.generator.as_ref(),
        state.store.as_ref(),
        &state.in_flight,
        &user_id,
        request,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// PUT /api/v1/interviews/:id?user_id=
///
/// Regenerates questions and saves the edited form fields.
pub async fn handle_update_interview(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
    payload: Result<Json<InterviewRequest>, JsonRejection>,
) -> Result<Json<SubmissionResponse>, AppError> {
    let id = interview_id(path)?;
    let user_id = owner(query)?;
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let response = update_interview(
        state.generator.as_ref(),
        state.store.as_ref(),
        &state.in_flight,
        &user_id,
        id,
        request,
    )
    .await?;

    Ok(Json(response))
}

/// GET /api/v1/interviews?user_id=
pub async fn handle_list_interviews(
    State(state): State<AppState>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
) -> Result<Json<Vec<Interview>>, AppError> {
    let user_id = owner(query)?;
    Ok(Json(state.store.list(&user_id).await?))
}

/// GET /api/v1/interviews/:id?user_id=
pub async fn handle_get_interview(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
) -> Result<Json<Interview>, AppError> {
    let id = interview_id(path)?;
    let user_id = owner(query)?;
    state
        .store
        .get(id, &user_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))
}

/// DELETE /api/v1/interviews/:id?user_id=
pub async fn handle_delete_interview(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<UserIdQuery>, QueryRejection>,
) -> Result<StatusCode, AppError> {
    let id = interview_id(path)?;
    let user_id = owner(query)?;
    if state.store.delete(id, &user_id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Interview {id} not found")))
    }
}
