//! Form Submission Controller: one generation-and-save cycle.
//!
//! Flow: validate → claim the form's in-flight slot → build prompt →
//!       send_message → normalize → create/update in the store → notice.
//!
//! AI, normalization and persistence failures are logged and collapsed into
//! `AppError::GenerationFailed`. Nothing is retried.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info};
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;
use crate::interview::form::{describe_errors, InterviewRequest};
use crate::interview::guard::{InFlight, InFlightGuard};
use crate::interview::normalizer::{normalize_response, NormalizeError};
use crate::interview::prompts::build_interview_prompt;
use crate::llm_client::{LlmError, TextGenerator};
use crate::models::interview::{Interview, QaRecord};
use crate::store::{InterviewStore, InterviewUpdate, NewInterview, StoreError};

/// Where the client navigates after a successful submission.
pub const RESULTS_PATH: &str = "/generate";

/// Toast-style confirmation shown by the client.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Notice {
    pub title: &'static str,
    pub description: &'static str,
}

pub const CREATED_NOTICE: Notice = Notice {
    title: "Created",
    description: "New mock interview created...",
};

pub const UPDATED_NOTICE: Notice = Notice {
    title: "updated",
    description: "Changes saved successfully...",
};

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionResponse {
    pub interview: Interview,
    pub notice: Notice,
    pub redirect_to: &'static str,
}

/// Everything that can go wrong after validation. Never shown to the caller.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("AI transport error: {0}")]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error("Persistence transport error: {0}")]
    Store(#[from] StoreError),

    #[error("Interview {0} disappeared before it could be updated")]
    Vanished(Uuid),
}

/// Create path: generates questions and stores a new interview.
pub async fn create_interview(
    generator: &dyn TextGenerator,
    store: &dyn InterviewStore,
    in_flight: &InFlight,
    user_id: &str,
    request: InterviewRequest,
) -> Result<SubmissionResponse, AppError> {
    validate_submission(user_id, &request)?;
    let _guard = claim(in_flight, user_id, None)?;

    let interview = run_create(generator, store, user_id, request)
        .await
        .map_err(collapse)?;

    info!(
        "Created interview {} for user {} with {} questions",
        interview.id,
        user_id,
        interview.questions.len()
    );
    Ok(SubmissionResponse {
        interview,
        notice: CREATED_NOTICE,
        redirect_to: RESULTS_PATH,
    })
}

/// Update path: regenerates questions and merges the form fields into an existing interview.
pub async fn update_interview(
    generator: &dyn TextGenerator,
    store: &dyn InterviewStore,
    in_flight: &InFlight,
    user_id: &str,
    interview_id: Uuid,
    request: InterviewRequest,
) -> Result<SubmissionResponse, AppError> {
    validate_submission(user_id, &request)?;
    let _guard = claim(in_flight, user_id, Some(interview_id))?;

    // Checked before the AI call so a bad id costs nothing.
    let existing = store
        .get(interview_id, user_id)
        .await
        .map_err(|e| collapse(e.into()))?;
    if existing.is_none() {
        return Err(AppError::NotFound(format!(
            "Interview {interview_id} not found"
        )));
    }

    let interview = run_update(generator, store, user_id, interview_id, request)
        .await
        .map_err(collapse)?;

    info!("Updated interview {} for user {}", interview.id, user_id);
    Ok(SubmissionResponse {
        interview,
        notice: UPDATED_NOTICE,
        redirect_to: RESULTS_PATH,
    })
}

async fn run_create(
    generator: &dyn TextGenerator,
    store: &dyn InterviewStore,
    user_id: &str,
    request: InterviewRequest,
) -> Result<Interview, CycleError> {
    let questions = generate_questions(generator, &request).await?;
    let interview = store
        .create(NewInterview {
            user_id: user_id.to_string(),
            position: request.position,
            description: request.description,
            experience: request.experience,
            tech_stack: request.tech_stack,
            questions,
        })
        .await?;
    Ok(interview)
}

async fn run_update(
    generator: &dyn TextGenerator,
    store: &dyn InterviewStore,
    user_id: &str,
    interview_id: Uuid,
    request: InterviewRequest,
) -> Result<Interview, CycleError> {
    let questions = generate_questions(generator, &request).await?;
    store
        .update(
            interview_id,
            user_id,
            InterviewUpdate {
                position: request.position,
                description: request.description,
                experience: request.experience,
                tech_stack: request.tech_stack,
                questions,
            },
        )
        .await?
        .ok_or(CycleError::Vanished(interview_id))
}

/// Prompt → AI → normalized records.
pub async fn generate_questions(
    generator: &dyn TextGenerator,
    request: &InterviewRequest,
) -> Result<Vec<QaRecord>, CycleError> {
    let prompt = build_interview_prompt(request);
    let raw = generator.send_message(&prompt).await?;
    debug!("AI returned {} bytes for '{}'", raw.len(), request.position);
    Ok(normalize_response(&raw)?)
}

fn validate_submission(user_id: &str, request: &InterviewRequest) -> Result<(), AppError> {
    if user_id.trim().is_empty() {
        return Err(AppError::Validation("user_id cannot be empty".to_string()));
    }
    request
        .validate()
        .map_err(|e| AppError::Validation(describe_errors(&e)))
}

fn claim(
    in_flight: &InFlight,
    user_id: &str,
    interview_id: Option<Uuid>,
) -> Result<InFlightGuard, AppError> {
    in_flight.try_acquire(user_id, interview_id).ok_or_else(|| {
        AppError::Conflict("A submission for this form is already in progress".to_string())
    })
}

fn collapse(err: CycleError) -> AppError {
    error!("Interview generation failed: {err}");
    AppError::GenerationFailed
}
