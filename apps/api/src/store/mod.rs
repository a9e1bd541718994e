//! Persistence adapter for interviews.
//!
//! `AppState` holds an `Arc<dyn InterviewStore>`; production uses
//! `PgInterviewStore`, tests use the in-memory store.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::interview::{Interview, QaRecord};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgInterviewStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Fields written when an interview is first generated.
#[derive(Debug, Clone)]
pub struct NewInterview {
    pub user_id: String,
    pub position: String,
    pub description: String,
    pub experience: f64,
    pub tech_stack: String,
    pub questions: Vec<QaRecord>,
}

/// Fields merged into an existing interview on edit.
#[derive(Debug, Clone)]
pub struct InterviewUpdate {
    pub position: String,
    pub description: String,
    pub experience: f64,
    pub tech_stack: String,
    pub questions: Vec<QaRecord>,
}

/// Every lookup is scoped to the owning user; another user's id behaves as missing.
#[async_trait]
pub trait InterviewStore: Send + Sync {
    async fn create(&self, interview: NewInterview) -> Result<Interview, StoreError>;

    async fn update(
        &self,
        id: Uuid,
        user_id: &str,
        update: InterviewUpdate,
    ) -> Result<Option<Interview>, StoreError>;

    async fn get(&self, id: Uuid, user_id: &str) -> Result<Option<Interview>, StoreError>;

    /// Newest first.
    async fn list(&self, user_id: &str) -> Result<Vec<Interview>, StoreError>;

    async fn delete(&self, id: Uuid, user_id: &str) -> Result<bool, StoreError>;
}
