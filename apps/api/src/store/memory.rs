//! In-memory `InterviewStore` used by controller and router tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::models::interview::Interview;
use crate::store::{InterviewStore, InterviewUpdate, NewInterview, StoreError};

#[derive(Debug, Clone, Default)]
pub struct MemoryInterviewStore {
    interviews: Arc<Mutex<Vec<Interview>>>,
    fail_writes: bool,
}

impl MemoryInterviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every create/update fails as if the database were down.
    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn insert(&self, interview: Interview) {
        self.interviews.lock().unwrap().push(interview);
    }

    pub fn len(&self) -> usize {
        self.interviews.lock().unwrap().len()
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Unavailable("write rejected".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl InterviewStore for MemoryInterviewStore {
    async fn create(&self, interview: NewInterview) -> Result<Interview, StoreError> {
        self.check_writable()?;
        let mut interviews = self.interviews.lock().unwrap();
        // Strictly increasing timestamps keep newest-first ordering deterministic.
        let now = Utc::now() + Duration::milliseconds(interviews.len() as i64);
        let created = Interview {
            id: Uuid::new_v4(),
            user_id: interview.user_id,
            position: interview.position,
            description: interview.description,
            experience: interview.experience,
            tech_stack: interview.tech_stack,
            questions: interview.questions,
            created_at: now,
            updated_at: now,
        };
        interviews.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: Uuid,
        user_id: &str,
        update: InterviewUpdate,
    ) -> Result<Option<Interview>, StoreError> {
        self.check_writable()?;
        let mut interviews = self.interviews.lock().unwrap();
        let Some(existing) = interviews
            .iter_mut()
            .find(|i| i.id == id && i.user_id == user_id)
        else {
            return Ok(None);
        };
        existing.position = update.position;
        existing.description = update.description;
        existing.experience = update.experience;
        existing.tech_stack = update.tech_stack;
        existing.questions = update.questions;
        existing.updated_at = Utc::now();
        Ok(Some(existing.clone()))
    }

    async fn get(&self, id: Uuid, user_id: &str) -> Result<Option<Interview>, StoreError> {
        Ok(self
            .interviews
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == id && i.user_id == user_id)
            .cloned())
    }

    async fn list(&self, user_id: &str) -> Result<Vec<Interview>, StoreError> {
        let mut owned: Vec<Interview> = self
            .interviews
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(owned)
    }

    async fn delete(&self, id: Uuid, user_id: &str) -> Result<bool, StoreError> {
        let mut interviews = self.interviews.lock().unwrap();
        let before = interviews.len();
        interviews.retain(|i| !(i.id == id && i.user_id == user_id));
        Ok(interviews.len() < before)
    }
}
