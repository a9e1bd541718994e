use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::interview::{Interview, InterviewRow};
use crate::store::{InterviewStore, InterviewUpdate, NewInterview, StoreError};

/// `interviews` table store. Timestamps come from the database clock.
#[derive(Clone)]
pub struct PgInterviewStore {
    pool: PgPool,
}

impl PgInterviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.pool.is_closed() {
            return Err(StoreError::Unavailable(
                "connection pool is closed".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl InterviewStore for PgInterviewStore {
    async fn create(&self, interview: NewInterview) -> Result<Interview, StoreError> {
        self.ensure_open()?;

        let row = sqlx::query_as::<_, InterviewRow>(
            r#"
            INSERT INTO interviews
                (id, user_id, position, description, experience, tech_stack, questions)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&interview.user_id)
        .bind(&interview.position)
        .bind(&interview.description)
        .bind(interview.experience)
        .bind(&interview.tech_stack)
        .bind(Json(&interview.questions))
        .fetch_one(&self.pool)
        .await?;

        info!(
            "Inserted interview {} for user {} ({} questions)",
            row.id,
            row.user_id,
            row.questions.0.len()
        );
        Ok(row.into())
    }

    async fn update(
        &self,
        id: Uuid,
        user_id: &str,
        update: InterviewUpdate,
    ) -> Result<Option<Interview>, StoreError> {
        self.ensure_open()?;

        let row = sqlx::query_as::<_, InterviewRow>(
            r#"
            UPDATE interviews
            SET position = $3,
                description = $4,
                experience = $5,
                tech_stack = $6,
                questions = $7,
                updated_at = now()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&update.position)
        .bind(&update.description)
        .bind(update.experience)
        .bind(&update.tech_stack)
        .bind(Json(&update.questions))
        .fetch_optional(&self.pool)
        .await?;

        if row.is_some() {
            info!("Updated interview {id} for user {user_id}");
        }
        Ok(row.map(Interview::from))
    }

    async fn get(&self, id: Uuid, user_id: &str) -> Result<Option<Interview>, StoreError> {
        self.ensure_open()?;

        let row = sqlx::query_as::<_, InterviewRow>(
            "SELECT * FROM interviews WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Interview::from))
    }

    async fn list(&self, user_id: &str) -> Result<Vec<Interview>, StoreError> {
        self.ensure_open()?;

        let rows = sqlx::query_as::<_, InterviewRow>(
            "SELECT * FROM interviews WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Interview::from).collect())
    }

    async fn delete(&self, id: Uuid, user_id: &str) -> Result<bool, StoreError> {
        self.ensure_open()?;

        let result = sqlx::query("DELETE FROM interviews WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!("Deleted interview {id} for user {user_id}");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use sqlx::postgres::PgPoolOptions;

    use super::*;

    async fn closed_store() -> PgInterviewStore {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://copilot@localhost/unused")
            .unwrap();
        pool.close().await;
        PgInterviewStore::new(pool)
    }

    #[tokio::test]
    async fn test_every_operation_reports_closed_pool() {
        let store = closed_store().await;
        let id = Uuid::new_v4();

        assert!(matches!(
            store.get(id, "user_1").await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(
            store.list("user_1").await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(
            store.delete(id, "user_1").await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(matches!(
            store
                .create(NewInterview {
                    user_id: "user_1".to_string(),
                    position: "Backend".to_string(),
                    description: "Owns the billing pipeline".to_string(),
                    experience: 2.0,
                    tech_stack: "Rust".to_string(),
                    questions: Vec::new(),
                })
                .await,
            Err(StoreError::Unavailable(_))
        ));
    }
}
