use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

/// One generated interview question with its model answer.
///
/// `anwser` is accepted on input because the model sometimes echoes that spelling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaRecord {
    pub question: String,
    #[serde(alias = "anwser")]
    pub answer: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct InterviewRow {
    pub id: Uuid,
    pub user_id: String,
    pub position: String,
    pub description: String,
    pub experience: f64,
    pub tech_stack: String,
    pub questions: Json<Vec<QaRecord>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A persisted mock interview, as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interview {
    pub id: Uuid,
    pub user_id: String,
    pub position: String,
    pub description: String,
    pub experience: f64,
    pub tech_stack: String,
    pub questions: Vec<QaRecord>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<InterviewRow> for Interview {
    fn from(row: InterviewRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            position: row.position,
            description: row.description,
            experience: row.experience,
            tech_stack: row.tech_stack,
            questions: row.questions.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qa_record_accepts_misspelled_answer() {
        let record: QaRecord =
            serde_json::from_str(r#"{"question": "Q", "anwser": "A"}"#).unwrap();
        assert_eq!(record.answer, "A");

        let out = serde_json::to_value(&record).unwrap();
        assert_eq!(out["answer"], "A");
        assert!(out.get("anwser").is_none());
    }

    #[test]
    fn test_interview_from_row_unwraps_questions() {
        let now = Utc::now();
        let row = InterviewRow {
            id: Uuid::new_v4(),
            user_id: "user_1".to_string(),
            position: "Backend Engineer".to_string(),
            description: "Builds payment services".to_string(),
            experience: 3.0,
            tech_stack: "Rust, Postgres".to_string(),
            questions: Json(vec![QaRecord {
                question: "Q".to_string(),
                answer: "A".to_string(),
            }]),
            created_at: now,
            updated_at: now,
        };
        let interview = Interview::from(row);
        assert_eq!(interview.questions.len(), 1);
        assert_eq!(interview.user_id, "user_1");
    }
}
