//! Interview form input and its validation rules.

use std::borrow::Cow;

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

const POSITION_MAX_CHARS: usize = 100;

/// The job description a question set is generated from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct InterviewRequest {
    #[validate(custom = "validate_position")]
    pub position: String,

    #[validate(length(min = 10, message = "description is required"))]
    pub description: String,

    /// Years of experience. Accepts a JSON number or a numeric string.
    #[serde(deserialize_with = "coerce_number")]
    #[validate(range(min = 0.0, message = "Experience can not be negative"))]
    pub experience: f64,

    #[serde(alias = "techStack")]
    #[validate(length(min = 1, message = "Techstack must be atleast a character"))]
    pub tech_stack: String,
}

fn validate_position(position: &str) -> Result<(), ValidationError> {
    let chars = position.chars().count();
    if chars == 0 {
        return Err(with_message("length", "position is required"));
    }
    if chars > POSITION_MAX_CHARS {
        return Err(with_message(
            "length",
            "position must be 100 character or less",
        ));
    }
    Ok(())
}

fn with_message(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn coerce_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    let value = match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => n,
        NumberOrText::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("experience must be a number, got '{text}'")))?,
    };
    if !value.is_finite() {
        return Err(D::Error::custom("experience must be a finite number"));
    }
    Ok(value)
}

/// Flattens validator output into one line, fields in alphabetical order.
pub fn describe_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);
    fields
        .into_iter()
        .map(|(field, errs)| {
            let messages: Vec<String> = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            format!("{field}: {}", messages.join(", "))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> InterviewRequest {
        InterviewRequest {
            position: "Full stack developer".to_string(),
            description: "Build and maintain the customer dashboard".to_string(),
            experience: 5.0,
            tech_stack: "React, Typescript".to_string(),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_negative_experience_rejected() {
        let request = InterviewRequest {
            experience: -1.0,
            ..valid_request()
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(
            describe_errors(&errors),
            "experience: Experience can not be negative"
        );
    }

    #[test]
    fn test_zero_experience_allowed() {
        let request = InterviewRequest {
            experience: 0.0,
            ..valid_request()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_empty_position_rejected() {
        let request = InterviewRequest {
            position: String::new(),
            ..valid_request()
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(describe_errors(&errors), "position: position is required");
    }

    #[test]
    fn test_position_length_boundary() {
        let at_limit = InterviewRequest {
            position: "é".repeat(100),
            ..valid_request()
        };
        assert!(at_limit.validate().is_ok());

        let over_limit = InterviewRequest {
            position: "a".repeat(101),
            ..valid_request()
        };
        let errors = over_limit.validate().unwrap_err();
        assert!(describe_errors(&errors).contains("100 character or less"));
    }

    #[test]
    fn test_short_description_rejected() {
        let request = InterviewRequest {
            description: "too short".to_string(),
            ..valid_request()
        };
        assert!(request.validate().is_err());

        let exactly_ten = InterviewRequest {
            description: "0123456789".to_string(),
            ..valid_request()
        };
        assert!(exactly_ten.validate().is_ok());
    }

    #[test]
    fn test_multiple_errors_listed_alphabetically() {
        let request = InterviewRequest {
            position: String::new(),
            description: String::new(),
            experience: 1.0,
            tech_stack: String::new(),
        };
        let described = describe_errors(&request.validate().unwrap_err());
        assert_eq!(
            described,
            "description: description is required; position: position is required; \
             tech_stack: Techstack must be atleast a character"
        );
    }

    #[test]
    fn test_experience_coerced_from_string() {
        let json = r#"{
            "position": "Backend",
            "description": "Owns the billing pipeline",
            "experience": " 3.5 ",
            "techStack": "Rust"
        }"#;
        let request: InterviewRequest = serde_json::from_str(json).unwrap();
        assert!((request.experience - 3.5).abs() < f64::EPSILON);
        assert_eq!(request.tech_stack, "Rust");
    }

    #[test]
    fn test_non_numeric_experience_fails_to_parse() {
        let json = r#"{
            "position": "Backend",
            "description": "Owns the billing pipeline",
            "experience": "five",
            "tech_stack": "Rust"
        }"#;
        assert!(serde_json::from_str::<InterviewRequest>(json).is_err());
    }

    #[test]
    fn test_nan_experience_rejected() {
        let json = r#"{"position": "p", "description": "0123456789", "experience": "NaN", "tech_stack": "t"}"#;
        assert!(serde_json::from_str::<InterviewRequest>(json).is_err());
    }
}
