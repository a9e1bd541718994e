// Prompt for mock-interview generation.
// Output is fed to `normalizer::normalize_response`, which requires
// `question` / `answer` string fields.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::interview::form::InterviewRequest;
use crate::llm_client::prompts::JSON_ARRAY_ONLY_INSTRUCTION;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(\w+)\}").expect("placeholder pattern is valid"));

/// Number of questions requested per generation.
pub const QUESTION_COUNT: usize = 5;

/// Replace: {count}, {position}, {description}, {experience}, {tech_stack}, {format_instruction}
pub const INTERVIEW_PROMPT_TEMPLATE: &str = r#"As an experienced prompt engineer, generate a JSON array containing {count} technical interview questions along with detailed answers based on the following job information. Each object in the array should have the fields "question" and "answer", formatted as follows:

[
  {"question": "<Question text>", "answer": "<Answer text>"},
  ...
]

Job Information:
- Job Position: {position}
- Job Description: {description}
- Years of Experience Required: {experience}
- Tech Stacks: {tech_stack}

The questions should assess skills in {tech_stack} development and best practices, problem-solving, and experience handling complex requirements. {format_instruction} Return only the JSON array with questions and answers."#;

/// Renders the generation prompt for one request.
///
/// Placeholders are filled in a single pass over the template, so braces in
/// the submitted fields are copied through verbatim.
pub fn build_interview_prompt(request: &InterviewRequest) -> String {
    let experience = format_experience(request.experience);
    PLACEHOLDER
        .replace_all(INTERVIEW_PROMPT_TEMPLATE, |caps: &Captures| {
            match &caps[1] {
                "count" => QUESTION_COUNT.to_string(),
                "format_instruction" => JSON_ARRAY_ONLY_INSTRUCTION.to_string(),
                "position" => request.position.clone(),
                "description" => request.description.clone(),
                "experience" => experience.clone(),
                "tech_stack" => request.tech_stack.clone(),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Whole years print without a trailing `.0`.
fn format_experience(years: f64) -> String {
    if years.fract() == 0.0 {
        format!("{years:.0}")
    } else {
        years.to_string()
    }
}
