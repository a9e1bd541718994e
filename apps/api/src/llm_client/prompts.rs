// Shared prompt fragments.
// Each feature that needs LLM calls defines its own prompts.rs alongside it;
// this file holds the instructions every structured-output prompt repeats.

/// Appended to prompts whose output is fed to the response normalizer.
pub const JSON_ARRAY_ONLY_INSTRUCTION: &str = "Please format the output strictly as an array \
    of JSON objects without any additional labels, code blocks or explanations.";
