// Shared prompt fragments.
// Each pipeline stage that needs LLM calls defines its own prompts alongside it;
// this file holds the cross-cutting pieces.

/// Closing sentence appended to every system prompt that expects JSON back.
pub const JSON_ONLY_SUFFIX: &str = "Return only valid JSON. \
    Do NOT include any text outside the JSON object. \
    Do NOT include explanations or apologies.";
