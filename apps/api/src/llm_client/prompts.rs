// Shared prompt fragments. Each service that needs LLM calls defines its own
// prompts.rs alongside it; this file contains cross-cutting fragments only.

/// Instruction prepended to every prompt that expects structured output.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";
