// Shared prompt constants and prompt-building utilities.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Common instruction substituted into every rewriting prompt.
pub const NO_FABRICATION_INSTRUCTION: &str = "\
    CRITICAL: Use only information that already exists in the resume text. \
    Do NOT invent, exaggerate, or add experience, skills, tools, metrics, or \
    qualifications. If the resume does not support a claim, omit it entirely.";
