// Prompt constants for the skill engine's optional LLM enrichment.

/// System prompt for skill extraction (enforces a bare comma-separated list).
pub const SKILL_EXTRACTION_SYSTEM: &str = "You are a skill extraction assistant. \
    Extract technical skills and technologies from text. \
    Return ONLY a comma-separated list of skill names, no explanations.";

/// User prompt template. `{text}` is replaced with the resume or requirement text.
pub const SKILL_EXTRACTION_PROMPT_TEMPLATE: &str = "\
Extract technical skills and technologies mentioned in this text. \
Return ONLY a comma-separated list of skill names (no explanations, no numbers). \
Normalize common variations (e.g., 'Java' not 'java' or 'JAVA').

{text}";
