//! Skill Extractor: turns free text into an ordered set of canonical skills.
//!
//! Two paths:
//! - primary: ask the text-generation collaborator for a comma-separated list
//!   and normalize each entry through the taxonomy (best effort);
//! - fallback: deterministic substring matching of every taxonomy token.
//!
//! The primary path reports "no result" as `None`; it never raises.

use tracing::{debug, info};

use crate::llm_client::TextGenerator;
use crate::skills::level::estimate_level;
use crate::skills::prompts::{SKILL_EXTRACTION_PROMPT_TEMPLATE, SKILL_EXTRACTION_SYSTEM};
use crate::skills::taxonomy::{CanonicalSkill, SkillTaxonomy};

/// Extracts skills from `text`, trying enrichment first when available.
///
/// Blank text always yields an empty list.
pub async fn extract_skills(
    text: &str,
    taxonomy: &SkillTaxonomy,
    enrichment: Option<&dyn TextGenerator>,
) -> Vec<CanonicalSkill> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    if let Some(generator) = enrichment {
        if let Some(skills) = extract_with_generator(text, taxonomy, generator).await {
            info!("Extracted {} skills via LLM enrichment", skills.len());
            return skills;
        }
        debug!("LLM enrichment produced nothing; using keyword extraction");
    }

    extract_by_keywords(text, taxonomy)
}

/// Deterministic keyword extraction, in taxonomy declaration order.
pub fn extract_by_keywords(text: &str, taxonomy: &SkillTaxonomy) -> Vec<CanonicalSkill> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let lower = text.to_lowercase();
    taxonomy
        .entries()
        .iter()
        .filter(|entry| entry.tokens.iter().any(|t| lower.contains(t.as_str())))
        .map(|entry| entry.skill.clone())
        .collect()
}

/// Keyword extraction annotated with the estimated level of each skill.
pub fn extract_with_levels(text: &str, taxonomy: &SkillTaxonomy) -> Vec<(CanonicalSkill, u8)> {
    extract_by_keywords(text, taxonomy)
        .into_iter()
        .map(|skill| {
            let level = estimate_level(text, &skill);
            (skill, level)
        })
        .collect()
}

async fn extract_with_generator(
    text: &str,
    taxonomy: &SkillTaxonomy,
    generator: &dyn TextGenerator,
) -> Option<Vec<CanonicalSkill>> {
    let prompt = SKILL_EXTRACTION_PROMPT_TEMPLATE.replace("{text}", text);
    let response = generator.complete(SKILL_EXTRACTION_SYSTEM, &prompt).await?;
    let skills = parse_skill_list(&response, taxonomy);
    (!skills.is_empty()).then_some(skills)
}

/// Splits a comma-separated LLM reply into canonical skills.
///
/// Known skills are resolved through the taxonomy; unknown entries are kept
/// verbatim (trimmed). Duplicates are dropped, first occurrence wins.
pub fn parse_skill_list(response: &str, taxonomy: &SkillTaxonomy) -> Vec<CanonicalSkill> {
    let mut skills: Vec<CanonicalSkill> = Vec::new();
    for raw in response.split(',') {
        let token = raw.trim().trim_matches(|c: char| c == '.' || c == '"' || c == '\'');
        if token.is_empty() {
            continue;
        }
        let skill = taxonomy
            .lookup(token)
            .unwrap_or_else(|| CanonicalSkill::new(token));
        if !skills.contains(&skill) {
            skills.push(skill);
        }
    }
    skills
}
