//! Level Estimator: infers a 0–5 proficiency level from resume text.
//!
//! This is an approximate heuristic. It looks at how often the skill is
//! mentioned and whether experience, project or certification language
//! appears in the same text. It is pure: the same (text, skill) always
//! yields the same level.

use crate::skills::taxonomy::CanonicalSkill;

/// Highest level on the proficiency scale.
pub const MAX_LEVEL: u8 = 5;

const EXPERIENCE_CUES: &[&str] = &["year", "experience"];
const PROJECT_CUES: &[&str] = &["project", "developed", "built"];
const CERTIFICATION_CUES: &[&str] = &["certified", "certification"];

/// Clamps an externally supplied rating into `0..=MAX_LEVEL`.
pub fn clamp_level(raw: i64) -> u8 {
    raw.clamp(0, MAX_LEVEL as i64) as u8
}

/// Estimates the level of `skill` in `text`.
///
/// Only call this for skills already matched in the text; absent skills are
/// level 0 and never reach this function, so the floor here is 1.
///
/// | condition                                        | level |
/// |--------------------------------------------------|-------|
/// | experience cue with a mention, or > 5 mentions   | 4     |
/// | project cue with a mention, or > 2 mentions      | 3     |
/// | any mention, or a certification cue              | 2     |
/// | otherwise                                        | 1     |
pub fn estimate_level(text: &str, skill: &CanonicalSkill) -> u8 {
    let lower = text.to_lowercase();
    let token = skill.primary_token();

    let mentions = count_mentions(&lower, &token);
    let mentioned = mentions > 0;

    let has_experience = mentioned && contains_any(&lower, EXPERIENCE_CUES);
    let has_project = mentioned && contains_any(&lower, PROJECT_CUES);
    let has_certification = contains_any(&lower, CERTIFICATION_CUES);

    if has_experience || mentions > 5 {
        4
    } else if has_project || mentions > 2 {
        3
    } else if mentioned || has_certification {
        2
    } else {
        1
    }
}

/// Non-overlapping occurrences of `token` in `lowered_text`.
fn count_mentions(lowered_text: &str, token: &str) -> usize {
    if token.is_empty() {
        return 0;
    }
    lowered_text.matches(token).count()
}

pub(crate) fn contains_any(lowered_text: &str, cues: &[&str]) -> bool {
    cues.iter().any(|cue| lowered_text.contains(cue))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(name: &str) -> CanonicalSkill {
        CanonicalSkill::from(name)
    }

    #[test]
    fn test_six_mentions_without_cues_is_level_4() {
        let text = "java java java java java java";
        assert_eq!(estimate_level(text, &skill("Java")), 4);
    }

    #[test]
    fn test_experience_cue_with_mention_is_level_4() {
        let text = "Three years of Python in production";
        assert_eq!(estimate_level(text, &skill("Python")), 4);
    }

    #[test]
    fn test_experience_cue_counts_the_word_experience() {
        let text = "Hands-on experience with Docker";
        assert_eq!(estimate_level(text, &skill("Docker")), 4);
    }

    #[test]
    fn test_project_cue_with_mention_is_level_3() {
        let text = "Built a chat app using React";
        assert_eq!(estimate_level(text, &skill("React")), 3);
    }

    #[test]
    fn test_three_mentions_without_cues_is_level_3() {
        let text = "sql, sql and more sql";
        assert_eq!(estimate_level(text, &skill("SQL")), 3);
    }

    #[test]
    fn test_single_mention_without_cues_is_level_2() {
        let text = "Familiar with Git";
        assert_eq!(estimate_level(text, &skill("Git")), 2);
    }

    #[test]
    fn test_certification_without_mention_is_level_2() {
        // Matched via a synonym ("cloud"), so the primary token "aws" is never counted.
        let text = "Cloud practitioner, certified";
        assert_eq!(estimate_level(text, &skill("AWS")), 2);
    }

    #[test]
    fn test_synonym_only_match_without_cues_is_level_1() {
        let text = "Worked with containers";
        assert_eq!(estimate_level(text, &skill("Docker")), 1);
    }

    #[test]
    fn test_cues_without_mention_do_not_raise_level() {
        let text = "10 years experience, built many projects with containers";
        assert_eq!(estimate_level(text, &skill("Docker")), 1);
    }

    #[test]
    fn test_multi_word_primary_token_is_counted() {
        let text = "Spring Boot services; spring boot starters; spring boot actuator";
        assert_eq!(estimate_level(text, &skill("Spring Boot")), 3);
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let text = "Developed REST API endpoints for 2 years";
        let first = estimate_level(text, &skill("REST API"));
        for _ in 0..5 {
            assert_eq!(estimate_level(text, &skill("REST API")), first);
        }
    }

    #[test]
    fn test_clamp_level_bounds() {
        assert_eq!(clamp_level(-3), 0);
        assert_eq!(clamp_level(3), 3);
        assert_eq!(clamp_level(42), 5);
    }
}
