//! ATS Scorer: heuristic resume-to-requirement match score.
//!
//! Weighted sub-scores (max 100):
//! - keyword coverage  40: required skills whose name or synonym appears in the resume
//! - level adequacy    30: required skills with a current level ≥ 3
//! - experience        20: +7 duration cue, +7 project cue, +6 education cue
//! - format            10: +5 action verb, +5 quantified result

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

use crate::skills::gaps::{CurrentSkills, Percent};
use crate::skills::level::contains_any;
use crate::skills::taxonomy::{CanonicalSkill, SkillTaxonomy};

const KEYWORD_WEIGHT: f64 = 40.0;
const LEVEL_WEIGHT: f64 = 30.0;
const ADEQUATE_LEVEL: u8 = 3;

const DURATION_CUES: &[&str] = &["year", "experience"];
const PROJECT_CUES: &[&str] = &["project", "developed", "built"];
const EDUCATION_CUES: &[&str] = &["education", "degree", "bachelor", "master"];
const ACTION_VERBS: &[&str] = &["developed", "implemented", "designed", "managed"];

static QUANTIFIED_RESULT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+%|\d+\+|\d+ years").expect("valid regex"));

/// ATS score as reported outward: a percentage, or `"N/A"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtsScore {
    Score(Percent),
    NotApplicable,
}

impl fmt::Display for AtsScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtsScore::Score(p) => write!(f, "{p}"),
            AtsScore::NotApplicable => f.write_str("N/A"),
        }
    }
}

impl Serialize for AtsScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Scores `resume_text` against `requirement_text`.
///
/// Returns `NotApplicable` when either text is blank.
pub fn score(
    resume_text: &str,
    requirement_text: &str,
    required: &[CanonicalSkill],
    current: &CurrentSkills,
    taxonomy: &SkillTaxonomy,
) -> AtsScore {
    if resume_text.trim().is_empty() || requirement_text.trim().is_empty() {
        return AtsScore::NotApplicable;
    }

    let resume = resume_text.to_lowercase();

    let total = keyword_coverage(&resume, required, taxonomy)
        + level_adequacy(required, current)
        + experience_signals(&resume)
        + format_signals(&resume);

    AtsScore::Score(Percent::from_f64(total))
}

fn keyword_coverage(resume: &str, required: &[CanonicalSkill], taxonomy: &SkillTaxonomy) -> f64 {
    if required.is_empty() {
        return 0.0;
    }
    let matched = required
        .iter()
        .filter(|skill| taxonomy.matches_text(skill, resume))
        .count();
    matched as f64 * KEYWORD_WEIGHT / required.len() as f64
}

fn level_adequacy(required: &[CanonicalSkill], current: &CurrentSkills) -> f64 {
    if required.is_empty() {
        return 0.0;
    }
    let adequate = required
        .iter()
        .filter(|skill| current.get(*skill).is_some_and(|level| *level >= ADEQUATE_LEVEL))
        .count();
    adequate as f64 * LEVEL_WEIGHT / required.len() as f64
}

fn experience_signals(resume: &str) -> f64 {
    let mut score = 0.0;
    if contains_any(resume, DURATION_CUES) {
        score += 7.0;
    }
    if contains_any(resume, PROJECT_CUES) {
        score += 7.0;
    }
    if contains_any(resume, EDUCATION_CUES) {
        score += 6.0;
    }
    score
}

fn format_signals(resume: &str) -> f64 {
    let mut score = 0.0;
    if contains_any(resume, ACTION_VERBS) {
        score += 5.0;
    }
    if QUANTIFIED_RESULT.is_match(resume) {
        score += 5.0;
    }
    score
}
