//! Gap analysis: the top-level entry point of the skill engine.
//!
//! Flow: requirement text → required skills → current skills (self ratings +
//! resume) → gaps → readiness → ATS score → prioritized skills.
//!
//! Never fails outward. Blank requirements give a neutral result; an
//! internal inconsistency is logged and reported as readiness "Error".

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

use crate::llm_client::TextGenerator;
use crate::skills::ats::{self, AtsScore};
use crate::skills::extractor::extract_skills;
use crate::skills::gaps::{
    analyze, prioritize, readiness_score, resolve_current_skills, Percent, Readiness, SkillGap,
};
use crate::skills::level::{clamp_level, estimate_level};
use crate::skills::taxonomy::{CanonicalSkill, SkillTaxonomy};

/// Placeholder requirement used when a requirement text names no known skill.
pub const GENERAL_SKILLS: &str = "General Skills";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GoalType {
    Job,
    Exam,
    #[default]
    Custom,
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GoalType::Job => "JOB",
            GoalType::Exam => "EXAM",
            GoalType::Custom => "CUSTOM",
        })
    }
}

/// Request body shared by the analysis and plan endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GoalRequest {
    pub goal_type: GoalType,
    /// Job description, exam syllabus or custom goal text.
    pub target_text: Option<String>,
    /// Text extracted from an uploaded JD; preferred over `target_text`.
    pub jd_text: Option<String>,
    pub resume_text: Option<String>,
    /// Manual 0–5 ratings; always override resume-derived levels.
    pub self_ratings: HashMap<String, i64>,
    /// Per-skill required level overrides (default 4).
    pub required_levels: HashMap<String, i64>,
    pub days: Option<i64>,
}

impl GoalRequest {
    /// `jd_text` when non-blank, otherwise `target_text`, otherwise "".
    pub fn requirement_text(&self) -> &str {
        self.jd_text
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .or(self.target_text.as_deref())
            .unwrap_or("")
    }

    pub fn resume_text(&self) -> &str {
        self.resume_text.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GapAnalysisResult {
    pub required_skills: Vec<CanonicalSkill>,
    pub gaps: Vec<SkillGap>,
    pub readiness_score: Readiness,
    pub ats_score: AtsScore,
    pub prioritized_skills: Vec<CanonicalSkill>,
}

impl GapAnalysisResult {
    /// Neutral result for a missing requirement text.
    pub fn empty() -> Self {
        Self {
            required_skills: Vec::new(),
            gaps: Vec::new(),
            readiness_score: Readiness::Score(Percent::ZERO),
            ats_score: AtsScore::NotApplicable,
            prioritized_skills: Vec::new(),
        }
    }

    /// Safe result for an internal failure.
    pub fn error() -> Self {
        Self {
            readiness_score: Readiness::Error,
            ..Self::empty()
        }
    }

    /// Gaps in priority order (priority desc, gap size desc).
    pub fn ranked_gaps(&self) -> Vec<SkillGap> {
        prioritize(&self.gaps)
    }
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("gap analysis produced {gaps} gaps for {required} required skills")]
    Inconsistent { required: usize, gaps: usize },
}

/// Runs the full gap analysis for a goal request.
pub async fn analyze_goal(
    request: &GoalRequest,
    taxonomy: &SkillTaxonomy,
    enrichment: Option<&dyn TextGenerator>,
) -> GapAnalysisResult {
    let requirement = request.requirement_text();
    if requirement.trim().is_empty() {
        info!("No requirement text supplied; returning empty analysis");
        return GapAnalysisResult::empty();
    }

    let mut required = extract_skills(requirement, taxonomy, enrichment).await;
    if required.is_empty() {
        required.push(CanonicalSkill::new(GENERAL_SKILLS));
    }

    finish(build_result(request, requirement, required, taxonomy))
}

/// Logs the outcome and maps a failure to the error result.
fn finish(outcome: Result<GapAnalysisResult, AnalysisError>) -> GapAnalysisResult {
    match outcome {
        Ok(result) => {
            info!(
                "Gap analysis: {} required skills, readiness {}, ats {}",
                result.required_skills.len(),
                result.readiness_score,
                result.ats_score
            );
            result
        }
        Err(e) => {
            error!("{e}");
            GapAnalysisResult::error()
        }
    }
}

fn build_result(
    request: &GoalRequest,
    requirement: &str,
    required: Vec<CanonicalSkill>,
    taxonomy: &SkillTaxonomy,
) -> Result<GapAnalysisResult, AnalysisError> {
    let resume = request.resume_text();
    let mut current = resolve_current_skills(
        &request.self_ratings,
        request.resume_text.as_deref(),
        taxonomy,
    );

    // Required skills outside the taxonomy are still levelled from the resume
    // when the ATS keyword check would find them there.
    let resume_lower = resume.to_lowercase();
    for skill in &required {
        if taxonomy.matches_text(skill, &resume_lower) {
            current
                .entry(skill.clone())
                .or_insert_with(|| estimate_level(resume, skill));
        }
    }

    let overrides: HashMap<CanonicalSkill, u8> = request
        .required_levels
        .iter()
        .map(|(name, level)| (taxonomy.canonicalize(name), clamp_level(*level)))
        .collect();

    let gaps = analyze(&required, &current, &overrides);
    check_coverage(&required, &gaps)?;
    let readiness = readiness_score(&gaps);

    let ats_score = ats::score(resume, requirement, &required, &current, taxonomy);

    let prioritized_skills = prioritize(&gaps)
        .into_iter()
        .map(|g| g.skill().clone())
        .collect();

    Ok(GapAnalysisResult {
        required_skills: required,
        gaps,
        readiness_score: Readiness::Score(readiness),
        ats_score,
        prioritized_skills,
    })
}

/// Every required skill yields exactly one gap, in the same order.
fn check_coverage(required: &[CanonicalSkill], gaps: &[SkillGap]) -> Result<(), AnalysisError> {
    let aligned = required.len() == gaps.len()
        && required.iter().zip(gaps).all(|(skill, gap)| skill == gap.skill());
    if aligned {
        Ok(())
    } else {
        Err(AnalysisError::Inconsistent {
            required: required.len(),
            gaps: gaps.len(),
        })
    }
}
