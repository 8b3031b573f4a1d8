//! Gap Analyzer: required vs current levels, priorities and readiness.

use std::collections::HashMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::skills::extractor::extract_with_levels;
use crate::skills::level::{clamp_level, MAX_LEVEL};
use crate::skills::taxonomy::{CanonicalSkill, SkillTaxonomy};

/// Required level applied when the caller gives no override.
pub const DEFAULT_REQUIRED_LEVEL: u8 = 4;

/// Current level per skill; case-insensitive keys.
pub type CurrentSkills = HashMap<CanonicalSkill, u8>;

/// Gap priority. Ordered so that `High > Medium > Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// gap ≥ 3 → HIGH, gap ≥ 2 → MEDIUM, otherwise LOW.
    pub fn from_gap(gap_size: u8) -> Self {
        match gap_size {
            g if g >= 3 => Priority::High,
            2 => Priority::Medium,
            _ => Priority::Low,
        }
    }
}

/// Deficit for one skill. `gap_size` and `priority` are derived from the two
/// levels and recomputed by every setter; they cannot be set directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillGap {
    skill: CanonicalSkill,
    required_level: u8,
    current_level: u8,
    gap_size: u8,
    priority: Priority,
}

impl SkillGap {
    pub fn new(skill: CanonicalSkill, required_level: u8, current_level: u8) -> Self {
        let mut gap = Self {
            skill,
            required_level: required_level.min(MAX_LEVEL),
            current_level: current_level.min(MAX_LEVEL),
            gap_size: 0,
            priority: Priority::Low,
        };
        gap.recompute();
        gap
    }

    pub fn skill(&self) -> &CanonicalSkill {
        &self.skill
    }

    pub fn required_level(&self) -> u8 {
        self.required_level
    }

    pub fn current_level(&self) -> u8 {
        self.current_level
    }

    pub fn gap_size(&self) -> u8 {
        self.gap_size
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn set_required_level(&mut self, level: u8) {
        self.required_level = level.min(MAX_LEVEL);
        self.recompute();
    }

    pub fn set_current_level(&mut self, level: u8) {
        self.current_level = level.min(MAX_LEVEL);
        self.recompute();
    }

    fn recompute(&mut self) {
        self.gap_size = self.required_level.saturating_sub(self.current_level);
        self.priority = Priority::from_gap(self.gap_size);
    }
}

/// Integer percentage in `0..=100`, rendered as `"NN%"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Percent(u8);

impl Percent {
    pub const ZERO: Percent = Percent(0);
    pub const FULL: Percent = Percent(100);

    /// Clamps to `[0, 100]` and rounds half-up.
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            return Percent::ZERO;
        }
        Percent(value.clamp(0.0, 100.0).round() as u8)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl Serialize for Percent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Readiness as reported outward: a percentage, or `"Error"` when the
/// analysis failed internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Score(Percent),
    Error,
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Readiness::Score(p) => write!(f, "{p}"),
            Readiness::Error => f.write_str("Error"),
        }
    }
}

impl Serialize for Readiness {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Builds one gap per required skill, preserving the order of `required`.
pub fn analyze(
    required: &[CanonicalSkill],
    current: &CurrentSkills,
    required_overrides: &HashMap<CanonicalSkill, u8>,
) -> Vec<SkillGap> {
    required
        .iter()
        .map(|skill| {
            let mut gap = SkillGap::new(skill.clone(), DEFAULT_REQUIRED_LEVEL, 0);
            if let Some(level) = required_overrides.get(skill) {
                gap.set_required_level(*level);
            }
            if let Some(level) = current.get(skill) {
                gap.set_current_level(*level);
            }
            gap
        })
        .collect()
}

/// `100 * Σcurrent / Σrequired`, clamped; 100% for no gaps or no requirements.
pub fn readiness_score(gaps: &[SkillGap]) -> Percent {
    if gaps.is_empty() {
        return Percent::FULL;
    }

    let total_current: u32 = gaps.iter().map(|g| g.current_level as u32).sum();
    let total_required: u32 = gaps.iter().map(|g| g.required_level as u32).sum();
    if total_required == 0 {
        return Percent::FULL;
    }

    Percent::from_f64(100.0 * total_current as f64 / total_required as f64)
}

/// Stable sort: priority descending, then gap size descending.
pub fn prioritize(gaps: &[SkillGap]) -> Vec<SkillGap> {
    let mut ranked = gaps.to_vec();
    ranked.sort_by(|a, b| {
        b.priority
            .cmp(&a.priority)
            .then_with(|| b.gap_size.cmp(&a.gap_size))
    });
    ranked
}

/// Merges explicit self-ratings with levels inferred from the resume.
///
/// Explicit ratings always win; resume-derived levels only fill skills the
/// user did not rate. Rating keys are canonicalized through the taxonomy and
/// values clamped to the 0–5 scale. When several keys name the same skill
/// ("k8s" and "Kubernetes"), the highest rating is kept.
pub fn resolve_current_skills(
    self_ratings: &HashMap<String, i64>,
    resume_text: Option<&str>,
    taxonomy: &SkillTaxonomy,
) -> CurrentSkills {
    let mut current = CurrentSkills::new();
    for (name, level) in self_ratings {
        if name.trim().is_empty() {
            continue;
        }
        let level = clamp_level(*level);
        current
            .entry(taxonomy.canonicalize(name))
            .and_modify(|existing| *existing = (*existing).max(level))
            .or_insert(level);
    }

    if let Some(resume) = resume_text.filter(|t| !t.trim().is_empty()) {
        for (skill, level) in extract_with_levels(resume, taxonomy) {
            current.entry(skill).or_insert(level);
        }
    }

    current
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gap(skill: &str, required: u8, current: u8) -> SkillGap {
        SkillGap::new(skill.into(), required, current)
    }

    #[test]
    fn test_priority_thresholds() {
        assert_eq!(Priority::from_gap(5), Priority::High);
        assert_eq!(Priority::from_gap(3), Priority::High);
        assert_eq!(Priority::from_gap(2), Priority::Medium);
        assert_eq!(Priority::from_gap(1), Priority::Low);
        assert_eq!(Priority::from_gap(0), Priority::Low);
    }

    #[test]
    fn test_priority_ordering_high_first() {
        assert!(Priority::High > Priority::Medium);
        assert!(Priority::Medium > Priority::Low);
    }

    #[test]
    fn test_gap_size_never_negative() {
        let g = gap("Java", 4, 5);
        assert_eq!(g.gap_size(), 0);
        assert_eq!(g.priority(), Priority::Low);
    }

    #[test]
    fn test_gap_size_recomputed_after_mutation() {
        let mut g = gap("Docker", 4, 0);
        assert_eq!((g.gap_size(), g.priority()), (4, Priority::High));

        g.set_current_level(2);
        assert_eq!((g.gap_size(), g.priority()), (2, Priority::Medium));

        g.set_required_level(5);
        assert_eq!((g.gap_size(), g.priority()), (3, Priority::High));

        for required in 0..=5 {
            for current in 0..=5 {
                g.set_required_level(required);
                g.set_current_level(current);
                assert_eq!(g.gap_size(), required.saturating_sub(current));
            }
        }
    }

    #[test]
    fn test_levels_are_capped_at_five() {
        let g = gap("SQL", 9, 7);
        assert_eq!(g.required_level(), 5);
        assert_eq!(g.current_level(), 5);
    }

    #[test]
    fn test_gap_serializes_with_derived_fields() {
        let json = serde_json::to_value(gap("AWS", 4, 1)).unwrap();
        assert_eq!(json["skill"], "AWS");
        assert_eq!(json["gap_size"], 3);
        assert_eq!(json["priority"], "HIGH");
    }

    #[test]
    fn test_analyze_defaults_and_overrides() {
        let required: Vec<CanonicalSkill> = vec!["Java".into(), "Docker".into()];
        let mut current = CurrentSkills::new();
        current.insert("java".into(), 3);
        let mut overrides = HashMap::new();
        overrides.insert(CanonicalSkill::from("Docker"), 2);

        let gaps = analyze(&required, &current, &overrides);
        assert_eq!(gaps[0].skill().as_str(), "Java");
        assert_eq!((gaps[0].required_level(), gaps[0].current_level()), (4, 3));
        assert_eq!(gaps[1].skill().as_str(), "Docker");
        assert_eq!((gaps[1].required_level(), gaps[1].current_level()), (2, 0));
    }

    #[test]
    fn test_readiness_empty_is_full() {
        assert_eq!(readiness_score(&[]).to_string(), "100%");
    }

    #[test]
    fn test_readiness_all_closed_is_full() {
        let gaps = vec![gap("Java", 4, 4), gap("SQL", 3, 3)];
        assert_eq!(readiness_score(&gaps), Percent::FULL);
    }

    #[test]
    fn test_readiness_zero_required_is_full() {
        let gaps = vec![gap("Java", 0, 0)];
        assert_eq!(readiness_score(&gaps), Percent::FULL);
    }

    #[test]
    fn test_readiness_rounds_half_up() {
        // 1 / 8 = 12.5% → 13%
        let gaps = vec![gap("Java", 4, 1), gap("SQL", 4, 0)];
        assert_eq!(readiness_score(&gaps).to_string(), "13%");
    }

    #[test]
    fn test_readiness_is_monotonic_in_current_level() {
        let mut gaps = vec![gap("Java", 4, 0), gap("Docker", 4, 0), gap("AWS", 4, 0)];
        let mut previous = readiness_score(&gaps);
        for idx in 0..gaps.len() {
            for level in 1..=5 {
                gaps[idx].set_current_level(level);
                let next = readiness_score(&gaps);
                assert!(next >= previous, "{next} < {previous}");
                previous = next;
            }
        }
        assert_eq!(previous, Percent::FULL);
    }

    #[test]
    fn test_prioritize_orders_by_priority_then_gap() {
        let gaps = vec![
            gap("Low", 4, 3),
            gap("Medium", 4, 2),
            gap("High3", 4, 1),
            gap("High4", 4, 0),
        ];
        let ranked: Vec<String> = prioritize(&gaps)
            .iter()
            .map(|g| g.skill().to_string())
            .collect();
        assert_eq!(ranked, vec!["High4", "High3", "Medium", "Low"]);
    }

    #[test]
    fn test_prioritize_is_stable_on_ties() {
        let gaps = vec![gap("A", 4, 0), gap("B", 4, 0), gap("C", 4, 0)];
        let ranked: Vec<String> = prioritize(&gaps)
            .iter()
            .map(|g| g.skill().to_string())
            .collect();
        assert_eq!(ranked, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_explicit_ratings_override_resume() {
        let taxonomy = SkillTaxonomy::default();
        let mut ratings = HashMap::new();
        ratings.insert("java".to_string(), 1);
        let current = resolve_current_skills(
            &ratings,
            Some("Java Java Java Java Java Java and Docker"),
            &taxonomy,
        );
        assert_eq!(current.get(&"Java".into()), Some(&1));
        assert_eq!(current.get(&"Docker".into()), Some(&2));
    }

    #[test]
    fn test_ratings_are_canonicalized_and_clamped() {
        let taxonomy = SkillTaxonomy::default();
        let mut ratings = HashMap::new();
        ratings.insert("rest api".to_string(), 9);
        ratings.insert("  ".to_string(), 3);
        let current = resolve_current_skills(&ratings, None, &taxonomy);
        assert_eq!(current.len(), 1);
        let (skill, level) = current.iter().next().unwrap();
        assert_eq!(skill.as_str(), "REST API");
        assert_eq!(*level, 5);
    }

    #[test]
    fn test_duplicate_self_ratings_keep_the_highest() {
        let taxonomy = SkillTaxonomy::default();
        let ratings: HashMap<String, i64> = [
            ("Java", 1),
            ("java", 4),
            ("JAVA", 2),
            ("k8s", 2),
            ("Kubernetes", 5),
            ("kubernetes", 0),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        let current = resolve_current_skills(&ratings, None, &taxonomy);
        assert_eq!(current.len(), 2);
        assert_eq!(current.get(&CanonicalSkill::from("Java")), Some(&4));
        assert_eq!(current.get(&CanonicalSkill::from("Kubernetes")), Some(&5));
    }
}
