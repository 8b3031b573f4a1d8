//! Plan Scheduler: turns ranked gaps and a day budget into a day-by-day outline.
//!
//! Structure of a plan with budget N:
//! - days 1..=window (window = N when N ≤ 7, else min(N/2, 7)) are the
//!   intensive phase; day d focuses on `focus[(d-1) % focus.len()]`;
//! - the remaining days are consolidation;
//! - day N is always review/assessment.
//!
//! Which skills are in focus depends on the budget tier, see
//! [`select_focus_skills`].

use serde::Serialize;

use crate::skills::analysis::GoalType;
use crate::skills::gaps::{Priority, SkillGap};
use crate::skills::taxonomy::CanonicalSkill;

/// Days are capped so a malformed request cannot produce an unbounded outline.
pub const MAX_DAY_BUDGET: u32 = 365;
const MIN_DEFAULT_DAYS: usize = 7;
const MAX_DEFAULT_DAYS: usize = 60;
const MAX_INTENSIVE_DAYS: u32 = 7;
const FALLBACK_FOCUS_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DayPhase {
    Intensive,
    Consolidation,
    Review,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayEntry {
    pub day: u32,
    pub phase: DayPhase,
    pub focus: Option<CanonicalSkill>,
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayPlan {
    pub goal_type: GoalType,
    pub day_budget: u32,
    pub focus_skills: Vec<CanonicalSkill>,
    pub intensive_days: u32,
    pub days: Vec<DayEntry>,
}

/// Input to [`schedule`]. `ranked_gaps` must already be prioritized.
#[derive(Debug, Clone)]
pub struct ScheduleRequest {
    pub goal_type: GoalType,
    pub day_budget: Option<i64>,
    pub ranked_gaps: Vec<SkillGap>,
}

/// `clamp(gap_count * 3, 7, 60)`.
pub fn default_day_budget(gap_count: usize) -> u32 {
    gap_count
        .saturating_mul(3)
        .clamp(MIN_DEFAULT_DAYS, MAX_DEFAULT_DAYS) as u32
}

/// Uses the requested budget when positive, the default otherwise.
pub fn resolve_day_budget(requested: Option<i64>, gap_count: usize) -> u32 {
    match requested {
        Some(days) if days > 0 => days.min(MAX_DAY_BUDGET as i64) as u32,
        _ => default_day_budget(gap_count),
    }
}

/// Picks the skills the plan concentrates on.
///
/// | budget   | priorities      | cap  |
/// |----------|-----------------|------|
/// | ≤ 7      | HIGH            | 3    |
/// | ≤ 14     | HIGH            | 5    |
/// | ≤ 30     | HIGH, MEDIUM    | 7    |
/// | > 30     | HIGH, MEDIUM    | none |
///
/// When the tier yields nothing, the top five gaps are used regardless of priority.
pub fn select_focus_skills(day_budget: u32, ranked_gaps: &[SkillGap]) -> Vec<CanonicalSkill> {
    let (include_medium, cap) = match day_budget {
        0..=7 => (false, Some(3)),
        8..=14 => (false, Some(5)),
        15..=30 => (true, Some(7)),
        _ => (true, None),
    };

    let selected: Vec<CanonicalSkill> = ranked_gaps
        .iter()
        .filter(|g| match g.priority() {
            Priority::High => true,
            Priority::Medium => include_medium,
            Priority::Low => false,
        })
        .take(cap.unwrap_or(usize::MAX))
        .map(|g| g.skill().clone())
        .collect();

    if !selected.is_empty() {
        return selected;
    }

    ranked_gaps
        .iter()
        .take(FALLBACK_FOCUS_COUNT)
        .map(|g| g.skill().clone())
        .collect()
}

/// Length of the intensive phase.
pub fn intensive_window(day_budget: u32) -> u32 {
    if day_budget <= MAX_INTENSIVE_DAYS {
        day_budget
    } else {
        (day_budget / 2).min(MAX_INTENSIVE_DAYS)
    }
}

/// Builds the offline day-by-day plan.
pub fn schedule(request: &ScheduleRequest) -> DayPlan {
    let day_budget = resolve_day_budget(request.day_budget, request.ranked_gaps.len());
    let focus_skills = select_focus_skills(day_budget, &request.ranked_gaps);
    let window = intensive_window(day_budget);

    let days = (1..=day_budget)
        .map(|day| plan_day(day, day_budget, window, &focus_skills))
        .collect();

    DayPlan {
        goal_type: request.goal_type,
        day_budget,
        focus_skills,
        intensive_days: window,
        days,
    }
}

fn plan_day(day: u32, day_budget: u32, window: u32, focus: &[CanonicalSkill]) -> DayEntry {
    if day == day_budget {
        return DayEntry {
            day,
            phase: DayPhase::Review,
            focus: None,
            tasks: vec![
                "Review all priority skills covered".to_string(),
                "Do a combined practice exercise".to_string(),
                "Assess your progress and identify remaining gaps".to_string(),
            ],
        };
    }

    if day <= window && !focus.is_empty() {
        let skill = &focus[(day as usize - 1) % focus.len()];
        return DayEntry {
            day,
            phase: DayPhase::Intensive,
            focus: Some(skill.clone()),
            tasks: vec![
                format!("Focus on {skill}"),
                format!("Study fundamentals and core concepts of {skill}"),
                "Practice with hands-on examples".to_string(),
                "Take notes on key points".to_string(),
            ],
        };
    }

    // Beyond a week, consolidation days walk the focus list once more.
    let continued = (day_budget > MAX_INTENSIVE_DAYS)
        .then(|| day.checked_sub(window + 1))
        .flatten()
        .and_then(|idx| focus.get(idx as usize))
        .cloned();

    let lead = match &continued {
        Some(skill) => format!("Continue with: {skill}"),
        None => "Deepen understanding of covered topics".to_string(),
    };

    DayEntry {
        day,
        phase: DayPhase::Consolidation,
        focus: continued,
        tasks: vec![
            lead,
            "Study advanced concepts and best practices".to_string(),
            "Practice with more complex exercises".to_string(),
        ],
    }
}

impl DayPlan {
    /// Plain-text rendering: heading, `Day N:` headers, `[ ] task` lines, closing tip.
    pub fn render(&self, topic: &str) -> String {
        let mut out = format!(
            "Priority-Based Study Plan for {} ({} days)\n\n",
            display_topic(topic),
            self.day_budget
        );

        for entry in &self.days {
            out.push_str(&format!("Day {}:\n", entry.day));
            for task in &entry.tasks {
                out.push_str(&format!("[ ] {task}\n"));
            }
            out.push('\n');
        }

        let tip = if self.day_budget <= MAX_INTENSIVE_DAYS {
            "Intensive daily practice (2-3 hours). Focus on HIGH priority only."
        } else {
            "Balance learning with practice. Review regularly."
        };
        out.push_str(&format!("Tip: {tip}\n"));
        out
    }
}

/// Generic outline for a free-form topic, used when no gap analysis is involved.
///
/// Day 1 is an overview, day 2 fundamentals, the last day review, and the
/// days in between focus on one sub-topic each. The first two days keep their
/// roles even in one- or two-day plans. Non-positive budgets become 5.
pub fn topic_outline(topic: &str, days: i64) -> String {
    let days = if days <= 0 {
        5
    } else {
        days.min(MAX_DAY_BUDGET as i64)
    };
    let topic = display_topic(topic);

    let mut out = format!("Study Plan for {topic}\n\n");
    for day in 1..=days {
        out.push_str(&format!("Day {day}:\n"));
        let tasks: [String; 3] = if day == 1 {
            [
                format!("Get an overview of {topic}."),
                "Watch or read a beginner-friendly introduction.".to_string(),
                "Note down key terms and core concepts.".to_string(),
            ]
        } else if day == 2 {
            [
                "Deepen your understanding of the fundamentals.".to_string(),
                "Work through 2-3 simple examples or exercises.".to_string(),
                "Write a short summary of what you learned.".to_string(),
            ]
        } else if day == days {
            [
                "Review all notes and important concepts.".to_string(),
                "Do a small mini-project or combined exercise.".to_string(),
                "Reflect on gaps and plan your next steps.".to_string(),
            ]
        } else {
            [
                format!("Focus on one sub-topic related to {topic}."),
                "Study from 1-2 quality resources (docs, videos, articles).".to_string(),
                "Practice with a few targeted exercises.".to_string(),
            ]
        };
        for task in tasks {
            out.push_str(&format!("- {task}\n"));
        }
        out.push('\n');
    }
    out.push_str("Tip: Keep sessions focused (45-60 minutes) with short breaks.\n");
    out
}

fn display_topic(topic: &str) -> &str {
    let trimmed = topic.trim();
    if trimmed.is_empty() {
        "your chosen topic"
    } else {
        trimmed
    }
}
