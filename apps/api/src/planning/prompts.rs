// Prompt constants and builders for study-plan prose.
// Reuses the shared system prompt and formatting rules from llm_client::prompts.

use crate::planning::scheduler::intensive_window;
use crate::skills::gaps::{Priority, SkillGap};
use crate::skills::taxonomy::CanonicalSkill;

/// Goal plan template. Replace `{goal_type}`, `{days}`, `{gap_context}`,
/// `{tier_instruction}` and `{rules}` before sending.
pub const GOAL_PLAN_PROMPT_TEMPLATE: &str = "\
Create a {days}-day study plan for a {goal_type} goal.

Skill gaps, most urgent first:
{gap_context}

{tier_instruction}
The last day must be a review and self-assessment day.
Each day should list 3-4 short, concrete tasks.

{rules}";

/// Free-topic template. Replace `{topic}`, `{days}` and `{rules}` before sending.
pub const TOPIC_PLAN_PROMPT_TEMPLATE: &str = "\
Create a {days}-day study plan for the topic: {topic}.

Start with an overview, build up the fundamentals, give each middle day one \
sub-topic with practice, and finish with a review day.

{rules}";

/// Tier-specific guidance matching the offline focus tiers.
pub fn tier_instruction(day_budget: u32) -> String {
    match day_budget {
        0..=7 => format!(
            "You have only {day_budget} days. Focus ONLY on HIGH priority skills, \
             one core skill per day, with intensive daily practice (2-3 hours)."
        ),
        8..=14 => "Cover the HIGH priority skills in the first week, \
                   then practice and consolidate them."
            .to_string(),
        15..=30 => "Cover HIGH priority skills first, then MEDIUM priority skills. \
                    Include a short review at the end of each week."
            .to_string(),
        _ => "Build a comprehensive plan: HIGH priority skills first, then MEDIUM \
              priority skills, with weekly reviews and a final mock assessment."
            .to_string(),
    }
}

/// Lists the focus gaps by priority with their size and current level.
/// MEDIUM gaps are only listed for budgets longer than a week.
pub fn gap_context(day_budget: u32, ranked_gaps: &[SkillGap], focus: &[CanonicalSkill]) -> String {
    let in_focus = |g: &&SkillGap| focus.contains(g.skill());
    let line = |g: &SkillGap| {
        format!(
            "- {} (gap {}, current level {}/5)\n",
            g.skill(),
            g.gap_size(),
            g.current_level()
        )
    };

    let mut out = String::new();

    let high: Vec<&SkillGap> = ranked_gaps
        .iter()
        .filter(in_focus)
        .filter(|g| g.priority() == Priority::High)
        .collect();
    if !high.is_empty() {
        out.push_str(&format!(
            "HIGH PRIORITY (focus in the first {} days):\n",
            intensive_window(day_budget)
        ));
        high.into_iter().for_each(|g| out.push_str(&line(g)));
    }

    if day_budget > 7 {
        let medium: Vec<&SkillGap> = ranked_gaps
            .iter()
            .filter(in_focus)
            .filter(|g| g.priority() == Priority::Medium)
            .collect();
        if !medium.is_empty() {
            out.push_str("MEDIUM PRIORITY:\n");
            medium.into_iter().for_each(|g| out.push_str(&line(g)));
        }
    }

    if out.is_empty() {
        // Fallback focus (LOW gaps only) or no gaps at all.
        for skill in focus {
            out.push_str(&format!("- {skill}\n"));
        }
    }
    if out.is_empty() {
        out.push_str("- No specific gaps identified; build general proficiency\n");
    }
    out
}
