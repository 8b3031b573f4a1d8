//! Study plan generation: orchestrates scheduling, prose and persistence.
//!
//! Flow: ranked gaps → schedule → topic → LLM prose (optional) → offline
//! render on any failure → persist → response.

use serde::Serialize;
use tracing::{info, warn};

use crate::llm_client::prompts::{PLAIN_TEXT_RULES, STUDY_PLANNER_SYSTEM};
use crate::llm_client::TextGenerator;
use crate::models::study_plan::{StudyPlanResponse, StudyPlanRow};
use crate::planning::prompts::{
    gap_context, tier_instruction, GOAL_PLAN_PROMPT_TEMPLATE, TOPIC_PLAN_PROMPT_TEMPLATE,
};
use crate::planning::scheduler::{schedule, topic_outline, DayPlan, ScheduleRequest};
use crate::planning::store::PlanStore;
use crate::skills::analysis::{GapAnalysisResult, GoalType};
use crate::skills::taxonomy::CanonicalSkill;

const DEFAULT_TOPIC_DAYS: i64 = 5;
const DEFAULT_TOPIC: &str = "your chosen topic";

/// A persisted goal plan together with the schedule it was built from.
#[derive(Debug, Clone, Serialize)]
pub struct GoalPlan {
    pub schedule: DayPlan,
    pub record: StudyPlanResponse,
}

/// `Master skills for <GOAL>: a, b, c`.
pub fn plan_topic(goal_type: GoalType, focus: &[CanonicalSkill]) -> String {
    if focus.is_empty() {
        return format!("Master skills for {goal_type}");
    }
    let names: Vec<&str> = focus.iter().map(CanonicalSkill::as_str).collect();
    format!("Master skills for {goal_type}: {}", names.join(", "))
}

/// Builds, renders and stores a plan for an analyzed goal.
pub async fn generate_goal_plan(
    goal_type: GoalType,
    days: Option<i64>,
    analysis: &GapAnalysisResult,
    generator: Option<&dyn TextGenerator>,
    store: &dyn PlanStore,
) -> anyhow::Result<GoalPlan> {
    let ranked_gaps = analysis.ranked_gaps();
    let day_plan = schedule(&ScheduleRequest {
        goal_type,
        day_budget: days,
        ranked_gaps: ranked_gaps.clone(),
    });
    let topic = plan_topic(goal_type, &day_plan.focus_skills);

    let prompt = GOAL_PLAN_PROMPT_TEMPLATE
        .replace("{goal_type}", &goal_type.to_string())
        .replace("{days}", &day_plan.day_budget.to_string())
        .replace(
            "{gap_context}",
            &gap_context(day_plan.day_budget, &ranked_gaps, &day_plan.focus_skills),
        )
        .replace("{tier_instruction}", &tier_instruction(day_plan.day_budget))
        .replace("{rules}", PLAIN_TEXT_RULES);

    let plan = match request_prose(generator, &prompt).await {
        Some(prose) => prose,
        None => day_plan.render(&topic),
    };

    let saved = store.save(StudyPlanRow::new(topic, plan)).await?;
    info!(
        "Stored goal plan {} ({} days, {} focus skills)",
        saved.id,
        day_plan.day_budget,
        day_plan.focus_skills.len()
    );

    Ok(GoalPlan {
        schedule: day_plan,
        record: saved.into(),
    })
}

/// Builds, renders and stores a plan for a free-form topic.
pub async fn generate_topic_plan(
    topic: &str,
    days: Option<i64>,
    generator: Option<&dyn TextGenerator>,
    store: &dyn PlanStore,
) -> anyhow::Result<StudyPlanResponse> {
    let topic = match topic.trim() {
        "" => DEFAULT_TOPIC,
        t => t,
    };
    let days = days.filter(|d| *d > 0).unwrap_or(DEFAULT_TOPIC_DAYS);

    let prompt = TOPIC_PLAN_PROMPT_TEMPLATE
        .replace("{topic}", topic)
        .replace("{days}", &days.to_string())
        .replace("{rules}", PLAIN_TEXT_RULES);

    let plan = match request_prose(generator, &prompt).await {
        Some(prose) => prose,
        None => topic_outline(topic, days),
    };

    let saved = store.save(StudyPlanRow::new(topic, plan)).await?;
    info!("Stored topic plan {} for '{}'", saved.id, saved.topic);
    Ok(saved.into())
}

async fn request_prose(generator: Option<&dyn TextGenerator>, prompt: &str) -> Option<String> {
    let generator = generator?;
    match generator.complete(STUDY_PLANNER_SYSTEM, prompt).await {
        Some(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        _ => {
            warn!("No plan prose from LLM; rendering offline plan");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::planning::store::InMemoryPlanStore;
    use crate::skills::gaps::SkillGap;

    /// Replies with a fixed text and records the last prompt it saw.
    struct Scripted {
        reply: Option<&'static str>,
        last_prompt: Mutex<Option<String>>,
    }

    impl Scripted {
        fn new(reply: Option<&'static str>) -> Self {
            Self {
                reply,
                last_prompt: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for Scripted {
        async fn complete(&self, _system: &str, user: &str) -> Option<String> {
            *self.last_prompt.lock().unwrap() = Some(user.to_string());
            self.reply.map(String::from)
        }
    }

    fn analysis_with(gaps: Vec<SkillGap>) -> GapAnalysisResult {
        GapAnalysisResult {
            required_skills: gaps.iter().map(|g| g.skill().clone()).collect(),
            gaps,
            ..GapAnalysisResult::empty()
        }
    }

    fn sample_analysis() -> GapAnalysisResult {
        analysis_with(vec![
            SkillGap::new("Java".into(), 4, 4),
            SkillGap::new("Docker".into(), 4, 0),
            SkillGap::new("AWS".into(), 4, 2),
        ])
    }

    #[test]
    fn test_plan_topic_format() {
        let focus: Vec<CanonicalSkill> = vec!["Docker".into(), "AWS".into()];
        assert_eq!(plan_topic(GoalType::Job, &focus), "Master skills for JOB: Docker, AWS");
        assert_eq!(plan_topic(GoalType::Exam, &[]), "Master skills for EXAM");
    }

    #[tokio::test]
    async fn test_offline_goal_plan_is_rendered_and_stored() {
        let store = InMemoryPlanStore::new();
        let plan = generate_goal_plan(GoalType::Job, Some(5), &sample_analysis(), None, &store)
            .await
            .unwrap();

        assert_eq!(plan.record.topic, "Master skills for JOB: Docker");
        assert!(plan.record.plan.contains("Day 1:\n[ ] Focus on Docker"));
        assert!(plan.record.plan.contains("Day 5:"));
        assert_eq!(plan.schedule.days.len(), 5);

        let stored = store.find_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, plan.record.id);
    }

    #[tokio::test]
    async fn test_llm_prose_is_used_when_available() {
        let store = InMemoryPlanStore::new();
        let generator = Scripted::new(Some("  Day 1: Docker basics  "));
        let plan = generate_goal_plan(
            GoalType::Job,
            Some(21),
            &sample_analysis(),
            Some(&generator),
            &store,
        )
        .await
        .unwrap();

        assert_eq!(plan.record.plan, "Day 1: Docker basics");
        assert_eq!(plan.record.topic, "Master skills for JOB: Docker, AWS");

        let prompt = generator.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("21-day study plan for a JOB goal"));
        assert!(prompt.contains("- Docker (gap 4, current level 0/5)"));
        assert!(prompt.contains("MEDIUM PRIORITY:\n- AWS"));
    }

    #[tokio::test]
    async fn test_blank_llm_reply_falls_back_offline() {
        let store = InMemoryPlanStore::new();
        for reply in [None, Some("   ")] {
            let generator = Scripted::new(reply);
            let plan = generate_goal_plan(
                GoalType::Custom,
                None,
                &sample_analysis(),
                Some(&generator),
                &store,
            )
            .await
            .unwrap();
            assert!(plan.record.plan.starts_with("Priority-Based Study Plan"));
        }
        assert_eq!(store.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_topic_plan_offline_defaults() {
        let store = InMemoryPlanStore::new();
        let plan = generate_topic_plan(" ", Some(0), None, &store).await.unwrap();
        assert_eq!(plan.topic, "your chosen topic");
        assert!(plan.plan.contains("Day 5:"));
        assert!(!plan.plan.contains("Day 6:"));
    }

    #[tokio::test]
    async fn test_topic_plan_prefers_llm() {
        let store = InMemoryPlanStore::new();
        let generator = Scripted::new(Some("Day 1: Ownership"));
        let plan = generate_topic_plan("Rust", Some(3), Some(&generator), &store)
            .await
            .unwrap();
        assert_eq!(plan.plan, "Day 1: Ownership");
        let prompt = generator.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("3-day study plan for the topic: Rust"));
    }
}
