//! Persistence for generated study plans.
//!
//! `PgPlanStore` backs the service when `DATABASE_URL` is set;
//! `InMemoryPlanStore` is used otherwise and in tests.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::study_plan::StudyPlanRow;

#[async_trait]
pub trait PlanStore: Send + Sync {
    async fn save(&self, plan: StudyPlanRow) -> Result<StudyPlanRow>;

    /// All plans, newest first.
    async fn find_all(&self) -> Result<Vec<StudyPlanRow>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<StudyPlanRow>>;

    /// Returns `false` when no plan had that id.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool>;
}

pub struct PgPlanStore {
    pool: PgPool,
}

impl PgPlanStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlanStore for PgPlanStore {
    async fn save(&self, plan: StudyPlanRow) -> Result<StudyPlanRow> {
        let saved: StudyPlanRow = sqlx::query_as(
            r#"
            INSERT INTO study_plans (id, topic, plan, generated_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(plan.id)
        .bind(&plan.topic)
        .bind(&plan.plan)
        .bind(plan.generated_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(saved)
    }

    async fn find_all(&self) -> Result<Vec<StudyPlanRow>> {
        let rows: Vec<StudyPlanRow> =
            sqlx::query_as("SELECT * FROM study_plans ORDER BY generated_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<StudyPlanRow>> {
        let row: Option<StudyPlanRow> = sqlx::query_as("SELECT * FROM study_plans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM study_plans WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[derive(Default)]
pub struct InMemoryPlanStore {
    plans: RwLock<Vec<StudyPlanRow>>,
}

impl InMemoryPlanStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlanStore for InMemoryPlanStore {
    async fn save(&self, plan: StudyPlanRow) -> Result<StudyPlanRow> {
        self.plans.write().await.push(plan.clone());
        Ok(plan)
    }

    async fn find_all(&self) -> Result<Vec<StudyPlanRow>> {
        // Reverse first so equal timestamps keep the latest insert on top.
        let mut rows: Vec<StudyPlanRow> = self.plans.read().await.iter().rev().cloned().collect();
        rows.sort_by(|a, b| b.generated_at.cmp(&a.generated_at));
        Ok(rows)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<StudyPlanRow>> {
        Ok(self.plans.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool> {
        let mut plans = self.plans.write().await;
        let before = plans.len();
        plans.retain(|p| p.id != id);
        Ok(plans.len() < before)
    }
}
