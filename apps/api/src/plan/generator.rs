//! Plan Generator — turns assessment answers into a structured yearly plan.
//!
//! Flow: serialize answers → prompt → LLM → strip fences → parse JSON →
//! validate structure. Any failure surfaces as `Err(GenerationError)`; the
//! call site composes the deterministic fallback explicitly via
//! `unwrap_or_else`, so the silent-degradation path is visible in the types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::assessment::catalog::{self, GOAL_TITLE_QUESTION, TARGET_SALARY_QUESTION};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{generate_json, GenerationConfig, LlmError, TextGenerator};
use crate::models::step::StrategicStep;
use crate::plan::prompts::{PLAN_PROMPT_TEMPLATE, WEEK_TASKS_PROMPT_TEMPLATE};

/// Every plan has exactly this many strategic steps and weekly tasks.
pub const STEP_COUNT: u32 = 10;
pub const TASK_COUNT: u32 = 10;
/// A plan spans one year of weekly coaching.
pub const PLAN_WEEKS: u32 = 52;

/// Answers keyed by question id. BTreeMap keeps prompt serialization
/// deterministic.
pub type AnswerMap = BTreeMap<u8, String>;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("Invalid plan structure: {0}")]
    Invalid(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Goal headline extracted from the plan payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanGoal {
    pub title: String,
    #[serde(default)]
    pub target_salary: Option<String>,
}

/// A strategic step as produced by generation, before persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftStep {
    pub step_number: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub timeframe: String,
    pub start_week: u32,
    pub end_week: u32,
}

/// A weekly task as produced by generation, before persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftTask {
    pub task_number: u32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub step_number: u32,
}

/// The full structured output of plan generation: a goal, a match score,
/// a gap narrative, 10 steps, and 10 week-1 tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedPlan {
    pub goal: PlanGoal,
    pub match_score: u32,
    #[serde(default)]
    pub gap_analysis: String,
    pub steps: Vec<DraftStep>,
    pub tasks: Vec<DraftTask>,
}

// ────────────────────────────────────────────────────────────────────────────
// Phase template
// ────────────────────────────────────────────────────────────────────────────

/// The fixed phase template: which weeks each step number covers.
pub fn week_range_for_step(step_number: u32) -> (u32, u32) {
    match step_number {
        1..=3 => (1, 8),
        4..=5 => (9, 16),
        6..=7 => (17, 26),
        8..=9 => (27, 40),
        _ => (41, PLAN_WEEKS),
    }
}

fn timeframe_label(start_week: u32, end_week: u32) -> String {
    format!("Тижні {start_week}–{end_week}")
}

// ────────────────────────────────────────────────────────────────────────────
// Full-plan generation
// ────────────────────────────────────────────────────────────────────────────

/// Generates a full plan from the answer map via the LLM.
pub async fn generate_plan(
    llm: &dyn TextGenerator,
    answers: &AnswerMap,
) -> Result<GeneratedPlan, GenerationError> {
    if answers.is_empty() {
        return Err(GenerationError::Invalid("empty answer map".to_string()));
    }

    let prompt = PLAN_PROMPT_TEMPLATE
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
        .replace("{answers}", &serialize_answers(answers));

    let mut plan: GeneratedPlan =
        generate_json(llm, &prompt, &GenerationConfig::default()).await?;

    plan.match_score = plan.match_score.min(100);
    validate_plan(&plan)?;
    Ok(plan)
}

/// Serializes question/answer pairs in catalog order. Unanswered questions
/// are skipped.
fn serialize_answers(answers: &AnswerMap) -> String {
    let mut lines = Vec::new();
    for q in catalog::questions() {
        if let Some(answer) = answers.get(&q.id) {
            lines.push(format!("{}. {}\n   Відповідь: {}", q.id, q.text, answer));
        }
    }
    lines.join("\n")
}

fn validate_plan(plan: &GeneratedPlan) -> Result<(), GenerationError> {
    if plan.goal.title.trim().is_empty() {
        return Err(GenerationError::Invalid("goal title is empty".to_string()));
    }
    validate_dense(
        plan.steps.iter().map(|s| s.step_number),
        STEP_COUNT,
        "step",
    )?;
    validate_dense(
        plan.tasks.iter().map(|t| t.task_number),
        TASK_COUNT,
        "task",
    )?;
    for task in &plan.tasks {
        if !(1..=STEP_COUNT).contains(&task.step_number) {
            return Err(GenerationError::Invalid(format!(
                "task {} links to step {} outside 1..{}",
                task.task_number, task.step_number, STEP_COUNT
            )));
        }
    }
    for step in &plan.steps {
        if step.start_week == 0 || step.end_week < step.start_week || step.end_week > PLAN_WEEKS {
            return Err(GenerationError::Invalid(format!(
                "step {} has invalid week range {}..{}",
                step.step_number, step.start_week, step.end_week
            )));
        }
    }
    Ok(())
}

/// Numbers must be exactly 1..=expected, each appearing once.
fn validate_dense(
    numbers: impl Iterator<Item = u32>,
    expected: u32,
    kind: &str,
) -> Result<(), GenerationError> {
    let mut seen = vec![false; expected as usize];
    let mut count = 0u32;
    for n in numbers {
        count += 1;
        if !(1..=expected).contains(&n) || seen[(n - 1) as usize] {
            return Err(GenerationError::Invalid(format!(
                "{kind} numbering is not dense 1..{expected}"
            )));
        }
        seen[(n - 1) as usize] = true;
    }
    if count != expected {
        return Err(GenerationError::Invalid(format!(
            "expected {expected} {kind}s, got {count}"
        )));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Deterministic fallback plan
// ────────────────────────────────────────────────────────────────────────────

const FALLBACK_MATCH_SCORE: u32 = 50;

const FALLBACK_GAP_ANALYSIS: &str = "Ми не змогли побудувати детальний аналіз \
    просто зараз, тому підготували базовий план. Він спирається на ваші \
    відповіді та стандартні етапи карʼєрного переходу.";

const FALLBACK_GOAL_TITLE: &str = "Карʼєрне зростання";

/// Templated step titles and descriptions for the synthetic plan, in step
/// order 1–10.
const FALLBACK_STEPS: [(&str, &str); 10] = [
    (
        "Аудит поточних навичок",
        "Скласти чесний перелік сильних сторін і прогалин відносно бажаної ролі.",
    ),
    (
        "Оновлення резюме та профілів",
        "Переписати резюме і профіль LinkedIn під цільову посаду.",
    ),
    (
        "План навчання",
        "Обрати 2–3 курси або книги, що закривають ключові прогалини.",
    ),
    (
        "Розширення мережі контактів",
        "Щотижня знайомитися з людьми з цільової сфери.",
    ),
    (
        "Перші практичні проєкти",
        "Взяти робочий або волонтерський проєкт, що демонструє нові навички.",
    ),
    (
        "Видимість в індустрії",
        "Публікувати матеріали та виступати на профільних подіях.",
    ),
    (
        "Менторство",
        "Знайти ментора на цільовій посаді та узгодити регулярні зустрічі.",
    ),
    (
        "Активний пошук можливостей",
        "Відгукуватися на вакансії або ініціювати розмову про підвищення.",
    ),
    (
        "Співбесіди та переговори",
        "Відпрацювати співбесіди й переговори про дохід.",
    ),
    (
        "Закріплення в новій ролі",
        "Скласти план перших 90 днів на новій позиції.",
    ),
];

/// Templated week-1 task titles for the synthetic plan.
const FALLBACK_TASKS: [&str; 10] = [
    "Виписати 10 ключових навичок поточної ролі",
    "Визначити 5 навичок, яких бракує для цілі",
    "Оновити заголовок і підсумок у резюме",
    "Оновити профіль LinkedIn",
    "Обрати перший курс для навчання",
    "Пройти перший урок обраного курсу",
    "Скласти список із 10 цільових контактів",
    "Написати двом людям із цільової сфери",
    "Підписатися на 3 профільні спільноти",
    "Запланувати навчальні години в календарі",
];

/// Builds the deterministic synthetic plan from raw answers.
/// Goal title and target salary come from questions 8 and 9; everything else
/// is templated on the fixed phase template.
pub fn fallback_plan(answers: &AnswerMap) -> GeneratedPlan {
    let title = answers
        .get(&GOAL_TITLE_QUESTION)
        .filter(|a| !a.trim().is_empty())
        .cloned()
        .unwrap_or_else(|| FALLBACK_GOAL_TITLE.to_string());
    let target_salary = answers
        .get(&TARGET_SALARY_QUESTION)
        .filter(|a| !a.trim().is_empty())
        .cloned();

    let steps = (1..=STEP_COUNT)
        .map(|n| {
            let (start_week, end_week) = week_range_for_step(n);
            let (step_title, description) = FALLBACK_STEPS[(n - 1) as usize];
            DraftStep {
                step_number: n,
                title: step_title.to_string(),
                description: description.to_string(),
                timeframe: timeframe_label(start_week, end_week),
                start_week,
                end_week,
            }
        })
        .collect();

    // Week-1 tasks belong to the steps active in week 1, i.e. steps 1–3.
    let tasks = (1..=TASK_COUNT)
        .map(|n| DraftTask {
            task_number: n,
            title: FALLBACK_TASKS[(n - 1) as usize].to_string(),
            description: String::new(),
            step_number: (n - 1) % 3 + 1,
        })
        .collect();

    GeneratedPlan {
        goal: PlanGoal {
            title,
            target_salary,
        },
        match_score: FALLBACK_MATCH_SCORE,
        gap_analysis: FALLBACK_GAP_ANALYSIS.to_string(),
        steps,
        tasks,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Next-week task generation
// ────────────────────────────────────────────────────────────────────────────

/// Step numbers whose week range contains the target week. When no step
/// covers the week, falls back to the first 3 steps of the plan.
pub fn active_step_numbers(steps: &[StrategicStep], week: u32) -> Vec<u32> {
    let mut active: Vec<u32> = steps
        .iter()
        .filter(|s| s.covers_week(week))
        .map(|s| s.step_number)
        .collect();
    if active.is_empty() {
        warn!("no step covers week {week}; falling back to first 3 steps");
        active = steps.iter().take(3).map(|s| s.step_number).collect();
    }
    active.sort_unstable();
    active
}

/// Generates 10 tasks for the target week via the LLM, distributed among the
/// active steps and skewed toward difficulty escalation.
pub async fn generate_week_tasks(
    llm: &dyn TextGenerator,
    goal_title: &str,
    steps: &[StrategicStep],
    completed: &[String],
    skipped: &[String],
    week: u32,
) -> Result<Vec<DraftTask>, GenerationError> {
    let active = active_step_numbers(steps, week);
    if active.is_empty() {
        return Err(GenerationError::Invalid("goal has no steps".to_string()));
    }

    let active_block = steps
        .iter()
        .filter(|s| active.contains(&s.step_number))
        .map(|s| {
            format!(
                "Крок {}: {} (тижні {}–{})",
                s.step_number, s.title, s.start_week, s.end_week
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let prompt = WEEK_TASKS_PROMPT_TEMPLATE
        .replace("{json_only}", JSON_ONLY_INSTRUCTION)
        .replace("{goal_title}", goal_title)
        .replace("{week}", &week.to_string())
        .replace("{active_steps}", &active_block)
        .replace("{completed_tasks}", &bullet_list(completed))
        .replace("{skipped_tasks}", &bullet_list(skipped));

    let tasks: Vec<DraftTask> =
        generate_json(llm, &prompt, &GenerationConfig::default()).await?;

    validate_dense(tasks.iter().map(|t| t.task_number), TASK_COUNT, "task")?;
    for task in &tasks {
        if !active.contains(&task.step_number) {
            return Err(GenerationError::Invalid(format!(
                "task {} links to inactive step {}",
                task.task_number, task.step_number
            )));
        }
    }
    Ok(tasks)
}

fn bullet_list(items: &[String]) -> String {
    if items.is_empty() {
        return "(немає)".to_string();
    }
    items
        .iter()
        .map(|t| format!("- {t}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Deterministic next-week tasks: 10 templated tasks round-robined across the
/// active step numbers.
pub fn fallback_week_tasks(active_steps: &[u32], week: u32) -> Vec<DraftTask> {
    let active: &[u32] = if active_steps.is_empty() {
        &[1, 2, 3]
    } else {
        active_steps
    };

    (1..=TASK_COUNT)
        .map(|n| DraftTask {
            task_number: n,
            title: format!("Задача {n} на тиждень {week}"),
            description: "Зробіть один конкретний крок у межах цього етапу плану.".to_string(),
            step_number: active[((n - 1) as usize) % active.len()],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use uuid::Uuid;

    use crate::models::step::StepStatus;

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(
            &self,
            _prompt: &str,
            _config: &GenerationConfig,
        ) -> Result<String, LlmError> {
            Err(LlmError::EmptyContent)
        }
    }

    struct CannedGenerator(String);

    #[async_trait]
    impl TextGenerator for CannedGenerator {
        async fn generate(
            &self,
            _prompt: &str,
            _config: &GenerationConfig,
        ) -> Result<String, LlmError> {
            Ok(self.0.clone())
        }
    }

    fn answers(pairs: &[(u8, &str)]) -> AnswerMap {
        pairs
            .iter()
            .map(|(id, a)| (*id, a.to_string()))
            .collect()
    }

    fn valid_plan_json() -> String {
        let steps: Vec<serde_json::Value> = (1..=10)
            .map(|n| {
                let (start, end) = week_range_for_step(n);
                serde_json::json!({
                    "step_number": n,
                    "title": format!("Крок {n}"),
                    "description": "опис",
                    "timeframe": format!("Тижні {start}–{end}"),
                    "start_week": start,
                    "end_week": end
                })
            })
            .collect();
        let tasks: Vec<serde_json::Value> = (1..=10)
            .map(|n| {
                serde_json::json!({
                    "task_number": n,
                    "title": format!("Задача {n}"),
                    "description": "",
                    "step_number": (n - 1) % 3 + 1
                })
            })
            .collect();
        serde_json::json!({
            "goal": {"title": "Стати тімлідом", "target_salary": "120000"},
            "match_score": 72,
            "gap_analysis": "Аналіз",
            "steps": steps,
            "tasks": tasks
        })
        .to_string()
    }

    fn step(n: u32, start: u32, end: u32) -> StrategicStep {
        StrategicStep {
            id: Uuid::new_v4(),
            goal_id: Uuid::new_v4(),
            step_number: n,
            title: format!("Крок {n}"),
            description: String::new(),
            timeframe: String::new(),
            start_week: start,
            end_week: end,
            status: StepStatus::Pending,
            created_at: Utc::now(),
        }
    }

    fn plan_steps() -> Vec<StrategicStep> {
        (1..=10)
            .map(|n| {
                let (start, end) = week_range_for_step(n);
                step(n, start, end)
            })
            .collect()
    }

    #[test]
    fn test_phase_template_week_ranges() {
        assert_eq!(week_range_for_step(1), (1, 8));
        assert_eq!(week_range_for_step(3), (1, 8));
        assert_eq!(week_range_for_step(4), (9, 16));
        assert_eq!(week_range_for_step(5), (9, 16));
        assert_eq!(week_range_for_step(6), (17, 26));
        assert_eq!(week_range_for_step(7), (17, 26));
        assert_eq!(week_range_for_step(8), (27, 40));
        assert_eq!(week_range_for_step(9), (27, 40));
        assert_eq!(week_range_for_step(10), (41, 52));
    }

    #[test]
    fn test_fallback_plan_seeds_goal_from_answers_8_and_9() {
        let plan = fallback_plan(&answers(&[(8, "Стати керівником"), (9, "100000")]));
        assert_eq!(plan.goal.title, "Стати керівником");
        assert_eq!(plan.goal.target_salary.as_deref(), Some("100000"));
        assert_eq!(plan.match_score, 50);
        assert_eq!(plan.steps.len(), 10);
        assert_eq!(plan.tasks.len(), 10);
        for s in &plan.steps {
            assert_eq!(
                (s.start_week, s.end_week),
                week_range_for_step(s.step_number)
            );
        }
    }

    #[test]
    fn test_fallback_plan_without_seed_answers_uses_defaults() {
        let plan = fallback_plan(&answers(&[(1, "Спеціаліст")]));
        assert_eq!(plan.goal.title, "Карʼєрне зростання");
        assert!(plan.goal.target_salary.is_none());
    }

    #[test]
    fn test_fallback_tasks_round_robin_first_three_steps() {
        let plan = fallback_plan(&answers(&[(8, "Ціль")]));
        for task in &plan.tasks {
            assert!((1..=3).contains(&task.step_number));
        }
        assert_eq!(plan.tasks[0].step_number, 1);
        assert_eq!(plan.tasks[1].step_number, 2);
        assert_eq!(plan.tasks[2].step_number, 3);
        assert_eq!(plan.tasks[3].step_number, 1);
    }

    #[tokio::test]
    async fn test_forced_failure_with_fallback_still_yields_full_plan() {
        let a = answers(&[(8, "Стати керівником"), (9, "100000")]);
        let plan = generate_plan(&FailingGenerator, &a)
            .await
            .unwrap_or_else(|_| fallback_plan(&a));
        assert_eq!(plan.steps.len(), 10);
        assert_eq!(plan.tasks.len(), 10);
        for (i, s) in plan.steps.iter().enumerate() {
            assert_eq!(s.step_number as usize, i + 1);
        }
        for task in &plan.tasks {
            assert!((1..=10).contains(&task.step_number));
        }
    }

    #[tokio::test]
    async fn test_generate_plan_parses_valid_payload() {
        let canned = CannedGenerator(valid_plan_json());
        let plan = generate_plan(&canned, &answers(&[(8, "Ціль")]))
            .await
            .unwrap();
        assert_eq!(plan.goal.title, "Стати тімлідом");
        assert_eq!(plan.match_score, 72);
    }

    #[tokio::test]
    async fn test_generate_plan_clamps_overflowing_score() {
        let json = valid_plan_json().replace("\"match_score\":72", "\"match_score\":250");
        let plan = generate_plan(&CannedGenerator(json), &answers(&[(8, "Ціль")]))
            .await
            .unwrap();
        assert_eq!(plan.match_score, 100);
    }

    #[tokio::test]
    async fn test_generate_plan_rejects_nine_steps() {
        let mut value: serde_json::Value = serde_json::from_str(&valid_plan_json()).unwrap();
        value["steps"].as_array_mut().unwrap().pop();
        let result =
            generate_plan(&CannedGenerator(value.to_string()), &answers(&[(8, "Ц")])).await;
        assert!(matches!(result, Err(GenerationError::Invalid(_))));
    }

    #[tokio::test]
    async fn test_generate_plan_rejects_duplicate_task_numbers() {
        let mut value: serde_json::Value = serde_json::from_str(&valid_plan_json()).unwrap();
        value["tasks"][1]["task_number"] = serde_json::json!(1);
        let result =
            generate_plan(&CannedGenerator(value.to_string()), &answers(&[(8, "Ц")])).await;
        assert!(matches!(result, Err(GenerationError::Invalid(_))));
    }

    #[tokio::test]
    async fn test_generate_plan_rejects_out_of_range_step_link() {
        let mut value: serde_json::Value = serde_json::from_str(&valid_plan_json()).unwrap();
        value["tasks"][0]["step_number"] = serde_json::json!(11);
        let result =
            generate_plan(&CannedGenerator(value.to_string()), &answers(&[(8, "Ц")])).await;
        assert!(matches!(result, Err(GenerationError::Invalid(_))));
    }

    #[tokio::test]
    async fn test_generate_plan_rejects_empty_answers() {
        let result = generate_plan(&CannedGenerator(valid_plan_json()), &AnswerMap::new()).await;
        assert!(matches!(result, Err(GenerationError::Invalid(_))));
    }

    #[test]
    fn test_active_steps_for_covered_week() {
        let steps = plan_steps();
        assert_eq!(active_step_numbers(&steps, 1), vec![1, 2, 3]);
        assert_eq!(active_step_numbers(&steps, 12), vec![4, 5]);
        assert_eq!(active_step_numbers(&steps, 52), vec![10]);
    }

    #[test]
    fn test_active_steps_fall_back_to_first_three_when_uncovered() {
        // Ranges leave week 20 uncovered on purpose
        let steps = vec![step(1, 1, 8), step(2, 1, 8), step(3, 9, 16), step(4, 30, 40)];
        assert_eq!(active_step_numbers(&steps, 20), vec![1, 2, 3]);
    }

    #[test]
    fn test_fallback_week_tasks_round_robin_active_steps() {
        let tasks = fallback_week_tasks(&[4, 5], 12);
        assert_eq!(tasks.len(), 10);
        assert_eq!(tasks[0].step_number, 4);
        assert_eq!(tasks[1].step_number, 5);
        assert_eq!(tasks[2].step_number, 4);
        for t in &tasks {
            assert!((1..=10).contains(&t.step_number));
        }
    }

    #[test]
    fn test_fallback_week_tasks_with_no_active_steps() {
        let tasks = fallback_week_tasks(&[], 5);
        for t in &tasks {
            assert!((1..=3).contains(&t.step_number));
        }
    }

    #[tokio::test]
    async fn test_generate_week_tasks_accepts_valid_payload() {
        let payload: Vec<serde_json::Value> = (1..=10)
            .map(|n| {
                serde_json::json!({
                    "task_number": n,
                    "title": format!("Задача {n}"),
                    "step_number": if n % 2 == 0 { 5 } else { 4 }
                })
            })
            .collect();
        let canned = CannedGenerator(serde_json::to_string(&payload).unwrap());
        let tasks = generate_week_tasks(&canned, "Ціль", &plan_steps(), &[], &[], 12)
            .await
            .unwrap();
        assert_eq!(tasks.len(), 10);
    }

    #[tokio::test]
    async fn test_generate_week_tasks_rejects_inactive_step_link() {
        let payload: Vec<serde_json::Value> = (1..=10)
            .map(|n| {
                serde_json::json!({
                    "task_number": n,
                    "title": format!("Задача {n}"),
                    "step_number": 1 // step 1 is not active in week 12
                })
            })
            .collect();
        let canned = CannedGenerator(serde_json::to_string(&payload).unwrap());
        let result = generate_week_tasks(&canned, "Ціль", &plan_steps(), &[], &[], 12).await;
        assert!(matches!(result, Err(GenerationError::Invalid(_))));
    }
}
