//! Assessment Catalog — the fixed 15-question career assessment.
//!
//! Pure data: every question has a stable id, a category tag, an input kind,
//! and a fixed option list. Questions 8 and 9 (desired position and desired
//! salary) seed the fallback plan when generation fails.

use serde::Serialize;

/// Which part of the gap analysis a question informs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    CurrentState,
    DesiredState,
    Barriers,
    Additional,
}

/// How the client collects the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    /// One option from the fixed list.
    SingleSelect,
    /// One option from the list, or free text typed by the user.
    SelectOrFreeText,
}

/// A single catalog question.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentQuestion {
    pub id: u8,
    pub text: &'static str,
    pub category: QuestionCategory,
    pub kind: InputKind,
    pub options: &'static [&'static str],
}

/// Question id whose answer becomes the fallback goal title.
pub const GOAL_TITLE_QUESTION: u8 = 8;
/// Question id whose answer becomes the fallback target salary.
pub const TARGET_SALARY_QUESTION: u8 = 9;

const QUESTIONS: &[AssessmentQuestion] = &[
    AssessmentQuestion {
        id: 1,
        text: "Яка ваша поточна посада?",
        category: QuestionCategory::CurrentState,
        kind: InputKind::SelectOrFreeText,
        options: &[
            "Спеціаліст",
            "Старший спеціаліст",
            "Керівник команди",
            "Керівник відділу",
            "Топменеджер",
        ],
    },
    AssessmentQuestion {
        id: 2,
        text: "Скільки років досвіду ви маєте у своїй сфері?",
        category: QuestionCategory::CurrentState,
        kind: InputKind::SingleSelect,
        options: &["До 1 року", "1–3 роки", "3–5 років", "5–10 років", "Понад 10 років"],
    },
    AssessmentQuestion {
        id: 3,
        text: "Яка ваша освіта?",
        category: QuestionCategory::CurrentState,
        kind: InputKind::SingleSelect,
        options: &[
            "Середня",
            "Середня спеціальна",
            "Незакінчена вища",
            "Вища",
            "Два дипломи або науковий ступінь",
        ],
    },
    AssessmentQuestion {
        id: 4,
        text: "Які ваші ключові професійні навички?",
        category: QuestionCategory::CurrentState,
        kind: InputKind::SelectOrFreeText,
        options: &[
            "Технічні навички",
            "Управління людьми",
            "Продажі та переговори",
            "Аналітика",
            "Комунікації",
        ],
    },
    AssessmentQuestion {
        id: 5,
        text: "Який ваш поточний рівень доходу на місяць?",
        category: QuestionCategory::CurrentState,
        kind: InputKind::SelectOrFreeText,
        options: &[
            "До 20 000 грн",
            "20 000 – 40 000 грн",
            "40 000 – 70 000 грн",
            "70 000 – 120 000 грн",
            "Понад 120 000 грн",
        ],
    },
    AssessmentQuestion {
        id: 6,
        text: "У якій сфері ви хочете розвиватися?",
        category: QuestionCategory::DesiredState,
        kind: InputKind::SelectOrFreeText,
        options: &[
            "Моя поточна сфера",
            "IT та технології",
            "Менеджмент",
            "Власний бізнес",
            "Креативні індустрії",
        ],
    },
    AssessmentQuestion {
        id: 7,
        text: "Який формат роботи вам найближчий?",
        category: QuestionCategory::DesiredState,
        kind: InputKind::SingleSelect,
        options: &["Офіс", "Гібрид", "Повністю віддалено", "Фриланс", "Власна справа"],
    },
    AssessmentQuestion {
        id: 8,
        text: "Яку посаду або роль ви хочете обіймати через рік?",
        category: QuestionCategory::DesiredState,
        kind: InputKind::SelectOrFreeText,
        options: &[
            "Старший спеціаліст",
            "Керівник команди",
            "Керівник відділу",
            "Незалежний експерт",
            "Засновник власної справи",
        ],
    },
    AssessmentQuestion {
        id: 9,
        text: "Який рівень доходу на місяць ви хочете мати через рік?",
        category: QuestionCategory::DesiredState,
        kind: InputKind::SelectOrFreeText,
        options: &[
            "40 000 грн",
            "70 000 грн",
            "100 000 грн",
            "150 000 грн",
            "Понад 200 000 грн",
        ],
    },
    AssessmentQuestion {
        id: 10,
        text: "Скільки часу на тиждень ви готові інвестувати у розвиток?",
        category: QuestionCategory::DesiredState,
        kind: InputKind::SingleSelect,
        options: &["До 2 годин", "2–5 годин", "5–10 годин", "Понад 10 годин"],
    },
    AssessmentQuestion {
        id: 11,
        text: "Що найбільше заважає вам рости професійно?",
        category: QuestionCategory::Barriers,
        kind: InputKind::SelectOrFreeText,
        options: &[
            "Брак знань або навичок",
            "Брак часу",
            "Невпевненість у собі",
            "Відсутність звʼязків",
            "Ситуація на ринку праці",
        ],
    },
    AssessmentQuestion {
        id: 12,
        text: "Яких навичок вам бракує для бажаної ролі?",
        category: QuestionCategory::Barriers,
        kind: InputKind::SelectOrFreeText,
        options: &[
            "Технічні навички",
            "Англійська мова",
            "Управлінські навички",
            "Публічні виступи",
            "Не знаю",
        ],
    },
    AssessmentQuestion {
        id: 13,
        text: "Чи пробували ви вже щось змінити у своїй карʼєрі?",
        category: QuestionCategory::Barriers,
        kind: InputKind::SingleSelect,
        options: &[
            "Так, активно шукаю можливості",
            "Так, але без результату",
            "Тільки планую",
            "Ще не пробував(ла)",
        ],
    },
    AssessmentQuestion {
        id: 14,
        text: "Що для вас найважливіше у роботі?",
        category: QuestionCategory::Additional,
        kind: InputKind::SelectOrFreeText,
        options: &[
            "Дохід",
            "Розвиток і навчання",
            "Стабільність",
            "Визнання",
            "Баланс роботи та життя",
        ],
    },
    AssessmentQuestion {
        id: 15,
        text: "Розкажіть коротко про вашу головну карʼєрну мрію.",
        category: QuestionCategory::Additional,
        kind: InputKind::SelectOrFreeText,
        options: &[
            "Високооплачувана експертна роль",
            "Керівна посада",
            "Власний бізнес",
            "Робота за кордоном",
        ],
    },
];

/// The full ordered catalog.
pub fn questions() -> &'static [AssessmentQuestion] {
    QUESTIONS
}

/// Lookup by question id.
pub fn question(id: u8) -> Option<&'static AssessmentQuestion> {
    QUESTIONS.iter().find(|q| q.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_exactly_15_questions() {
        assert_eq!(questions().len(), 15);
    }

    #[test]
    fn test_question_ids_are_dense_and_ordered() {
        for (i, q) in questions().iter().enumerate() {
            assert_eq!(q.id as usize, i + 1);
        }
    }

    #[test]
    fn test_every_question_has_options() {
        for q in questions() {
            assert!(!q.options.is_empty(), "question {} has no options", q.id);
            assert!(!q.text.is_empty());
        }
    }

    #[test]
    fn test_all_categories_are_represented() {
        let has = |c: QuestionCategory| questions().iter().any(|q| q.category == c);
        assert!(has(QuestionCategory::CurrentState));
        assert!(has(QuestionCategory::DesiredState));
        assert!(has(QuestionCategory::Barriers));
        assert!(has(QuestionCategory::Additional));
    }

    #[test]
    fn test_seed_questions_exist_in_desired_state() {
        let goal_q = question(GOAL_TITLE_QUESTION).unwrap();
        let salary_q = question(TARGET_SALARY_QUESTION).unwrap();
        assert_eq!(goal_q.category, QuestionCategory::DesiredState);
        assert_eq!(salary_q.category, QuestionCategory::DesiredState);
    }

    #[test]
    fn test_unknown_question_id_returns_none() {
        assert!(question(0).is_none());
        assert!(question(16).is_none());
    }
}
