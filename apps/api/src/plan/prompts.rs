// All LLM prompt constants for the Plan module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Full-plan generation prompt template.
/// Replace: {json_only}, {answers}
pub const PLAN_PROMPT_TEMPLATE: &str = r#"Ти — досвідчений карʼєрний коуч. На основі відповідей користувача на карʼєрне опитування побудуй персональний річний план.

{json_only}

ВІДПОВІДІ КОРИСТУВАЧА:
{answers}

ОЦІНКА ВІДПОВІДНОСТІ (match_score, 0–100) — сума пʼяти підоцінок по 0–20 балів:
1. Розрив між поточною та бажаною посадою (менший розрив — більше балів)
2. Релевантність досвіду
3. Відповідність освіти
4. Покриття необхідних навичок
5. Розрив між поточним і бажаним доходом

СТРУКТУРНІ ПРАВИЛА:
- Рівно 10 стратегічних кроків із номерами 1–10.
- Тижневі діапазони кроків за фазовим шаблоном:
  кроки 1–3: тижні 1–8; кроки 4–5: тижні 9–16; кроки 6–7: тижні 17–26;
  кроки 8–9: тижні 27–40; крок 10: тижні 41–52.
- Рівно 10 задач першого тижня з номерами 1–10, кожна привʼязана до кроку
  (step_number від 1 до 10), по 2–3 задачі на кожен із ранніх кроків.
- Усі тексти українською мовою, конкретні та практичні.

Поверни JSON-обʼєкт точно за цією схемою (без зайвих полів):
{
  "goal": {
    "title": "Стати керівником відділу",
    "target_salary": "100000"
  },
  "match_score": 65,
  "gap_analysis": "Стислий аналіз розриву між поточним і бажаним станом...",
  "steps": [
    {
      "step_number": 1,
      "title": "Аудит навичок",
      "description": "Скласти перелік наявних і відсутніх навичок...",
      "timeframe": "Тижні 1–8",
      "start_week": 1,
      "end_week": 8
    }
  ],
  "tasks": [
    {
      "task_number": 1,
      "title": "Скласти список навичок",
      "description": "Виписати 10 ключових навичок поточної ролі...",
      "step_number": 1
    }
  ]
}"#;

/// Next-week task generation prompt template.
/// Replace: {json_only}, {goal_title}, {week}, {active_steps},
///          {completed_tasks}, {skipped_tasks}
pub const WEEK_TASKS_PROMPT_TEMPLATE: &str = r#"Ти — карʼєрний коуч, який веде користувача за річним планом. Згенеруй задачі на наступний тиждень.

{json_only}

ЦІЛЬ: {goal_title}
ЦІЛЬОВИЙ ТИЖДЕНЬ: {week}

АКТИВНІ СТРАТЕГІЧНІ КРОКИ (задачі мають належати тільки до них):
{active_steps}

ВИКОНАНІ ЗАДАЧІ МИНУЛОГО ТИЖНЯ:
{completed_tasks}

ПРОПУЩЕНІ ЗАДАЧІ МИНУЛОГО ТИЖНЯ:
{skipped_tasks}

ПРАВИЛА:
- Рівно 10 задач із номерами 1–10, розподілених між активними кроками.
- Складність має поступово зростати відносно минулого тижня.
- Пропущені задачі можна переформулювати простіше, але не повторювати дослівно.
- Усі тексти українською мовою.

Поверни JSON-масив точно за цією схемою:
[
  {
    "task_number": 1,
    "title": "Провести одну кавову зустріч",
    "description": "Домовитися про 30-хвилинну розмову з колегою з цільової сфери...",
    "step_number": 4
  }
]"#;
