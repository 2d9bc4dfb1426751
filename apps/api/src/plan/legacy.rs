//! Legacy Result Parser — extracts structured results from free-form LLM text.
//!
//! Superseded by the structured JSON path in `plan::generator`; retained for
//! compatibility with results produced before the schema migration. Section
//! extraction is delimiter-anchored pattern matching, and every missing
//! section degrades to a built-in default so the client never renders an
//! empty results screen.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Score used when the gap-analysis text carries no recognizable marker.
const DEFAULT_MATCH_SCORE: u32 = 75;
const MAX_DESCRIPTION_CHARS: usize = 200;
const MAX_STEPS: u32 = 10;

static SCORE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:match\s*score|відповідність)\s*[:\-]?\s*(\d{1,3})").unwrap()
});

static STEP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)КРОК\s*(\d+)\s*:").unwrap());

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:час|термін|тривалість)\s*[:\-]\s*(.+)").unwrap());

/// Section headers the extractor anchors on. Any of these terminates the
/// previous section.
const SECTION_HEADERS: &[&str] = &[
    "сильні сторони",
    "зони розвитку",
    "прогалини",
    "очікувана зарплата",
    "час досягнення",
    "термін досягнення",
    "match score",
    "відповідність",
];

const STRENGTH_HEADERS: &[&str] = &["сильні сторони"];
const GAP_HEADERS: &[&str] = &["зони розвитку", "прогалини"];
const SALARY_HEADERS: &[&str] = &["очікувана зарплата"];
const TIME_HEADERS: &[&str] = &["час досягнення", "термін досягнення"];

/// Priority of a parsed action step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepPriority {
    Critical,
    High,
    Medium,
}

/// Structured view of a free-form gap-analysis narrative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapAnalysis {
    pub match_score: u32,
    pub strengths: Vec<String>,
    pub gaps: Vec<String>,
    pub expected_salary: String,
    pub time_to_goal: String,
}

/// One action step extracted from a free-form action-plan narrative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionStep {
    pub number: u32,
    pub title: String,
    pub description: String,
    pub time_estimate: String,
    pub priority: StepPriority,
}

// ────────────────────────────────────────────────────────────────────────────
// Gap-analysis parsing
// ────────────────────────────────────────────────────────────────────────────

pub fn parse_gap_analysis(text: &str) -> GapAnalysis {
    let match_score = SCORE_RE
        .captures(text)
        .and_then(|c| c[1].parse::<u32>().ok())
        .map(|s| s.min(100))
        .unwrap_or(DEFAULT_MATCH_SCORE);

    let mut strengths = extract_list_section(text, STRENGTH_HEADERS);
    if strengths.is_empty() {
        strengths = vec![
            "Мотивація до змін і готовність діяти".to_string(),
            "Чесна оцінка власної ситуації".to_string(),
        ];
    }

    let mut gaps = extract_list_section(text, GAP_HEADERS);
    if gaps.is_empty() {
        gaps = vec!["Потрібно більше даних для точного аналізу".to_string()];
    }

    let expected_salary = extract_line_section(text, SALARY_HEADERS)
        .unwrap_or_else(|| "Не визначено".to_string());
    let time_to_goal =
        extract_line_section(text, TIME_HEADERS).unwrap_or_else(|| "12 місяців".to_string());

    GapAnalysis {
        match_score,
        strengths,
        gaps,
        expected_salary,
        time_to_goal,
    }
}

/// Returns the section body between a matching header and the next known
/// header (or end of text).
fn section_body<'a>(text: &'a str, headers: &[&str]) -> Option<&'a str> {
    let lower = text.to_lowercase();
    let (start, header_len) = headers
        .iter()
        .find_map(|h| lower.find(h).map(|pos| (pos, h.len())))?;

    let body_start = start + header_len;
    let rest = &lower[body_start..];
    let body_end = SECTION_HEADERS
        .iter()
        .filter_map(|h| rest.find(h))
        .min()
        .map(|offset| body_start + offset)
        .unwrap_or(text.len());

    // `to_lowercase` preserves byte offsets for this content in practice,
    // but guard against boundary drift on unusual input.
    if text.is_char_boundary(body_start) && text.is_char_boundary(body_end) {
        Some(&text[body_start..body_end])
    } else {
        None
    }
}

fn extract_list_section(text: &str, headers: &[&str]) -> Vec<String> {
    let Some(body) = section_body(text, headers) else {
        return Vec::new();
    };
    body.lines()
        .map(clean_bullet)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

fn extract_line_section(text: &str, headers: &[&str]) -> Option<String> {
    let body = section_body(text, headers)?;
    let line = body
        .lines()
        .map(clean_bullet)
        .find(|l| !l.is_empty())?
        .to_string();
    Some(line)
}

static BULLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[-•*]\s*|\d{1,2}[.)]\s+)+").unwrap());

/// Strips list markers and `N.`-style numbering from a line. Bare numbers
/// (salaries, years) are left intact.
fn clean_bullet(line: &str) -> &str {
    let trimmed = line.trim().trim_start_matches(':').trim_start();
    match BULLET_RE.find(trimmed) {
        Some(m) => trimmed[m.end()..].trim(),
        None => trimmed,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Action-plan parsing
// ────────────────────────────────────────────────────────────────────────────

pub fn parse_action_plan(text: &str) -> Vec<ActionStep> {
    let markers: Vec<(u32, usize, usize)> = STEP_RE
        .captures_iter(text)
        .filter_map(|c| {
            let m = c.get(0)?;
            let number = c[1].parse::<u32>().ok()?;
            Some((number, m.start(), m.end()))
        })
        .collect();

    let mut steps: Vec<ActionStep> = Vec::new();
    for (i, &(number, _, body_start)) in markers.iter().enumerate() {
        // Step numbers outside 1..10 are discarded
        if !(1..=MAX_STEPS).contains(&number) {
            continue;
        }
        if steps.iter().any(|s| s.number == number) {
            continue;
        }
        let body_end = markers
            .get(i + 1)
            .map(|&(_, start, _)| start)
            .unwrap_or(text.len());
        steps.push(parse_step(number, &text[body_start..body_end]));
    }

    if steps.is_empty() {
        return placeholder_steps();
    }

    steps.sort_by_key(|s| s.number);
    steps
}

fn parse_step(number: u32, body: &str) -> ActionStep {
    let mut lines = body.lines().map(str::trim).filter(|l| !l.is_empty());

    let title = lines
        .next()
        .map(clean_bullet)
        .filter(|t| !t.is_empty())
        .unwrap_or("Без назви")
        .to_string();

    let time_estimate = TIME_RE
        .captures(body)
        .map(|c| c[1].trim().to_string())
        .unwrap_or_else(|| "1–2 тижні".to_string());

    // First 3 relevant lines after the title, capped at 200 characters
    let description_lines: Vec<&str> = lines
        .filter(|l| !TIME_RE.is_match(l))
        .map(clean_bullet)
        .filter(|l| !l.is_empty())
        .take(3)
        .collect();
    let description = truncate_chars(&description_lines.join(" "), MAX_DESCRIPTION_CHARS);

    ActionStep {
        number,
        title,
        description,
        time_estimate,
        priority: infer_priority(body),
    }
}

/// Keyword-presence priority: Critical and High markers override the Medium
/// default.
fn infer_priority(body: &str) -> StepPriority {
    let lower = body.to_lowercase();
    const CRITICAL: &[&str] = &["критично", "терміново", "негайно", "critical", "urgent"];
    const HIGH: &[&str] = &["важливо", "пріоритет", "high", "important"];

    if CRITICAL.iter().any(|k| lower.contains(k)) {
        StepPriority::Critical
    } else if HIGH.iter().any(|k| lower.contains(k)) {
        StepPriority::High
    } else {
        StepPriority::Medium
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    s.chars().take(max).collect()
}

/// When the narrative contains no recognizable step markers, synthesize 10
/// placeholders: High priority for steps 1–3, Medium thereafter.
fn placeholder_steps() -> Vec<ActionStep> {
    (1..=MAX_STEPS)
        .map(|n| ActionStep {
            number: n,
            title: format!("Крок {n}: рухайтеся до цілі"),
            description: "Зробіть наступний конкретний крок у напрямку вашої карʼєрної цілі."
                .to_string(),
            time_estimate: "1 тиждень".to_string(),
            priority: if n <= 3 {
                StepPriority::High
            } else {
                StepPriority::Medium
            },
        })
        .collect()
}
