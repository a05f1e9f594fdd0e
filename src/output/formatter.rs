use std::io::IsTerminal;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::answers::{AnswerSet, AnswerValue};
use crate::catalog::{Catalog, Question, QuestionKind};
use crate::progress::{overall_progress, section_progress};
use crate::scoring::{rank_dimensions, DiagnosticResult, Stage, MAX_TOTAL_SCORE};

const DEFAULT_BAR_WIDTH: usize = 20;
const MAX_BAR_WIDTH: usize = 40;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score without a trailing ".0" (e.g. "12", "12.5")
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.0}", score)
    } else {
        format!("{:.1}", score)
    }
}

/// Format a percentage rounded to the nearest integer ("75%")
pub fn format_percentage(percentage: f64) -> String {
    format!("{:.0}%", percentage.round())
}

/// Bar width that fits the terminal, or a fixed width for pipes
fn bar_width() -> usize {
    match terminal_size() {
        Some((Width(w), _)) => (w as usize / 3).clamp(10, MAX_BAR_WIDTH),
        None => DEFAULT_BAR_WIDTH,
    }
}

/// Render a horizontal bar for a percentage (clamped to 0..=100)
fn render_bar(percentage: f64, width: usize) -> String {
    let ratio = (percentage / 100.0).clamp(0.0, 1.0);
    let filled = (ratio * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format the full results report
pub fn format_report(result: &DiagnosticResult, use_colors: bool) -> String {
    let width = bar_width();
    let mut lines = Vec::new();

    let heading = format!("Seu Estágio: {}", result.stage_title);
    if use_colors {
        lines.push(heading.bold().to_string());
    } else {
        lines.push(heading);
    }
    lines.push(result.stage_description.clone());
    lines.push(String::new());
    lines.push(format!(
        "Pontuação Total: {} de {} pontos",
        format_score(result.total_score),
        format_score(MAX_TOTAL_SCORE)
    ));
    lines.push(format!(
        "Estágio: {} de {} estágios ({})",
        result.stage.number(),
        Stage::ALL.len(),
        result.stage.range_label()
    ));

    lines.push(String::new());
    lines.push(section_title("Pontuação por Dimensão", use_colors));
    let name_width = crate::catalog::Dimension::ALL
        .iter()
        .map(|d| d.display_name().chars().count())
        .max()
        .unwrap_or(0);
    // Declaration order, not ranking order
    let mut standings = rank_dimensions(&result.dimension_scores);
    standings.sort_by_key(|s| s.dimension);
    for standing in &standings {
        let name = format!(
            "{:<width$}",
            standing.dimension.display_name(),
            width = name_width
        );
        let figures = format!(
            "{} / {} ({})",
            format_score(standing.score),
            format_score(standing.max_score),
            format_percentage(standing.percentage)
        );
        let bar = render_bar(standing.percentage, width);
        if use_colors {
            lines.push(format!("  {}  {}  {}", name, bar.cyan(), figures));
        } else {
            lines.push(format!("  {}  {}  {}", name, bar, figures));
        }
    }

    lines.push(String::new());
    lines.push(section_title("Pontos Fortes", use_colors));
    for strength in &result.strengths {
        if use_colors {
            lines.push(format!("  {} {}", "+".green(), strength));
        } else {
            lines.push(format!("  + {}", strength));
        }
    }

    lines.push(String::new());
    lines.push(section_title("Áreas de Melhoria", use_colors));
    for weakness in &result.weaknesses {
        if use_colors {
            lines.push(format!("  {} {}", "-".yellow(), weakness));
        } else {
            lines.push(format!("  - {}", weakness));
        }
    }

    lines.push(String::new());
    lines.push(section_title(
        &format!("Recomendações para o Estágio {}", result.stage.number()),
        use_colors,
    ));
    for (i, recommendation) in result.recommendations.iter().enumerate() {
        lines.push(format!("  {}. {}", i + 1, recommendation));
    }

    lines.push(String::new());
    lines.push(section_title("Plano de Ação de 90 Dias", use_colors));
    for step in &result.action_plan {
        lines.push(format!("  * {}", step));
    }

    lines.join("\n")
}

fn section_title(title: &str, use_colors: bool) -> String {
    if use_colors {
        title.bold().underline().to_string()
    } else {
        title.to_string()
    }
}

/// Format the result as pretty JSON
pub fn format_json(result: &DiagnosticResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("Falha ao serializar o resultado")
}

/// Format overall and per-section progress
pub fn format_progress(catalog: &Catalog, answers: &AnswerSet, use_colors: bool) -> String {
    let width = bar_width();
    let overall = overall_progress(catalog, answers);
    let mut lines = vec![format!("{} concluído", format_percentage(overall))];

    for (section, name) in catalog.sections() {
        let progress = section_progress(catalog, answers, section);
        let label = format!("Seção {}: {}", section, name);
        let bar = render_bar(progress, width);
        if use_colors {
            lines.push(format!(
                "  {:<34} {} {:>4}",
                label,
                bar.cyan(),
                format_percentage(progress)
            ));
        } else {
            lines.push(format!(
                "  {:<34} {} {:>4}",
                label,
                bar,
                format_percentage(progress)
            ));
        }
    }

    lines.join("\n")
}

/// Human-readable form of a recorded answer: the option label for choices
fn describe_answer(question: &Question, answer: &AnswerValue) -> String {
    match &question.kind {
        QuestionKind::Choice(_) => answer
            .as_text()
            .and_then(|value| question.option(value))
            .map(|option| option.label.clone())
            .unwrap_or_else(|| format!("{} (opção desconhecida)", answer)),
        _ => answer.to_string(),
    }
}

/// List questions grouped by section, with recorded answers
pub fn format_question_list(
    catalog: &Catalog,
    answers: &AnswerSet,
    section: Option<u32>,
    use_colors: bool,
) -> String {
    let term_width = terminal_size().map(|(Width(w), _)| w as usize);
    let mut lines = Vec::new();

    for (number, name) in catalog.sections() {
        if section.is_some_and(|s| s != number) {
            continue;
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(section_title(&format!("Seção {}: {}", number, name), use_colors));

        for q in catalog.section_questions(number) {
            let index = format!("{:>3}.", q.id);
            let prompt = match term_width {
                Some(w) if w > 30 => truncate(&q.prompt, w - 8),
                _ => q.prompt.clone(),
            };
            let answer = answers
                .get(q.id)
                .map(|a| describe_answer(q, a));

            if use_colors {
                lines.push(format!("{} {}", index.dimmed(), prompt));
                if let Some(answer) = answer {
                    lines.push(format!("     {} {}", "→".green(), answer));
                }
            } else {
                lines.push(format!("{} {}", index, prompt));
                if let Some(answer) = answer {
                    lines.push(format!("     → {}", answer));
                }
            }
        }
    }

    if lines.is_empty() {
        return "Nenhuma pergunta encontrada.".to_string();
    }
    lines.join("\n")
}

/// Format a single question for an interactive prompt
pub fn format_question(question: &Question, use_colors: bool) -> String {
    let title = format!("{}. {}", question.id, question.prompt);
    let mut lines = vec![if use_colors {
        title.bold().to_string()
    } else {
        title
    }];

    match &question.kind {
        QuestionKind::Choice(options) => {
            for (i, option) in options.iter().enumerate() {
                lines.push(format!("  {}) {}", i + 1, option.label));
            }
        }
        QuestionKind::Scale(spec) => {
            lines.push(format!(
                "  {} = {}  ...  {} = {}",
                format_score(spec.min),
                spec.min_label,
                format_score(spec.max),
                spec.max_label
            ));
        }
        QuestionKind::Text => {
            lines.push("  Resposta opcional (deixe em branco para pular)".to_string());
        }
    }

    lines.join("\n")
}
