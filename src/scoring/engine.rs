use super::advice::{action_plan, recommendations};
use super::ranking::{rank_dimensions, strengths, weaknesses};
use super::stage::Stage;
use crate::answers::{AnswerSet, AnswerValue};
use crate::catalog::{Catalog, Dimension, Question, QuestionKind, OVERLOAD_INVERSION_BASE};
use serde::{Deserialize, Serialize};

/// Accumulated score per dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionScores {
    pub estrutura: f64,
    pub marketing: f64,
    pub gestao: f64,
    pub mindset: f64,
    pub visao: f64,
}

impl DimensionScores {
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Estrutura => self.estrutura,
            Dimension::Marketing => self.marketing,
            Dimension::Gestao => self.gestao,
            Dimension::Mindset => self.mindset,
            Dimension::Visao => self.visao,
        }
    }

    pub fn add(&mut self, dimension: Dimension, points: f64) {
        let slot = match dimension {
            Dimension::Estrutura => &mut self.estrutura,
            Dimension::Marketing => &mut self.marketing,
            Dimension::Gestao => &mut self.gestao,
            Dimension::Mindset => &mut self.mindset,
            Dimension::Visao => &mut self.visao,
        };
        *slot += points;
    }

    /// Sum of the five dimension scores, in declaration order
    pub fn total(&self) -> f64 {
        Dimension::ALL.iter().map(|d| self.get(*d)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        Dimension::ALL.iter().map(move |d| (*d, self.get(*d)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionContribution {
    pub question_id: u32,
    pub dimension: Dimension,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub dimension_scores: DimensionScores,
    pub contributions: Vec<QuestionContribution>,
}

/// The full outcome of a diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticResult {
    pub total_score: f64,
    pub dimension_scores: DimensionScores,
    pub stage: Stage,
    pub stage_title: String,
    pub stage_description: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
    pub action_plan: Vec<String>,
}

/// Points a single answer adds to its question's dimension.
///
/// Unknown choice values, unparseable scale answers and text questions all
/// contribute zero.
pub fn contribution(question: &Question, answer: &AnswerValue) -> f64 {
    match &question.kind {
        QuestionKind::Choice(_) => answer
            .as_text()
            .and_then(|value| question.option(value))
            .map(|option| option.points)
            .unwrap_or(0.0),
        QuestionKind::Scale(_) => match answer.as_number() {
            Some(value) if question.is_overload() => OVERLOAD_INVERSION_BASE - value,
            Some(value) => value,
            None => 0.0,
        },
        QuestionKind::Text => 0.0,
    }
}

/// Per-dimension sums plus the contribution of every scored question.
///
/// Questions without a dimension or without an answer are skipped; text
/// questions are skipped even when tagged.
pub fn score_answers(catalog: &Catalog, answers: &AnswerSet) -> ScoreBreakdown {
    let mut dimension_scores = DimensionScores::default();
    let mut contributions = Vec::new();

    for question in catalog.questions() {
        let Some(dimension) = question.dimension else {
            continue;
        };
        if question.is_text() {
            continue;
        }
        let Some(answer) = answers.get(question.id) else {
            continue;
        };

        let points = contribution(question, answer);
        dimension_scores.add(dimension, points);
        contributions.push(QuestionContribution {
            question_id: question.id,
            dimension,
            points,
        });
    }

    ScoreBreakdown {
        dimension_scores,
        contributions,
    }
}

/// Score an answer set against the catalog.
///
/// Pure and infallible: missing or malformed answers only lower the score.
pub fn calculate_result(catalog: &Catalog, answers: &AnswerSet) -> DiagnosticResult {
    let dimension_scores = score_answers(catalog, answers).dimension_scores;
    let total_score = dimension_scores.total();
    let stage = Stage::from_total(total_score);

    let ranked = rank_dimensions(&dimension_scores);
    let strengths = strengths(&ranked);
    let weaknesses = weaknesses(&ranked);

    let recommendations = recommendations(stage, &weaknesses);
    let action_plan = action_plan(stage, &weaknesses);

    DiagnosticResult {
        total_score,
        dimension_scores,
        stage,
        stage_title: stage.title().to_string(),
        stage_description: stage.description().to_string(),
        strengths,
        weaknesses,
        recommendations,
        action_plan,
    }
}
