use serde::{Deserialize, Serialize};

/// Id of the "overload" scale question. Its raw value reads higher-is-worse,
/// so its contribution is inverted as `10 - value`.
pub const OVERLOAD_QUESTION_ID: u32 = 33;

/// Ceiling used when inverting the overload question.
pub const OVERLOAD_INVERSION_BASE: f64 = 10.0;

/// The five scored dimensions, in declaration order.
///
/// Declaration order matters: it breaks ties when ranking dimensions by
/// completion percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Estrutura,
    Marketing,
    Gestao,
    Mindset,
    Visao,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Estrutura,
        Dimension::Marketing,
        Dimension::Gestao,
        Dimension::Mindset,
        Dimension::Visao,
    ];

    /// Storage key, identical to the serialized form
    pub fn key(self) -> &'static str {
        match self {
            Dimension::Estrutura => "estrutura",
            Dimension::Marketing => "marketing",
            Dimension::Gestao => "gestao",
            Dimension::Mindset => "mindset",
            Dimension::Visao => "visao",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Dimension::Estrutura => "Estrutura do Negócio",
            Dimension::Marketing => "Marketing e Captação",
            Dimension::Gestao => "Gestão e Operação",
            Dimension::Mindset => "Mindset e Desenvolvimento",
            Dimension::Visao => "Visão e Objetivos",
        }
    }

    /// Maximum attainable score. Must match the catalog's point weighting;
    /// `validate_catalog` checks it.
    pub fn max_score(self) -> f64 {
        match self {
            Dimension::Estrutura => 40.0,
            Dimension::Marketing => 40.0,
            Dimension::Gestao => 24.0,
            Dimension::Mindset => 25.0,
            Dimension::Visao => 29.0,
        }
    }
}

/// One selectable answer of a choice question.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
    pub points: f64,
}

/// Bounds and captions of a scale question.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScaleSpec {
    #[serde(default = "default_scale_min")]
    pub min: f64,
    #[serde(default = "default_scale_max")]
    pub max: f64,
    pub min_label: String,
    pub max_label: String,
}

fn default_scale_min() -> f64 {
    0.0
}

fn default_scale_max() -> f64 {
    10.0
}

/// Type-specific part of a question.
///
/// YAML form:
/// ```yaml
/// kind:
///   choice:
///     - { value: a, label: "Não", points: 0 }
/// ```
/// or `kind: { scale: { min_label: ..., max_label: ... } }`, or `kind: text`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Choice(Vec<ChoiceOption>),
    Scale(ScaleSpec),
    Text,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Question {
    pub id: u32,
    pub section: u32,
    pub section_name: String,
    #[serde(default)]
    pub dimension: Option<Dimension>,
    pub prompt: String,
    pub kind: QuestionKind,
}

impl Question {
    pub fn is_text(&self) -> bool {
        matches!(self.kind, QuestionKind::Text)
    }

    pub fn is_overload(&self) -> bool {
        self.id == OVERLOAD_QUESTION_ID
    }

    /// Find a choice option by its value. `None` for non-choice questions.
    pub fn option(&self, value: &str) -> Option<&ChoiceOption> {
        match &self.kind {
            QuestionKind::Choice(options) => options.iter().find(|o| o.value == value),
            _ => None,
        }
    }

    /// Highest contribution this question can make to its dimension.
    /// Zero for text questions and untagged questions.
    pub fn max_contribution(&self) -> f64 {
        if self.dimension.is_none() {
            return 0.0;
        }
        match &self.kind {
            QuestionKind::Choice(options) => options
                .iter()
                .map(|o| o.points)
                .fold(0.0, f64::max),
            QuestionKind::Scale(spec) => {
                if self.is_overload() {
                    OVERLOAD_INVERSION_BASE - spec.min
                } else {
                    spec.max
                }
            }
            QuestionKind::Text => 0.0,
        }
    }
}

/// The full question catalog.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    pub version: u32,
    pub questions: Vec<Question>,
}

impl Catalog {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            version: 1,
            questions,
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn question(&self, id: u32) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Questions of one section, in catalog order
    pub fn section_questions(&self, section: u32) -> Vec<&Question> {
        self.questions.iter().filter(|q| q.section == section).collect()
    }

    /// Distinct sections as `(number, name)`, ordered by number.
    /// The name is taken from the first question of each section.
    pub fn sections(&self) -> Vec<(u32, &str)> {
        let mut sections: Vec<(u32, &str)> = Vec::new();
        for q in &self.questions {
            if !sections.iter().any(|(n, _)| *n == q.section) {
                sections.push((q.section, q.section_name.as_str()));
            }
        }
        sections.sort_by_key(|(n, _)| *n);
        sections
    }

    /// Highest section number (sections are numbered from 1)
    pub fn total_sections(&self) -> u32 {
        self.questions.iter().map(|q| q.section).max().unwrap_or(0)
    }

    /// Sum of the maximum contributions of every question tagged with `dimension`
    pub fn dimension_max_from_catalog(&self, dimension: Dimension) -> f64 {
        self.questions
            .iter()
            .filter(|q| q.dimension == Some(dimension))
            .map(Question::max_contribution)
            .sum()
    }
}
