use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum total score across all dimensions
pub const MAX_TOTAL_SCORE: f64 = 158.0;

/// The five maturity stages, ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Stage {
    Inicio = 1,
    Estruturacao = 2,
    Crescimento = 3,
    Lideranca = 4,
    Prosperidade = 5,
}

struct StageInfo {
    stage: Stage,
    upper_bound: Option<f64>,
    title: &'static str,
    description: &'static str,
    range: &'static str,
}

// Upper bounds are inclusive; the last stage has none.
static STAGES: [StageInfo; 5] = [
    StageInfo {
        stage: Stage::Inicio,
        upper_bound: Some(40.0),
        title: "O Início",
        description: "Validação da ideia, primeiros clientes, estrutura básica",
        range: "0-40 pontos",
    },
    StageInfo {
        stage: Stage::Estruturacao,
        upper_bound: Some(70.0),
        title: "A Estruturação",
        description: "Sistemas, processos, agenda 60-80% ocupada",
        range: "41-70 pontos",
    },
    StageInfo {
        stage: Stage::Crescimento,
        upper_bound: Some(100.0),
        title: "O Crescimento",
        description: "Agenda cheia, diversificação, preparação para equipe",
        range: "71-100 pontos",
    },
    StageInfo {
        stage: Stage::Lideranca,
        upper_bound: Some(130.0),
        title: "A Liderança",
        description: "Equipe de 2-10 profissionais, gestão de pessoas",
        range: "101-130 pontos",
    },
    StageInfo {
        stage: Stage::Prosperidade,
        upper_bound: None,
        title: "A Prosperidade",
        description: "Múltiplas unidades, produtos escaláveis, legado",
        range: "131-158 pontos",
    },
];

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Inicio,
        Stage::Estruturacao,
        Stage::Crescimento,
        Stage::Lideranca,
        Stage::Prosperidade,
    ];

    /// Classify a total score
    pub fn from_total(total: f64) -> Stage {
        STAGES
            .iter()
            .find(|info| info.upper_bound.is_some_and(|bound| total <= bound))
            .map(|info| info.stage)
            .unwrap_or(Stage::Prosperidade)
    }

    pub fn from_number(number: u8) -> Option<Stage> {
        Stage::ALL.into_iter().find(|s| s.number() == number)
    }

    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn title(self) -> &'static str {
        self.info().title
    }

    pub fn description(self) -> &'static str {
        self.info().description
    }

    /// Score range shown next to the stage, e.g. "41-70 pontos"
    pub fn range_label(self) -> &'static str {
        self.info().range
    }

    fn info(self) -> &'static StageInfo {
        &STAGES[self as usize - 1]
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Estágio {}: {}", self.number(), self.title())
    }
}

impl From<Stage> for u8 {
    fn from(stage: Stage) -> u8 {
        stage.number()
    }
}

impl TryFrom<u8> for Stage {
    type Error = String;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Stage::from_number(number).ok_or_else(|| format!("invalid stage number {}", number))
    }
}
