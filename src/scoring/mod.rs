pub mod advice;
pub mod engine;
pub mod ranking;
pub mod stage;

pub use advice::{action_plan, recommendations};
pub use engine::{
    calculate_result, contribution, score_answers, DiagnosticResult, DimensionScores,
    QuestionContribution, ScoreBreakdown,
};
pub use ranking::{rank_dimensions, strengths, weaknesses, DimensionStanding};
pub use stage::{Stage, MAX_TOTAL_SCORE};
