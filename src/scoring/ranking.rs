use super::engine::DimensionScores;
use crate::catalog::Dimension;
use serde::Serialize;
use std::cmp::Ordering;

/// Percentage at or above which a dimension counts as a strength
pub const STRENGTH_THRESHOLD: f64 = 50.0;

pub const STRENGTHS_FALLBACK: &str = "Continue desenvolvendo todas as áreas";
pub const WEAKNESSES_FALLBACK: &str = "Mantenha o equilíbrio entre todas as dimensões";

/// A dimension's score relative to its maximum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionStanding {
    pub dimension: Dimension,
    pub score: f64,
    pub max_score: f64,
    pub percentage: f64,
}

/// Dimensions sorted by completion percentage, highest first.
///
/// The sort is stable, so equal percentages keep declaration order.
pub fn rank_dimensions(scores: &DimensionScores) -> Vec<DimensionStanding> {
    let mut standings: Vec<DimensionStanding> = Dimension::ALL
        .iter()
        .map(|&dimension| {
            let score = scores.get(dimension);
            let max_score = dimension.max_score();
            DimensionStanding {
                dimension,
                score,
                max_score,
                percentage: score / max_score * 100.0,
            }
        })
        .collect();

    standings.sort_by(|a, b| {
        b.percentage
            .partial_cmp(&a.percentage)
            .unwrap_or(Ordering::Equal)
    });
    standings
}

/// Display names of the top two dimensions that reach the threshold,
/// or the fallback message when neither does.
pub fn strengths(ranked: &[DimensionStanding]) -> Vec<String> {
    let names: Vec<String> = ranked
        .iter()
        .take(2)
        .filter(|s| s.percentage >= STRENGTH_THRESHOLD)
        .map(|s| s.dimension.display_name().to_string())
        .collect();

    if names.is_empty() {
        vec![STRENGTHS_FALLBACK.to_string()]
    } else {
        names
    }
}

/// Display names of the bottom two dimensions that fall below the threshold,
/// or the fallback message when neither does.
///
/// "Bottom two" is the last two entries of the ranking, kept in ranking
/// order. This is only meaningful with the fixed five dimensions.
pub fn weaknesses(ranked: &[DimensionStanding]) -> Vec<String> {
    let start = ranked.len().saturating_sub(2);
    let names: Vec<String> = ranked[start..]
        .iter()
        .filter(|s| s.percentage < STRENGTH_THRESHOLD)
        .map(|s| s.dimension.display_name().to_string())
        .collect();

    if names.is_empty() {
        vec![WEAKNESSES_FALLBACK.to_string()]
    } else {
        names
    }
}
