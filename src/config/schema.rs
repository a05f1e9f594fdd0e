use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::progress::DEFAULT_MIN_RESULT_PROGRESS;

/// Contents of `config.yaml`.
///
/// Example YAML:
/// ```yaml
/// answers_path: /tmp/respostas.json
/// catalog_path: ./meu-catalogo.yaml
/// min_result_progress: 90
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Where answers are persisted (default: config dir)
    #[serde(default)]
    pub answers_path: Option<PathBuf>,

    /// Custom question catalog (default: built-in catalog)
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Overall completion (percent) required before a result is shown
    #[serde(default)]
    pub min_result_progress: Option<f64>,
}

impl Config {
    pub fn effective_min_result_progress(&self) -> f64 {
        self.min_result_progress
            .unwrap_or(DEFAULT_MIN_RESULT_PROGRESS)
    }
}
