pub mod types;
pub mod validation;

pub use types::{
    Catalog, ChoiceOption, Dimension, Question, QuestionKind, ScaleSpec, OVERLOAD_INVERSION_BASE,
    OVERLOAD_QUESTION_ID,
};
pub use validation::validate_catalog;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("questions.yaml");

impl Catalog {
    /// Parse the catalog compiled into the binary
    pub fn builtin() -> Result<Catalog> {
        parse_catalog(BUILTIN_CATALOG).context("Falha ao ler o catálogo de perguntas embutido")
    }
}

/// Load a question catalog from a YAML file
///
/// # Errors
///
/// Returns an error if:
/// - The catalog file does not exist
/// - The catalog file cannot be read
/// - The YAML cannot be parsed
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    if !path.exists() {
        anyhow::bail!("Arquivo de catálogo não encontrado em {}", path.display());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Falha ao ler o arquivo de catálogo em {}", path.display()))?;

    parse_catalog(&content)
        .with_context(|| format!("Catálogo inválido: YAML malformado em {}", path.display()))
}

fn parse_catalog(content: &str) -> Result<Catalog> {
    let catalog: Catalog = serde_saphyr::from_str(content)?;
    Ok(catalog)
}
