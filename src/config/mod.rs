mod schema;

pub use schema::Config;

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/diagnostico/)
///
/// Falls back to the current directory when no home directory is known.
pub fn get_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("diagnostico")
}

/// Get the default config file path (~/.config/diagnostico/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   and falls back to defaults when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Arquivo de configuração não encontrado em {}", config_path.display());
        }
        log::debug!(
            "No config file at {}, using defaults",
            config_path.display()
        );
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Falha ao ler o arquivo de configuração em {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Configuração inválida: YAML malformado em {}", config_path.display()))?;

    Ok(config)
}

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(threshold) = config.min_result_progress {
        if !(0.0..=100.0).contains(&threshold) {
            errors.push(format!(
                "min_result_progress: deve estar entre 0 e 100, recebido {}",
                threshold
            ));
        }
    }

    if let Some(ref path) = config.catalog_path {
        if path.as_os_str().is_empty() {
            errors.push("catalog_path: não pode ser vazio".to_string());
        }
    }

    if let Some(ref path) = config.answers_path {
        if path.as_os_str().is_empty() {
            errors.push("answers_path: não pode ser vazio".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_explicit_missing_config_is_error() {
        let path = env::temp_dir().join("diagnostico_test_missing_config.yaml");
        let _ = fs::remove_file(&path);
        assert!(load_config(Some(path)).is_err());
    }

    #[test]
    fn test_load_config_file() {
        let path = env::temp_dir().join("diagnostico_test_config.yaml");
        fs::write(&path, "min_result_progress: 60\n").unwrap();

        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.min_result_progress, Some(60.0));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let path = env::temp_dir().join("diagnostico_test_bad_config.yaml");
        fs::write(&path, "min_result_progress: [oops\n").unwrap();
        assert!(load_config(Some(path.clone())).is_err());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_threshold_range() {
        let config = Config {
            min_result_progress: Some(120.0),
            ..Config::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("min_result_progress"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = Config {
            answers_path: Some(PathBuf::new()),
            catalog_path: Some(PathBuf::new()),
            min_result_progress: Some(-1.0),
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
