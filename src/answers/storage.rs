use super::types::{AnswerSet, ANSWER_SET_VERSION};
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Fixed storage identifier of the persisted answer set
pub const STORAGE_KEY: &str = "diagnostico-master-answers";

/// Get the default answer store path (~/.config/diagnostico/diagnostico-master-answers.json)
pub fn get_answers_path() -> PathBuf {
    crate::config::get_config_dir().join(format!("{}.json", STORAGE_KEY))
}

/// Somewhere an [`AnswerSet`] can be loaded from and saved to.
///
/// The scorer never sees this; only the session layer does.
pub trait AnswerStore {
    /// Load the previously saved answers, or an empty set if there are none
    fn load(&self) -> Result<AnswerSet>;

    /// Persist the given answers
    fn save(&self, answers: &AnswerSet) -> Result<()>;

    /// Forget any persisted answers
    fn clear(&self) -> Result<()>;
}

/// Answer store backed by a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AnswerStore for JsonFileStore {
    fn load(&self) -> Result<AnswerSet> {
        load_answers(&self.path)
    }

    fn save(&self, answers: &AnswerSet) -> Result<()> {
        save_answers(&self.path, answers)
    }

    fn clear(&self) -> Result<()> {
        clear_answers(&self.path)
    }
}

/// Load answers from a JSON file
///
/// If the file doesn't exist, returns a new empty set.
/// If the file can't be parsed or has an unsupported version, the content is
/// discarded with a warning and an empty set is returned.
pub fn load_answers(path: &Path) -> Result<AnswerSet> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(AnswerSet::new()),
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Falha ao ler o arquivo de respostas em {}", path.display()))
        }
    };

    let answers: AnswerSet = match serde_json::from_str(&content) {
        Ok(answers) => answers,
        Err(e) => {
            log::warn!(
                "Discarding saved answers at {}: failed to parse ({})",
                path.display(),
                e
            );
            return Ok(AnswerSet::new());
        }
    };

    if answers.version != ANSWER_SET_VERSION {
        log::warn!(
            "Discarding saved answers at {}: unsupported version {}",
            path.display(),
            answers.version
        );
        return Ok(AnswerSet::new());
    }

    log::debug!("Loaded {} answers from {}", answers.len(), path.display());
    Ok(answers)
}

/// Save answers to a JSON file atomically
///
/// An empty set is not written; use [`clear_answers`] to forget answers.
/// Creates the parent directory if it doesn't exist.
pub fn save_answers(path: &Path, answers: &AnswerSet) -> Result<()> {
    if answers.is_empty() {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Falha ao criar o diretório {}", parent.display()))?;
        }
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Falha ao abrir {} para escrita", path.display()))?;

    serde_json::to_writer_pretty(&mut file, answers).context("Falha ao serializar as respostas")?;

    file.commit().context("Falha ao salvar as respostas")?;

    log::debug!("Saved {} answers to {}", answers.len(), path.display());
    Ok(())
}

/// Remove the answers file if present
pub fn clear_answers(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e)
            .with_context(|| format!("Falha ao remover o arquivo de respostas em {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::AnswerValue;
    use std::env;

    #[test]
    fn test_load_missing_file_returns_empty() {
        let temp_path = env::temp_dir().join("diagnostico_test_missing_answers.json");
        let _ = std::fs::remove_file(&temp_path);

        let answers = load_answers(&temp_path).unwrap();
        assert_eq!(answers.version, ANSWER_SET_VERSION);
        assert!(answers.is_empty());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_path = env::temp_dir().join("diagnostico_test_roundtrip.json");
        let _ = std::fs::remove_file(&temp_path);

        let mut answers = AnswerSet::new();
        answers.set(7, "d");
        answers.set(33, 2.0);
        answers.set(53, "Nada a acrescentar");

        save_answers(&temp_path, &answers).unwrap();
        let loaded = load_answers(&temp_path).unwrap();

        assert_eq!(loaded, answers);
        assert_eq!(loaded.get(33), Some(&AnswerValue::Number(2.0)));

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_corrupt_file_is_discarded() {
        let temp_path = env::temp_dir().join("diagnostico_test_corrupt.json");
        std::fs::write(&temp_path, "{ not json").unwrap();

        let answers = load_answers(&temp_path).unwrap();
        assert!(answers.is_empty());

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_unsupported_version_is_discarded() {
        let temp_path = env::temp_dir().join("diagnostico_test_version.json");
        std::fs::write(&temp_path, r#"{"version":9,"answers":{"7":"d"}}"#).unwrap();

        let answers = load_answers(&temp_path).unwrap();
        assert!(answers.is_empty());

        let _ = std::fs::remove_file(&temp_path);
    }

    #[test]
    fn test_empty_set_is_not_written() {
        let temp_path = env::temp_dir().join("diagnostico_test_empty_save.json");
        let _ = std::fs::remove_file(&temp_path);

        save_answers(&temp_path, &AnswerSet::new()).unwrap();
        assert!(!temp_path.exists());
    }

    #[test]
    fn test_file_store_clear() {
        let temp_path = env::temp_dir().join("diagnostico_test_store_clear.json");
        let store = JsonFileStore::new(&temp_path);

        let mut answers = AnswerSet::new();
        answers.set(1, "a");
        store.save(&answers).unwrap();
        assert!(store.path().exists());

        store.clear().unwrap();
        assert!(!store.path().exists());
        assert!(store.load().unwrap().is_empty());

        // Clearing twice is fine
        store.clear().unwrap();
    }
}
