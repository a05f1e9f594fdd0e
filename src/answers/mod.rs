pub mod storage;
pub mod types;

pub use storage::{
    clear_answers, get_answers_path, load_answers, save_answers, AnswerStore, JsonFileStore,
    STORAGE_KEY,
};
pub use types::{AnswerSet, AnswerValue, ANSWER_SET_VERSION};
