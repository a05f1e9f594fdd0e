pub mod prompt;
pub mod runner;

pub use prompt::{parse_answer, parse_command, Command, Prompter};
pub use runner::{run_questionnaire, Outcome};
