use anyhow::{Context, Result};
use std::io::{BufRead, Stdin, StdinLock, Stdout, Write};

use crate::answers::AnswerValue;
use crate::catalog::{Question, QuestionKind};
use crate::output::format_score;

/// What the respondent typed at a question prompt
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Record this answer and move on
    Answer(AnswerValue),
    /// Empty input: keep the current answer (or skip an optional question)
    Keep,
    /// `:x`: remove the current answer
    Clear,
    /// `:<` (or `<` outside text questions): go to the previous question
    Back,
    /// `:q` (or `q` outside text questions): stop; answers given so far stay saved
    Quit,
}

/// Line-oriented prompts over any reader/writer pair
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        let stdin: Stdin = std::io::stdin();
        Self::new(stdin.lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write a line of text.
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text).context("Falha ao escrever na saída")
    }

    /// Prompt with a message and return the trimmed input, or `None` at end of input.
    pub fn ask(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message).context("Falha ao escrever o prompt")?;
        self.output.flush().context("Falha ao esvaziar a saída")?;
        let mut input = String::new();
        let read = self
            .input
            .read_line(&mut input)
            .context("Falha ao ler a entrada")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(input.trim().to_string()))
    }

    /// Prompt with a yes/no question. Empty input (or end of input) gives the default.
    pub fn ask_yes_no(&mut self, message: &str, default_yes: bool) -> Result<bool> {
        let hint = if default_yes { "S/n" } else { "s/N" };
        let input = self
            .ask(&format!("{} [{}]: ", message, hint))?
            .unwrap_or_default()
            .to_lowercase();
        if input.is_empty() {
            Ok(default_yes)
        } else {
            Ok(matches!(input.as_str(), "s" | "sim" | "y" | "yes"))
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// Interpret a line typed at a question prompt.
///
/// The `:`-prefixed commands work everywhere. The bare `<` and `q` shortcuts
/// are only read as commands outside text questions, where they could
/// never be a valid answer.
pub fn parse_command(question: &Question, raw: &str) -> Result<Command, String> {
    let raw = raw.trim();
    match raw {
        "" => return Ok(Command::Keep),
        ":<" => return Ok(Command::Back),
        ":q" | ":Q" => return Ok(Command::Quit),
        ":x" | ":X" => return Ok(Command::Clear),
        _ => {}
    }
    if !question.is_text() {
        match raw {
            "<" => return Ok(Command::Back),
            "q" | "Q" => return Ok(Command::Quit),
            _ => {}
        }
    }
    parse_answer(question, raw).map(Command::Answer)
}

/// Turn raw input into an answer value for a question.
///
/// Choice questions accept the 1-based option number or the option value.
/// Scale questions need a number within the scale (a decimal comma is accepted).
/// Text questions take the input as-is.
pub fn parse_answer(question: &Question, raw: &str) -> Result<AnswerValue, String> {
    let raw = raw.trim();
    match &question.kind {
        QuestionKind::Choice(options) => {
            if let Ok(n) = raw.parse::<usize>() {
                if let Some(option) = n.checked_sub(1).and_then(|i| options.get(i)) {
                    return Ok(AnswerValue::from(option.value.as_str()));
                }
            }
            let lowered = raw.to_lowercase();
            options
                .iter()
                .find(|o| o.value.to_lowercase() == lowered)
                .map(|o| AnswerValue::from(o.value.as_str()))
                .ok_or_else(|| format!("Opção inválida: escolha de 1 a {}", options.len()))
        }
        QuestionKind::Scale(spec) => {
            let invalid = || {
                format!(
                    "Valor inválido: informe um número de {} a {}",
                    format_score(spec.min),
                    format_score(spec.max)
                )
            };
            let value: f64 = raw.replace(',', ".").parse().map_err(|_| invalid())?;
            if value.is_finite() && (spec.min..=spec.max).contains(&value) {
                Ok(AnswerValue::Number(value))
            } else {
                Err(invalid())
            }
        }
        QuestionKind::Text => Ok(AnswerValue::from(raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use std::io::Cursor;

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    #[test]
    fn test_choice_by_number_or_value() {
        let catalog = catalog();
        let q = catalog.question(2).unwrap();
        assert_eq!(parse_answer(q, "3"), Ok(AnswerValue::from("c")));
        assert_eq!(parse_answer(q, "c"), Ok(AnswerValue::from("c")));
        assert_eq!(parse_answer(q, " C "), Ok(AnswerValue::from("c")));
    }

    #[test]
    fn test_choice_out_of_range() {
        let catalog = catalog();
        let q = catalog.question(2).unwrap();
        assert!(parse_answer(q, "0").is_err());
        assert!(parse_answer(q, "4").is_err());
        let err = parse_answer(q, "z").unwrap_err();
        assert_eq!(err, "Opção inválida: escolha de 1 a 3");
    }

    #[test]
    fn test_scale_bounds() {
        let catalog = catalog();
        let q = catalog.question(33).unwrap();
        assert_eq!(parse_answer(q, "7"), Ok(AnswerValue::Number(7.0)));
        assert_eq!(parse_answer(q, "7,5"), Ok(AnswerValue::Number(7.5)));
        assert_eq!(parse_answer(q, "0"), Ok(AnswerValue::Number(0.0)));
        assert_eq!(
            parse_answer(q, "11").unwrap_err(),
            "Valor inválido: informe um número de 0 a 10"
        );
        assert!(parse_answer(q, "muito").is_err());
        assert!(parse_answer(q, "NaN").is_err());
    }

    #[test]
    fn test_text_taken_as_is() {
        let catalog = catalog();
        let q = catalog.question(6).unwrap();
        assert_eq!(
            parse_answer(q, "  Quero crescer  "),
            Ok(AnswerValue::from("Quero crescer"))
        );
    }

    #[test]
    fn test_parse_command() {
        let catalog = catalog();
        let q = catalog.question(2).unwrap();
        assert_eq!(parse_command(q, ""), Ok(Command::Keep));
        assert_eq!(parse_command(q, " < "), Ok(Command::Back));
        assert_eq!(parse_command(q, "q"), Ok(Command::Quit));
        assert_eq!(parse_command(q, ":q"), Ok(Command::Quit));
        assert_eq!(parse_command(q, ":<"), Ok(Command::Back));
        assert_eq!(parse_command(q, ":x"), Ok(Command::Clear));
        assert_eq!(
            parse_command(q, "1"),
            Ok(Command::Answer(AnswerValue::from("a")))
        );
    }

    #[test]
    fn test_text_question_records_shortcut_characters() {
        let catalog = catalog();
        let q = catalog.question(6).unwrap();
        assert_eq!(
            parse_command(q, "q"),
            Ok(Command::Answer(AnswerValue::from("q")))
        );
        assert_eq!(
            parse_command(q, "<"),
            Ok(Command::Answer(AnswerValue::from("<")))
        );
        assert_eq!(parse_command(q, ":q"), Ok(Command::Quit));
        assert_eq!(parse_command(q, ":<"), Ok(Command::Back));
        assert_eq!(parse_command(q, ":x"), Ok(Command::Clear));
    }

    #[test]
    fn test_ask_trims_and_detects_eof() {
        let mut prompter = Prompter::new(Cursor::new("  b \n"), Vec::new());
        assert_eq!(prompter.ask("> ").unwrap(), Some("b".to_string()));
        assert_eq!(prompter.ask("> ").unwrap(), None);
        assert_eq!(String::from_utf8(prompter.into_output()).unwrap(), "> > ");
    }

    #[test]
    fn test_ask_yes_no() {
        let mut prompter = Prompter::new(Cursor::new("sim\n\nn\n"), Vec::new());
        assert!(prompter.ask_yes_no("Apagar?", false).unwrap());
        assert!(!prompter.ask_yes_no("Apagar?", false).unwrap());
        assert!(!prompter.ask_yes_no("Apagar?", true).unwrap());
        // End of input falls back to the default
        assert!(prompter.ask_yes_no("Apagar?", true).unwrap());
    }
}
