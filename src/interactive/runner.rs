use anyhow::Result;
use std::io::{BufRead, Write};

use super::prompt::{parse_command, Command, Prompter};
use crate::answers::AnswerStore;
use crate::output::{format_percentage, format_question};
use crate::session::{Session, Step};

const FIRST_QUESTION_MESSAGE: &str = "Você já está na primeira pergunta.";
const ANSWER_CLEARED_MESSAGE: &str = "Resposta apagada.";

/// How an interactive run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The respondent moved past the last question
    Completed,
    /// The respondent quit, or input ran out
    Quit,
}

/// Walk the respondent through the questionnaire, starting at the first
/// required question still unanswered.
///
/// Every answer is saved through the session as soon as it is given.
pub fn run_questionnaire<S, R, W>(
    session: &mut Session<'_, S>,
    prompter: &mut Prompter<R, W>,
    use_colors: bool,
) -> Result<Outcome>
where
    S: AnswerStore,
    R: BufRead,
    W: Write,
{
    session.resume();
    prompter.say(
        "Digite o número da opção. Comandos: ':<' volta, ':x' apaga a resposta, ':q' sai \
         ('<' e 'q' também funcionam fora das perguntas abertas).",
    )?;

    loop {
        let Some(question) = session.current_question() else {
            return Ok(Outcome::Completed);
        };
        let position = session.position();

        prompter.say("")?;
        prompter.say(&format!(
            "Seção {} de {}: {} · Pergunta {} de {} · {} concluído",
            position.section,
            session.catalog().total_sections(),
            question.section_name,
            position.index + 1,
            position.section_len,
            format_percentage(session.overall_progress())
        ))?;
        prompter.say(&format_question(question, use_colors))?;
        if let Some(current) = session.answer(question.id) {
            prompter.say(&format!("  Resposta atual: {}", current))?;
        }

        let Some(input) = prompter.ask("> ")? else {
            log::debug!("Input closed at question {}", question.id);
            return Ok(Outcome::Quit);
        };

        let step = match parse_command(question, &input) {
            Ok(Command::Answer(value)) => {
                session.set_answer(question.id, value);
                session.next()
            }
            Ok(Command::Keep) => session.next(),
            Ok(Command::Clear) => {
                if session.clear_answer(question.id) {
                    prompter.say(ANSWER_CLEARED_MESSAGE)?;
                }
                continue;
            }
            Ok(Command::Back) => {
                if !session.previous() {
                    prompter.say(FIRST_QUESTION_MESSAGE)?;
                }
                continue;
            }
            Ok(Command::Quit) => return Ok(Outcome::Quit),
            Err(message) => {
                prompter.say(&message)?;
                continue;
            }
        };

        match step {
            Step::Moved => {}
            Step::Finished => return Ok(Outcome::Completed),
            Step::Blocked(message) => prompter.say(message)?,
        }
    }
}
