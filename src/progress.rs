use crate::answers::AnswerSet;
use crate::catalog::{Catalog, Question};

/// Default overall completion (in percent) required before showing a result
pub const DEFAULT_MIN_RESULT_PROGRESS: f64 = 80.0;

/// Shown when the respondent tries to move past an unanswered required question
pub const ANSWER_REQUIRED_MESSAGE: &str = "Por favor, responda a questão antes de continuar";

/// Share of catalog questions that have an answer, in percent.
/// Answers to ids outside the catalog are not counted.
pub fn overall_progress(catalog: &Catalog, answers: &AnswerSet) -> f64 {
    let answered = catalog
        .questions()
        .iter()
        .filter(|q| answers.contains(q.id))
        .count();
    answered as f64 / catalog.len() as f64 * 100.0
}

/// Share of a section's questions that have an answer, in percent.
/// A section without questions reports 0.
pub fn section_progress(catalog: &Catalog, answers: &AnswerSet, section: u32) -> f64 {
    let questions = catalog.section_questions(section);
    if questions.is_empty() {
        return 0.0;
    }
    let answered = questions.iter().filter(|q| answers.contains(q.id)).count();
    answered as f64 / questions.len() as f64 * 100.0
}

/// Whether enough of the questionnaire is answered to show a result
pub fn ready_for_result(progress: f64, threshold: f64) -> bool {
    progress >= threshold
}

/// Text questions are optional; anything else needs an answer before moving on
pub fn can_advance(question: &Question, answers: &AnswerSet) -> bool {
    question.is_text() || answers.contains(question.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    #[test]
    fn test_empty_progress() {
        let catalog = catalog();
        let answers = AnswerSet::new();
        assert_eq!(overall_progress(&catalog, &answers), 0.0);
        assert_eq!(section_progress(&catalog, &answers, 1), 0.0);
    }

    #[test]
    fn test_full_progress() {
        let catalog = catalog();
        let mut answers = AnswerSet::new();
        for q in catalog.questions() {
            answers.set(q.id, "x");
        }
        assert_eq!(overall_progress(&catalog, &answers), 100.0);
        for (section, _) in catalog.sections() {
            assert_eq!(section_progress(&catalog, &answers, section), 100.0);
        }
    }

    #[test]
    fn test_half_of_questions() {
        // A 4-question catalog answered at 2 questions is exactly 50%
        let mut small = catalog();
        small.questions.truncate(4);
        let mut answers = AnswerSet::new();
        answers.set(1, "a");
        answers.set(2, "a");
        let progress = overall_progress(&small, &answers);
        assert!((progress - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_section_progress() {
        let catalog = catalog();
        let mut answers = AnswerSet::new();
        // Section 5 has questions 35..=38
        answers.set(35, 5.0);
        answers.set(36, 5.0);
        assert_eq!(section_progress(&catalog, &answers, 5), 50.0);
        assert_eq!(section_progress(&catalog, &answers, 4), 0.0);
    }

    #[test]
    fn test_unknown_section_is_zero() {
        assert_eq!(section_progress(&catalog(), &AnswerSet::new(), 99), 0.0);
    }

    #[test]
    fn test_foreign_ids_not_counted() {
        let catalog = catalog();
        let mut answers = AnswerSet::new();
        answers.set(1000, "a");
        assert_eq!(overall_progress(&catalog, &answers), 0.0);
    }

    #[test]
    fn test_ready_for_result() {
        assert!(!ready_for_result(79.9, DEFAULT_MIN_RESULT_PROGRESS));
        assert!(ready_for_result(80.0, DEFAULT_MIN_RESULT_PROGRESS));
        assert!(ready_for_result(0.0, 0.0));
    }

    #[test]
    fn test_can_advance() {
        let catalog = catalog();
        let mut answers = AnswerSet::new();
        let choice = catalog.question(7).unwrap();
        let text = catalog.question(6).unwrap();

        assert!(!can_advance(choice, &answers));
        assert!(can_advance(text, &answers));

        answers.set(7, "a");
        assert!(can_advance(choice, &answers));
    }
}
