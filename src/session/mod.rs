//! Respondent session: the answer set plus the section/question cursor.
//!
//! The session is owned by whatever front-end drives the questionnaire. It
//! persists answers through an [`AnswerStore`] and hands a snapshot of them
//! to the pure scorer when a result is requested.

use anyhow::Result;

use crate::answers::{AnswerSet, AnswerStore, AnswerValue};
use crate::catalog::{Catalog, Question};
use crate::progress::{self, ANSWER_REQUIRED_MESSAGE};
use crate::scoring::{calculate_result, DiagnosticResult};

/// Outcome of trying to move forward
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Cursor moved to the next question
    Moved,
    /// The last question was passed
    Finished,
    /// The current question needs an answer first
    Blocked(&'static str),
}

/// Where the cursor is: section number, index within the section, section length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub section: u32,
    pub index: usize,
    pub section_len: usize,
}

pub struct Session<'a, S: AnswerStore> {
    catalog: &'a Catalog,
    store: S,
    answers: AnswerSet,
    current_section: u32,
    question_index: usize,
}

impl<'a, S: AnswerStore> Session<'a, S> {
    /// Open a session, loading any previously saved answers.
    /// The cursor starts at the first question of section 1.
    pub fn open(catalog: &'a Catalog, store: S) -> Result<Self> {
        let answers = store.load()?;
        Ok(Self {
            catalog,
            store,
            answers,
            current_section: 1,
            question_index: 0,
        })
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn answer(&self, question_id: u32) -> Option<&AnswerValue> {
        self.answers.get(question_id)
    }

    /// Record an answer and persist the set.
    ///
    /// A failed save is logged and otherwise ignored; the in-memory answer
    /// stays recorded.
    pub fn set_answer(&mut self, question_id: u32, value: impl Into<AnswerValue>) {
        self.answers.set(question_id, value);
        self.persist();
    }

    /// Remove one answer and persist the set. Returns whether there was one.
    pub fn clear_answer(&mut self, question_id: u32) -> bool {
        let removed = self.answers.remove(question_id);
        if removed {
            self.persist();
        }
        removed
    }

    /// Forget every answer, in memory and in the store
    pub fn clear(&mut self) -> Result<()> {
        self.answers.clear();
        self.current_section = 1;
        self.question_index = 0;
        self.store.clear()
    }

    fn persist(&self) {
        // An empty set is never written, so the stale file has to go
        let saved = if self.answers.is_empty() {
            self.store.clear()
        } else {
            self.store.save(&self.answers)
        };
        if let Err(e) = saved {
            log::warn!("Failed to save answers: {:#}", e);
        }
    }

    fn section_questions(&self) -> Vec<&'a Question> {
        self.catalog.section_questions(self.current_section)
    }

    pub fn current_question(&self) -> Option<&'a Question> {
        self.section_questions().get(self.question_index).copied()
    }

    pub fn position(&self) -> Position {
        Position {
            section: self.current_section,
            index: self.question_index,
            section_len: self.section_questions().len(),
        }
    }

    pub fn is_last_question(&self) -> bool {
        self.current_section >= self.catalog.total_sections()
            && self.question_index + 1 >= self.section_questions().len()
    }

    /// Move to the next question, wrapping into the next section.
    pub fn next(&mut self) -> Step {
        let Some(question) = self.current_question() else {
            return Step::Finished;
        };
        if !progress::can_advance(question, &self.answers) {
            return Step::Blocked(ANSWER_REQUIRED_MESSAGE);
        }

        if self.question_index + 1 < self.section_questions().len() {
            self.question_index += 1;
            Step::Moved
        } else if self.current_section < self.catalog.total_sections() {
            self.current_section += 1;
            self.question_index = 0;
            Step::Moved
        } else {
            Step::Finished
        }
    }

    /// Move to the previous question. No-op on the very first question.
    /// Returns whether the cursor moved.
    pub fn previous(&mut self) -> bool {
        if self.question_index > 0 {
            self.question_index -= 1;
            true
        } else if self.current_section > 1 {
            self.current_section -= 1;
            self.question_index = self.section_questions().len().saturating_sub(1);
            true
        } else {
            false
        }
    }

    /// Put the cursor on the first required question still unanswered,
    /// or on the last question when everything required is answered.
    pub fn resume(&mut self) {
        let target = self
            .catalog
            .questions()
            .iter()
            .find(|q| !progress::can_advance(q, &self.answers))
            .or_else(|| self.catalog.questions().last());

        if let Some(target) = target {
            self.current_section = target.section;
            self.question_index = self
                .section_questions()
                .iter()
                .position(|q| q.id == target.id)
                .unwrap_or(0);
        }
    }

    pub fn overall_progress(&self) -> f64 {
        progress::overall_progress(self.catalog, &self.answers)
    }

    pub fn result(&self) -> DiagnosticResult {
        calculate_result(self.catalog, &self.answers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// In-memory store that records how often it was written
    #[derive(Default)]
    struct MemoryStore {
        saved: RefCell<Option<AnswerSet>>,
        saves: RefCell<usize>,
        fail_saves: bool,
    }

    impl AnswerStore for MemoryStore {
        fn load(&self) -> Result<AnswerSet> {
            Ok(self.saved.borrow().clone().unwrap_or_default())
        }

        fn save(&self, answers: &AnswerSet) -> Result<()> {
            if self.fail_saves {
                anyhow::bail!("disk full");
            }
            *self.saves.borrow_mut() += 1;
            *self.saved.borrow_mut() = Some(answers.clone());
            Ok(())
        }

        fn clear(&self) -> Result<()> {
            *self.saved.borrow_mut() = None;
            Ok(())
        }
    }

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    #[test]
    fn test_open_loads_saved_answers() {
        let catalog = catalog();
        let store = MemoryStore::default();
        let mut saved = AnswerSet::new();
        saved.set(7, "d");
        *store.saved.borrow_mut() = Some(saved);

        let session = Session::open(&catalog, store).unwrap();
        assert_eq!(session.answer(7), Some(&AnswerValue::from("d")));
        assert_eq!(session.position().section, 1);
        assert_eq!(session.current_question().unwrap().id, 1);
    }

    #[test]
    fn test_set_answer_persists() {
        let catalog = catalog();
        let mut session = Session::open(&catalog, MemoryStore::default()).unwrap();
        session.set_answer(1, "a");
        session.set_answer(33, 4.0);
        assert_eq!(*session.store.saves.borrow(), 2);
        assert_eq!(session.store.saved.borrow().as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_failed_save_keeps_answer_in_memory() {
        let catalog = catalog();
        let store = MemoryStore {
            fail_saves: true,
            ..MemoryStore::default()
        };
        let mut session = Session::open(&catalog, store).unwrap();
        session.set_answer(1, "a");
        assert!(session.answers().contains(1));
    }

    #[test]
    fn test_next_blocks_without_answer() {
        let catalog = catalog();
        let mut session = Session::open(&catalog, MemoryStore::default()).unwrap();
        assert_eq!(session.next(), Step::Blocked(ANSWER_REQUIRED_MESSAGE));

        session.set_answer(1, "a");
        assert_eq!(session.next(), Step::Moved);
        assert_eq!(session.current_question().unwrap().id, 2);
    }

    #[test]
    fn test_text_question_can_be_skipped() {
        let catalog = catalog();
        let mut session = Session::open(&catalog, MemoryStore::default()).unwrap();
        for id in 1..=5 {
            session.set_answer(id, "a");
            assert_eq!(session.next(), Step::Moved);
        }
        // Question 6 is free text and optional; moving on enters section 2
        assert!(session.current_question().unwrap().is_text());
        assert_eq!(session.next(), Step::Moved);
        assert_eq!(session.position().section, 2);
        assert_eq!(session.position().index, 0);
    }

    #[test]
    fn test_previous_crosses_sections() {
        let catalog = catalog();
        let mut session = Session::open(&catalog, MemoryStore::default()).unwrap();
        assert!(!session.previous());

        for id in 1..=5 {
            session.set_answer(id, "a");
            session.next();
        }
        session.next();
        assert_eq!(session.position().section, 2);

        assert!(session.previous());
        assert_eq!(session.position().section, 1);
        assert_eq!(session.current_question().unwrap().id, 6);
    }

    #[test]
    fn test_finishes_after_last_question() {
        let catalog = catalog();
        let mut session = Session::open(&catalog, MemoryStore::default()).unwrap();
        for q in catalog.questions() {
            if !q.is_text() {
                session.set_answer(q.id, "a");
            }
        }

        let mut steps = 0;
        while session.next() == Step::Moved {
            steps += 1;
        }
        assert_eq!(steps, catalog.len() - 1);
        assert!(session.is_last_question());
        assert_eq!(session.current_question().unwrap().id, 53);
    }

    #[test]
    fn test_resume_jumps_to_first_unanswered() {
        let catalog = catalog();
        let mut session = Session::open(&catalog, MemoryStore::default()).unwrap();
        for id in 1..=8 {
            session.set_answer(id, "a");
        }
        session.resume();
        assert_eq!(session.current_question().unwrap().id, 9);
        assert_eq!(session.position().section, 2);
    }

    #[test]
    fn test_clear_answer_persists_removal() {
        let catalog = catalog();
        let mut session = Session::open(&catalog, MemoryStore::default()).unwrap();
        session.set_answer(6, "texto");
        session.set_answer(7, "d");

        assert!(session.clear_answer(6));
        assert!(!session.clear_answer(6));
        assert!(!session.store.saved.borrow().as_ref().unwrap().contains(6));

        // Removing the last answer drops the stored set entirely
        assert!(session.clear_answer(7));
        assert!(session.store.saved.borrow().is_none());
    }

    #[test]
    fn test_clear_resets_everything() {
        let catalog = catalog();
        let mut session = Session::open(&catalog, MemoryStore::default()).unwrap();
        session.set_answer(1, "a");
        session.next();
        session.clear().unwrap();

        assert!(session.answers().is_empty());
        assert_eq!(session.position().index, 0);
        assert!(session.store.saved.borrow().is_none());
    }

    #[test]
    fn test_result_uses_current_answers() {
        let catalog = catalog();
        let mut session = Session::open(&catalog, MemoryStore::default()).unwrap();
        session.set_answer(7, "d");
        assert_eq!(session.result().dimension_scores.estrutura, 4.0);
    }
}
