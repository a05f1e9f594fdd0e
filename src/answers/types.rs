use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Current on-disk format version of [`AnswerSet`]
pub const ANSWER_SET_VERSION: u32 = 1;

/// A recorded answer: choice value or free text, or a scale number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(f64),
    Text(String),
}

impl AnswerValue {
    /// Numeric reading of the answer. Text is parsed after trimming;
    /// anything unparseable or non-finite ("NaN", "inf") yields `None`.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            AnswerValue::Number(n) => Some(*n),
            AnswerValue::Text(s) => s.trim().parse().ok(),
        };
        n.filter(|n: &f64| n.is_finite())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(s) => Some(s),
            AnswerValue::Number(_) => None,
        }
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerValue::Number(n) => write!(f, "{}", n),
            AnswerValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for AnswerValue {
    fn from(n: f64) -> Self {
        AnswerValue::Number(n)
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        AnswerValue::Text(s)
    }
}

/// The respondent's answers keyed by question id.
///
/// Keys need not cover the catalog, and ids the catalog does not know are
/// kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerSet {
    pub version: u32,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub answers: BTreeMap<u32, AnswerValue>,
}

impl Default for AnswerSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AnswerSet {
    /// Create a new empty answer set with the current version
    pub fn new() -> Self {
        Self {
            version: ANSWER_SET_VERSION,
            updated_at: None,
            answers: BTreeMap::new(),
        }
    }

    /// Record (or replace) the answer to a question
    pub fn set(&mut self, question_id: u32, value: impl Into<AnswerValue>) {
        self.answers.insert(question_id, value.into());
        self.updated_at = Some(Utc::now());
    }

    pub fn get(&self, question_id: u32) -> Option<&AnswerValue> {
        self.answers.get(&question_id)
    }

    pub fn contains(&self, question_id: u32) -> bool {
        self.answers.contains_key(&question_id)
    }

    /// Remove an answer. Returns true if the question had been answered.
    pub fn remove(&mut self, question_id: u32) -> bool {
        let removed = self.answers.remove(&question_id).is_some();
        if removed {
            self.updated_at = Some(Utc::now());
        }
        removed
    }

    pub fn clear(&mut self) {
        self.answers.clear();
        self.updated_at = None;
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_set_empty() {
        let set = AnswerSet::new();
        assert_eq!(set.version, ANSWER_SET_VERSION);
        assert!(set.is_empty());
        assert!(set.updated_at.is_none());
    }

    #[test]
    fn test_set_replaces_previous_answer() {
        let mut set = AnswerSet::new();
        set.set(7, "a");
        set.set(7, "d");
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(7), Some(&AnswerValue::Text("d".to_string())));
        assert!(set.updated_at.is_some());
    }

    #[test]
    fn test_remove() {
        let mut set = AnswerSet::new();
        set.set(33, 4.0);
        assert!(set.remove(33));
        assert!(!set.remove(33));
        assert!(!set.contains(33));
    }

    #[test]
    fn test_as_number() {
        assert_eq!(AnswerValue::Number(7.0).as_number(), Some(7.0));
        assert_eq!(AnswerValue::from(" 8 ").as_number(), Some(8.0));
        assert_eq!(AnswerValue::from("muito").as_number(), None);
    }

    #[test]
    fn test_non_finite_is_not_a_number() {
        assert_eq!(AnswerValue::from("NaN").as_number(), None);
        assert_eq!(AnswerValue::from("inf").as_number(), None);
        assert_eq!(AnswerValue::from(" -inf ").as_number(), None);
        assert_eq!(AnswerValue::Number(f64::NAN).as_number(), None);
        assert_eq!(AnswerValue::Number(f64::INFINITY).as_number(), None);
    }

    #[test]
    fn test_untagged_json_values() {
        let json = r#"{"version":1,"answers":{"7":"d","33":3,"36":"9"}}"#;
        let set: AnswerSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.get(7), Some(&AnswerValue::Text("d".to_string())));
        assert_eq!(set.get(33), Some(&AnswerValue::Number(3.0)));
        assert_eq!(set.get(36).and_then(AnswerValue::as_number), Some(9.0));
        assert!(set.updated_at.is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(AnswerValue::Number(7.0).to_string(), "7");
        assert_eq!(AnswerValue::Number(7.5).to_string(), "7.5");
        assert_eq!(AnswerValue::from("b").to_string(), "b");
    }
}
