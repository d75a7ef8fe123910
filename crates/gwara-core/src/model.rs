//! Core data model types for gwara.
//!
//! `RawQuestion` is what the question service sends; `Question` is the
//! presentable form after the options have been shuffled.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Smallest number of questions the start form allows.
pub const MIN_AMOUNT: u32 = 1;
/// Largest number of questions the start form allows.
pub const MAX_AMOUNT: u32 = 10;
/// Easiest difficulty level.
pub const MIN_LEVEL: u32 = 1;
/// Hardest difficulty level.
pub const MAX_LEVEL: u32 = 3;
/// Question count of a fresh session.
pub const DEFAULT_AMOUNT: u32 = 1;
/// Difficulty of a fresh session.
pub const DEFAULT_LEVEL: u32 = 1;

/// Key under which an answer option is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKey {
    A,
    B,
    C,
}

impl OptionKey {
    /// All keys in display order.
    pub const ALL: [OptionKey; 3] = [OptionKey::A, OptionKey::B, OptionKey::C];

    /// Key for the option at `position` in display order.
    pub fn from_index(position: usize) -> Option<Self> {
        Self::ALL.get(position).copied()
    }

    pub fn index(self) -> usize {
        match self {
            OptionKey::A => 0,
            OptionKey::B => 1,
            OptionKey::C => 2,
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionKey::A => write!(f, "a"),
            OptionKey::B => write!(f, "b"),
            OptionKey::C => write!(f, "c"),
        }
    }
}

impl FromStr for OptionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a" => Ok(OptionKey::A),
            "b" => Ok(OptionKey::B),
            "c" => Ok(OptionKey::C),
            other => Err(format!("unknown option key: '{other}' (expected a, b or c)")),
        }
    }
}

/// Options exactly as the question service lists them.
///
/// By contract `a` is always the correct answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOptions {
    pub a: String,
    pub b: String,
    pub c: String,
}

impl RawOptions {
    /// The three values in listed order, correct answer first.
    pub fn into_values(self) -> [String; 3] {
        [self.a, self.b, self.c]
    }
}

/// A question as returned by the question service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawQuestion {
    /// The dialect word being asked about.
    pub word: String,
    /// Answer options, correct one under `a`.
    pub options: RawOptions,
}

/// A question ready to be shown, with shuffled options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The dialect word being asked about.
    pub word: String,
    /// Shuffled options keyed `a`, `b`, `c` in display order.
    pub options: BTreeMap<OptionKey, String>,
    /// Value of the correct answer, independent of where it was shuffled to.
    pub correct_option: String,
}

impl Question {
    /// Text shown under `key`.
    pub fn option(&self, key: OptionKey) -> Option<&str> {
        self.options.get(&key).map(String::as_str)
    }

    /// Whether choosing `key` answers this question correctly.
    pub fn is_correct(&self, key: OptionKey) -> bool {
        self.option(key) == Some(self.correct_option.as_str())
    }

    /// Key the correct answer ended up under after shuffling.
    pub fn correct_key(&self) -> Option<OptionKey> {
        self.options
            .iter()
            .find(|(_, value)| **value == self.correct_option)
            .map(|(key, _)| *key)
    }
}

/// Parameters sent to the question service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRequest {
    /// How many questions to ask for.
    pub amount: u32,
    /// Difficulty level.
    pub level: u32,
}

impl Default for QuestionRequest {
    fn default() -> Self {
        Self {
            amount: DEFAULT_AMOUNT,
            level: DEFAULT_LEVEL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(options: [(&str, OptionKey); 3], correct: &str) -> Question {
        Question {
            word: "pyra".into(),
            options: options
                .iter()
                .map(|(value, key)| (*key, value.to_string()))
                .collect(),
            correct_option: correct.into(),
        }
    }

    #[test]
    fn option_key_display_and_parse() {
        assert_eq!(OptionKey::A.to_string(), "a");
        assert_eq!(OptionKey::C.to_string(), "c");
        assert_eq!("b".parse::<OptionKey>().unwrap(), OptionKey::B);
        assert_eq!(" C\n".parse::<OptionKey>().unwrap(), OptionKey::C);
        assert!("d".parse::<OptionKey>().is_err());
        assert!("".parse::<OptionKey>().is_err());
    }

    #[test]
    fn option_key_positions() {
        assert_eq!(OptionKey::from_index(0), Some(OptionKey::A));
        assert_eq!(OptionKey::from_index(2), Some(OptionKey::C));
        assert_eq!(OptionKey::from_index(3), None);
        for key in OptionKey::ALL {
            assert_eq!(OptionKey::from_index(key.index()), Some(key));
        }
    }

    #[test]
    fn raw_question_parses_service_payload() {
        let json = r#"[{"word": "pyra", "options": {"a": "ziemniak", "b": "gruszka", "c": "kamień"}}]"#;
        let parsed: Vec<RawQuestion> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].word, "pyra");
        assert_eq!(parsed[0].options.a, "ziemniak");
    }

    #[test]
    fn raw_question_missing_option_is_rejected() {
        let json = r#"{"word": "pyra", "options": {"a": "ziemniak", "b": "gruszka"}}"#;
        assert!(serde_json::from_str::<RawQuestion>(json).is_err());
    }

    #[test]
    fn correctness_follows_value_not_key() {
        let q = question(
            [
                ("gruszka", OptionKey::A),
                ("ziemniak", OptionKey::B),
                ("kamień", OptionKey::C),
            ],
            "ziemniak",
        );
        assert!(q.is_correct(OptionKey::B));
        assert!(!q.is_correct(OptionKey::A));
        assert_eq!(q.correct_key(), Some(OptionKey::B));
        assert_eq!(q.option(OptionKey::C), Some("kamień"));
    }

    #[test]
    fn question_serializes_lowercase_keys() {
        let q = question(
            [("x", OptionKey::A), ("y", OptionKey::B), ("z", OptionKey::C)],
            "x",
        );
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["options"]["a"], "x");
        assert_eq!(json["correct_option"], "x");
    }

    #[test]
    fn default_request() {
        let req = QuestionRequest::default();
        assert_eq!(req.amount, 1);
        assert_eq!(req.level, 1);
    }
}
