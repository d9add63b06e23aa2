//! Contract for the external linguistic-annotation capability.
//!
//! The pipeline consumes tokenization, named entities, sentence boundaries,
//! part-of-speech tags and noun-phrase spans through this trait, but never
//! implements the models itself. [`RegexAnnotator`] is the always-available
//! degraded implementation: every extractor must produce sensible (if
//! poorer) output when it is the only annotator around.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{compile, Result};
use crate::locale::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityLabel {
    Person,
    Org,
    Loc,
    Gpe,
    Fac,
    Date,
    Cardinal,
    Product,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedEntity {
    pub label: EntityLabel,
    pub text: String,
}

impl NamedEntity {
    #[must_use]
    pub fn new(label: EntityLabel, text: impl Into<String>) -> Self {
        Self {
            label,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosTag {
    Verb,
    Adposition,
    Noun,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub pos: PosTag,
    pub is_email_like: bool,
}

/// Narrow contract to the linguistic-annotation engine.
///
/// Implementations must be safe for concurrent read access: models are
/// loaded once per process and shared across documents.
pub trait Annotator: Send + Sync {
    /// Whether real models are available for this locale. Callers fall back
    /// to regex-only paths when this is false.
    fn supports(&self, locale: Locale) -> bool;

    fn entities(&self, text: &str, locale: Locale) -> Vec<NamedEntity>;

    fn noun_phrases(&self, text: &str, locale: Locale) -> Vec<String>;

    fn sentences(&self, text: &str, locale: Locale) -> Vec<String>;

    fn tokens(&self, text: &str, locale: Locale) -> Vec<Token>;
}

/// Degraded annotator used when no model-backed implementation is wired in.
///
/// Sentences come from punctuation splitting, tokens from whitespace
/// splitting with an email-shape flag, and the entity / noun-phrase sets are
/// empty — which is exactly the regex-only degradation mode the extractors
/// are required to survive.
pub struct RegexAnnotator {
    email: Regex,
    sentence_break: Regex,
}

impl RegexAnnotator {
    pub fn new() -> Result<Self> {
        Ok(Self {
            email: compile(
                "annotate.email",
                r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$",
            )?,
            sentence_break: compile("annotate.sentence_break", r"[.!?]\s+|\n")?,
        })
    }
}

impl Annotator for RegexAnnotator {
    fn supports(&self, _locale: Locale) -> bool {
        false
    }

    fn entities(&self, _text: &str, _locale: Locale) -> Vec<NamedEntity> {
        Vec::new()
    }

    fn noun_phrases(&self, _text: &str, _locale: Locale) -> Vec<String> {
        Vec::new()
    }

    fn sentences(&self, text: &str, _locale: Locale) -> Vec<String> {
        self.sentence_break
            .split(text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    }

    fn tokens(&self, text: &str, _locale: Locale) -> Vec<Token> {
        text.split_whitespace()
            .map(|word| {
                let bare = word.trim_matches(|c: char| !c.is_alphanumeric() && c != '@');
                Token {
                    text: word.to_owned(),
                    pos: PosTag::Other,
                    is_email_like: self.email.is_match(bare),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_like_token_flag() {
        let annotator = RegexAnnotator::new().unwrap();

        let tokens = annotator.tokens("reach me at jane.doe@example.com today", Locale::English);

        let flagged: Vec<_> = tokens.iter().filter(|t| t.is_email_like).collect();
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].text, "jane.doe@example.com");
    }

    #[test]
    fn test_sentence_split() {
        let annotator = RegexAnnotator::new().unwrap();

        let sentences = annotator.sentences("First one. Second one!\nThird", Locale::English);

        assert_eq!(sentences.len(), 3);
    }

    #[test]
    fn test_degraded_entities_empty() {
        let annotator = RegexAnnotator::new().unwrap();
        assert!(!annotator.supports(Locale::Hungarian));
        assert!(annotator.entities("John Smith works at Acme", Locale::English).is_empty());
    }
}
