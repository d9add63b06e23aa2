//! Summary-vs-profile disambiguation.
//!
//! CV headers like "Profile" or "About me" are ambiguous: the block under
//! them is either narrative summary text or a contact-detail sheet. The
//! classifier scores both readings from keyword/pattern evidence and lets
//! profile win ties, since misfiling contact details into the summary is the
//! more damaging mistake.

use regex::Regex;

use crate::error::{compile_all, Result};
use crate::segment::SectionKind;

/// Scoring weights. These are uncalibrated constants inherited from the
/// original heuristics; they live in configuration so callers can tune them.
#[derive(Debug, Clone, Copy)]
pub struct ClassifierWeights {
    pub summary_pattern: f64,
    pub summary_keyword: f64,
    pub profile_keyword: f64,
    pub profile_pattern: f64,
    pub long_block_bonus: f64,
    pub long_block_words: usize,
    pub experience_penalty: f64,
    /// Minimum confidence for an externally supplied classifier hint to be
    /// trusted over the keyword scoring.
    pub model_confidence: f64,
}

impl Default for ClassifierWeights {
    fn default() -> Self {
        Self {
            summary_pattern: 2.0,
            summary_keyword: 2.0,
            profile_keyword: 1.5,
            profile_pattern: 2.0,
            long_block_bonus: 3.0,
            long_block_words: 30,
            experience_penalty: 2.0,
            model_confidence: 0.5,
        }
    }
}

/// Per-locale evidence tables for the classifier.
#[derive(Debug)]
pub struct ClassifierLexicon {
    summary_keywords: Vec<String>,
    profile_keywords: Vec<String>,
    summary_patterns: Vec<Regex>,
    profile_patterns: Vec<Regex>,
    negative_patterns: Vec<Regex>,
}

impl ClassifierLexicon {
    pub fn new(
        summary_keywords: &[&str],
        profile_keywords: &[&str],
        summary_patterns: &[&str],
        profile_patterns: &[&str],
        negative_patterns: &[&str],
    ) -> Result<Self> {
        Ok(Self {
            summary_keywords: summary_keywords.iter().map(|s| (*s).to_lowercase()).collect(),
            profile_keywords: profile_keywords.iter().map(|s| (*s).to_lowercase()).collect(),
            summary_patterns: compile_all("classify.summary", summary_patterns)?,
            profile_patterns: compile_all("classify.profile", profile_patterns)?,
            negative_patterns: compile_all("classify.negative", negative_patterns)?,
        })
    }

    pub fn english() -> Result<Self> {
        Self::new(
            &[
                "years of experience",
                "years experience",
                "specialized in",
                "specialised in",
                "background in",
                "expertise",
                "passionate",
                "motivated",
                "professional experience in",
                "track record",
            ],
            &[
                "name",
                "phone",
                "email",
                "address",
                "contact",
                "mobile",
                "date of birth",
                "nationality",
                "marital status",
                "driving license",
            ],
            &[
                r"(?i)\d+\+?\s+years?(?:\s+of)?\s+(?:[^.\n]*\b)?(?:experience|development)",
                r"(?i)\bspeciali[sz]ed\s+in\b",
                r"(?i)\bbackground\s+in\b",
                r"(?i)^[^.\n]{10,}\b(?:i\s+am|i\s+work|i\s+have)\b",
            ],
            &[
                r"(?i)\b(?:tel|phone|mobile|e-?mail|address)\s*:",
                r"(?i)\b(?:date\s+of\s+birth|nationality|marital\s+status)\s*:",
            ],
            &[
                r"(?i)(@|tel\s*:|phone\s*:|mobile\s*:|address\s*:|email\s*:)",
                r"(?i)\b(?:born|nationality|marital\s+status|driving\s+licen[cs]e)\b",
                r"(?i)^[^.\n]{0,50}:\s*\+?\d",
                r"(?i)\b(?:19|20)\d{2}\s*[-–]\s*(?:(?:19|20)\d{2}|present|current)\b",
            ],
        )
    }

    pub fn hungarian() -> Result<Self> {
        Self::new(
            &[
                "év tapasztalat",
                "szakterület",
                "szakértelem",
                "specializáció",
                "háttér",
                "tapasztalattal rendelkezik",
                "fejlesztő",
                "mérnök",
                "szakember",
                "területen",
                "dolgozom",
                "foglalkozom",
            ],
            &[
                "név",
                "telefon",
                "email",
                "cím",
                "lakcím",
                "elérhetőség",
                "mobil",
                "születési",
                "állampolgárság",
            ],
            &[
                r"(?i)\d+\+?\s+év(?:es)?\s+(?:[^.\n]*\b)?(?:fejleszt[őé]|tapasztalat)",
                r"(?i)szakmai\s+tapasztalattal\s+rendelkez\w+",
                r"(?i)szakterület\w*[^.\n]*(?:fejlesztés|programozás)",
                r"(?i)^[^.\n]{10,}\b(?:vagyok|dolgozom)\b",
            ],
            &[
                r"(?i)(tel\s*:|telefon\s*:|mobil\s*:|e-?mail\s*:|cím\s*:|lakcím\s*:)",
                r"(?i)(született\s*:|születési\s+hely\s*:|születési\s+idő\s*:)",
                r"(?i)(állampolgárság\s*:|családi\s+állapot\s*:)",
            ],
            &[
                r"(?i)(@|tel\s*:|telefon\s*:|mobil\s*:|cím\s*:|email\s*:)",
                r"(?i)(született|lakcím|telefonszám|születési)",
                r"(?i)(anyja\s+neve|állampolgárság|családi\s+állapot)",
                r"(?i)^[^.\n]{0,50}:\s*\+?\d",
                r"(?i)\b(?:19|20)\d{2}\s*[-–]\s*(?:(?:19|20)\d{2}|jelenleg|jelenlegi)\b",
            ],
        )
    }
}

/// Classifies an ambiguous block as `Summary` or `Profile`.
///
/// `hint` carries an optional external model prediction; it is honored only
/// above the configured confidence threshold and only for the two kinds this
/// classifier can produce.
#[must_use]
pub fn classify_block(
    text: &str,
    lexicon: &ClassifierLexicon,
    experience_indicators: &[Regex],
    weights: &ClassifierWeights,
    hint: Option<(SectionKind, f64)>,
) -> SectionKind {
    if let Some((kind, confidence)) = hint {
        if confidence > weights.model_confidence
            && matches!(kind, SectionKind::Summary | SectionKind::Profile)
        {
            return kind;
        }
    }

    // Contact-sheet markers are decisive: never call such a block a summary.
    if lexicon.negative_patterns.iter().any(|p| p.is_match(text)) {
        return SectionKind::Profile;
    }

    let lower = text.to_lowercase();
    let word_count = text.split_whitespace().count();

    let mut summary_score = 0.0;
    let mut profile_score = 0.0;

    summary_score += weights.summary_keyword
        * lexicon
            .summary_keywords
            .iter()
            .filter(|k| lower.contains(k.as_str()))
            .count() as f64;
    profile_score += weights.profile_keyword
        * lexicon
            .profile_keywords
            .iter()
            .filter(|k| lower.contains(k.as_str()))
            .count() as f64;

    summary_score += weights.summary_pattern
        * lexicon.summary_patterns.iter().filter(|p| p.is_match(text)).count() as f64;
    profile_score += weights.profile_pattern
        * lexicon.profile_patterns.iter().filter(|p| p.is_match(text)).count() as f64;

    if word_count > weights.long_block_words {
        summary_score += weights.long_block_bonus;
    }

    if experience_indicators.iter().any(|p| p.is_match(text)) {
        summary_score -= weights.experience_penalty;
    }

    if summary_score > profile_score {
        SectionKind::Summary
    } else {
        SectionKind::Profile
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::compile_all;

    fn indicators() -> Vec<Regex> {
        compile_all(
            "test.experience",
            &[
                r"(?i)20\d{2}\s*-\s*(?:20\d{2}|present)",
                r"(?i)\b(?:improved|developed|managed|led)\b",
                r"\d+%",
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_narrative_block_is_summary() {
        let lex = ClassifierLexicon::english().unwrap();
        let text = "Software engineer with 8 years of experience specialized in \
                    distributed systems and a background in fintech, focused on \
                    reliability work across large platform teams and mentoring.";

        let kind = classify_block(text, &lex, &indicators(), &ClassifierWeights::default(), None);

        assert_eq!(kind, SectionKind::Summary);
    }

    #[test]
    fn test_contact_details_short_circuit_to_profile() {
        let lex = ClassifierLexicon::english().unwrap();
        let text = "Phone: +1 555 123 4567\nemail: jane@example.com";

        let kind = classify_block(text, &lex, &indicators(), &ClassifierWeights::default(), None);

        assert_eq!(kind, SectionKind::Profile);
    }

    #[test]
    fn test_tie_goes_to_profile() {
        let lex = ClassifierLexicon::english().unwrap();

        let kind = classify_block("short text", &lex, &indicators(), &ClassifierWeights::default(), None);

        assert_eq!(kind, SectionKind::Profile);
    }

    #[test]
    fn test_high_confidence_hint_wins() {
        let lex = ClassifierLexicon::english().unwrap();

        let kind = classify_block(
            "Phone: +1 555 123 4567",
            &lex,
            &indicators(),
            &ClassifierWeights::default(),
            Some((SectionKind::Summary, 0.9)),
        );

        assert_eq!(kind, SectionKind::Summary);
    }

    #[test]
    fn test_low_confidence_hint_ignored() {
        let lex = ClassifierLexicon::english().unwrap();

        let kind = classify_block(
            "Phone: +1 555 123 4567",
            &lex,
            &indicators(),
            &ClassifierWeights::default(),
            Some((SectionKind::Summary, 0.3)),
        );

        assert_eq!(kind, SectionKind::Profile);
    }
}
