//! Content-language selection and the per-locale resource bundle.
//!
//! Every pattern table, keyword set and lexicon in the pipeline lives in one
//! [`LocaleResources`] value per locale, compiled once at startup and passed
//! by reference to stateless extraction code. The document's locale is an
//! explicit input threaded through the pipeline, never re-detected mid-flight.

use std::collections::HashSet;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::classify::ClassifierLexicon;
use crate::dates::DateLexicon;
use crate::error::{compile_all, Error, Result};
use crate::extract::education::EducationLexicon;
use crate::extract::experience::ExperienceLexicon;
use crate::extract::languages::LanguageLexicon;
use crate::extract::profile::ContactLexicon;
use crate::extract::skills::SkillLexicon;
use crate::segment::{HeaderLexicon, LanguageBlockLexicon, SegmenterPatterns};

/// The two content languages the pipeline is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    English,
    Hungarian,
}

impl Locale {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hungarian => "hu",
        }
    }

    /// Cheap content-language guess for callers that have no language tag:
    /// Hungarian text betrays itself through diacritics and function words.
    #[must_use]
    pub fn detect(text: &str) -> Self {
        let lower = text.to_lowercase();
        let diacritics = lower
            .chars()
            .filter(|c| matches!(c, 'á' | 'é' | 'í' | 'ó' | 'ö' | 'ő' | 'ú' | 'ü' | 'ű'))
            .count();
        let keyword_hits = [
            "és ",
            "vagy ",
            "tapasztalat",
            "tanulmányok",
            "készségek",
            "nyelvek",
            "munkahely",
            "fejlesztő",
            "egyetem",
            "születési",
        ]
        .iter()
        .filter(|k| lower.contains(*k))
        .count();

        if diacritics >= 5 || keyword_hits >= 2 {
            Self::Hungarian
        } else {
            Self::English
        }
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" | "eng" | "english" => Ok(Self::English),
            "hu" | "hun" | "hungarian" | "magyar" => Ok(Self::Hungarian),
            other => Err(Error::UnknownLocale(other.to_owned())),
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable bundle of every lexicon the pipeline needs for one locale.
///
/// Construction compiles all regex tables and is the only fallible step;
/// extraction itself never fails on bad input.
pub struct LocaleResources {
    pub locale: Locale,
    pub headers: HeaderLexicon,
    pub segmenter: SegmenterPatterns,
    pub language_filter: LanguageBlockLexicon,
    pub classifier: ClassifierLexicon,
    pub dates: DateLexicon,
    pub contact: ContactLexicon,
    pub education: EducationLexicon,
    pub experience: ExperienceLexicon,
    pub skills: SkillLexicon,
    pub languages: LanguageLexicon,
    /// Work-experience smell tests shared by the segmenter's language filter
    /// and the content-type classifier.
    pub experience_indicators: Vec<Regex>,
    pub tech_keywords: HashSet<String>,
}

impl LocaleResources {
    pub fn for_locale(locale: Locale) -> Result<Self> {
        match locale {
            Locale::English => Self::english(),
            Locale::Hungarian => Self::hungarian(),
        }
    }

    pub fn english() -> Result<Self> {
        Ok(Self {
            locale: Locale::English,
            headers: HeaderLexicon::english()?,
            segmenter: SegmenterPatterns::new()?,
            language_filter: LanguageBlockLexicon::english()?,
            classifier: ClassifierLexicon::english()?,
            dates: DateLexicon::english()?,
            contact: ContactLexicon::english()?,
            education: EducationLexicon::english()?,
            experience: ExperienceLexicon::english()?,
            skills: SkillLexicon::new()?,
            languages: LanguageLexicon::new()?,
            experience_indicators: compile_all(
                "locale.experience_indicators",
                &[
                    r"(?i)(19|20)\d{2}\s*[-–]\s*((19|20)\d{2}|present|current)",
                    r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)\w*\.?\s*\d{4}",
                    r"(?i)\b(improved|developed|managed|led|created|implemented|achieved|increased|reduced|supported)\b",
                    r"(?i)\b(intern|developer|engineer|manager|coordinator|assistant|specialist|analyst)\b",
                    r"(?i)(\d+%|\d+\s*percent)",
                    r"(?i)\b(project|team|client|stakeholder|objective|goal)\b",
                ],
            )?,
            tech_keywords: tech_keywords(&[]),
        })
    }

    pub fn hungarian() -> Result<Self> {
        Ok(Self {
            locale: Locale::Hungarian,
            headers: HeaderLexicon::hungarian()?,
            segmenter: SegmenterPatterns::new()?,
            language_filter: LanguageBlockLexicon::hungarian()?,
            classifier: ClassifierLexicon::hungarian()?,
            dates: DateLexicon::hungarian()?,
            contact: ContactLexicon::hungarian()?,
            education: EducationLexicon::hungarian()?,
            experience: ExperienceLexicon::hungarian()?,
            skills: SkillLexicon::new()?,
            languages: LanguageLexicon::new()?,
            experience_indicators: compile_all(
                "locale.experience_indicators",
                &[
                    r"(?i)(19|20)\d{2}\s*[-–]\s*((19|20)\d{2}|jelenleg|jelenlegi)",
                    r"(?i)\b(jan|feb|már|ápr|máj|jún|júl|aug|szept?|okt|nov|dec)[a-záéíóöőúüű]*\.?\s*\d{4}",
                    r"(?i)(fejlesztett\w*|vezetett\w*|irányított\w*|létrehozott\w*|megvalósított\w*|elért\w*|növelt\w*|csökkentett\w*|támogatott\w*)",
                    r"(?i)(gyakornok|fejlesztő|mérnök|menedzser|koordinátor|asszisztens|specialista|elemző)",
                    r"(?i)(\d+%|\d+\s*százalék)",
                    r"(?i)(projekt|csapat|ügyfél|célkitűzés|cél)",
                ],
            )?,
            tech_keywords: tech_keywords(&[
                "programozás",
                "szoftver",
                "fejlesztés",
                "technológiák",
                "keretrendszerek",
                "eszközök",
                "adatbázisok",
                "módszertanok",
                "ismeretek",
                "készségek",
                "szakértelem",
                "kompetenciák",
                "technikai",
            ]),
        })
    }
}

/// Technology words that mark a line as skills content; the English core set
/// applies to both locales since tech vocabulary travels untranslated.
fn tech_keywords(extra: &[&str]) -> HashSet<String> {
    let base = [
        "programming",
        "software",
        "development",
        "technologies",
        "frameworks",
        "languages",
        "tools",
        "platforms",
        "databases",
        "methodologies",
        "proficient",
        "experienced",
        "knowledge",
        "skills",
        "expertise",
        "competencies",
        "stack",
        "technical",
    ];
    base.iter()
        .chain(extra.iter())
        .map(|s| (*s).to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_round_trip() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::English);
        assert_eq!("Hungarian".parse::<Locale>().unwrap(), Locale::Hungarian);
        assert_eq!(Locale::Hungarian.as_str(), "hu");
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_detect_hungarian() {
        let text = "Szakmai tapasztalat: szoftverfejlesztő egy budapesti cégnél, \
                    ahol webes alkalmazásokat készített és üzemeltetett.";
        assert_eq!(Locale::detect(text), Locale::Hungarian);
    }

    #[test]
    fn test_detect_english_default() {
        assert_eq!(Locale::detect("Senior software engineer at Acme"), Locale::English);
        assert_eq!(Locale::detect(""), Locale::English);
    }

    #[test]
    fn test_bundles_compile() {
        assert!(LocaleResources::english().is_ok());
        assert!(LocaleResources::hungarian().is_ok());
    }
}
