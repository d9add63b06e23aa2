//! Spoken-language proficiencies.

use regex::Regex;

use crate::error::{compile, Result};
use crate::record::LanguageEntry;
use crate::segment::SectionKind;

use super::ExtractionContext;

/// Surfaces in either content language resolve to one English display name,
/// so "Angol - Folyékony" and "English - Fluent" produce the same entry key.
const LANGUAGE_SURFACES: [(&str, &str); 40] = [
    ("english", "English"),
    ("angol", "English"),
    ("hungarian", "Hungarian"),
    ("magyar", "Hungarian"),
    ("german", "German"),
    ("német", "German"),
    ("french", "French"),
    ("francia", "French"),
    ("spanish", "Spanish"),
    ("spanyol", "Spanish"),
    ("italian", "Italian"),
    ("olasz", "Italian"),
    ("russian", "Russian"),
    ("orosz", "Russian"),
    ("chinese", "Chinese"),
    ("kínai", "Chinese"),
    ("japanese", "Japanese"),
    ("japán", "Japanese"),
    ("korean", "Korean"),
    ("koreai", "Korean"),
    ("arabic", "Arabic"),
    ("arab", "Arabic"),
    ("portuguese", "Portuguese"),
    ("portugál", "Portuguese"),
    ("dutch", "Dutch"),
    ("holland", "Dutch"),
    ("polish", "Polish"),
    ("lengyel", "Polish"),
    ("czech", "Czech"),
    ("cseh", "Czech"),
    ("slovak", "Slovak"),
    ("szlovák", "Slovak"),
    ("romanian", "Romanian"),
    ("román", "Romanian"),
    ("ukrainian", "Ukrainian"),
    ("ukrán", "Ukrainian"),
    ("swedish", "Swedish"),
    ("svéd", "Swedish"),
    ("turkish", "Turkish"),
    ("török", "Turkish"),
];

const PROFICIENCY_TERMS: [&str; 32] = [
    "native", "fluent", "advanced", "intermediate", "basic", "beginner",
    "professional", "business", "conversational", "elementary", "mother tongue",
    "proficient", "excellent", "good", "fair", "working knowledge",
    "anyanyelv", "anyanyelvi", "folyékony", "haladó", "középszint", "középfok",
    "alapszint", "alapfok", "kezdő", "tárgyalóképes", "társalgási",
    "c1", "c2", "b1", "b2", "a1",
];

pub struct LanguageLexicon {
    surfaces: Vec<(String, String)>,
    proficiency_terms: Vec<String>,
    pair: Regex,
}

impl LanguageLexicon {
    pub fn new() -> Result<Self> {
        Ok(Self {
            surfaces: LANGUAGE_SURFACES
                .iter()
                .map(|(s, d)| ((*s).to_owned(), (*d).to_owned()))
                .collect(),
            proficiency_terms: PROFICIENCY_TERMS.iter().map(|t| (*t).to_owned()).collect(),
            pair: compile(
                "languages.pair",
                r"([\p{L}]+)\s*[-–—:]\s*([\p{L}][\p{L} ]*)",
            )?,
        })
    }

    /// Canonical display name for a language surface in either locale.
    #[must_use]
    pub fn canonical(&self, word: &str) -> Option<&str> {
        let lower = word.trim().to_lowercase();
        self.surfaces
            .iter()
            .find(|(surface, _)| *surface == lower)
            .map(|(_, display)| display.as_str())
    }

    fn find_proficiency(&self, text: &str) -> Option<(usize, String)> {
        let lower = text.to_lowercase();
        let mut best: Option<(usize, String)> = None;
        for term in &self.proficiency_terms {
            if let Some(pos) = find_word(&lower, term) {
                if best.as_ref().is_none_or(|(p, _)| pos < *p) {
                    best = Some((pos, term.clone()));
                }
            }
        }
        best
    }

    fn contains_proficiency(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.proficiency_terms
            .iter()
            .any(|term| find_word(&lower, term).is_some())
    }
}

/// Substring find with crude word boundaries, so "a1" does not fire inside
/// "a18" and "good" does not fire inside "goodwill".
fn find_word(haystack: &str, needle: &str) -> Option<usize> {
    let mut from = 0;
    while let Some(rel) = haystack[from..].find(needle) {
        let start = from + rel;
        let end = start + needle.len();
        let before_ok = start == 0
            || !haystack[..start]
                .chars()
                .next_back()
                .is_some_and(char::is_alphanumeric);
        let after_ok = end == haystack.len()
            || !haystack[end..].chars().next().is_some_and(char::is_alphanumeric);
        if before_ok && after_ok {
            return Some(start);
        }
        from = end;
    }
    None
}

pub fn extract_languages(ctx: &ExtractionContext<'_>) -> Vec<LanguageEntry> {
    let lexicon = &ctx.resources.languages;

    let section_text = ctx.sections.text(SectionKind::Languages);
    let mut entries = scan(ctx, lexicon, &section_text);
    if entries.is_empty() {
        entries = scan(ctx, lexicon, ctx.text);
    }

    if entries.is_empty() {
        vec![LanguageEntry::default()]
    } else {
        entries
    }
}

fn scan(
    ctx: &ExtractionContext<'_>,
    lexicon: &LanguageLexicon,
    text: &str,
) -> Vec<LanguageEntry> {
    let mut entries: Vec<LanguageEntry> = Vec::new();
    let mut push = |language: &str, proficiency: &str| {
        if entries.iter().any(|e| e.language == language) {
            return;
        }
        entries.push(LanguageEntry {
            language: language.to_owned(),
            proficiency: proficiency.trim().to_lowercase(),
        });
    };

    // Explicit "<language> <separator> <level>" pairs first.
    for line in text.lines() {
        for caps in lexicon.pair.captures_iter(line) {
            let (Some(first), Some(second)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let Some(display) = lexicon.canonical(first.as_str()) else {
                continue;
            };
            if lexicon.contains_proficiency(second.as_str()) {
                push(display, second.as_str());
            }
        }
    }

    // Then the closest-proficiency search per known name, sentence by
    // sentence.
    for sentence in ctx.annotator.sentences(text, ctx.locale) {
        let lower = sentence.to_lowercase();
        for (surface, display) in &lexicon.surfaces {
            let Some(name_pos) = find_word(&lower, surface) else {
                continue;
            };
            let nearest = lexicon
                .proficiency_terms
                .iter()
                .filter_map(|term| {
                    find_word(&lower, term)
                        .map(|pos| (pos.abs_diff(name_pos), term.as_str()))
                })
                .min_by_key(|(distance, _)| *distance);
            if let Some((_, term)) = nearest {
                push(display, term);
            }
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::RegexAnnotator;
    use crate::locale::{Locale, LocaleResources};
    use crate::segment::Segmenter;

    fn extract(text: &str, locale: Locale) -> Vec<LanguageEntry> {
        let resources = LocaleResources::for_locale(locale).unwrap();
        let annotator = RegexAnnotator::new().unwrap();
        let sections = Segmenter::new(&resources).segment(text);
        let ctx = ExtractionContext {
            text,
            sections: &sections,
            resources: &resources,
            annotator: &annotator,
            locale,
        };
        extract_languages(&ctx)
    }

    #[test]
    fn test_pair_extraction() {
        let entries = extract("Languages\nEnglish - Fluent\nGerman: B2", Locale::English);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].language, "English");
        assert_eq!(entries[0].proficiency, "fluent");
        assert_eq!(entries[1].language, "German");
        assert_eq!(entries[1].proficiency, "b2");
    }

    #[test]
    fn test_hungarian_surface_canonicalized() {
        let entries = extract("Nyelvek\nAngol - Folyékony", Locale::Hungarian);

        assert_eq!(entries[0].language, "English");
        assert_eq!(entries[0].proficiency, "folyékony");
    }

    #[test]
    fn test_same_canonical_name_for_both_locales() {
        let en = extract("Languages\nEnglish - Fluent", Locale::English);
        let hu = extract("Nyelvek\nAngol - Folyékony", Locale::Hungarian);

        assert_eq!(en[0].language, hu[0].language);
    }

    #[test]
    fn test_nearest_proficiency_in_sentence() {
        let entries = extract(
            "Languages\nSpeaks Spanish at an intermediate level.",
            Locale::English,
        );

        assert_eq!(entries[0].language, "Spanish");
        assert_eq!(entries[0].proficiency, "intermediate");
    }

    #[test]
    fn test_placeholder_when_nothing_found() {
        let entries = extract("Skills\nRust and Docker", Locale::English);

        assert_eq!(entries.len(), 1);
        assert!(entries[0].language.is_empty());
        assert!(entries[0].proficiency.is_empty());
    }

    #[test]
    fn test_unknown_word_pairs_rejected() {
        let entries = extract("Languages\nRust - Fluent", Locale::English);

        // "Rust" is not a spoken language; no entry may be produced from it.
        assert!(entries.iter().all(|e| e.language != "Rust"));
    }
}
