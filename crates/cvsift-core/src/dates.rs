//! Date fragments reduced to a comparable (year, month) key.
//!
//! Résumé dates arrive as free text ("Jan 2020 - Present", "2014. január",
//! "03/2019"). Extractors only ever need to *rank* entries by recency, so the
//! whole parsing problem collapses to one ordering key with two sentinels:
//! `Current` for an ongoing position and `Unknown` for text that yields no
//! year at all.

use regex::Regex;

use crate::error::{compile, Result};

/// Ranking key for a date fragment.
///
/// Ordering is total: `Unknown < Ym { year, .. } < Current`, and `Ym` values
/// order by `(year, month)` with `month == 0` meaning "year only", so
/// `Present > 2020 > 2019-12 > 2019 > unparseable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DateKey {
    Unknown,
    Ym { year: u16, month: u8 },
    Current,
}

impl DateKey {
    /// Reduces a raw date fragment to a key, keying on the *end* of a range.
    ///
    /// Never fails: anything without a recognizable year is `Unknown`.
    #[must_use]
    pub fn parse(fragment: &str, lexicon: &DateLexicon) -> Self {
        let trimmed = fragment.trim();
        if trimmed.is_empty() {
            return Self::Unknown;
        }

        // A range is keyed by its end; "2018 - Present" must outrank "2020".
        let end = trimmed
            .split(['-', '–', '—'])
            .filter(|part| !part.trim().is_empty())
            .next_back()
            .unwrap_or(trimmed)
            .trim();

        if lexicon.is_current(end) {
            return Self::Current;
        }

        // "2019-12" splits into a tail with no year; fall back to the whole
        // fragment so year-month forms written with a dash still parse.
        let scope = if lexicon.find_year(end).is_some() { end } else { trimmed };

        let Some(year) = lexicon.find_year(scope) else {
            return Self::Unknown;
        };

        let month = lexicon
            .find_month_name(scope)
            .or_else(|| lexicon.find_numeric_month(scope))
            .unwrap_or(0);

        Self::Ym { year, month }
    }
}

/// Per-locale vocabulary needed to read date fragments.
#[derive(Debug)]
pub struct DateLexicon {
    current_words: Vec<String>,
    months: Vec<(String, u8)>,
    year: Regex,
    month_year: Regex,
    year_month: Regex,
}

impl DateLexicon {
    pub fn new(current_words: &[&str], months: &[(&str, u8)]) -> Result<Self> {
        Ok(Self {
            current_words: current_words.iter().map(|w| (*w).to_lowercase()).collect(),
            months: months
                .iter()
                .map(|(name, m)| (name.to_lowercase(), *m))
                .collect(),
            year: compile("date.year", r"\b(19|20)\d{2}\b")?,
            month_year: compile("date.month_year", r"\b(\d{1,2})\s*[/.]\s*(19|20)\d{2}\b")?,
            year_month: compile("date.year_month", r"\b(19|20)\d{2}\s*[/.\-]\s*(\d{1,2})\b")?,
        })
    }

    pub fn english() -> Result<Self> {
        Self::new(
            &["present", "current", "now", "ongoing", "today"],
            &[
                ("january", 1),
                ("jan", 1),
                ("february", 2),
                ("feb", 2),
                ("march", 3),
                ("mar", 3),
                ("april", 4),
                ("apr", 4),
                ("may", 5),
                ("june", 6),
                ("jun", 6),
                ("july", 7),
                ("jul", 7),
                ("august", 8),
                ("aug", 8),
                ("september", 9),
                ("sept", 9),
                ("sep", 9),
                ("october", 10),
                ("oct", 10),
                ("november", 11),
                ("nov", 11),
                ("december", 12),
                ("dec", 12),
            ],
        )
    }

    pub fn hungarian() -> Result<Self> {
        Self::new(
            &["jelenleg", "jelenlegi", "folyamatban", "ma is"],
            &[
                ("január", 1),
                ("jan", 1),
                ("február", 2),
                ("feb", 2),
                ("március", 3),
                ("már", 3),
                ("április", 4),
                ("ápr", 4),
                ("május", 5),
                ("máj", 5),
                ("június", 6),
                ("jún", 6),
                ("július", 7),
                ("júl", 7),
                ("augusztus", 8),
                ("aug", 8),
                ("szeptember", 9),
                ("szept", 9),
                ("szep", 9),
                ("október", 10),
                ("okt", 10),
                ("november", 11),
                ("nov", 11),
                ("december", 12),
                ("dec", 12),
            ],
        )
    }

    fn is_current(&self, fragment: &str) -> bool {
        let lower = fragment.to_lowercase();
        self.current_words.iter().any(|w| lower.contains(w.as_str()))
    }

    fn find_year(&self, fragment: &str) -> Option<u16> {
        self.year
            .find(fragment)
            .and_then(|m| m.as_str().parse().ok())
    }

    fn find_month_name(&self, fragment: &str) -> Option<u8> {
        let lower = fragment.to_lowercase();
        for word in lower.split(|c: char| !c.is_alphabetic()) {
            if word.is_empty() {
                continue;
            }
            for (name, month) in &self.months {
                if word == name || (name.len() >= 3 && word.starts_with(name.as_str())) {
                    return Some(*month);
                }
            }
        }
        None
    }

    fn find_numeric_month(&self, fragment: &str) -> Option<u8> {
        let capture = self
            .month_year
            .captures(fragment)
            .and_then(|c| c.get(1).map(|m| m.as_str().to_owned()))
            .or_else(|| {
                self.year_month
                    .captures(fragment)
                    .and_then(|c| c.get(2).map(|m| m.as_str().to_owned()))
            })?;
        let month: u8 = capture.parse().ok()?;
        (1..=12).contains(&month).then_some(month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> DateLexicon {
        DateLexicon::english().unwrap()
    }

    #[test]
    fn test_total_order() {
        let lex = lexicon();
        let present = DateKey::parse("Present", &lex);
        let y2020 = DateKey::parse("2020", &lex);
        let y2019_dec = DateKey::parse("Dec 2019", &lex);
        let y2019 = DateKey::parse("2019", &lex);
        let junk = DateKey::parse("no date here", &lex);

        assert!(present > y2020);
        assert!(y2020 > y2019_dec);
        assert!(y2019_dec > y2019);
        assert!(y2019 > junk);
        assert_eq!(junk, DateKey::Unknown);
    }

    #[test]
    fn test_range_keys_on_end() {
        let lex = lexicon();
        assert_eq!(DateKey::parse("2015 - 2018", &lex), DateKey::Ym { year: 2018, month: 0 });
        assert_eq!(DateKey::parse("Jan 2020 - Present", &lex), DateKey::Current);
        assert_eq!(
            DateKey::parse("Mar 2019 - Jun 2021", &lex),
            DateKey::Ym { year: 2021, month: 6 }
        );
    }

    #[test]
    fn test_numeric_month_forms() {
        let lex = lexicon();
        assert_eq!(DateKey::parse("03/2019", &lex), DateKey::Ym { year: 2019, month: 3 });
        assert_eq!(DateKey::parse("12.2020", &lex), DateKey::Ym { year: 2020, month: 12 });
    }

    #[test]
    fn test_hungarian_months_and_current() {
        let lex = DateLexicon::hungarian().unwrap();
        assert_eq!(
            DateKey::parse("2014. január", &lex),
            DateKey::Ym { year: 2014, month: 1 }
        );
        assert_eq!(DateKey::parse("2019 - jelenleg", &lex), DateKey::Current);
    }

    #[test]
    fn test_dashed_year_month() {
        let lex = lexicon();
        assert_eq!(DateKey::parse("2019-12", &lex), DateKey::Ym { year: 2019, month: 12 });
    }

    #[test]
    fn test_empty_is_unknown() {
        assert_eq!(DateKey::parse("", &lexicon()), DateKey::Unknown);
        assert_eq!(DateKey::parse("   ", &lexicon()), DateKey::Unknown);
    }
}
