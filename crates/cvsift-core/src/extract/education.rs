//! Education history.

use regex::Regex;

use crate::annotate::EntityLabel;
use crate::error::{compile, compile_all, Result};
use crate::record::EducationEntry;
use crate::segment::SectionKind;

use super::ExtractionContext;

/// Text grades mapped to the numeric scale used for the `gpa` field.
const GRADE_MAP: [(&str, &str); 8] = [
    ("excellent", "5.0"),
    ("kitűnő", "5.0"),
    ("jeles", "5.0"),
    ("good", "4.0"),
    ("jó", "4.0"),
    ("satisfactory", "3.0"),
    ("közepes", "3.0"),
    ("elégséges", "2.0"),
];

pub struct EducationLexicon {
    section_words: Vec<String>,
    stop_words: Vec<String>,
    schools: Vec<String>,
    degrees: Vec<String>,
    entry_keywords: Vec<String>,
    degree_phrase: Regex,
    degree_abbrev: Regex,
    gpa: Regex,
    grade: Regex,
    date_patterns: Vec<Regex>,
    year: Regex,
}

impl EducationLexicon {
    fn new(
        section_words: &[&str],
        stop_words: &[&str],
        schools: &[&str],
        degrees: &[&str],
        entry_keywords: &[&str],
        degree_phrase: &str,
        degree_abbrev: &str,
    ) -> Result<Self> {
        Ok(Self {
            section_words: section_words.iter().map(|s| (*s).to_lowercase()).collect(),
            stop_words: stop_words.iter().map(|s| (*s).to_lowercase()).collect(),
            schools: schools.iter().map(|s| (*s).to_lowercase()).collect(),
            degrees: degrees.iter().map(|s| (*s).to_lowercase()).collect(),
            entry_keywords: entry_keywords.iter().map(|s| (*s).to_lowercase()).collect(),
            degree_phrase: compile("education.degree_phrase", degree_phrase)?,
            degree_abbrev: compile("education.degree_abbrev", degree_abbrev)?,
            gpa: compile("education.gpa", r"(?i)GPA:?\s*([\d.]+)")?,
            grade: compile(
                "education.grade",
                r"(?i)(?:Note|Grade|Jegy|Minősítés|Eredmény):\s*([\w\p{L}]+)",
            )?,
            date_patterns: compile_all(
                "education.date",
                &[
                    r"\b(19|20)\d{2}\b",
                    r"\d{2}\.\d{2}\.\d{4}",
                    r"\d{4}/\d{2}/\d{2}",
                    r"\d{2}/\d{2}/\d{4}",
                ],
            )?,
            year: compile("education.year", r"\b(19|20)\d{2}\b")?,
        })
    }

    pub fn english() -> Result<Self> {
        Self::new(
            &["education", "academic background", "qualifications", "academic qualifications", "studies"],
            &["experience", "skills", "projects", "languages", "employment"],
            &["college", "university", "institute", "school", "academy"],
            &[
                "associate", "bachelor", "master", "phd", "ph.d", "bsc", "ba", "ms", "msc",
                "mba", "diploma", "engineer", "technician",
            ],
            &["diploma", "final exam", "leaving exam"],
            r"(?i)\b(?:bachelor|master|doctor|associate)(?:'s)?(?:\s+(?:of|in)\s+[\w\s]+)?",
            r"(?i)\b(?:BSc|BA|MSc?|MBA|PhD)\.?\s+in\s+[\w\s]+",
        )
    }

    pub fn hungarian() -> Result<Self> {
        Self::new(
            &["tanulmányok", "képzettség", "iskolai végzettség", "végzettség", "oktatás"],
            &["tapasztalat", "készségek", "projektek", "nyelvek", "munka"],
            &["egyetem", "főiskola", "iskola", "gimnázium", "szakközépiskola", "technikum", "intézet", "akadémia"],
            &["mérnök", "diploma", "technikus", "érettségi", "szakképzés", "okleveles"],
            &["diploma", "érettségi", "szakképzés", "továbbképzés", "tanfolyam"],
            r"(?i)\b(?:okleveles|diplomás)\s+[\w\p{L}\s]+",
            r"(?i)\b(?:BSc|BA|MSc?|MBA|PhD)\.?\s+[\w\p{L}\s]+",
        )
    }

    fn has_school(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        self.schools.iter().any(|s| lower.contains(s.as_str()))
    }

    fn has_degree(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric() && c != '.')
            .filter(|w| !w.is_empty())
            .collect();
        // Short abbreviations (BA, MS) must match a whole token; longer
        // degree words can appear inside a phrase.
        self.degrees.iter().any(|d| {
            if d.chars().count() <= 3 {
                words.iter().any(|w| *w == d.as_str())
            } else {
                lower.contains(d.as_str())
            }
        }) || self.degree_abbrev.is_match(line)
    }

    fn has_entry_keyword(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        self.entry_keywords.iter().any(|k| lower.contains(k.as_str()))
    }

    fn is_section_word(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        self.section_words.iter().any(|w| lower.contains(w.as_str()))
    }

    fn extract_gpa(&self, line: &str) -> Option<String> {
        if let Some(caps) = self.gpa.captures(line) {
            return caps.get(1).map(|m| m.as_str().to_owned());
        }
        if let Some(caps) = self.grade.captures(line) {
            let grade = caps.get(1)?.as_str();
            let lower = grade.to_lowercase();
            let mapped = GRADE_MAP
                .iter()
                .find(|(name, _)| *name == lower)
                .map_or(grade, |(_, numeric)| *numeric);
            return Some(mapped.to_owned());
        }
        None
    }

    /// Date for an education line, always reduced to a bare year when one is
    /// present in the match.
    fn extract_date(&self, line: &str) -> Option<String> {
        for pattern in &self.date_patterns {
            if let Some(m) = pattern.find(line) {
                let matched = m.as_str();
                return Some(
                    self.year
                        .find(matched)
                        .map_or(matched, |y| y.as_str())
                        .to_owned(),
                );
            }
        }
        None
    }

    /// Ordered cascade splitting an opening line into (school, degree).
    fn split_school_degree(&self, line: &str) -> (String, String) {
        // Explicit "Bachelor of X" phrasing wins.
        if let Some(m) = self.degree_phrase.find(line) {
            let degree = m.as_str().trim().trim_end_matches([',', '.']).to_owned();
            let rest = format!("{}{}", &line[..m.start()], &line[m.end()..]);
            let school = rest
                .trim_matches(|c: char| c.is_whitespace() || c == ',' || c == '-' || c == '|')
                .to_owned();
            let school = if self.has_school(&school) { school } else { String::new() };
            return (school, degree);
        }

        // Abbreviation plus field ("BSc in Computer Science").
        if let Some(m) = self.degree_abbrev.find(line) {
            let degree = m.as_str().trim().trim_end_matches([',', '.']).to_owned();
            let rest = format!("{}{}", &line[..m.start()], &line[m.end()..]);
            let school = rest
                .trim_matches(|c: char| c.is_whitespace() || c == ',' || c == '-' || c == '|')
                .to_owned();
            let school = if self.has_school(&school) { school } else { String::new() };
            return (school, degree);
        }

        // Generic separator split: whichever side names a school is the
        // school, the other side is the degree if it looks like one.
        for separator in [',', '-', '|', '–'] {
            if let Some((left, right)) = line.split_once(separator) {
                let (left, right) = (left.trim(), right.trim());
                if self.has_school(left) && !left.is_empty() {
                    let degree = if self.has_degree(right) { right } else { "" };
                    return (left.to_owned(), degree.to_owned());
                }
                if self.has_school(right) && !right.is_empty() {
                    let degree = if self.has_degree(left) { left } else { "" };
                    return (right.to_owned(), degree.to_owned());
                }
            }
        }

        if self.has_school(line) {
            (line.trim().to_owned(), String::new())
        } else if self.has_degree(line) {
            (String::new(), line.trim().to_owned())
        } else {
            (String::new(), String::new())
        }
    }
}

pub fn extract_education(ctx: &ExtractionContext<'_>) -> Vec<EducationEntry> {
    let lexicon = &ctx.resources.education;

    let section_text = ctx.sections.text(SectionKind::Education);
    let lines: Vec<String> = if section_text.is_empty() {
        fallback_span(ctx.text, lexicon)
    } else {
        section_text.lines().map(|l| l.trim().to_owned()).collect()
    };

    let mut entries: Vec<EducationEntry> = Vec::new();
    let mut current: Option<EducationEntry> = None;

    for line in &lines {
        if line.is_empty() {
            continue;
        }
        // Section header lines carry no entry content.
        if lexicon.is_section_word(line) && line.split_whitespace().count() <= 4 {
            continue;
        }

        if lexicon.has_school(line) || lexicon.has_entry_keyword(line) {
            if let Some(entry) = current.take() {
                if entry.has_identity() {
                    entries.push(entry);
                }
            }
            let (school, degree) = lexicon.split_school_degree(line);
            current = Some(EducationEntry {
                school: if school.is_empty() && lexicon.has_school(line) {
                    line.clone()
                } else {
                    school
                },
                degree,
                gpa: lexicon.extract_gpa(line).unwrap_or_default(),
                date: entry_date(ctx, lexicon, line).unwrap_or_default(),
                descriptions: Vec::new(),
            });
            continue;
        }

        let entry = current.get_or_insert_with(EducationEntry::default);

        if entry.degree.is_empty() && lexicon.has_degree(line) {
            entry.degree = line.clone();
            if entry.gpa.is_empty() {
                if let Some(gpa) = lexicon.extract_gpa(line) {
                    entry.gpa = gpa;
                }
            }
            continue;
        }
        if entry.date.is_empty() {
            if let Some(date) = entry_date(ctx, lexicon, line) {
                entry.date = date;
                continue;
            }
        }
        if entry.gpa.is_empty() {
            if let Some(gpa) = lexicon.extract_gpa(line) {
                entry.gpa = gpa;
                continue;
            }
        }
        if *line != entry.school && *line != entry.degree {
            entry.descriptions.push(line.clone());
        }
    }

    if let Some(entry) = current.take() {
        if entry.has_identity() {
            entries.push(entry);
        }
    }

    cleanup(ctx, lexicon, entries)
}

/// Date for a line: a DATE entity wins over the regex list, and both are
/// reduced to a bare year when possible.
fn entry_date(
    ctx: &ExtractionContext<'_>,
    lexicon: &EducationLexicon,
    line: &str,
) -> Option<String> {
    for entity in ctx.annotator.entities(line, ctx.locale) {
        if entity.label == EntityLabel::Date {
            let reduced = lexicon
                .year
                .find(&entity.text)
                .map_or(entity.text.trim(), |m| m.as_str())
                .to_owned();
            return Some(reduced);
        }
    }
    lexicon.extract_date(line)
}

fn cleanup(
    ctx: &ExtractionContext<'_>,
    lexicon: &EducationLexicon,
    entries: Vec<EducationEntry>,
) -> Vec<EducationEntry> {
    let mut cleaned = Vec::with_capacity(entries.len());

    for mut entry in entries {
        // Misfiled skills lines sometimes look like "Oracle Academy" rows.
        let school_lower = entry.school.to_lowercase();
        let school_is_tech = school_lower
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| ctx.resources.tech_keywords.contains(word));
        if school_is_tech && !lexicon.has_school(&entry.school) {
            continue;
        }

        let mut seen = Vec::new();
        entry.descriptions.retain(|desc| {
            if seen.contains(desc) {
                return false;
            }
            seen.push(desc.clone());
            if desc == &entry.school || desc == &entry.degree {
                return false;
            }
            // Date-only leftovers.
            if lexicon.extract_date(desc).as_deref() == Some(entry.date.as_str())
                && desc.split_whitespace().count() <= 2
            {
                return false;
            }
            !is_short_location_line(desc)
        });

        cleaned.push(entry);
    }

    cleaned
}

fn is_short_location_line(line: &str) -> bool {
    let words: Vec<&str> = line.split_whitespace().collect();
    words.len() <= 3
        && !words.is_empty()
        && !line.chars().any(|c| c.is_ascii_digit())
        && words.iter().all(|w| {
            w.trim_matches(',')
                .chars()
                .next()
                .is_some_and(char::is_uppercase)
        })
        && line.contains(',')
}

/// Raw-text span used when the segmenter produced no education section:
/// capture after an education header word until a different-section word.
fn fallback_span(text: &str, lexicon: &EducationLexicon) -> Vec<String> {
    let mut lines = Vec::new();
    let mut in_section = false;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let lower = line.to_lowercase();

        if lexicon.section_words.iter().any(|w| lower.contains(w.as_str()))
            && line.split_whitespace().count() <= 4
        {
            in_section = true;
            continue;
        }
        if in_section
            && lexicon.stop_words.iter().any(|w| lower.contains(w.as_str()))
            && line.split_whitespace().count() <= 4
        {
            break;
        }
        if in_section {
            lines.push(line.to_owned());
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::RegexAnnotator;
    use crate::locale::{Locale, LocaleResources};
    use crate::segment::Segmenter;

    fn extract(text: &str) -> Vec<EducationEntry> {
        let resources = LocaleResources::english().unwrap();
        let annotator = RegexAnnotator::new().unwrap();
        let sections = Segmenter::new(&resources).segment(text);
        let ctx = ExtractionContext {
            text,
            sections: &sections,
            resources: &resources,
            annotator: &annotator,
            locale: Locale::English,
        };
        extract_education(&ctx)
    }

    #[test]
    fn test_school_and_degree_from_one_line() {
        let entries = extract("Education\nBSc in Computer Science, State University\n2012 - 2015");

        assert_eq!(entries.len(), 1);
        assert!(entries[0].degree.starts_with("BSc in Computer Science"));
        assert!(entries[0].school.contains("State University"));
        assert_eq!(entries[0].date, "2012");
    }

    #[test]
    fn test_gpa_and_grade_mapping() {
        let resources = LocaleResources::english().unwrap();
        let lexicon = &resources.education;

        assert_eq!(lexicon.extract_gpa("GPA: 3.8").as_deref(), Some("3.8"));
        assert_eq!(lexicon.extract_gpa("Grade: excellent").as_deref(), Some("5.0"));
        assert_eq!(lexicon.extract_gpa("Minősítés: jeles").as_deref(), Some("5.0"));
        assert_eq!(lexicon.extract_gpa("no grades here"), None);
    }

    #[test]
    fn test_date_reduced_to_year() {
        let resources = LocaleResources::english().unwrap();
        let lexicon = &resources.education;

        assert_eq!(lexicon.extract_date("Graduated 12.06.2018").as_deref(), Some("2018"));
        assert_eq!(lexicon.extract_date("2015 - 2019").as_deref(), Some("2015"));
    }

    #[test]
    fn test_entry_requires_identity() {
        let entries = extract("Education\nSome miscellaneous line\nAnother line");
        assert!(entries.is_empty());
    }

    #[test]
    fn test_multiple_entries() {
        let entries = extract(
            "Education\nTech University\nMSc in Software Engineering\n2018\nCentral High School\n2014",
        );

        assert_eq!(entries.len(), 2);
        assert!(entries[0].school.contains("Tech University"));
        assert!(entries[1].school.contains("Central High School"));
    }

    #[test]
    fn test_hungarian_degree_keywords() {
        let resources = LocaleResources::hungarian().unwrap();
        let lexicon = &resources.education;

        assert!(lexicon.has_school("Budapesti Műszaki Egyetem"));
        assert!(lexicon.has_degree("Okleveles villamosmérnök"));
    }
}
