//! Work history.

use regex::Regex;

use crate::annotate::{EntityLabel, PosTag};
use crate::error::{compile, compile_all, Result};
use crate::record::ExperienceEntry;
use crate::segment::SectionKind;

use super::ExtractionContext;

const BULLET_GLYPHS: [char; 9] = ['•', '-', '✓', '*', '○', '●', '→', '▪', '‣'];

pub struct ExperienceLexicon {
    start_anchor: Regex,
    stop_anchor: Regex,
    /// Ordered date-range cascade; first match wins.
    date_ranges: Vec<Regex>,
    job_indicators: Vec<String>,
    company_suffixes: Vec<String>,
    action_verbs: Vec<String>,
}

impl ExperienceLexicon {
    fn new(
        start_anchor: &str,
        stop_anchor: &str,
        date_ranges: &[&str],
        job_indicators: &[&str],
        action_verbs: &[&str],
    ) -> Result<Self> {
        Ok(Self {
            start_anchor: compile("experience.start", start_anchor)?,
            stop_anchor: compile("experience.stop", stop_anchor)?,
            date_ranges: compile_all("experience.date_range", date_ranges)?,
            job_indicators: job_indicators.iter().map(|s| (*s).to_lowercase()).collect(),
            company_suffixes: ["inc", "ltd", "llc", "corp", "gmbh", "kft", "zrt", "bt", "nyrt"]
                .iter()
                .map(|s| (*s).to_owned())
                .collect(),
            action_verbs: action_verbs.iter().map(|s| (*s).to_lowercase()).collect(),
        })
    }

    pub fn english() -> Result<Self> {
        Self::new(
            r"(?i)^(work\s*experience(\s*/?\s*projects?)?|experience|employment(\s+history)?|professional\s+(experience|background)|work\s+history|career)\s*:?\s*$",
            r"(?i)^(education|skills|projects|languages|certifications|interests|awards|publications|references|qualifications)\b",
            &[
                r"(?i)(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*[\s.]*\d{4}\s*[-–—]\s*(?:present|current|now|(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*[\s.]*\d{4})",
                r"(?i)(?:19|20)\d{2}\s*[-–—]\s*(?:(?:19|20)\d{2}|present|current|now)",
                r"(?i)\d{1,2}/\d{4}\s*[-–—]\s*(?:\d{1,2}/\d{4}|present|current|now)",
                r"(?i)(?:since|from|starting)\s+(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*[\s.]*\d{4}",
                r"(?i)(?:since|from|starting)\s+\d{4}",
            ],
            &[
                "developer", "engineer", "manager", "consultant", "analyst", "specialist",
                "coordinator", "assistant", "director", "lead", "intern", "trainee",
                "administrator", "supervisor", "architect",
            ],
            &[
                "improved", "developed", "managed", "led", "created", "implemented",
                "designed", "built", "maintained", "achieved", "increased", "reduced",
                "supported", "delivered", "migrated", "automated",
            ],
        )
    }

    pub fn hungarian() -> Result<Self> {
        Self::new(
            r"(?i)^(munkatapasztalat(ok)?|szakmai\s+(tapasztalat(ok)?|előzmények|gyakorlat)|munkatörténet|korábbi\s+munkák|tapasztalat|foglalkoztatási\s+előzmények|munkahely(ek)?)\s*:?\s*$",
            r"(?i)^(oktatás|tanulmányok|képzés|készségek|projektek|nyelvek|végzettség|tanúsítványok|érdeklődési|referenciák)\b",
            &[
                r"(?i)\d{4}\.?\s*(?:január|február|március|április|május|június|július|augusztus|szeptember|október|november|december)?\s*[-–—]\s*(?:\d{4}\.?|jelenleg|jelenlegi)",
                r"(?i)(?:19|20)\d{2}\s*[-–—]\s*(?:(?:19|20)\d{2}|jelenleg|jelenlegi)",
                r"(?i)\d{4}\.\s*(?:január|február|március|április|május|június|július|augusztus|szeptember|október|november|december)(?:\s*\d{1,2}\.?)?",
                r"(?i)\d{4}\s*(?:óta|-től|-tól)",
                r"\d{2}\.\d{2}\.\d{4}",
            ],
            &[
                "fejlesztő", "mérnök", "menedzser", "tanácsadó", "elemző", "szakértő",
                "koordinátor", "asszisztens", "igazgató", "vezető", "gyakornok",
                "adminisztrátor", "felügyelő", "informatikus", "projektmenedzser",
                "programozó", "munkatárs", "rendszergazda",
            ],
            &[
                "fejlesztettem", "vezettem", "irányítottam", "létrehoztam", "terveztem",
                "megvalósítottam", "üzemeltettem", "támogattam", "karbantartottam",
                "automatizáltam", "növeltem", "csökkentettem",
            ],
        )
    }

    fn find_date_range(&self, line: &str) -> Option<String> {
        for pattern in &self.date_ranges {
            if let Some(m) = pattern.find(line) {
                return Some(m.as_str().trim().to_owned());
            }
        }
        None
    }

    fn is_likely_job_title(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        self.job_indicators.iter().any(|i| lower.contains(i.as_str()))
    }

    fn has_company_suffix(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        lower
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| self.company_suffixes.iter().any(|s| *s == word))
    }

    fn has_action_verb(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        lower
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| self.action_verbs.iter().any(|v| *v == word))
    }
}

pub fn extract_experience(ctx: &ExtractionContext<'_>) -> Vec<ExperienceEntry> {
    let lexicon = &ctx.resources.experience;

    let section_text = ctx.sections.text(SectionKind::Experience);
    let lines: Vec<String> = if section_text.is_empty() {
        raw_span(ctx.text, lexicon)
    } else {
        section_text
            .lines()
            .map(|l| l.trim().to_owned())
            .filter(|l| !l.is_empty())
            .collect()
    };

    let mut entries = scan_entries(ctx, lexicon, &lines, false);
    if entries.is_empty() {
        // Looser pass over the whole document when the span strategy found
        // nothing: any non-trigger line after a date becomes a description.
        let all_lines: Vec<String> = ctx
            .text
            .lines()
            .map(|l| l.trim().to_owned())
            .filter(|l| !l.is_empty())
            .collect();
        entries = scan_entries(ctx, lexicon, &all_lines, true);
    }

    promote_titles(lexicon, &mut entries);
    entries.retain(ExperienceEntry::has_identity);

    if entries.is_empty() {
        vec![ExperienceEntry::default()]
    } else {
        entries
    }
}

fn scan_entries(
    ctx: &ExtractionContext<'_>,
    lexicon: &ExperienceLexicon,
    lines: &[String],
    loose: bool,
) -> Vec<ExperienceEntry> {
    let mut entries: Vec<ExperienceEntry> = Vec::new();
    let mut current: Option<ExperienceEntry> = None;

    for (i, line) in lines.iter().enumerate() {
        if lexicon.start_anchor.is_match(line) {
            continue;
        }

        if let Some(date) = lexicon.find_date_range(line) {
            if let Some(entry) = current.take() {
                entries.push(entry);
            }
            let mut entry = ExperienceEntry {
                date,
                ..ExperienceEntry::default()
            };
            // The title and company usually sit on the 1-2 lines above the
            // date line.
            for prev in lines[i.saturating_sub(2)..i].iter().rev() {
                if lexicon.find_date_range(prev).is_some() {
                    continue;
                }
                if entry.job_title.is_empty() && lexicon.is_likely_job_title(prev) {
                    entry.job_title = prev.clone();
                } else if entry.company.is_empty() && is_likely_company(ctx, lexicon, prev) {
                    entry.company = prev.clone();
                }
            }
            current = Some(entry);
            continue;
        }

        let Some(entry) = current.as_mut() else {
            continue;
        };

        if let Some(stripped) = strip_bullet(line) {
            entry.descriptions.push(stripped);
            continue;
        }
        if is_action_sentence(ctx, lexicon, line) {
            entry.descriptions.push(line.clone());
            continue;
        }
        if entry.job_title.is_empty() && lexicon.is_likely_job_title(line) {
            entry.job_title = line.clone();
            continue;
        }
        if entry.company.is_empty() && is_likely_company(ctx, lexicon, line) {
            entry.company = line.clone();
            continue;
        }
        if loose || line.chars().count() > 30 {
            entry.descriptions.push(line.clone());
        }
    }

    if let Some(entry) = current.take() {
        entries.push(entry);
    }
    entries
}

fn strip_bullet(line: &str) -> Option<String> {
    if line.starts_with(BULLET_GLYPHS) {
        return Some(
            line.trim_start_matches(BULLET_GLYPHS)
                .trim_start()
                .to_owned(),
        );
    }
    // "1. Did a thing" style numbered lists.
    let mut chars = line.chars();
    if chars.next().is_some_and(|c| c.is_ascii_digit()) && line.contains(". ") {
        if let Some((prefix, rest)) = line.split_once(". ") {
            if prefix.chars().all(|c| c.is_ascii_digit()) {
                return Some(rest.trim().to_owned());
            }
        }
    }
    None
}

fn is_action_sentence(
    ctx: &ExtractionContext<'_>,
    lexicon: &ExperienceLexicon,
    line: &str,
) -> bool {
    if lexicon.has_action_verb(line) {
        return true;
    }
    ctx.annotator
        .tokens(line, ctx.locale)
        .iter()
        .any(|t| t.pos == PosTag::Verb)
}

/// Company heuristics, in priority order: a named-entity hit, a short line
/// with a company-suffix token or title/upper casing, or a short
/// uppercase-start line with no verb or adposition.
fn is_likely_company(
    ctx: &ExtractionContext<'_>,
    lexicon: &ExperienceLexicon,
    line: &str,
) -> bool {
    if line.is_empty() || lexicon.is_likely_job_title(line) {
        return false;
    }

    for entity in ctx.annotator.entities(line, ctx.locale) {
        if matches!(
            entity.label,
            EntityLabel::Org | EntityLabel::Gpe | EntityLabel::Product
        ) {
            return true;
        }
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    if words.len() > 5 {
        return false;
    }
    if lexicon.has_company_suffix(line) {
        return true;
    }
    let title_cased = words.iter().all(|w| {
        w.chars().next().is_some_and(char::is_uppercase) || w.chars().all(char::is_numeric)
    });
    let upper_cased = !line.chars().any(char::is_lowercase) && line.chars().any(char::is_alphabetic);
    if title_cased || upper_cased {
        return true;
    }

    let starts_upper = line.chars().next().is_some_and(char::is_uppercase);
    if !starts_upper {
        return false;
    }
    !ctx.annotator
        .tokens(line, ctx.locale)
        .iter()
        .any(|t| matches!(t.pos, PosTag::Verb | PosTag::Adposition))
        && !lexicon.has_action_verb(line)
}

/// When an entry ended up title-less, the title often hides in the first
/// description line.
fn promote_titles(lexicon: &ExperienceLexicon, entries: &mut [ExperienceEntry]) {
    for entry in entries.iter_mut() {
        if !entry.job_title.is_empty() {
            continue;
        }
        if let Some(pos) = entry
            .descriptions
            .iter()
            .position(|d| lexicon.is_likely_job_title(d))
        {
            entry.job_title = entry.descriptions.remove(pos);
        }
    }
}

/// Header-anchored span over the raw document, used when the segmenter
/// produced no experience section.
fn raw_span(text: &str, lexicon: &ExperienceLexicon) -> Vec<String> {
    let mut lines = Vec::new();
    let mut in_section = false;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if lexicon.start_anchor.is_match(line) {
            in_section = true;
            continue;
        }
        if in_section && lexicon.stop_anchor.is_match(line) {
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

    fn extract(text: &str) -> Vec<ExperienceEntry> {
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
        extract_experience(&ctx)
    }

    #[test]
    fn test_entry_from_date_with_surrounding_lines() {
        let entries = extract(
            "Work Experience\nSenior Engineer\nAcme Corp\nJan 2020 - Present\n• Built the data platform\n• Led a team of four",
        );

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].job_title, "Senior Engineer");
        assert_eq!(entries[0].company, "Acme Corp");
        assert_eq!(entries[0].date, "Jan 2020 - Present");
        assert_eq!(
            entries[0].descriptions,
            vec!["Built the data platform", "Led a team of four"]
        );
    }

    #[test]
    fn test_placeholder_when_nothing_found() {
        let entries = extract("Skills\nRust, Python");

        assert_eq!(entries.len(), 1);
        assert!(!entries[0].has_identity());
        assert!(entries[0].date.is_empty());
    }

    #[test]
    fn test_multiple_entries_in_order() {
        let entries = extract(
            "Experience\nBackend Developer\nWidget Ltd\n2018 - 2020\n• Shipped the billing service\nSenior Developer\nAcme Corp\n2020 - Present\n• Improved deploy times by 60%",
        );

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].company, "Widget Ltd");
        assert_eq!(entries[1].company, "Acme Corp");
        assert_eq!(entries[1].date, "2020 - Present");
    }

    #[test]
    fn test_title_promoted_from_descriptions() {
        let resources = LocaleResources::english().unwrap();
        let lexicon = &resources.experience;
        let mut entries = vec![ExperienceEntry {
            company: "Acme".to_owned(),
            job_title: String::new(),
            date: "2020".to_owned(),
            descriptions: vec![
                "Software developer on the platform team".to_owned(),
                "Shipped things".to_owned(),
            ],
        }];

        promote_titles(lexicon, &mut entries);

        assert_eq!(entries[0].job_title, "Software developer on the platform team");
        assert_eq!(entries[0].descriptions, vec!["Shipped things"]);
    }

    #[test]
    fn test_date_range_cascade() {
        let resources = LocaleResources::english().unwrap();
        let lexicon = &resources.experience;

        assert_eq!(
            lexicon.find_date_range("Mar 2019 - Jun 2021 at Acme").as_deref(),
            Some("Mar 2019 - Jun 2021")
        );
        assert_eq!(
            lexicon.find_date_range("2015 - Present").as_deref(),
            Some("2015 - Present")
        );
        assert_eq!(
            lexicon.find_date_range("Since 2022").as_deref(),
            Some("Since 2022")
        );
        assert_eq!(lexicon.find_date_range("no dates"), None);
    }

    #[test]
    fn test_hungarian_date_range() {
        let resources = LocaleResources::hungarian().unwrap();
        let lexicon = &resources.experience;

        assert!(lexicon.find_date_range("2019 - jelenleg").is_some());
        assert!(lexicon.find_date_range("2014. január").is_some());
    }
}
