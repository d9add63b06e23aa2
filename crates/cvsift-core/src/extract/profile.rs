//! Contact details and the professional summary.

use regex::Regex;

use crate::annotate::EntityLabel;
use crate::error::{compile, compile_all, Result};
use crate::record::ProfileRecord;
use crate::segment::SectionKind;

use super::ExtractionContext;

/// Contact-field patterns for one locale. Phone patterns are an ordered
/// cascade: locale-specific formats are tried before the generic
/// international shape.
pub struct ContactLexicon {
    phone_patterns: Vec<Regex>,
    email: Regex,
    url: Regex,
    location_markers: Vec<String>,
    place_keywords: Vec<String>,
    invalid_name: Vec<Regex>,
    name_chars: Regex,
    summary_header_words: Vec<String>,
    stop_header: Regex,
    work_markers: Vec<String>,
    company_suffixes: Vec<String>,
    year: Regex,
}

impl ContactLexicon {
    #[allow(clippy::too_many_arguments)]
    fn new(
        phone_patterns: &[&str],
        location_markers: &[&str],
        place_keywords: &[&str],
        summary_header_words: &[&str],
        stop_header: &str,
        work_markers: &[&str],
    ) -> Result<Self> {
        Ok(Self {
            phone_patterns: compile_all("contact.phone", phone_patterns)?,
            email: compile(
                "contact.email",
                r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}",
            )?,
            url: compile(
                "contact.url",
                r"(?i)(https?://\S+)|(www\.\S+)|(linkedin\.com/in/\S+)|(github\.com/\S+)",
            )?,
            location_markers: location_markers.iter().map(|s| (*s).to_lowercase()).collect(),
            place_keywords: place_keywords.iter().map(|s| (*s).to_lowercase()).collect(),
            invalid_name: compile_all(
                "contact.invalid_name",
                &[
                    r"(?i)^cid:",
                    r"^\d+$",
                    r"^[a-f0-9]+$",
                    r"^#",
                    r"(?i)^id:",
                    r"^\[.*\]$",
                    r"^<.*>$",
                    r"^\{.*\}$",
                    r"^\d+[A-Za-z]+$",
                ],
            )?,
            name_chars: compile("contact.name_chars", r"^[\p{L}\s'’-]+$")?,
            summary_header_words: summary_header_words
                .iter()
                .map(|s| (*s).to_lowercase())
                .collect(),
            stop_header: compile("contact.stop_header", stop_header)?,
            work_markers: work_markers.iter().map(|s| (*s).to_lowercase()).collect(),
            company_suffixes: ["inc", "ltd", "llc", "corp", "gmbh", "kft", "zrt", "bt", "nyrt"]
                .iter()
                .map(|s| (*s).to_owned())
                .collect(),
            year: compile("contact.year", r"\b(19|20)\d{2}\b")?,
        })
    }

    pub fn english() -> Result<Self> {
        Self::new(
            &[
                r"\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}",
                r"\+?\d{1,3}[-.\s]?\(?\d{1,4}\)?[-.\s]?\d{3,4}[-.\s]?\d{3,4}",
            ],
            &["address:", "location:", "city:"],
            &[
                "london", "manchester", "birmingham", "dublin", "new york", "boston",
                "san francisco", "seattle", "austin", "berlin", "amsterdam", "budapest",
            ],
            &["summary", "profile", "about me", "introduction", "objective", "overview"],
            r"(?i)^(experience|education|skills|projects|work|employment|qualifications|languages|certifications)",
            &["experience", "work", "employment", "career", "employed", "joined"],
        )
    }

    pub fn hungarian() -> Result<Self> {
        Self::new(
            &[
                r"(?:\+36|06)[-\s]?(?:20|30|70|1)[-\s]?\d{3}[-\s]?\d{4}",
                r"(?:\+36|06)[-\s]?\d[-\s]?\d{3}[-\s]?\d{4}",
                r"\+?\d{1,3}[-.\s]?\(?\d{1,4}\)?[-.\s]?\d{3,4}[-.\s]?\d{3,4}",
            ],
            &["cím:", "lakcím:", "lakhely:", "város:", "address:", "location:"],
            &[
                "budapest", "debrecen", "szeged", "pécs", "győr", "nyíregyháza", "miskolc",
                "kecskemét", "székesfehérvár", "szombathely",
            ],
            &[
                "összefoglaló",
                "bemutatkozás",
                "profil",
                "rólam",
                "szakmai célok",
                "áttekintés",
                "szakmai profil",
            ],
            r"(?i)^(tapasztalat|tanulmányok|képzettség|készségek|projektek|munka|végzettség|nyelvek|oktatás)",
            &["tapasztalat", "munka", "munkahely", "karrier", "foglalkoztatás"],
        )
    }

    /// Name-shape gate: 1-4 words, letters/apostrophes/hyphens only, every
    /// word capitalized and at least two characters.
    #[must_use]
    pub fn is_valid_name(&self, candidate: &str) -> bool {
        let candidate = candidate.trim();
        if candidate.len() < 2 {
            return false;
        }
        if self.invalid_name.iter().any(|p| p.is_match(candidate)) {
            return false;
        }
        if !self.name_chars.is_match(candidate) {
            return false;
        }
        let words: Vec<&str> = candidate.split_whitespace().collect();
        if words.is_empty() || words.len() > 4 {
            return false;
        }
        words.iter().all(|word| {
            word.chars().count() >= 2 && word.chars().next().is_some_and(char::is_uppercase)
        })
    }

    fn is_contact_line(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        self.email.is_match(line)
            || self.url.is_match(line)
            || self.phone_patterns.iter().any(|p| p.is_match(line))
            || self.location_markers.iter().any(|m| lower.contains(m.as_str()))
    }
}

pub fn extract_profile(ctx: &ExtractionContext<'_>) -> ProfileRecord {
    let lexicon = &ctx.resources.contact;
    ProfileRecord {
        name: extract_name(ctx, lexicon),
        email: extract_email(ctx, lexicon),
        phone: extract_phone(ctx, lexicon),
        location: extract_location(ctx, lexicon),
        url: lexicon
            .url
            .find(ctx.text)
            .map(|m| m.as_str().to_owned())
            .unwrap_or_default(),
        summary: extract_summary(ctx, lexicon),
    }
}

fn extract_name(ctx: &ExtractionContext<'_>, lexicon: &ContactLexicon) -> String {
    for entity in ctx.annotator.entities(ctx.text, ctx.locale) {
        if entity.label == EntityLabel::Person && lexicon.is_valid_name(&entity.text) {
            return entity.text.trim().to_owned();
        }
    }

    // No usable entity: the name is almost always one of the first lines.
    for line in ctx.text.lines().take(3) {
        let line = line.trim();
        if !line.is_empty()
            && line.split_whitespace().count() <= 4
            && lexicon.is_valid_name(line)
        {
            return line.to_owned();
        }
    }
    String::new()
}

fn extract_email(ctx: &ExtractionContext<'_>, lexicon: &ContactLexicon) -> String {
    for token in ctx.annotator.tokens(ctx.text, ctx.locale) {
        if token.is_email_like {
            let bare = token
                .text
                .trim_matches(|c: char| !c.is_alphanumeric() && c != '@' && c != '.');
            return bare.to_owned();
        }
    }
    lexicon
        .email
        .find(ctx.text)
        .map(|m| m.as_str().to_owned())
        .unwrap_or_default()
}

fn extract_phone(ctx: &ExtractionContext<'_>, lexicon: &ContactLexicon) -> String {
    for pattern in &lexicon.phone_patterns {
        if let Some(m) = pattern.find(ctx.text) {
            return m.as_str().trim().to_owned();
        }
    }
    String::new()
}

fn extract_location(ctx: &ExtractionContext<'_>, lexicon: &ContactLexicon) -> String {
    for entity in ctx.annotator.entities(ctx.text, ctx.locale) {
        if matches!(
            entity.label,
            EntityLabel::Loc | EntityLabel::Gpe | EntityLabel::Fac
        ) {
            return entity.text.trim().to_owned();
        }
    }

    for line in ctx.text.lines().take(5) {
        let lower = line.trim().to_lowercase();
        if lower.is_empty() {
            continue;
        }
        for marker in &lexicon.location_markers {
            if let Some(idx) = lower.find(marker.as_str()) {
                let value = lower[idx + marker.len()..].trim();
                if !value.is_empty() {
                    return title_case(value);
                }
            }
        }
        for place in &lexicon.place_keywords {
            if lower
                .split(|c: char| !c.is_alphabetic())
                .any(|w| w == place.as_str())
                || (place.contains(' ') && lower.contains(place.as_str()))
            {
                return title_case(place);
            }
        }
    }
    String::new()
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Summary source priority: a dedicated summary block (truncated at the
/// first transition into work history), then the profile block, then a raw
/// header-anchored scan.
fn extract_summary(ctx: &ExtractionContext<'_>, lexicon: &ContactLexicon) -> String {
    let summary_blocks = ctx.sections.blocks(SectionKind::Summary);
    if !summary_blocks.is_empty() {
        let filtered = filter_summary_lines(&summary_blocks.join("\n"), lexicon);
        if !filtered.is_empty() {
            return truncate_at_work_transition(&filtered, lexicon);
        }
    }

    let profile_blocks = ctx.sections.blocks(SectionKind::Profile);
    if !profile_blocks.is_empty() {
        let filtered = filter_summary_lines(&profile_blocks.join("\n"), lexicon);
        if !filtered.is_empty() {
            return filtered;
        }
    }

    raw_summary_scan(ctx.text, lexicon)
}

/// Drops contact-like and very short lines, plus a leading header-like line.
fn filter_summary_lines(block: &str, lexicon: &ContactLexicon) -> String {
    let mut kept = Vec::new();
    for (i, line) in block.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || lexicon.is_contact_line(line) {
            continue;
        }
        let lower = line.to_lowercase();
        let header_like = line.split_whitespace().count() <= 3
            && lexicon
                .summary_header_words
                .iter()
                .any(|w| lower.contains(w.as_str()));
        if i == 0 && header_like {
            continue;
        }
        if line.split_whitespace().count() < 3 {
            continue;
        }
        kept.push(line);
    }
    kept.join(" ")
}

/// Cuts the text at the first "work" marker word that is followed within 3
/// tokens by a year or a company-suffix token.
fn truncate_at_work_transition(text: &str, lexicon: &ContactLexicon) -> String {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    for (i, token) in tokens.iter().enumerate() {
        let word = token
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        if !lexicon.work_markers.iter().any(|m| *m == word) {
            continue;
        }
        let window = &tokens[i + 1..tokens.len().min(i + 4)];
        let transition = window.iter().any(|t| {
            let bare = t.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase();
            lexicon.year.is_match(t) || lexicon.company_suffixes.iter().any(|s| *s == bare)
        });
        if transition {
            return tokens[..i].join(" ").trim().to_owned();
        }
    }
    text.to_owned()
}

/// Last resort: anchor on a summary-header word anywhere in the raw text and
/// capture until the next canonical section header.
fn raw_summary_scan(text: &str, lexicon: &ContactLexicon) -> String {
    let mut capturing = false;
    let mut captured = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        let lower = line.to_lowercase();

        if !capturing {
            if line.split_whitespace().count() <= 3
                && lexicon
                    .summary_header_words
                    .iter()
                    .any(|w| lower.contains(w.as_str()))
            {
                capturing = true;
            }
            continue;
        }

        if lexicon.stop_header.is_match(line) {
            break;
        }
        if !line.is_empty() {
            captured.push(line);
        }
    }

    filter_summary_lines(&captured.join("\n"), lexicon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::RegexAnnotator;
    use crate::locale::{Locale, LocaleResources};
    use crate::segment::Segmenter;

    fn context<'a>(
        text: &'a str,
        sections: &'a crate::segment::SectionMap,
        resources: &'a LocaleResources,
        annotator: &'a RegexAnnotator,
    ) -> ExtractionContext<'a> {
        ExtractionContext {
            text,
            sections,
            resources,
            annotator,
            locale: Locale::English,
        }
    }

    #[test]
    fn test_name_from_first_lines() {
        let resources = LocaleResources::english().unwrap();
        let annotator = RegexAnnotator::new().unwrap();
        let text = "Jane O'Brien\njane@example.com\nLondon";
        let sections = Segmenter::new(&resources).segment(text);

        let profile = extract_profile(&context(text, &sections, &resources, &annotator));

        assert_eq!(profile.name, "Jane O'Brien");
    }

    #[test]
    fn test_metadata_artifacts_rejected_as_names() {
        let resources = LocaleResources::english().unwrap();
        let lexicon = &resources.contact;

        assert!(!lexicon.is_valid_name("cid:image001"));
        assert!(!lexicon.is_valid_name("12345"));
        assert!(!lexicon.is_valid_name("[Header]"));
        assert!(!lexicon.is_valid_name("deadbeef"));
        assert!(lexicon.is_valid_name("Kovács Péter"));
    }

    #[test]
    fn test_email_phone_url() {
        let resources = LocaleResources::english().unwrap();
        let annotator = RegexAnnotator::new().unwrap();
        let text = "Jane Doe\njane.doe@example.com\n(555) 123-4567\nlinkedin.com/in/janedoe";
        let sections = Segmenter::new(&resources).segment(text);

        let profile = extract_profile(&context(text, &sections, &resources, &annotator));

        assert_eq!(profile.email, "jane.doe@example.com");
        assert_eq!(profile.phone, "(555) 123-4567");
        assert_eq!(profile.url, "linkedin.com/in/janedoe");
    }

    #[test]
    fn test_hungarian_phone_preferred() {
        let resources = LocaleResources::hungarian().unwrap();
        let annotator = RegexAnnotator::new().unwrap();
        let text = "Kovács Péter\n+36 20 123 4567";
        let sections = Segmenter::new(&resources).segment(text);
        let ctx = ExtractionContext {
            text,
            sections: &sections,
            resources: &resources,
            annotator: &annotator,
            locale: Locale::Hungarian,
        };

        let profile = extract_profile(&ctx);

        assert_eq!(profile.phone, "+36 20 123 4567");
    }

    #[test]
    fn test_location_marker_fallback() {
        let resources = LocaleResources::english().unwrap();
        let annotator = RegexAnnotator::new().unwrap();
        let text = "Jane Doe\nAddress: Budapest, Hungary";
        let sections = Segmenter::new(&resources).segment(text);

        let profile = extract_profile(&context(text, &sections, &resources, &annotator));

        assert_eq!(profile.location, "Budapest, Hungary");
    }

    #[test]
    fn test_summary_from_section_filters_contact_lines() {
        let resources = LocaleResources::english().unwrap();
        let annotator = RegexAnnotator::new().unwrap();
        let text = "Summary\njane@example.com\nExperienced engineer building reliable data platforms for a decade.";
        let sections = Segmenter::new(&resources).segment(text);

        let profile = extract_profile(&context(text, &sections, &resources, &annotator));

        assert!(profile.summary.contains("reliable data platforms"));
        assert!(!profile.summary.contains("jane@example.com"));
    }

    #[test]
    fn test_summary_truncated_at_work_transition() {
        let resources = LocaleResources::english().unwrap();
        let lexicon = &resources.contact;

        let text = "Seasoned engineer who loves hard problems. Started work at Acme Corp in 2019 doing backend systems.";
        let truncated = truncate_at_work_transition(text, lexicon);

        assert_eq!(truncated, "Seasoned engineer who loves hard problems. Started");
    }
}
