//! Section-boundary state machine.
//!
//! Walks the document line by line with two states, `Idle` and
//! `InSection(kind)`, accumulating lines in a buffer that is flushed into the
//! [`SectionMap`] whenever a new header is accepted, a separator line is hit,
//! or input ends. Header detection is deliberately conservative: date ranges
//! and bullet lines are vetoed outright, and fuzzy matches additionally need
//! a capitalized short line carrying a known header word.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use regex::Regex;

use crate::classify::{classify_block, ClassifierWeights};
use crate::error::{compile_all, Result};
use crate::locale::LocaleResources;

/// The closed set of section categories a CV line can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Summary,
    Profile,
    Education,
    Experience,
    Languages,
    Skills,
    Projects,
    Certifications,
    Awards,
    Publications,
    Interests,
    References,
}

impl SectionKind {
    pub const ALL: [Self; 12] = [
        Self::Summary,
        Self::Profile,
        Self::Education,
        Self::Experience,
        Self::Languages,
        Self::Skills,
        Self::Projects,
        Self::Certifications,
        Self::Awards,
        Self::Publications,
        Self::Interests,
        Self::References,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Profile => "profile",
            Self::Education => "education",
            Self::Experience => "experience",
            Self::Languages => "languages",
            Self::Skills => "skills",
            Self::Projects => "projects",
            Self::Certifications => "certifications",
            Self::Awards => "awards",
            Self::Publications => "publications",
            Self::Interests => "interests",
            Self::References => "references",
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered blocks per section kind. Every kind is always present, even when
/// its block list is empty, and exact duplicate blocks are stored once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionMap {
    blocks: BTreeMap<SectionKind, Vec<String>>,
}

impl SectionMap {
    #[must_use]
    pub fn empty() -> Self {
        let mut blocks = BTreeMap::new();
        for kind in SectionKind::ALL {
            blocks.insert(kind, Vec::new());
        }
        Self { blocks }
    }

    pub(crate) fn push(&mut self, kind: SectionKind, block: String) {
        if block.is_empty() {
            return;
        }
        if let Some(list) = self.blocks.get_mut(&kind) {
            if !list.contains(&block) {
                list.push(block);
            }
        }
    }

    /// Blocks filed under `kind`, in document order.
    #[must_use]
    pub fn blocks(&self, kind: SectionKind) -> &[String] {
        self.blocks.get(&kind).map_or(&[], Vec::as_slice)
    }

    /// Concatenation of all blocks for `kind`, newline joined.
    #[must_use]
    pub fn text(&self, kind: SectionKind) -> String {
        self.blocks(kind).join("\n")
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionKind, &[String])> {
        self.blocks.iter().map(|(k, v)| (*k, v.as_slice()))
    }
}

impl Default for SectionMap {
    fn default() -> Self {
        Self::empty()
    }
}

/// Per-locale header recognition tables: exact regex lists per kind, plus a
/// looser keyword vocabulary for lines the regexes miss.
#[derive(Debug)]
pub struct HeaderLexicon {
    patterns: Vec<(SectionKind, Vec<Regex>)>,
    vocabulary: Vec<(SectionKind, Vec<String>)>,
    sentence_starters: Vec<String>,
}

impl HeaderLexicon {
    pub fn new(
        patterns: &[(SectionKind, &[&str])],
        vocabulary: &[(SectionKind, &[&str])],
        sentence_starters: &[&str],
    ) -> Result<Self> {
        let mut compiled = Vec::with_capacity(patterns.len());
        for (kind, list) in patterns {
            compiled.push((*kind, compile_all("segment.header", list)?));
        }
        Ok(Self {
            patterns: compiled,
            vocabulary: vocabulary
                .iter()
                .map(|(kind, words)| (*kind, words.iter().map(|w| (*w).to_lowercase()).collect()))
                .collect(),
            sentence_starters: sentence_starters.iter().map(|w| (*w).to_lowercase()).collect(),
        })
    }

    pub fn english() -> Result<Self> {
        Self::new(
            &[
                (
                    SectionKind::Profile,
                    &[
                        r"(?i)^(about\s*me|profile|personal\s+information|introduction|objective)$",
                        r"(?i)^(personal\s+details|personal\s+profile|contact(\s+details)?)$",
                    ],
                ),
                (
                    SectionKind::Summary,
                    &[r"(?i)^(summary|professional\s+summary|career\s+summary)$"],
                ),
                (
                    SectionKind::Education,
                    &[
                        r"(?i)^(education|academic|qualifications?|studies)$",
                        r"(?i)^(educational\s+background|academic\s+(history|qualifications?))$",
                    ],
                ),
                (
                    SectionKind::Experience,
                    &[
                        r"(?i)^(experience|employment|work|career|professional\s+experience)$",
                        r"(?i)^(work\s+(history|experience)|employment\s+history|professional\s+background)$",
                        r"(?i)^work\s+experience\s*/?\s*projects?$",
                    ],
                ),
                (
                    SectionKind::Languages,
                    &[
                        r"(?i)^(languages?|language\s+skills?)$",
                        r"(?i)^(language\s+proficiency|linguistic\s+skills?)$",
                    ],
                ),
                (
                    SectionKind::Skills,
                    &[
                        r"(?i)^(skills?|technical\s+skills?|competencies|expertise|it\s+knowledge)$",
                        r"(?i)^(technical\s+expertise|core\s+competencies|professional\s+skills)$",
                        r"(?i)^(development\s+tools?|programming\s+knowledge|technical\s+stack)$",
                        r"(?i)^(technologies|tools?(\s+and\s+technologies)?|software|hardware)$",
                    ],
                ),
                (
                    SectionKind::Projects,
                    &[
                        r"(?i)^((personal|academic|key|technical)\s+)?projects?$",
                        r"(?i)^(project\s+experience|(selected|notable)\s+projects?)$",
                    ],
                ),
                (
                    SectionKind::Certifications,
                    &[
                        r"(?i)^(certifications?|certificates?|professional\s+certifications?)$",
                        r"(?i)^(accreditations?|awards?\s+and\s+certifications?)$",
                    ],
                ),
                (
                    SectionKind::Awards,
                    &[
                        r"(?i)^(awards?|honors?|achievements?)$",
                        r"(?i)^(recognitions?|accomplishments?|awards?\s+and\s+achievements?)$",
                    ],
                ),
                (
                    SectionKind::Publications,
                    &[
                        r"(?i)^(publications?|research|papers?|conferences?)$",
                        r"(?i)^(published\s+works?|research\s+papers?|scientific\s+publications?)$",
                    ],
                ),
                (
                    SectionKind::Interests,
                    &[
                        r"(?i)^(interests?|hobbies|activities)$",
                        r"(?i)^(personal\s+interests?|extracurricular|other\s+activities)$",
                    ],
                ),
                (
                    SectionKind::References,
                    &[r"(?i)^((professional\s+)?references?|recommendations?)$"],
                ),
            ],
            &[
                (SectionKind::Summary, &["summary", "objective"]),
                (SectionKind::Profile, &["profile", "about", "introduction", "contact"]),
                (SectionKind::Education, &["education", "academic", "studies", "university"]),
                (SectionKind::Experience, &["experience", "employment", "career"]),
                (SectionKind::Languages, &["language", "linguistic"]),
                (SectionKind::Skills, &["skills", "technologies", "competencies", "expertise"]),
                (SectionKind::Projects, &["projects", "portfolio"]),
                (SectionKind::Certifications, &["certifications", "certificates"]),
                (SectionKind::Awards, &["awards", "honors", "achievements"]),
                (SectionKind::Publications, &["publications", "research", "papers"]),
                (SectionKind::Interests, &["interests", "hobbies"]),
                (SectionKind::References, &["references", "recommendations"]),
            ],
            &["i", "we", "they", "he", "she", "it", "the", "a", "an", "my", "our"],
        )
    }

    pub fn hungarian() -> Result<Self> {
        Self::new(
            &[
                (
                    SectionKind::Profile,
                    &[
                        r"(?i)^(bemutatkozás|profil|személyes\s+(információk|adatok|profil)|bevezetés|célkitűzés)$",
                        r"(?i)^elérhetőség(ek)?$",
                    ],
                ),
                (
                    SectionKind::Summary,
                    &[r"(?i)^(összefoglalás|szakmai\s+összefoglalás|összefoglaló)$"],
                ),
                (
                    SectionKind::Education,
                    &[
                        r"(?i)^(oktatás|tanulmányok|képesítések?|végzettség(ek)?)$",
                        r"(?i)^(oktatási\s+háttér|akadémiai\s+(előzmények|képesítések?))$",
                    ],
                ),
                (
                    SectionKind::Experience,
                    &[
                        r"(?i)^(tapasztalat|munka|karrier|szakmai\s+tapasztalat(ok)?)$",
                        r"(?i)^(munkatörténet|munkatapasztalat(ok)?|szakmai\s+háttér)$",
                        r"(?i)^munkatapasztalat\s*/?\s*projektek?$",
                    ],
                ),
                (
                    SectionKind::Languages,
                    &[
                        r"(?i)^(nyelv(ek)?|nyelvtudás|nyelvi\s+készségek?)$",
                        r"(?i)^(nyelvi\s+szint|nyelvismeret(ek)?)$",
                    ],
                ),
                (
                    SectionKind::Skills,
                    &[
                        r"(?i)^(készségek?|technikai\s+készségek?|kompetenciák|szakértelem|it\s+ismeretek)$",
                        r"(?i)^(alapvető\s+kompetenciák|szakmai\s+készségek|technikai\s+ismeretek)$",
                        r"(?i)^(fejlesztési\s+eszközök?|programozási\s+ismeretek)$",
                        r"(?i)^(technológiák|eszközök?(\s+és\s+technológiák)?|szoftver|hardver)$",
                    ],
                ),
                (
                    SectionKind::Projects,
                    &[
                        r"(?i)^((személyes|akadémiai|technikai)\s+)?projektek?$",
                        r"(?i)^(projekt\s+tapasztalat|(kiválasztott|jelentős)\s+projektek?)$",
                    ],
                ),
                (
                    SectionKind::Certifications,
                    &[
                        r"(?i)^(tanúsítványok?|bizonyítványok?|szakmai\s+tanúsítványok?)$",
                        r"(?i)^(akkreditációk?|díjak?\s+és\s+tanúsítványok?)$",
                    ],
                ),
                (
                    SectionKind::Awards,
                    &[
                        r"(?i)^(díjak?|kitüntetések?|eredmények?)$",
                        r"(?i)^(elismerések?|teljesítmények?|díjak?\s+és\s+eredmények?)$",
                    ],
                ),
                (
                    SectionKind::Publications,
                    &[
                        r"(?i)^(publikációk?|kutatás(ok)?|konferenciák?)$",
                        r"(?i)^(publikált\s+munkák?|kutatási\s+tanulmányok?|tudományos\s+publikációk?)$",
                    ],
                ),
                (
                    SectionKind::Interests,
                    &[
                        r"(?i)^(érdeklődési\s+körök?|hobbik?|tevékenységek?)$",
                        r"(?i)^(személyes\s+érdeklődés|egyéb\s+tevékenységek)$",
                    ],
                ),
                (
                    SectionKind::References,
                    &[r"(?i)^((szakmai\s+)?referenciák?|ajánlások?)$"],
                ),
            ],
            &[
                (SectionKind::Summary, &["összefoglalás", "összefoglaló", "célkitűzés"]),
                (SectionKind::Profile, &["profil", "bemutatkozás", "elérhetőség"]),
                (SectionKind::Education, &["oktatás", "tanulmányok", "végzettség", "egyetem"]),
                (SectionKind::Experience, &["tapasztalat", "munkahely", "karrier"]),
                (SectionKind::Languages, &["nyelv", "nyelvtudás"]),
                (SectionKind::Skills, &["készségek", "technológiák", "kompetenciák", "szakértelem"]),
                (SectionKind::Projects, &["projektek", "portfólió"]),
                (SectionKind::Certifications, &["tanúsítványok", "bizonyítványok"]),
                (SectionKind::Awards, &["díjak", "kitüntetések", "eredmények"]),
                (SectionKind::Publications, &["publikációk", "kutatás"]),
                (SectionKind::Interests, &["érdeklődési", "hobbi"]),
                (SectionKind::References, &["referenciák", "ajánlások"]),
            ],
            &["én", "mi", "ők", "ő", "az", "egy", "és", "de", "hogy"],
        )
    }

    fn exact_match(&self, line: &str) -> Option<SectionKind> {
        for (kind, patterns) in &self.patterns {
            if patterns.iter().any(|p| p.is_match(line)) {
                return Some(*kind);
            }
        }
        None
    }

    fn vocabulary_match(&self, line: &str) -> Option<SectionKind> {
        let lower = line.to_lowercase();
        for (kind, words) in &self.vocabulary {
            if words.iter().any(|w| lower.contains(w.as_str())) {
                return Some(*kind);
            }
        }
        None
    }

    fn is_sentence_starter(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        self.sentence_starters.iter().any(|w| *w == lower)
    }
}

const BULLET_GLYPHS: [char; 8] = ['•', '-', '○', '●', '*', '→', '▪', '‣'];

/// Content-shape patterns used to veto header candidates and to detect
/// separator lines inside a section.
#[derive(Debug)]
pub struct SegmenterPatterns {
    date_vetoes: Vec<Regex>,
}

impl SegmenterPatterns {
    pub fn new() -> Result<Self> {
        Ok(Self {
            date_vetoes: compile_all(
                "segment.date_veto",
                &[
                    r"(?i)(19|20)\d{2}\s*[-–—]\s*((19|20)\d{2}|present|current|jelenleg|jelenlegi)",
                    r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec|már|ápr|máj|jún|júl|szept?|okt)[a-záéíóöőúüű]*\.?\s*\d{4}",
                    r"\d{1,2}[/.]\d{4}",
                    r"\d{1,2}[/.]\d{1,2}[/.]\d{2,4}",
                ],
            )?,
        })
    }

    fn is_date_like(&self, line: &str) -> bool {
        self.date_vetoes.iter().any(|p| p.is_match(line))
    }
}

/// Vocabulary for the language-block filter that rescues language lines
/// misfiled under another section.
#[derive(Debug)]
pub struct LanguageBlockLexicon {
    section_indicators: Vec<Regex>,
    language_names: Vec<Regex>,
    proficiency_terms: Vec<Regex>,
    pair_shape: Regex,
}

impl LanguageBlockLexicon {
    pub fn new(
        section_indicators: &[&str],
        language_names: &[&str],
        proficiency_terms: &[&str],
    ) -> Result<Self> {
        Ok(Self {
            section_indicators: compile_all("segment.language_indicator", section_indicators)?,
            language_names: compile_all("segment.language_name", language_names)?,
            proficiency_terms: compile_all("segment.proficiency", proficiency_terms)?,
            pair_shape: crate::error::compile(
                "segment.language_pair",
                r"(?i)^\p{L}[\p{L}]*\s*[-–—:|(]\s*\p{L}.*$",
            )?,
        })
    }

    pub fn english() -> Result<Self> {
        Self::new(
            &[
                r"(?i)^languages?(\s+skills?|\s+proficiency|\s+knowledge)?:?\s*$",
                r"(?i)^language\s+(skills?|proficiency|knowledge)\s*:?\s*$",
                r"(?i)\blanguages?\b",
                LANGUAGE_NAME_PATTERN,
                r"(?i)\b(native|fluent|advanced|intermediate|basic)\b",
                r"(?i)\b[ABC][12]\b",
            ],
            &[LANGUAGE_NAME_PATTERN],
            &[
                r"(?i)\b(native|fluent|advanced|intermediate|basic|beginner|elementary|proficient|conversational)\b",
                r"(?i)(mother\s*tongue|business\s*level|working\s*knowledge|professional\s*working)",
                r"(?i)\b([abc][12])\b",
            ],
        )
    }

    pub fn hungarian() -> Result<Self> {
        Self::new(
            &[
                r"(?i)^nyelv(ek)?(\s+készségek?|\s+ismeretek|\s+szint)?:?\s*$",
                r"(?i)^nyelvtudás:?\s*$",
                r"(?i)\bnyelv(ek|tudás|ismeret)?\b",
                LANGUAGE_NAME_PATTERN,
                r"(?i)\b(anyanyelv|folyékony|haladó|középszint|alapszint)\b",
                r"(?i)\b[ABC][12]\b",
            ],
            &[LANGUAGE_NAME_PATTERN],
            &[
                r"(?i)\b(anyanyelv\w*|folyékony\w*|haladó|középszint\w*|alapszint\w*|kezdő|tárgyalóképes)\b",
                r"(?i)(anyanyelvi\s*szint|üzleti\s*szint|munkavégzés\s*szintje|társalgási\s*szint)",
                r"(?i)\b([abc][12])\b",
            ],
        )
    }

    fn has_language_name(&self, line: &str) -> bool {
        self.language_names.iter().any(|p| p.is_match(line))
    }

    fn has_proficiency(&self, line: &str) -> bool {
        self.proficiency_terms.iter().any(|p| p.is_match(line))
    }

    fn has_indicator(&self, text: &str) -> bool {
        text.lines()
            .any(|line| self.section_indicators.iter().any(|p| p.is_match(line.trim())))
    }
}

/// Language-name alternation shared by both locale lexicons: surfaces in
/// either content language count in either document.
const LANGUAGE_NAME_PATTERN: &str = r"(?i)\b(english|german|french|spanish|hungarian|chinese|japanese|korean|arabic|russian|italian|portuguese|dutch|polish|czech|slovak|romanian|bulgarian|croatian|serbian|slovenian|ukrainian|greek|hebrew|swedish|norwegian|danish|finnish|turkish|hindi|thai|vietnamese|indonesian|magyar|angol|német|francia|spanyol|olasz|orosz|kínai|japán|lengyel|cseh|szlovák|román|ukrán|görög|svéd|norvég|dán|finn|török|holland|portugál|arab|héber|koreai)\b";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    InSection(SectionKind),
}

/// The segmenter proper. Stateless between calls; all tables are borrowed
/// from the per-locale resource bundle.
pub struct Segmenter<'a> {
    resources: &'a LocaleResources,
    weights: ClassifierWeights,
}

impl<'a> Segmenter<'a> {
    #[must_use]
    pub fn new(resources: &'a LocaleResources) -> Self {
        Self {
            resources,
            weights: ClassifierWeights::default(),
        }
    }

    #[must_use]
    pub fn with_weights(mut self, weights: ClassifierWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Partitions `text` into per-kind blocks. Infallible: empty or
    /// unrecognizable input yields a map whose lists are all empty.
    #[must_use]
    pub fn segment(&self, text: &str) -> SectionMap {
        let mut map = SectionMap::empty();
        let lines: Vec<&str> = text.lines().collect();

        let mut state = State::Idle;
        let mut buffer: Vec<String> = Vec::new();

        for (i, raw) in lines.iter().enumerate() {
            let line = raw.trim();

            if line.is_empty() {
                // A single blank inside a section is soft; two in a row end
                // the current block.
                let next_blank = lines
                    .get(i + 1)
                    .is_some_and(|next| next.trim().is_empty());
                if next_blank {
                    if let State::InSection(kind) = state {
                        self.flush(&mut map, kind, &mut buffer);
                    }
                }
                continue;
            }

            if let Some(header_kind) = self.identify_header(line) {
                if let State::InSection(kind) = state {
                    self.flush(&mut map, kind, &mut buffer);
                }
                buffer.clear();
                let kind = match header_kind {
                    SectionKind::Summary | SectionKind::Profile => {
                        self.lookahead_kind(&lines[i + 1..], header_kind)
                    }
                    other => other,
                };
                state = State::InSection(kind);
                buffer.push(line.to_owned());
                continue;
            }

            match state {
                State::Idle => {
                    // Leading content has no header; summary-vs-profile
                    // scoring decides where it goes.
                    let kind = classify_block(
                        line,
                        &self.resources.classifier,
                        &self.resources.experience_indicators,
                        &self.weights,
                        None,
                    );
                    state = State::InSection(kind);
                    buffer.push(line.to_owned());
                }
                State::InSection(kind) => {
                    if self.is_separator(line) {
                        self.flush(&mut map, kind, &mut buffer);
                    }
                    buffer.push(line.to_owned());
                }
            }
        }

        if let State::InSection(kind) = state {
            self.flush(&mut map, kind, &mut buffer);
        }

        map
    }

    /// Header acceptance: veto first, then exact regex lists, then the fuzzy
    /// shape-plus-vocabulary gate.
    fn identify_header(&self, line: &str) -> Option<SectionKind> {
        if self.resources.segmenter.is_date_like(line) {
            return None;
        }
        if line.starts_with(BULLET_GLYPHS) {
            return None;
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() || words.len() > 5 {
            return None;
        }

        if let Some(kind) = self.resources.headers.exact_match(line) {
            return Some(kind);
        }

        let all_caps_short = words.len() <= 4
            && line.chars().any(char::is_alphabetic)
            && !line.chars().any(char::is_lowercase)
            && !line.chars().any(|c| c.is_ascii_digit());
        let capitalized_start = words[0]
            .chars()
            .next()
            .is_some_and(char::is_uppercase)
            && !self.resources.headers.is_sentence_starter(words[0]);

        if all_caps_short || capitalized_start {
            return self.resources.headers.vocabulary_match(line);
        }

        None
    }

    /// Summary and profile headers are interchangeable in the wild; peek at
    /// the next few content lines and let the classifier pick the kind.
    fn lookahead_kind(&self, rest: &[&str], header_kind: SectionKind) -> SectionKind {
        let mut preview: Vec<&str> = Vec::new();
        for raw in rest {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if self.identify_header(line).is_some() {
                break;
            }
            preview.push(line);
            if preview.len() == 3 {
                break;
            }
        }

        if preview.is_empty() {
            return header_kind;
        }
        classify_block(
            &preview.join("\n"),
            &self.resources.classifier,
            &self.resources.experience_indicators,
            &self.weights,
            None,
        )
    }

    fn is_separator(&self, line: &str) -> bool {
        if self.resources.segmenter.is_date_like(line) {
            return true;
        }
        if line.starts_with(BULLET_GLYPHS) {
            return true;
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        words.len() <= 4
            && line.chars().any(char::is_alphabetic)
            && !line.chars().any(char::is_lowercase)
            && !line.chars().any(|c| c.is_ascii_digit())
    }

    /// Buffer flush: per-line whitespace cleanup (line boundaries survive),
    /// then the language-block filter unless the block already belongs to
    /// the languages section.
    fn flush(&self, map: &mut SectionMap, kind: SectionKind, buffer: &mut Vec<String>) {
        if buffer.is_empty() {
            return;
        }
        let cleaned: Vec<String> = buffer
            .drain(..)
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|line| !line.is_empty())
            .collect();
        if cleaned.is_empty() {
            return;
        }

        if kind == SectionKind::Languages {
            map.push(kind, cleaned.join("\n"));
            return;
        }

        let (language_lines, rest) = self.split_language_lines(&cleaned);
        if !language_lines.is_empty() {
            map.push(SectionKind::Languages, language_lines.join("\n"));
        }
        if !rest.is_empty() {
            map.push(kind, rest.join("\n"));
        }
    }

    /// All five conditions are conjunctive; the filter prefers leaving a
    /// language line behind over stealing ordinary content.
    fn split_language_lines(&self, lines: &[String]) -> (Vec<String>, Vec<String>) {
        let lexicon = &self.resources.language_filter;
        let block_text = lines.join("\n");
        if !lexicon.has_indicator(&block_text) {
            return (Vec::new(), lines.to_vec());
        }

        let mut language_lines = Vec::new();
        let mut rest = Vec::new();
        for line in lines {
            if self.is_language_line(line) {
                language_lines.push(line.clone());
            } else {
                rest.push(line.clone());
            }
        }

        if language_lines.is_empty() {
            return (Vec::new(), lines.to_vec());
        }
        (language_lines, rest)
    }

    fn is_language_line(&self, line: &str) -> bool {
        let lexicon = &self.resources.language_filter;
        lexicon.has_language_name(line)
            && lexicon.has_proficiency(line)
            && line.split_whitespace().count() <= 12
            && !self
                .resources
                .experience_indicators
                .iter()
                .any(|p| p.is_match(line))
            && !self.has_tech_keyword(line)
            && lexicon.pair_shape.is_match(line)
    }

    fn has_tech_keyword(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        lower
            .split(|c: char| !c.is_alphanumeric() && c != '+' && c != '#')
            .any(|word| self.resources.tech_keywords.contains(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::LocaleResources;

    fn resources() -> LocaleResources {
        LocaleResources::english().unwrap()
    }

    const SAMPLE: &str = "\
Jane Doe
jane.doe@example.com

Summary
Software engineer with 8 years of experience specialized in distributed systems.

Work Experience
Jan 2020 - Present
Acme Corp
Senior Engineer
• Built the data platform

Education
BSc in Computer Science, State University
2012 - 2015

Skills
Rust, Python, PostgreSQL

Languages
English - Fluent
German - Intermediate";

    #[test]
    fn test_all_twelve_keys_always_present() {
        let res = resources();
        let segmenter = Segmenter::new(&res);

        for input in ["", SAMPLE, "just one line"] {
            let map = segmenter.segment(input);
            assert_eq!(map.iter().count(), 12);
        }
    }

    #[test]
    fn test_sample_lands_in_expected_sections() {
        let res = resources();
        let map = Segmenter::new(&res).segment(SAMPLE);

        assert!(map.text(SectionKind::Experience).contains("Acme Corp"));
        assert!(map.text(SectionKind::Education).contains("State University"));
        assert!(map.text(SectionKind::Skills).contains("Rust"));
        assert!(map.text(SectionKind::Languages).contains("English - Fluent"));
        assert!(map.text(SectionKind::Summary).contains("8 years of experience"));
    }

    #[test]
    fn test_idempotent() {
        let res = resources();
        let segmenter = Segmenter::new(&res);
        assert_eq!(segmenter.segment(SAMPLE), segmenter.segment(SAMPLE));
    }

    #[test]
    fn test_date_range_is_never_a_header() {
        let res = resources();
        let segmenter = Segmenter::new(&res);
        assert!(segmenter.identify_header("2019 - 2021 Work").is_none());
        assert!(segmenter.identify_header("Jan 2020 Work").is_none());
    }

    #[test]
    fn test_bullet_is_never_a_header() {
        let res = resources();
        let segmenter = Segmenter::new(&res);
        assert!(segmenter.identify_header("• Experience with teams").is_none());
    }

    #[test]
    fn test_fuzzy_all_caps_header() {
        let res = resources();
        let segmenter = Segmenter::new(&res);
        assert_eq!(
            segmenter.identify_header("WORK EXPERIENCE"),
            Some(SectionKind::Experience)
        );
    }

    #[test]
    fn test_sentence_starter_not_a_header() {
        let res = resources();
        let segmenter = Segmenter::new(&res);
        assert!(segmenter.identify_header("I love languages").is_none());
    }

    #[test]
    fn test_work_block_never_reclassified_as_languages() {
        let res = resources();
        let map = Segmenter::new(&res).segment(
            "Work Experience\nImproved the English localization pipeline by 40%\nEnglish - Fluent",
        );

        let experience = map.text(SectionKind::Experience);
        assert!(experience.contains("Improved the English localization pipeline by 40%"));
        // The genuine language line is rescued, the work line is not.
        assert!(map.text(SectionKind::Languages).contains("English - Fluent"));
    }

    #[test]
    fn test_round_trip_preserves_lines() {
        use std::collections::BTreeSet;

        let res = resources();
        let map = Segmenter::new(&res).segment(SAMPLE);

        let normalize =
            |line: &str| line.split_whitespace().collect::<Vec<_>>().join(" ");
        let input_lines: BTreeSet<String> = SAMPLE
            .lines()
            .map(normalize)
            .filter(|l| !l.is_empty())
            .collect();
        let output_lines: BTreeSet<String> = map
            .iter()
            .flat_map(|(_, blocks)| blocks.iter())
            .flat_map(|block| block.lines())
            .map(normalize)
            .filter(|l| !l.is_empty())
            .collect();

        assert_eq!(input_lines, output_lines);
    }

    #[test]
    fn test_duplicate_blocks_stored_once() {
        let mut map = SectionMap::empty();
        map.push(SectionKind::Skills, "Rust".to_owned());
        map.push(SectionKind::Skills, "Rust".to_owned());
        assert_eq!(map.blocks(SectionKind::Skills).len(), 1);
    }
}
