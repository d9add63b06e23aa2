//! Technical skill mentions, collapsed to canonical display names.

use std::collections::{BTreeMap, HashMap, HashSet};

use regex::Regex;

use crate::error::{compile, Result};
use crate::segment::SectionKind;

use super::ExtractionContext;

/// The canonical skill inventory. Matching is surface-variant aware
/// ("react", "reactjs", "react.js" all resolve to the same entry), so this
/// list stores only the base spelling and the display form.
const CANONICAL_SKILLS: [(&str, &str); 62] = [
    ("python", "Python"),
    ("java", "Java"),
    ("javascript", "JavaScript"),
    ("c++", "C++"),
    ("c#", "C#"),
    ("ruby", "Ruby"),
    ("php", "PHP"),
    ("swift", "Swift"),
    ("kotlin", "Kotlin"),
    ("go", "Go"),
    ("golang", "Go"),
    ("rust", "Rust"),
    ("typescript", "TypeScript"),
    ("scala", "Scala"),
    ("perl", "Perl"),
    ("html", "HTML"),
    ("css", "CSS"),
    ("react", "React.js"),
    ("angular", "Angular"),
    ("vue", "Vue.js"),
    ("node", "Node.js"),
    ("django", "Django"),
    ("flask", "Flask"),
    ("spring", "Spring"),
    ("asp.net", "ASP.NET"),
    ("jquery", "jQuery"),
    ("bootstrap", "Bootstrap"),
    ("sass", "Sass"),
    ("less", "Less"),
    ("sql", "SQL"),
    ("mysql", "MySQL"),
    ("postgresql", "PostgreSQL"),
    ("postgres", "PostgreSQL"),
    ("mongodb", "MongoDB"),
    ("oracle", "Oracle"),
    ("sqlite", "SQLite"),
    ("redis", "Redis"),
    ("cassandra", "Cassandra"),
    ("elasticsearch", "Elasticsearch"),
    ("dynamodb", "DynamoDB"),
    ("aws", "AWS"),
    ("azure", "Azure"),
    ("gcp", "GCP"),
    ("docker", "Docker"),
    ("kubernetes", "Kubernetes"),
    ("k8s", "Kubernetes"),
    ("jenkins", "Jenkins"),
    ("terraform", "Terraform"),
    ("ansible", "Ansible"),
    ("circleci", "CircleCI"),
    ("gitlab", "GitLab"),
    ("git", "Git"),
    ("jira", "Jira"),
    ("confluence", "Confluence"),
    ("vscode", "VS Code"),
    ("intellij", "IntelliJ"),
    ("eclipse", "Eclipse"),
    ("postman", "Postman"),
    ("webpack", "Webpack"),
    ("npm", "npm"),
    ("yarn", "Yarn"),
    ("graphql", "GraphQL"),
];

/// Generic words that must never surface as skills even when a noun phrase
/// passes the shape heuristics.
const STOPLIST: [&str; 18] = [
    "experience", "team", "work", "project", "development", "software", "tools",
    "skills", "knowledge", "years", "expertise", "technologies", "solutions",
    "tapasztalat", "csapat", "munka", "ismeretek", "készségek",
];

const CONTEXT_WORDS: [&str; 10] = [
    "using", "with", "framework", "library", "stack", "technologies", "tools",
    "platform", "database", "keretrendszer",
];

pub struct SkillLexicon {
    /// Lowercased surface variant → canonical display name.
    variants: HashMap<String, String>,
    stoplist: HashSet<String>,
    context_words: HashSet<String>,
    all_caps: Regex,
    symbol_suffix: Regex,
    versioned: Regex,
    camel_case: Regex,
    compound: Regex,
}

impl SkillLexicon {
    pub fn new() -> Result<Self> {
        let mut variants = HashMap::new();
        for (base, display) in CANONICAL_SKILLS {
            variants.insert(base.to_owned(), display.to_owned());
            variants.insert(format!("{base}js"), display.to_owned());
            variants.insert(format!("{base}.js"), display.to_owned());
        }

        Ok(Self {
            variants,
            stoplist: STOPLIST.iter().map(|s| (*s).to_owned()).collect(),
            context_words: CONTEXT_WORDS.iter().map(|s| (*s).to_owned()).collect(),
            all_caps: compile("skills.all_caps", r"^[A-Z][A-Z0-9]{1,5}$")?,
            symbol_suffix: compile("skills.symbol_suffix", r"^[A-Za-z]+[+#]{1,2}$")?,
            versioned: compile("skills.versioned", r"^[A-Za-z.]+\s?\d+(\.\d+)*$")?,
            camel_case: compile("skills.camel_case", r"^[A-Z][a-z]+[A-Z][A-Za-z]*$")?,
            compound: compile("skills.compound", r"^[A-Za-z]+[-.][A-Za-z][A-Za-z0-9]*$")?,
        })
    }

    /// Resolves a raw token to its canonical display name, if it is a known
    /// skill surface.
    #[must_use]
    pub fn canonical(&self, token: &str) -> Option<&str> {
        self.variants.get(&token.to_lowercase()).map(String::as_str)
    }

    /// Shape-based "looks technical" heuristic for unknown noun phrases.
    fn looks_technical(&self, phrase: &str) -> bool {
        let phrase = phrase.trim();
        if phrase.is_empty() || phrase.split_whitespace().count() > 2 {
            return false;
        }
        self.all_caps.is_match(phrase)
            || self.symbol_suffix.is_match(phrase)
            || self.versioned.is_match(phrase)
            || self.camel_case.is_match(phrase)
            || self.compound.is_match(phrase)
    }

    fn is_stopword(&self, phrase: &str) -> bool {
        self.stoplist.contains(&phrase.to_lowercase())
    }
}

pub fn extract_skills(ctx: &ExtractionContext<'_>) -> Vec<String> {
    let lexicon = &ctx.resources.skills;

    let section_text = ctx.sections.text(SectionKind::Skills);
    let scope: &str = if section_text.is_empty() {
        ctx.text
    } else {
        &section_text
    };

    // Case-insensitive dedup with deterministic (lowercase-sorted) order.
    let mut found: BTreeMap<String, String> = BTreeMap::new();

    for token in tokenize(scope) {
        if let Some(display) = lexicon.canonical(token) {
            found.insert(display.to_lowercase(), display.to_owned());
        }
    }

    for phrase in ctx.annotator.noun_phrases(scope, ctx.locale) {
        let phrase = phrase.trim();
        if phrase.is_empty() || lexicon.is_stopword(phrase) {
            continue;
        }
        if let Some(display) = lexicon.canonical(phrase) {
            found.insert(display.to_lowercase(), display.to_owned());
            continue;
        }
        if lexicon.looks_technical(phrase) || near_context_word(lexicon, scope, phrase) {
            found.insert(phrase.to_lowercase(), phrase.to_owned());
        }
    }

    found.into_values().collect()
}

/// A noun phrase also counts as a skill when the text mentions it next to a
/// technical-context word ("experience with X", "X framework").
fn near_context_word(lexicon: &SkillLexicon, text: &str, phrase: &str) -> bool {
    let lower = text.to_lowercase();
    let phrase_lower = phrase.to_lowercase();
    for line in lower.lines() {
        if !line.contains(&phrase_lower) {
            continue;
        }
        if line
            .split(|c: char| !c.is_alphanumeric())
            .any(|w| lexicon.context_words.contains(w))
        {
            return true;
        }
    }
    false
}

/// Whitespace/punctuation tokenizer that keeps `+`, `#` and interior dots so
/// "c++", "c#" and "react.js" survive as single tokens.
fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| {
        c.is_whitespace() || matches!(c, ',' | ';' | ':' | '(' | ')' | '[' | ']' | '/' | '|')
    })
    .map(|token| {
        token
            .trim_end_matches('.')
            .trim_matches(|c: char| matches!(c, '"' | '\'' | '•' | '-' | '–'))
    })
    .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::RegexAnnotator;
    use crate::locale::{Locale, LocaleResources};
    use crate::segment::Segmenter;

    fn extract(text: &str) -> Vec<String> {
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
        extract_skills(&ctx)
    }

    #[test]
    fn test_variant_collapse() {
        let skills = extract("Skills\nReact, react.js, REACTJS, node and NodeJS");

        assert_eq!(skills, vec!["Node.js", "React.js"]);
    }

    #[test]
    fn test_symbol_tokens_survive() {
        let skills = extract("Skills\nC++, C#, PostgreSQL");

        assert_eq!(skills, vec!["C#", "C++", "PostgreSQL"]);
    }

    #[test]
    fn test_sorted_and_deduplicated() {
        let a = extract("Skills\nRust, Python, Docker");
        let b = extract("Skills\nDocker, Rust, Python, docker, RUST");

        assert_eq!(a, b);
        assert_eq!(a, vec!["Docker", "Python", "Rust"]);
    }

    #[test]
    fn test_whole_document_fallback() {
        let skills = extract("Built services in Go and Rust, deployed with Kubernetes.");

        assert!(skills.contains(&"Go".to_owned()));
        assert!(skills.contains(&"Rust".to_owned()));
        assert!(skills.contains(&"Kubernetes".to_owned()));
    }

    #[test]
    fn test_stoplist_blocks_generic_noun_phrases() {
        let resources = LocaleResources::english().unwrap();
        let lexicon = &resources.skills;

        assert!(lexicon.is_stopword("Experience"));
        assert!(!lexicon.is_stopword("Terraform"));
    }

    #[test]
    fn test_technical_shape_heuristic() {
        let resources = LocaleResources::english().unwrap();
        let lexicon = &resources.skills;

        assert!(lexicon.looks_technical("JVM"));
        assert!(lexicon.looks_technical("F#"));
        assert!(lexicon.looks_technical("PyTorch"));
        assert!(lexicon.looks_technical("scikit-learn"));
        assert!(!lexicon.looks_technical("nice person"));
    }
}
