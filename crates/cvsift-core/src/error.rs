use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid pattern `{name}`: {source}")]
    Pattern {
        name: &'static str,
        source: regex::Error,
    },

    #[error("unknown locale tag: {0}")]
    UnknownLocale(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Compiles a pattern, tagging failures with the table entry that broke.
pub(crate) fn compile(name: &'static str, pattern: &str) -> Result<regex::Regex> {
    regex::Regex::new(pattern).map_err(|source| Error::Pattern { name, source })
}

/// Compiles an ordered pattern list; order is precedence (first match wins).
pub(crate) fn compile_all(name: &'static str, patterns: &[&str]) -> Result<Vec<regex::Regex>> {
    patterns.iter().map(|p| compile(name, p)).collect()
}
