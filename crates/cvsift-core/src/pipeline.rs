//! Extraction orchestrator.
//!
//! Owns the per-locale resource bundles (compiled once), the annotator, and
//! the preprocessor, and runs the full sequence for one document:
//! preprocess, segment, extract each field, resolve the current position.
//! Extraction stages are total functions; a stage that finds nothing yields
//! its empty default and the rest of the record is still produced.

use tracing::debug;

use crate::annotate::{Annotator, RegexAnnotator};
use crate::classify::ClassifierWeights;
use crate::error::Result;
use crate::extract::{
    extract_education, extract_experience, extract_languages, extract_profile, extract_skills,
    resolve_current_position, ExtractionContext,
};
use crate::locale::{Locale, LocaleResources};
use crate::preprocess::Preprocessor;
use crate::record::{CvRecord, Document};
use crate::segment::{SectionMap, Segmenter};

pub struct CvPipeline {
    english: LocaleResources,
    hungarian: LocaleResources,
    weights: ClassifierWeights,
    annotator: Box<dyn Annotator>,
    preprocessor: Preprocessor,
}

impl CvPipeline {
    /// Builds a pipeline with the regex-only annotator. Fails only when a
    /// built-in pattern table does not compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            english: LocaleResources::english()?,
            hungarian: LocaleResources::hungarian()?,
            weights: ClassifierWeights::default(),
            annotator: Box::new(RegexAnnotator::new()?),
            preprocessor: Preprocessor::new()?,
        })
    }

    /// Swaps in a model-backed annotator.
    #[must_use]
    pub fn with_annotator(mut self, annotator: Box<dyn Annotator>) -> Self {
        self.annotator = annotator;
        self
    }

    #[must_use]
    pub fn with_weights(mut self, weights: ClassifierWeights) -> Self {
        self.weights = weights;
        self
    }

    fn resources(&self, locale: Locale) -> &LocaleResources {
        match locale {
            Locale::English => &self.english,
            Locale::Hungarian => &self.hungarian,
        }
    }

    /// Segmentation only, for callers that want the raw section blocks.
    #[must_use]
    pub fn segment(&self, text: &str, locale: Locale) -> SectionMap {
        let normalized = self.preprocessor.normalize_columns(text);
        Segmenter::new(self.resources(locale))
            .with_weights(self.weights)
            .segment(&normalized)
    }

    #[must_use]
    pub fn parse_document(&self, document: &Document) -> CvRecord {
        self.parse(&document.text, document.locale)
    }

    /// One record per document. Never fails: missing or unrecognizable
    /// content degrades field by field to the empty defaults.
    #[must_use]
    pub fn parse(&self, text: &str, locale: Locale) -> CvRecord {
        let resources = self.resources(locale);
        let normalized = self.preprocessor.normalize_columns(text);
        let sections = Segmenter::new(resources)
            .with_weights(self.weights)
            .segment(&normalized);

        let ctx = ExtractionContext {
            text: &normalized,
            sections: &sections,
            resources,
            annotator: self.annotator.as_ref(),
            locale,
        };

        let profile = extract_profile(&ctx);
        let education = extract_education(&ctx);
        let experience = extract_experience(&ctx);
        let skills = extract_skills(&ctx);
        let languages = extract_languages(&ctx);
        let current_position = resolve_current_position(&experience, &resources.dates);

        debug!(
            locale = %locale,
            education = education.len(),
            experience = experience.len(),
            skills = skills.len(),
            languages = languages.len(),
            "extraction finished"
        );

        CvRecord {
            profile,
            education,
            experience,
            skills,
            current_position,
            languages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_keeps_contract() {
        let pipeline = CvPipeline::new().unwrap();

        let record = pipeline.parse("", Locale::English);

        assert_eq!(record.experience.len(), 1);
        assert_eq!(record.languages.len(), 1);
        assert!(record.education.is_empty());
        assert!(record.current_position.is_empty());
    }

    #[test]
    fn test_parse_is_deterministic() {
        let pipeline = CvPipeline::new().unwrap();
        let text = "Jane Doe\nSummary\nEngineer with 6 years of experience.\nSkills\nRust, Go";

        let a = serde_json::to_string(&pipeline.parse(text, Locale::English)).unwrap();
        let b = serde_json::to_string(&pipeline.parse(text, Locale::English)).unwrap();

        assert_eq!(a, b);
    }
}
