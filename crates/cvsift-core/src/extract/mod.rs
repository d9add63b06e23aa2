//! Field extractors.
//!
//! Each extractor consumes the segmented blocks (falling back to the raw
//! document when its section is missing) plus the annotator, and produces
//! typed entries. Extractors are stateless functions over the per-locale
//! resource bundle.

pub mod education;
pub mod experience;
pub mod languages;
pub mod position;
pub mod profile;
pub mod skills;

use crate::annotate::Annotator;
use crate::locale::{Locale, LocaleResources};
use crate::segment::SectionMap;

/// Everything an extractor is allowed to look at for one document.
pub struct ExtractionContext<'a> {
    pub text: &'a str,
    pub sections: &'a SectionMap,
    pub resources: &'a LocaleResources,
    pub annotator: &'a dyn Annotator,
    pub locale: Locale,
}

pub use education::extract_education;
pub use experience::extract_experience;
pub use languages::extract_languages;
pub use position::resolve_current_position;
pub use profile::extract_profile;
pub use skills::extract_skills;
