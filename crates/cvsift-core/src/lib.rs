pub mod annotate;
pub mod classify;
pub mod dates;
pub mod error;
pub mod extract;
pub mod locale;
pub mod pipeline;
pub mod preprocess;
pub mod record;
pub mod segment;

pub use annotate::{Annotator, EntityLabel, NamedEntity, PosTag, RegexAnnotator, Token};
pub use classify::{classify_block, ClassifierLexicon, ClassifierWeights};
pub use dates::{DateKey, DateLexicon};
pub use error::{Error, Result};
pub use extract::{
    extract_education, extract_experience, extract_languages, extract_profile, extract_skills,
    resolve_current_position, ExtractionContext,
};
pub use locale::{Locale, LocaleResources};
pub use pipeline::CvPipeline;
pub use preprocess::Preprocessor;
pub use record::{
    CvRecord, Document, EducationEntry, ExperienceEntry, LanguageEntry, ProfileRecord,
};
pub use segment::{SectionKind, SectionMap, Segmenter};
