//! Output data model.
//!
//! Field presence is part of the contract: every profile field is always
//! present with the empty string meaning "not found", and the experience and
//! language lists are never empty — consumers get a single all-empty
//! placeholder entry instead of a missing or zero-length array.

use serde::{Deserialize, Serialize};

use crate::locale::Locale;

/// Immutable input to the pipeline: decoded text plus its content language.
#[derive(Debug, Clone)]
pub struct Document {
    pub text: String,
    pub locale: Locale,
}

impl Document {
    #[must_use]
    pub fn new(text: impl Into<String>, locale: Locale) -> Self {
        Self {
            text: text.into(),
            locale,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub url: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub school: String,
    pub degree: String,
    pub gpa: String,
    pub date: String,
    pub descriptions: Vec<String>,
}

impl EducationEntry {
    /// Entries without a school or degree are discarded by the extractor.
    #[must_use]
    pub fn has_identity(&self) -> bool {
        !self.school.is_empty() || !self.degree.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub job_title: String,
    pub date: String,
    pub descriptions: Vec<String>,
}

impl ExperienceEntry {
    #[must_use]
    pub fn has_identity(&self) -> bool {
        !self.company.is_empty() || !self.job_title.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub language: String,
    pub proficiency: String,
}

/// One extraction record per document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CvRecord {
    pub profile: ProfileRecord,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub skills: Vec<String>,
    pub current_position: String,
    pub languages: Vec<LanguageEntry>,
}

impl Default for CvRecord {
    fn default() -> Self {
        Self {
            profile: ProfileRecord::default(),
            education: Vec::new(),
            experience: vec![ExperienceEntry::default()],
            skills: Vec::new(),
            current_position: String::new(),
            languages: vec![LanguageEntry::default()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_keeps_arity() {
        let record = CvRecord::default();

        assert_eq!(record.experience.len(), 1);
        assert_eq!(record.languages.len(), 1);
        assert!(!record.experience[0].has_identity());
    }

    #[test]
    fn test_field_presence_contract() {
        let json = serde_json::to_value(CvRecord::default()).unwrap();

        for key in ["profile", "education", "experience", "skills", "current_position", "languages"] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
        let profile = json.get("profile").unwrap();
        for key in ["name", "email", "phone", "location", "url", "summary"] {
            assert_eq!(profile.get(key).unwrap(), "");
        }
    }
}
