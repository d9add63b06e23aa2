//! Multi-column layout normalization.
//!
//! PDF text extraction flattens two-column résumés into lines where the
//! columns sit side by side separated by wide whitespace gutters. Splitting
//! on those gutters before segmentation turns the text back into a single
//! logical column, in original reading order.

use regex::Regex;

use crate::error::{compile, Result};

pub struct Preprocessor {
    column_gap: Regex,
}

impl Preprocessor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            column_gap: compile("preprocess.column_gap", r" {3,}|\t+")?,
        })
    }

    /// Splits every line on runs of three or more spaces (or any tab run)
    /// and emits each non-empty fragment as its own line. Blank lines pass
    /// through unchanged.
    #[must_use]
    pub fn normalize_columns(&self, text: &str) -> String {
        let mut out = Vec::new();

        for line in text.lines() {
            if line.trim().is_empty() {
                out.push(String::new());
                continue;
            }

            if self.column_gap.is_match(line) {
                for fragment in self.column_gap.split(line) {
                    let fragment = fragment.trim();
                    if !fragment.is_empty() {
                        out.push(fragment.to_owned());
                    }
                }
            } else {
                out.push(line.to_owned());
            }
        }

        out.join("\n")
    }
}
