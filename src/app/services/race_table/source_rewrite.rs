//! Mapping of local text paths to published result documents

use crate::constants::SOURCE_DOCUMENT_EXTENSION;
use serde::{Deserialize, Serialize};

/// Replace a local root with a public URL base and point at the PDF
///
/// Sheets are parsed from text files extracted next to the downloaded PDFs;
/// the exported table should reference the published document instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRewrite {
    /// Directory prefix of the local text files
    pub local_root: String,

    /// URL base that replaces `local_root`
    pub url_base: String,
}

impl SourceRewrite {
    pub fn new(local_root: impl Into<String>, url_base: impl Into<String>) -> Self {
        Self {
            local_root: local_root.into(),
            url_base: url_base.into(),
        }
    }

    /// Rewrite one source reference
    ///
    /// Sources outside `local_root` keep their prefix; the `.txt` extension is
    /// swapped either way.
    pub fn apply(&self, source: &str) -> String {
        let rewritten = match source.strip_prefix(self.local_root.as_str()) {
            Some(rest) if !self.local_root.is_empty() => format!("{}{}", self.url_base, rest),
            _ => source.to_string(),
        };

        match rewritten.strip_suffix(".txt") {
            Some(stem) => format!("{}.{}", stem, SOURCE_DOCUMENT_EXTENSION),
            None => rewritten,
        }
    }
}
