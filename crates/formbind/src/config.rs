//! Form Configuration

use serde::{Deserialize, Serialize};

/// Form configuration options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// `lang` attribute of the document shell wrapped around templates
    pub lang: String,

    /// Reject templates with fatal markup diagnostics
    pub strict: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            strict: true,
        }
    }
}
