//! Interface language.
//!
//! The shop is bilingual: Portuguese is the primary language and English is
//! optional for every piece of editable copy.

use serde::{Deserialize, Serialize};

/// Supported interface languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Portuguese (primary, always present).
    #[default]
    Pt,
    /// English (optional translation).
    En,
}

impl Locale {
    /// Parse a language tag leniently.
    ///
    /// Accepts bare codes and region-qualified tags (`en`, `EN`, `en-GB`,
    /// `pt_PT`). Anything unrecognized falls back to Portuguese.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag
            .trim()
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match primary.as_str() {
            "en" => Self::En,
            _ => Self::Pt,
        }
    }

    /// Two-letter language code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pt => "pt",
            Self::En => "en",
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
