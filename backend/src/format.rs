//! Locale-aware number formatting for display strings.

use serde::{Deserialize, Serialize};

/// Locales the results page knows how to group digits for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NumberLocale {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "de-DE")]
    DeDe,
    #[serde(rename = "fr-FR")]
    FrFr,
}

impl NumberLocale {
    /// Resolve a BCP 47 style tag. Unknown tags fall back to `en-US`.
    pub fn from_tag(tag: &str) -> Self {
        let language = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "de" => NumberLocale::DeDe,
            "fr" => NumberLocale::FrFr,
            _ => NumberLocale::EnUs,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            NumberLocale::EnUs => "en-US",
            NumberLocale::DeDe => "de-DE",
            NumberLocale::FrFr => "fr-FR",
        }
    }

    /// Thousands separator.
    pub fn group_separator(&self) -> char {
        match self {
            NumberLocale::EnUs => ',',
            NumberLocale::DeDe => '.',
            NumberLocale::FrFr => '\u{202F}',
        }
    }
}

/// Format an integer with the locale's digit grouping.
pub fn format_number(value: i64, locale: NumberLocale) -> String {
    let digits = value.unsigned_abs().to_string();
    let separator = locale.group_separator();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}

/// Round to the nearest integer, then format.
pub fn format_rounded(value: f64, locale: NumberLocale) -> String {
    format_number(value.round() as i64, locale)
}
