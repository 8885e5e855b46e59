//! Tenant theme configuration.

use serde::{Deserialize, Serialize};

/// APR shown when the tenant does not configure one.
pub const DEFAULT_PRODUCT_APR: f64 = 3.99;

/// Financing term in years shown when the tenant does not configure one.
pub const DEFAULT_PRODUCT_TERM: u32 = 20;

/// Per-tenant branding and feature flags.
///
/// Treated as opaque input: nothing here is validated beyond deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Gates the rooftop lookup entirely.
    #[serde(default)]
    pub is_sunroof_enabled: bool,
    /// Credential forwarded verbatim to the lookup service.
    #[serde(default)]
    pub google_api_gateway_key: String,

    #[serde(default)]
    pub price_system_display: bool,
    #[serde(default)]
    pub is_premier_account: bool,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub disclosure: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_apr: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_term: Option<u32>,
}

impl ThemeConfig {
    /// Whether prices are shown as a min-max range instead of an exact figure.
    pub fn shows_price_range(&self) -> bool {
        self.price_system_display || !self.is_premier_account
    }

    /// Configured APR, or the default when missing or zero.
    pub fn product_apr(&self) -> f64 {
        match self.product_apr {
            Some(apr) if apr != 0.0 => apr,
            _ => DEFAULT_PRODUCT_APR,
        }
    }

    /// Configured term, or the default when missing or zero.
    pub fn product_term(&self) -> u32 {
        match self.product_term {
            Some(term) if term != 0 => term,
            _ => DEFAULT_PRODUCT_TERM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_theme_disables_sunroof() {
        let theme: ThemeConfig = serde_json::from_str("{}").unwrap();
        assert!(!theme.is_sunroof_enabled);
        assert!(theme.google_api_gateway_key.is_empty());
    }

    #[test]
    fn test_price_range_rule() {
        let mut theme = ThemeConfig::default();
        assert!(theme.shows_price_range());

        theme.is_premier_account = true;
        assert!(!theme.shows_price_range());

        theme.price_system_display = true;
        assert!(theme.shows_price_range());
    }

    #[test]
    fn test_financing_defaults() {
        let mut theme = ThemeConfig::default();
        assert_eq!(theme.product_apr(), 3.99);
        assert_eq!(theme.product_term(), 20);

        theme.product_apr = Some(0.0);
        theme.product_term = Some(0);
        assert_eq!(theme.product_apr(), 3.99);
        assert_eq!(theme.product_term(), 20);

        theme.product_apr = Some(2.49);
        theme.product_term = Some(25);
        assert_eq!(theme.product_apr(), 2.49);
        assert_eq!(theme.product_term(), 25);
    }
}
