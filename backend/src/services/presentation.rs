//! Display values for the proposal results page.
//!
//! Everything here is a pure function of the user profile, the theme and an
//! already computed [`ProposalViewState`].

use serde::{Deserialize, Serialize};

use crate::api::{ProposalSnapshot, ProposalViewState};
use crate::format::{format_rounded, NumberLocale};
use crate::models::{ThemeConfig, UserProfile};

/// Annual utility rate increase assumed by the savings chart.
pub const UTILITY_RATE_INFLATION: f64 = 0.03;

/// Tenant that gets the affiliate conversion pixel.
pub const TRACKED_COMPANY: &str = "The Pro Companies";

const TRACKING_PIXEL_BASE: &str = "https://track.clickbooth.com/l/con?cbiframe=1&oid=67899&cbtid=";

pub const DISCLAIMER: &str = "While every effort has been taken to ensure that the calculations are as accurate as possible, the information provided by the calculator trades some accuracy for its simplicity and ease of use. The information is general in nature and is not intended to be a substitute for legal, financial, or electrical engineering advice. Please use the figures provided by the calculator as ballpark figure ONLY. For more accurate financial savings estimates, please reach out to us directly to have a system customized to the roof of your home.";

pub const SYSTEM_SIZE_FOOTNOTE: &str = "**Based on estimated system size, actual amount may vary.";

/// Whether the rooftop tile and its metrics are shown.
///
/// A zero coordinate means the lookup did not report a centre.
pub fn should_show_rooftop(state: &ProposalViewState) -> bool {
    match state {
        ProposalViewState::Ready {
            square_feet,
            sunshine_hours,
            center_lat,
            center_lng,
        } => {
            *center_lat != 0.0
                && *center_lng != 0.0
                && (!square_feet.is_empty() || !sunshine_hours.is_empty())
        }
        _ => false,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Introduction {
    pub city: String,
    pub state: String,
    pub avg_bill: String,
}

pub fn introduction(user: &UserProfile, locale: NumberLocale) -> Introduction {
    Introduction {
        city: user.city.clone(),
        state: user.state.clone(),
        avg_bill: format_rounded(user.avg_bill, locale),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPayment {
    /// e.g. `$120-145*` or `$132*`
    pub text: String,
    /// True when a single best-guess figure is shown.
    pub exact: bool,
}

pub fn monthly_payment(user: &UserProfile, theme: &ThemeConfig, locale: NumberLocale) -> MonthlyPayment {
    let best_guess = user.monthly_payment_best_guess.filter(|v| *v != 0.0);
    match best_guess {
        Some(best) if !theme.shows_price_range() => MonthlyPayment {
            text: format!("${}*", format_rounded(best, locale)),
            exact: true,
        },
        _ => MonthlyPayment {
            text: format!(
                "${}-{}*",
                format_rounded(user.monthly_payment_min, locale),
                format_rounded(user.monthly_payment_max, locale)
            ),
            exact: false,
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingTerms {
    pub apr: f64,
    pub term_years: u32,
    pub text: String,
}

pub fn financing_terms(theme: &ThemeConfig) -> FinancingTerms {
    let apr = theme.product_apr();
    let term_years = theme.product_term();
    FinancingTerms {
        apr,
        term_years,
        text: format!(
            "*{}% APR financing for {} years on approved credit with zero down.",
            apr, term_years
        ),
    }
}

/// Utility bill today and after 10 and 25 years of rate increases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsProjection {
    pub current_bill: f64,
    pub year_10: String,
    pub year_25: String,
}

pub fn savings_projection(avg_bill: f64, locale: NumberLocale) -> SavingsProjection {
    let growth = 1.0 + UTILITY_RATE_INFLATION;
    SavingsProjection {
        current_bill: avg_bill,
        year_10: format_rounded(avg_bill * growth.powi(10), locale),
        year_25: format_rounded(avg_bill * growth.powi(25), locale),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSize {
    /// Kilowatts, either `min-max` or a single figure.
    pub kilowatts: String,
    pub exact: bool,
    pub panels: String,
}

pub fn system_size(user: &UserProfile, theme: &ThemeConfig) -> SystemSize {
    let (kilowatts, exact) = if theme.shows_price_range() {
        (
            format!("{}-{}", user.install_size_min, user.install_size_max),
            false,
        )
    } else {
        (user.install_size.to_string(), true)
    };
    SystemSize {
        kilowatts,
        exact,
        panels: format!("{}-{} Panels", user.panels_min, user.panels_max),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalImpact {
    pub co2_tons: f64,
    pub tree_seedlings: f64,
    pub gal_of_gas: f64,
}

pub fn environmental_impact(user: &UserProfile) -> EnvironmentalImpact {
    EnvironmentalImpact {
        co2_tons: user.co2_tons,
        tree_seedlings: user.tree_seedlings,
        gal_of_gas: user.gal_of_gas,
    }
}

/// Conversion pixel URL for tenants that report leads to the affiliate network.
pub fn tracking_pixel_url(theme: &ThemeConfig, user: &UserProfile) -> Option<String> {
    if theme.company_name != TRACKED_COMPANY {
        return None;
    }
    Some(format!(
        "{}{}",
        TRACKING_PIXEL_BASE,
        user.utm_source.as_deref().unwrap_or_default()
    ))
}

/// Footer text, shown once loading is over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disclaimer {
    pub text: String,
    pub disclosure: String,
    pub footnote: String,
}

/// Everything the results page renders, in display-ready form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalSummary {
    pub rooftop: ProposalSnapshot,
    pub show_rooftop: bool,
    pub introduction: Introduction,
    pub monthly_payment: MonthlyPayment,
    pub financing: FinancingTerms,
    pub incentive: String,
    pub savings: String,
    pub savings_projection: SavingsProjection,
    pub environmental_impact: EnvironmentalImpact,
    pub system_size: SystemSize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disclaimer: Option<Disclaimer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_pixel_url: Option<String>,
}

impl ProposalSummary {
    pub fn build(
        user: &UserProfile,
        theme: &ThemeConfig,
        state: &ProposalViewState,
        locale: NumberLocale,
    ) -> Self {
        let disclaimer = state.is_terminal().then(|| Disclaimer {
            text: DISCLAIMER.to_string(),
            disclosure: theme.disclosure.clone(),
            footnote: SYSTEM_SIZE_FOOTNOTE.to_string(),
        });

        Self {
            rooftop: state.snapshot(),
            show_rooftop: should_show_rooftop(state),
            introduction: introduction(user, locale),
            monthly_payment: monthly_payment(user, theme, locale),
            financing: financing_terms(theme),
            incentive: format_rounded(user.incentive, locale),
            savings: format_rounded(user.savings, locale),
            savings_projection: savings_projection(user.avg_bill, locale),
            environmental_impact: environmental_impact(user),
            system_size: system_size(user, theme),
            disclaimer,
            tracking_pixel_url: tracking_pixel_url(theme, user),
        }
    }
}
