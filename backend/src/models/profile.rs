//! Homeowner profile as captured by the quote funnel.

use serde::{Deserialize, Serialize};

/// A WGS84 position in decimal degrees.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

/// User data collected earlier in the funnel.
///
/// Only the rooftop coordinates feed the solar lookup. The remaining fields are
/// quote figures computed upstream and are only formatted for display here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub rooftop_latitude: f64,
    pub rooftop_longitude: f64,

    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,

    /// Lead identifier forwarded to the affiliate tracking pixel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_source: Option<String>,

    #[serde(default)]
    pub monthly_payment_min: f64,
    #[serde(default)]
    pub monthly_payment_max: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_payment_best_guess: Option<f64>,

    #[serde(default)]
    pub incentive: f64,
    #[serde(default)]
    pub savings: f64,
    #[serde(default)]
    pub avg_bill: f64,

    #[serde(default)]
    pub co2_tons: f64,
    #[serde(default)]
    pub tree_seedlings: f64,
    #[serde(default)]
    pub gal_of_gas: f64,

    #[serde(default)]
    pub install_size: f64,
    #[serde(default)]
    pub install_size_min: f64,
    #[serde(default)]
    pub install_size_max: f64,
    #[serde(default)]
    pub panels_min: u32,
    #[serde(default)]
    pub panels_max: u32,
}

impl UserProfile {
    /// Profile with only the rooftop position filled in.
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            rooftop_latitude: latitude,
            rooftop_longitude: longitude,
            ..Default::default()
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.rooftop_latitude, self.rooftop_longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_deserializes_with_only_coordinates() {
        let user: UserProfile =
            serde_json::from_str(r#"{"rooftop_latitude": 37.44, "rooftop_longitude": -122.14}"#)
                .unwrap();
        assert_eq!(user.coordinates(), Coordinates::new(37.44, -122.14));
        assert!(user.utm_source.is_none());
        assert!(user.monthly_payment_best_guess.is_none());
        assert_eq!(user.panels_max, 0);
    }

    #[test]
    fn test_profile_requires_coordinates() {
        let result: Result<UserProfile, _> = serde_json::from_str(r#"{"avg_bill": 120.0}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_coordinates_display() {
        let c = Coordinates::new(1.5, -2.25);
        assert_eq!(c.to_string(), "(1.500000, -2.250000)");
    }
}
