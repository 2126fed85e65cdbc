//! Report data sources and their report-specific options
//!
//! Each data source maps to a distinct pair of SQL templates (`count` and
//! `data`) resolved through the template registry. The set is fixed:
//! adding a report type means adding a variant here plus its template files.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named report type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Keyword-level lab data
    KeywordLab,
    /// Keyword performance (supports extra filter options)
    KeywordPerformance,
    /// Product tracking
    ProductTracking,
}

impl DataSource {
    /// All registered data sources
    pub const ALL: [DataSource; 3] = [
        DataSource::KeywordLab,
        DataSource::KeywordPerformance,
        DataSource::ProductTracking,
    ];

    /// Short key used for template file names, query params, and filenames
    pub fn key(&self) -> &'static str {
        match self {
            DataSource::KeywordLab => "kwl",
            DataSource::KeywordPerformance => "kw_pfm",
            DataSource::ProductTracking => "pt",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            DataSource::KeywordLab => "Keyword Lab",
            DataSource::KeywordPerformance => "Keyword Performance",
            DataSource::ProductTracking => "Product Tracking",
        }
    }

    /// Whether this source accepts the keyword-performance filter options
    pub fn supports_extra_options(&self) -> bool {
        matches!(self, DataSource::KeywordPerformance)
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for DataSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "kwl" => Ok(DataSource::KeywordLab),
            "kw_pfm" => Ok(DataSource::KeywordPerformance),
            "pt" => Ok(DataSource::ProductTracking),
            other => Err(format!(
                "Unknown data source: {other}. Must be one of: kwl, kw_pfm, pt"
            )),
        }
    }
}

/// Device filter for the keyword-performance report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Mobile,
    Desktop,
    #[default]
    All,
}

impl DeviceType {
    /// Value bound into the query parameters
    pub fn as_param(&self) -> &'static str {
        match self {
            DeviceType::Mobile => "Mobile",
            DeviceType::Desktop => "Desktop",
            DeviceType::All => "All",
        }
    }
}

impl FromStr for DeviceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mobile" => Ok(DeviceType::Mobile),
            "desktop" => Ok(DeviceType::Desktop),
            "all" => Ok(DeviceType::All),
            other => Err(format!(
                "Unknown device type: {other}. Must be one of: mobile, desktop, all"
            )),
        }
    }
}

/// Display filter for the keyword-performance report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayType {
    Paid,
    Organic,
    Top,
    #[default]
    All,
}

impl DisplayType {
    /// Value bound into the query parameters
    pub fn as_param(&self) -> &'static str {
        match self {
            DisplayType::Paid => "Paid",
            DisplayType::Organic => "Organic",
            DisplayType::Top => "Top",
            DisplayType::All => "All",
        }
    }
}

impl FromStr for DisplayType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "paid" => Ok(DisplayType::Paid),
            "organic" => Ok(DisplayType::Organic),
            "top" => Ok(DisplayType::Top),
            "all" => Ok(DisplayType::All),
            other => Err(format!(
                "Unknown display type: {other}. Must be one of: paid, organic, top, all"
            )),
        }
    }
}

/// Product position filter for the keyword-performance report
///
/// Constrained to a fixed set of placements rather than a free-form
/// position number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductPosition {
    #[default]
    All,
    Top,
    Other,
}

impl ProductPosition {
    /// Value bound into the query parameters
    pub fn as_param(&self) -> &'static str {
        match self {
            ProductPosition::All => "All",
            ProductPosition::Top => "Top",
            ProductPosition::Other => "Other",
        }
    }
}

impl FromStr for ProductPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(ProductPosition::All),
            "top" => Ok(ProductPosition::Top),
            "other" => Ok(ProductPosition::Other),
            other => Err(format!(
                "Unknown product position: {other}. Must be one of: all, top, other"
            )),
        }
    }
}

/// Report-specific filter options
///
/// Only populated for data sources that support them (currently just
/// keyword-performance); everything else carries the defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraOptions {
    #[serde(default)]
    pub device_type: DeviceType,
    #[serde(default)]
    pub display_type: DisplayType,
    #[serde(default)]
    pub product_position: ProductPosition,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_source_keys_round_trip() {
        for source in DataSource::ALL {
            assert_eq!(DataSource::from_str(source.key()).unwrap(), source);
        }
    }

    #[test]
    fn test_unknown_data_source_rejected() {
        let err = DataSource::from_str("clickstream").unwrap_err();
        assert!(err.contains("Unknown data source"));
    }

    #[test]
    fn test_extra_options_support() {
        assert!(DataSource::KeywordPerformance.supports_extra_options());
        assert!(!DataSource::KeywordLab.supports_extra_options());
        assert!(!DataSource::ProductTracking.supports_extra_options());
    }

    #[test]
    fn test_option_parsing() {
        assert_eq!(DeviceType::from_str("Mobile").unwrap(), DeviceType::Mobile);
        assert_eq!(DisplayType::from_str("paid").unwrap(), DisplayType::Paid);
        assert_eq!(
            ProductPosition::from_str("TOP").unwrap(),
            ProductPosition::Top
        );
        assert!(DeviceType::from_str("tablet").is_err());
        assert!(ProductPosition::from_str("3").is_err());
    }

    #[test]
    fn test_option_defaults() {
        let opts = ExtraOptions::default();
        assert_eq!(opts.device_type, DeviceType::All);
        assert_eq!(opts.display_type, DisplayType::All);
        assert_eq!(opts.product_position, ProductPosition::All);
    }
}
