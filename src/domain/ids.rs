//! Domain identifier types with validation
//!
//! Newtype wrappers for workspace and storefront identifiers. Both are
//! numeric in the upstream analytics platform, so parsing rejects anything
//! that is not all digits.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Workspace identifier newtype wrapper
///
/// # Examples
///
/// ```
/// use vantage::domain::ids::WorkspaceId;
/// use std::str::FromStr;
///
/// let id = WorkspaceId::from_str("123").unwrap();
/// assert_eq!(id.value(), 123);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkspaceId(u64);

impl WorkspaceId {
    /// Creates a new WorkspaceId from a numeric value
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the numeric value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WorkspaceId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_numeric_id(s, "Workspace ID").map(Self)
    }
}

/// Storefront identifier newtype wrapper
///
/// Identifies one storefront (a marketplace account) inside a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StorefrontId(u64);

impl StorefrontId {
    /// Creates a new StorefrontId from a numeric value
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the numeric value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for StorefrontId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StorefrontId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_numeric_id(s, "Storefront ID").map(Self)
    }
}

fn parse_numeric_id(s: &str, label: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err(format!("{label} cannot be empty"));
    }
    if !s.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("{label} must be numeric, got: {s}"));
    }
    s.parse::<u64>()
        .map_err(|e| format!("{label} is out of range: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_id_valid() {
        let id = WorkspaceId::from_str("42").unwrap();
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_workspace_id_trims_whitespace() {
        let id = WorkspaceId::from_str(" 7 ").unwrap();
        assert_eq!(id.value(), 7);
    }

    #[test]
    fn test_workspace_id_rejects_non_numeric() {
        assert!(WorkspaceId::from_str("abc").is_err());
        assert!(WorkspaceId::from_str("12a").is_err());
        assert!(WorkspaceId::from_str("-3").is_err());
        assert!(WorkspaceId::from_str("").is_err());
    }

    #[test]
    fn test_storefront_id_valid() {
        let id = StorefrontId::from_str("1001").unwrap();
        assert_eq!(id.value(), 1001);
    }

    #[test]
    fn test_storefront_id_rejects_non_numeric() {
        assert!(StorefrontId::from_str("1.5").is_err());
        assert!(StorefrontId::from_str("one").is_err());
    }

    #[test]
    fn test_id_out_of_range() {
        // 21 digits overflows u64
        assert!(WorkspaceId::from_str("999999999999999999999").is_err());
    }
}
