// 🌎 Region Catalog - Which countries can receive headcount
// The fixed set of region codes the allocation form knows about.
//
// Codes are the identity ("COL"), names are for display ("Colombia").
// The catalog order is the order the form lists them in.

use crate::error::AllocationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display names for the codes the form ships with.
const KNOWN_NAMES: &[(&str, &str)] = &[
    ("PHL", "Philippines"),
    ("USA", "USA"),
    ("IND", "India"),
    ("COL", "Colombia"),
    ("CAN", "Canada"),
];

/// Regions listed on the location step by default.
pub const DEFAULT_REGION_CODES: &[&str] = &["PHL", "USA", "IND", "COL"];

// ============================================================================
// REGION CODE
// ============================================================================

/// Uppercase alphanumeric region code (usually ISO 3166-1 alpha-3).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegionCode(String);

impl RegionCode {
    /// Normalize a code typed or read from a field id: trim + uppercase.
    pub fn parse(raw: &str) -> Result<Self, AllocationError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(AllocationError::InvalidRegionCode(raw.to_string()));
        }

        Ok(RegionCode(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RegionCode {
    type Err = AllocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RegionCode::parse(s)
    }
}

impl TryFrom<String> for RegionCode {
    type Error = AllocationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RegionCode::parse(&value)
    }
}

impl From<RegionCode> for String {
    fn from(code: RegionCode) -> Self {
        code.0
    }
}

// ============================================================================
// REGION INFO
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionInfo {
    pub code: RegionCode,
    pub name: String,
}

impl RegionInfo {
    /// Build from a code, taking the display name from the built-in table.
    pub fn from_code(code: RegionCode) -> Self {
        let name = KNOWN_NAMES
            .iter()
            .find(|(known, _)| *known == code.as_str())
            .map(|(_, name)| name.to_string())
            .unwrap_or_else(|| code.to_string());

        RegionInfo { code, name }
    }
}

// ============================================================================
// REGION CATALOG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionCatalog {
    regions: Vec<RegionInfo>,
}

impl RegionCatalog {
    /// Build a catalog from raw codes. Duplicates keep their first position.
    pub fn from_codes(codes: &[&str]) -> Result<Self, AllocationError> {
        let mut regions: Vec<RegionInfo> = Vec::with_capacity(codes.len());

        for raw in codes {
            let code = RegionCode::parse(raw)?;
            if regions.iter().any(|r| r.code == code) {
                continue;
            }
            regions.push(RegionInfo::from_code(code));
        }

        Ok(RegionCatalog { regions })
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegionInfo> {
        self.regions.iter()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

impl Default for RegionCatalog {
    fn default() -> Self {
        let regions = DEFAULT_REGION_CODES
            .iter()
            .map(|code| RegionInfo::from_code(RegionCode(code.to_string())))
            .collect();

        RegionCatalog { regions }
    }
}

// ============================================================================
// TESTS
// ============================================================================
