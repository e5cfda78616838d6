// ⚙️ Configuration - environment driven
//
//   RAMP_REQUIRED_DEFAULT   required total on load       (default 100)
//   RAMP_REGIONS            comma-separated region codes (default PHL,USA,IND,COL)
//   RAMP_REQUIREMENT_KIND   headcount | fte              (default headcount)
//   RAMP_STRICT_REGIONS     1/true → report unknown codes instead of ignoring them
//   RAMP_LOG_LEVEL          fallback when RUST_LOG is unset (default info)

use crate::engine::{AllocationEngine, RequirementKind, DEFAULT_REQUIRED};
use crate::region::RegionCatalog;
use anyhow::{anyhow, Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Required total the allocation step starts with.
    pub required_default: u32,

    /// Regions offered on the location step, in display order.
    pub catalog: RegionCatalog,

    pub requirement_kind: RequirementKind,

    /// Use the strict engine operations in the form adapter.
    pub strict_regions: bool,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key → value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required_default: u32 = lookup("RAMP_REQUIRED_DEFAULT")
            .map(|v| v.trim().parse())
            .transpose()
            .context("RAMP_REQUIRED_DEFAULT must be a non-negative integer.")?
            .unwrap_or(DEFAULT_REQUIRED);

        let catalog = match lookup("RAMP_REGIONS") {
            Some(raw) => {
                let codes: Vec<&str> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .collect();
                let catalog = RegionCatalog::from_codes(&codes)
                    .context("RAMP_REGIONS contains an invalid code.")?;
                if catalog.is_empty() {
                    return Err(anyhow!("RAMP_REGIONS must list at least one region code."));
                }
                catalog
            }
            None => RegionCatalog::default(),
        };

        let requirement_kind = match lookup("RAMP_REQUIREMENT_KIND") {
            Some(raw) => RequirementKind::from_form_value(&raw)
                .ok_or_else(|| anyhow!("RAMP_REQUIREMENT_KIND must be 'headcount' or 'fte', got '{}'.", raw))?,
            None => RequirementKind::default(),
        };

        let strict_regions = lookup("RAMP_STRICT_REGIONS")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        let log_level = lookup("RAMP_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            required_default,
            catalog,
            requirement_kind,
            strict_regions,
            log_level,
        })
    }

    /// Fresh engine for one form session.
    pub fn build_engine(&self) -> AllocationEngine {
        AllocationEngine::new(&self.catalog, self.required_default).with_kind(self.requirement_kind)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.required_default, 100);
        assert_eq!(config.catalog, RegionCatalog::default());
        assert_eq!(config.requirement_kind, RequirementKind::Headcount);
        assert!(!config.strict_regions);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("RAMP_REQUIRED_DEFAULT", "250"),
            ("RAMP_REGIONS", "can, col,,"),
            ("RAMP_REQUIREMENT_KIND", "FTE"),
            ("RAMP_STRICT_REGIONS", "true"),
            ("RAMP_LOG_LEVEL", "debug"),
        ])
        .unwrap();

        assert_eq!(config.required_default, 250);
        let codes: Vec<&str> = config.catalog.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["CAN", "COL"]);
        assert_eq!(config.requirement_kind, RequirementKind::Fte);
        assert!(config.strict_regions);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_invalid_values() {
        assert!(load(&[("RAMP_REQUIRED_DEFAULT", "-1")]).is_err());
        assert!(load(&[("RAMP_REQUIRED_DEFAULT", "lots")]).is_err());
        assert!(load(&[("RAMP_REGIONS", " , ")]).is_err());
        assert!(load(&[("RAMP_REGIONS", "CAN,C-L")]).is_err());
        assert!(load(&[("RAMP_REQUIREMENT_KIND", "seats")]).is_err());
    }

    #[test]
    fn test_build_engine() {
        let config = load(&[("RAMP_REGIONS", "CAN,COL"), ("RAMP_REQUIRED_DEFAULT", "80")]).unwrap();
        let engine = config.build_engine();
        let view = engine.recompute();

        assert_eq!(view.required_total, 80);
        assert_eq!(engine.state().regions.len(), 2);
    }
}
