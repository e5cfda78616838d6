// ⚖️ Allocation Engine - Headcount per region vs. required total
// Keeps the location step's numbers consistent:
//
//   allocated_total = Σ allocated over ACTIVE regions
//   remaining       = required - allocated_total   (may be negative)
//
// Every mutation recomputes and hands back the view model, so the form
// adapter can render straight from the return value.

use crate::error::AllocationError;
use crate::input::{clamp_count, parse_count};
use crate::region::{RegionCatalog, RegionCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Required total the form starts with.
pub const DEFAULT_REQUIRED: u32 = 100;

// ============================================================================
// REQUIREMENT KIND
// ============================================================================

/// What the required total counts. Only changes message wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementKind {
    #[default]
    Headcount,
    Fte,
}

impl RequirementKind {
    pub fn unit_label(&self) -> &'static str {
        match self {
            RequirementKind::Headcount => "headcount",
            RequirementKind::Fte => "FTE",
        }
    }

    /// Parse the form's select value ("headcount" / "fte").
    pub fn from_form_value(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "headcount" => Some(RequirementKind::Headcount),
            "fte" => Some(RequirementKind::Fte),
            _ => None,
        }
    }
}

// ============================================================================
// ALLOCATION STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationStatus {
    /// Nothing allocated yet - no banner
    Empty,
    /// Some allocated, less than required
    Under,
    /// Allocations sum to the (non-zero) requirement
    Exact,
    /// Allocations exceed the requirement
    Over,
}

impl AllocationStatus {
    /// Classify a total against the requirement.
    ///
    /// Empty wins over everything: a zero total never shows a banner,
    /// even when the requirement is also zero.
    pub fn classify(allocated_total: u64, required: u64) -> Self {
        if allocated_total == 0 {
            AllocationStatus::Empty
        } else if allocated_total > required {
            AllocationStatus::Over
        } else if allocated_total == required {
            AllocationStatus::Exact
        } else {
            AllocationStatus::Under
        }
    }

    pub fn style(&self) -> StatusStyle {
        match self {
            AllocationStatus::Empty => StatusStyle::Neutral,
            AllocationStatus::Under => StatusStyle::Warning,
            AllocationStatus::Exact => StatusStyle::Success,
            AllocationStatus::Over => StatusStyle::Danger,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AllocationStatus::Empty => "Empty",
            AllocationStatus::Under => "Under",
            AllocationStatus::Exact => "Exact",
            AllocationStatus::Over => "Over",
        }
    }
}

/// Presentation style a status maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusStyle {
    Neutral,
    Warning,
    Success,
    Danger,
}

impl StatusStyle {
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusStyle::Neutral => "neutral",
            StatusStyle::Warning => "warning",
            StatusStyle::Success => "success",
            StatusStyle::Danger => "danger",
        }
    }
}

// ============================================================================
// STATE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub code: RegionCode,
    pub name: String,
    pub active: bool,
    pub allocated: u32,
}

impl Region {
    /// What this region adds to the total. Inactive regions add nothing.
    pub fn contribution(&self) -> u32 {
        if self.active {
            self.allocated
        } else {
            0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationState {
    pub required: u32,
    pub kind: RequirementKind,
    /// Catalog order, codes unique
    pub regions: Vec<Region>,
}

impl AllocationState {
    /// All catalog regions active at 0.
    pub fn new(catalog: &RegionCatalog, required: u32) -> Self {
        let regions = catalog
            .iter()
            .map(|info| Region {
                code: info.code.clone(),
                name: info.name.clone(),
                active: true,
                allocated: 0,
            })
            .collect();

        AllocationState {
            required,
            kind: RequirementKind::default(),
            regions,
        }
    }

    pub fn allocated_total(&self) -> u64 {
        self.regions.iter().map(|r| r.contribution() as u64).sum()
    }

    fn position(&self, code: &RegionCode) -> Option<usize> {
        self.regions.iter().position(|r| &r.code == code)
    }
}

// ============================================================================
// VIEW MODEL
// ============================================================================

/// One row of the itemized breakdown (active regions only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationLine {
    pub code: RegionCode,
    pub name: String,
    pub allocated: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewModel {
    pub allocated_total: u64,
    pub required_total: u64,
    pub remaining: i64,
    pub status: AllocationStatus,
    pub excess_or_shortfall: u64,
    pub requirement_kind: RequirementKind,
    pub lines: Vec<AllocationLine>,
}

impl ViewModel {
    /// Remaining with an explicit sign: "+40", "-10", "0".
    pub fn remaining_display(&self) -> String {
        if self.remaining == 0 {
            "0".to_string()
        } else {
            format!("{:+}", self.remaining)
        }
    }

    /// Banner text; `None` while nothing is allocated.
    pub fn message(&self) -> Option<String> {
        let unit = self.requirement_kind.unit_label();
        let n = self.excess_or_shortfall;

        match self.status {
            AllocationStatus::Empty => None,
            AllocationStatus::Under => Some(format!("{} {} remaining to allocate", n, unit)),
            AllocationStatus::Exact => Some(format!("Allocation matches the required {}", unit)),
            AllocationStatus::Over => Some(format!("Over-allocated by {} {}", n, unit)),
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Allocated {} of {} ({}), remaining {}",
            self.allocated_total,
            self.required_total,
            self.status.as_str(),
            self.remaining_display()
        )
    }
}

// ============================================================================
// ALLOCATION ENGINE
// ============================================================================

#[derive(Debug, Clone)]
pub struct AllocationEngine {
    state: AllocationState,

    /// Required total restored by `reset()`
    default_required: u32,
}

impl AllocationEngine {
    /// Page-load construction: every catalog region active, required seeded.
    pub fn new(catalog: &RegionCatalog, default_required: u32) -> Self {
        AllocationEngine {
            state: AllocationState::new(catalog, default_required),
            default_required,
        }
    }

    /// Shorthand for tests and the CLI: catalog built from raw codes.
    pub fn from_codes(codes: &[&str], default_required: u32) -> Result<Self, AllocationError> {
        let catalog = RegionCatalog::from_codes(codes)?;
        Ok(Self::new(&catalog, default_required))
    }

    pub fn with_kind(mut self, kind: RequirementKind) -> Self {
        self.state.kind = kind;
        self
    }

    pub fn state(&self) -> &AllocationState {
        &self.state
    }

    pub fn region(&self, code: &str) -> Option<&Region> {
        let code = RegionCode::parse(code).ok()?;
        self.state.regions.iter().find(|r| r.code == code)
    }

    fn resolve(&self, code: &str) -> Result<usize, AllocationError> {
        let parsed = RegionCode::parse(code)?;
        self.state
            .position(&parsed)
            .ok_or_else(|| AllocationError::UnknownRegion(parsed.to_string()))
    }

    // ------------------------------------------------------------------------
    // Region toggle
    // ------------------------------------------------------------------------

    /// Checkbox toggled. Unknown codes are ignored.
    pub fn set_region_active(&mut self, code: &str, active: bool) -> ViewModel {
        match self.try_set_region_active(code, active) {
            Ok(view) => view,
            Err(err) => {
                warn!(code, error = %err, "ignoring region toggle");
                self.recompute()
            }
        }
    }

    pub fn try_set_region_active(
        &mut self,
        code: &str,
        active: bool,
    ) -> Result<ViewModel, AllocationError> {
        let idx = self.resolve(code)?;
        let region = &mut self.state.regions[idx];

        if region.active && !active {
            // Deselected regions drop their headcount
            region.allocated = 0;
        }
        region.active = active;

        debug!(code = %region.code, active, "region toggled");
        Ok(self.recompute())
    }

    // ------------------------------------------------------------------------
    // Per-region headcount
    // ------------------------------------------------------------------------

    /// Region field edited. Negative clamps to 0; unknown or inactive regions are ignored.
    pub fn set_allocated(&mut self, code: &str, value: i64) -> ViewModel {
        match self.try_set_allocated(code, value) {
            Ok(view) => view,
            Err(err) => {
                if err.is_unknown_region() {
                    warn!(code, error = %err, "ignoring allocation");
                } else {
                    debug!(code, error = %err, "ignoring allocation");
                }
                self.recompute()
            }
        }
    }

    pub fn try_set_allocated(&mut self, code: &str, value: i64) -> Result<ViewModel, AllocationError> {
        let idx = self.resolve(code)?;
        let region = &mut self.state.regions[idx];

        if !region.active {
            return Err(AllocationError::RegionInactive(region.code.to_string()));
        }
        region.allocated = clamp_count(value);

        debug!(code = %region.code, allocated = region.allocated, "allocation set");
        Ok(self.recompute())
    }

    /// Same as `set_allocated`, straight from the field's text.
    pub fn set_allocated_raw(&mut self, code: &str, raw: &str) -> ViewModel {
        self.set_allocated(code, parse_count(raw) as i64)
    }

    // ------------------------------------------------------------------------
    // Required total
    // ------------------------------------------------------------------------

    pub fn set_required(&mut self, value: i64) -> ViewModel {
        self.state.required = clamp_count(value);
        debug!(required = self.state.required, "required total set");
        self.recompute()
    }

    pub fn set_required_raw(&mut self, raw: &str) -> ViewModel {
        self.set_required(parse_count(raw) as i64)
    }

    /// Requirement type select changed (headcount / FTE).
    pub fn set_requirement_kind(&mut self, kind: RequirementKind) -> ViewModel {
        self.state.kind = kind;
        self.recompute()
    }

    /// Form reset: all regions active at 0, required back to its default.
    pub fn reset(&mut self) -> ViewModel {
        for region in &mut self.state.regions {
            region.active = true;
            region.allocated = 0;
        }
        self.state.required = self.default_required;
        debug!("allocation reset");
        self.recompute()
    }

    // ------------------------------------------------------------------------
    // Derived view
    // ------------------------------------------------------------------------

    /// Pure function of the current state.
    pub fn recompute(&self) -> ViewModel {
        let lines: Vec<AllocationLine> = self
            .state
            .regions
            .iter()
            .filter(|r| r.active)
            .map(|r| AllocationLine {
                code: r.code.clone(),
                name: r.name.clone(),
                allocated: r.allocated,
            })
            .collect();

        let allocated_total: u64 = lines.iter().map(|l| l.allocated as u64).sum();
        let required_total = self.state.required as u64;
        let remaining = required_total as i64 - allocated_total as i64;
        let status = AllocationStatus::classify(allocated_total, required_total);

        debug!(
            allocated_total,
            required_total,
            remaining,
            status = status.as_str(),
            "allocation recomputed"
        );

        ViewModel {
            allocated_total,
            required_total,
            remaining,
            status,
            excess_or_shortfall: remaining.unsigned_abs(),
            requirement_kind: self.state.kind,
            lines,
        }
    }
}

impl Default for AllocationEngine {
    fn default() -> Self {
        Self::new(&RegionCatalog::default(), DEFAULT_REQUIRED)
    }
}

// ============================================================================
// TESTS
// ============================================================================
