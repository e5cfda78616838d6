// ⚠️ Allocation Errors
// Conditions the strict engine operations surface to the caller.
//
// The tolerant operations (set_region_active, set_allocated) swallow these
// and leave the state untouched.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AllocationError {
    /// The region code is not part of the catalog.
    #[error("unknown region code: '{0}'")]
    UnknownRegion(String),

    /// The region exists but is not selected, so its allocation is not counted.
    #[error("region {0} is not active")]
    RegionInactive(String),

    /// The code cannot name a region at all (empty, punctuation, ...).
    #[error("invalid region code: '{0}'")]
    InvalidRegionCode(String),
}

impl AllocationError {
    /// True for conditions caused by a code the catalog does not know.
    pub fn is_unknown_region(&self) -> bool {
        matches!(
            self,
            AllocationError::UnknownRegion(_) | AllocationError::InvalidRegionCode(_)
        )
    }
}
