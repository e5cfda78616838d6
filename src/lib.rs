// Ramp Allocation - Core Library
// Headcount allocation engine + ramp form rules, used by the TUI and tests

pub mod error;
pub mod region;
pub mod input;
pub mod engine;   // Allocation Engine - required vs. per-region headcount
pub mod form;     // Conditional fields + progress
pub mod config;

// Re-export commonly used types
pub use error::AllocationError;
pub use region::{RegionCatalog, RegionCode, RegionInfo, DEFAULT_REGION_CODES};
pub use input::{clamp_count, parse_count};
pub use engine::{
    AllocationEngine, AllocationLine, AllocationState, AllocationStatus,
    Region, RequirementKind, StatusStyle, ViewModel, DEFAULT_REQUIRED,
};
pub use form::{
    Availability, Channels, DurationUnit, FormField, FormProgress, Languages,
    ProgressBand, RampForm, Ratios, Visibility, DEFAULT_RATIO,
};
pub use config::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
