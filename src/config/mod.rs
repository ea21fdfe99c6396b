//! Configuration loading and management for the Leave Balance Engine.
//!
//! This module loads the rule set metadata and the per-company leave
//! settings from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use leave_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded rules: {}", config.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CompanySettings, DEFAULT_CARRY_OVER_YEARS, DEFAULT_ELIGIBILITY_MONTHS,
    DEFAULT_EMERGENCY_LEAVE_DAYS, DEFAULT_EXPIRING_SOON_MONTHS, EngineConfig, EngineMetadata,
    LeavePolicy,
};
