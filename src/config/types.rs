//! Configuration types for leave balance calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};

/// Default minimum tenure, in months, before annual leave may be taken.
pub const DEFAULT_ELIGIBILITY_MONTHS: u32 = 9;

/// Default number of years of annual entitlement that may be held at once.
pub const DEFAULT_CARRY_OVER_YEARS: u32 = 2;

/// Default length, in months, of the window before the carry-over cap in
/// which accrued days are flagged as expiring soon.
pub const DEFAULT_EXPIRING_SOON_MONTHS: u32 = 3;

/// Default emergency leave days per year.
pub const DEFAULT_EMERGENCY_LEAVE_DAYS: u32 = 3;

/// Largest per-year entitlement accepted for any leave type.
pub const MAX_DAYS_PER_YEAR: u32 = 366;

/// Largest accepted `carry_over_years`.
pub const MAX_CARRY_OVER_YEARS: u32 = 50;

/// Largest accepted `eligibility_months` and `expiring_soon_months`.
pub const MAX_POLICY_MONTHS: u32 = 600;

/// Metadata about the engine's leave rules.
///
/// Identifies the jurisdiction and the version of the rules the
/// configuration encodes.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineMetadata {
    /// Short code for the rule set (e.g., "KW-PRIVATE").
    pub code: String,
    /// The human-readable name of the rule set.
    pub name: String,
    /// The version or effective date of the rules.
    pub version: String,
    /// The jurisdiction the rules apply in.
    pub jurisdiction: String,
}

/// Tenure rules that shape how leave accrues and expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeavePolicy {
    /// Months of service before annual leave may be taken.
    pub eligibility_months: u32,
    /// Years of annual entitlement that may be held before days expire.
    pub carry_over_years: u32,
    /// Months before the carry-over cap in which days are flagged as expiring.
    pub expiring_soon_months: u32,
}

impl Default for LeavePolicy {
    fn default() -> Self {
        Self {
            eligibility_months: DEFAULT_ELIGIBILITY_MONTHS,
            carry_over_years: DEFAULT_CARRY_OVER_YEARS,
            expiring_soon_months: DEFAULT_EXPIRING_SOON_MONTHS,
        }
    }
}

impl LeavePolicy {
    /// Months of service at which the carry-over cap is reached.
    ///
    /// Saturates at `u32::MAX` for settings that skipped validation.
    pub fn cap_months(&self) -> u32 {
        self.carry_over_years.saturating_mul(12)
    }

    /// Months of service at which the expiring-soon window opens.
    pub fn expiring_window_start(&self) -> u32 {
        self.cap_months().saturating_sub(self.expiring_soon_months)
    }
}

fn default_emergency_leave_days() -> Decimal {
    Decimal::from(DEFAULT_EMERGENCY_LEAVE_DAYS)
}

/// Leave settings of one company.
///
/// Every leave-type number the engine uses lives here.
///
/// # Example
///
/// ```
/// use leave_engine::config::CompanySettings;
///
/// let yaml = r#"
/// company_id: acme
/// name: Acme Trading Co.
/// annual_leave_days_per_year: 30
/// sick_leave_days_per_year: 15
/// "#;
/// let settings: CompanySettings = serde_yaml::from_str(yaml).unwrap();
/// assert_eq!(settings.emergency_leave_days_per_year.to_string(), "3");
/// assert_eq!(settings.policy.eligibility_months, 9);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySettings {
    /// The company these settings belong to.
    pub company_id: String,
    /// The company's display name.
    #[serde(default)]
    pub name: String,
    /// Annual leave entitlement in days per year.
    pub annual_leave_days_per_year: Decimal,
    /// Sick leave entitlement in days per year.
    pub sick_leave_days_per_year: Decimal,
    /// Emergency leave entitlement in days per year.
    #[serde(default = "default_emergency_leave_days")]
    pub emergency_leave_days_per_year: Decimal,
    /// Tenure rules.
    #[serde(default)]
    pub policy: LeavePolicy,
}

impl CompanySettings {
    /// Checks every entitlement and policy value against its accepted range.
    ///
    /// Entitlements must lie in `0..=366` days. `carry_over_years` may not
    /// exceed 50 and the policy month counts may not exceed 600.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSettings`] naming the first offending key.
    pub fn validate(&self) -> EngineResult<()> {
        let max_days = Decimal::from(MAX_DAYS_PER_YEAR);
        for (key, days) in [
            ("annual_leave_days_per_year", self.annual_leave_days_per_year),
            ("sick_leave_days_per_year", self.sick_leave_days_per_year),
            ("emergency_leave_days_per_year", self.emergency_leave_days_per_year),
        ] {
            if days < Decimal::ZERO || days > max_days {
                return Err(self.invalid(format!(
                    "{} must be between 0 and {}, got {}",
                    key, MAX_DAYS_PER_YEAR, days
                )));
            }
        }

        let policy = &self.policy;
        if policy.carry_over_years > MAX_CARRY_OVER_YEARS {
            return Err(self.invalid(format!(
                "carry_over_years must be at most {}, got {}",
                MAX_CARRY_OVER_YEARS, policy.carry_over_years
            )));
        }
        for (key, months) in [
            ("eligibility_months", policy.eligibility_months),
            ("expiring_soon_months", policy.expiring_soon_months),
        ] {
            if months > MAX_POLICY_MONTHS {
                return Err(self.invalid(format!(
                    "{} must be at most {}, got {}",
                    key, MAX_POLICY_MONTHS, months
                )));
            }
        }

        Ok(())
    }

    fn invalid(&self, message: String) -> EngineError {
        EngineError::InvalidSettings {
            company_id: self.company_id.clone(),
            message,
        }
    }
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Engine metadata.
    metadata: EngineMetadata,
    /// Settings keyed by company ID.
    companies: HashMap<String, CompanySettings>,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(metadata: EngineMetadata, companies: Vec<CompanySettings>) -> Self {
        let companies = companies
            .into_iter()
            .map(|settings| (settings.company_id.clone(), settings))
            .collect();
        Self {
            metadata,
            companies,
        }
    }

    /// Returns the engine metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Returns the settings of every configured company.
    pub fn companies(&self) -> &HashMap<String, CompanySettings> {
        &self.companies
    }
}
