//! Patient risk category.
//!
//! Stored as given; nothing in the system computes it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const RISK_HIGH: &str = "high";
pub const RISK_MEDIUM: &str = "medium";
pub const RISK_LOW: &str = "low";

/// All accepted risk category values.
pub const VALID_RISK_CATEGORIES: &[&str] = &[RISK_HIGH, RISK_MEDIUM, RISK_LOW];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    High,
    Medium,
    Low,
}

impl RiskCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskCategory::High => RISK_HIGH,
            RiskCategory::Medium => RISK_MEDIUM,
            RiskCategory::Low => RISK_LOW,
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            RISK_HIGH => Ok(RiskCategory::High),
            RISK_MEDIUM => Ok(RiskCategory::Medium),
            RISK_LOW => Ok(RiskCategory::Low),
            other => Err(format!(
                "Invalid risk category '{other}'. Must be one of: {}",
                VALID_RISK_CATEGORIES.join(", ")
            )),
        }
    }
}
