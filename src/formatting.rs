use crate::error::ThresholdError;
use colored::{ColoredString, Colorize};
use serde::Serialize;
use std::fmt;

pub const DEFAULT_HIGH_ABOVE: f64 = 5.0;
pub const DEFAULT_MEDIUM_ABOVE: f64 = 1.0;

/// Three-bucket classification of a cost value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CostTier {
    Low,
    Medium,
    High,
}

impl CostTier {
    /// Presentation class a view uses to style the tier.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::High => "cost-high",
            Self::Medium => "cost-medium",
            Self::Low => "cost-low",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn paint(self, text: &str) -> ColoredString {
        match self {
            Self::High => text.bright_red().bold(),
            Self::Medium => text.bright_yellow(),
            Self::Low => text.bright_green(),
        }
    }
}

impl fmt::Display for CostTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Strict lower bounds for the upper two tiers. A cost equal to a bound
/// falls into the tier below it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostThresholds {
    high: f64,
    medium: f64,
}

impl Default for CostThresholds {
    fn default() -> Self {
        Self {
            high: DEFAULT_HIGH_ABOVE,
            medium: DEFAULT_MEDIUM_ABOVE,
        }
    }
}

impl CostThresholds {
    pub fn new(high: f64, medium: f64) -> Result<Self, ThresholdError> {
        if !high.is_finite() {
            return Err(ThresholdError::NonFinite {
                name: "high",
                value: high,
            });
        }
        if !medium.is_finite() {
            return Err(ThresholdError::NonFinite {
                name: "medium",
                value: medium,
            });
        }
        if high < medium {
            return Err(ThresholdError::Inverted { high, medium });
        }
        Ok(Self { high, medium })
    }

    #[must_use]
    pub const fn high(&self) -> f64 {
        self.high
    }

    #[must_use]
    pub const fn medium(&self) -> f64 {
        self.medium
    }

    /// First match wins. NaN fails both comparisons and lands in `Low`.
    #[must_use]
    pub fn classify(&self, cost: f64) -> CostTier {
        if cost > self.high {
            CostTier::High
        } else if cost > self.medium {
            CostTier::Medium
        } else {
            CostTier::Low
        }
    }
}

#[must_use]
pub fn classify_cost(cost: f64) -> CostTier {
    CostThresholds::default().classify(cost)
}

#[must_use]
pub fn cost_class(cost: f64) -> &'static str {
    classify_cost(cost).css_class()
}

pub fn format_cost(cost: f64) -> String {
    if cost.is_finite() {
        format!("${cost:.2}")
    } else {
        "-".to_string()
    }
}
