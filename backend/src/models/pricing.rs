use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorContext, SimError, SimResult};

const OPERATION: &str = "pricing.schedule";

/// How hours are billed against the tier table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingMode {
    /// Each hour is billed at the rate of the tier it falls into.
    #[default]
    Graduated,
    /// Every hour is billed at the rate of the tier containing the total.
    Volume,
}

impl fmt::Display for PricingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingMode::Graduated => write!(f, "graduated"),
            PricingMode::Volume => write!(f, "volume"),
        }
    }
}

impl FromStr for PricingMode {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "graduated" | "marginal" => Ok(PricingMode::Graduated),
            "volume" | "flat" => Ok(PricingMode::Volume),
            other => Err(SimError::invalid_input_with_context(
                format!("Unsupported pricing mode '{}'. Use graduated or volume.", other),
                ErrorContext::new(OPERATION).with_parameter("mode"),
            )),
        }
    }
}

/// One row of the tier table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingTier {
    /// Inclusive upper bound of the tier in hours; `None` for the open-ended last tier.
    pub threshold_hours: Option<f64>,
    pub rate_per_hour: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl PricingTier {
    pub fn new(threshold_hours: f64, rate_per_hour: f64) -> Self {
        Self {
            threshold_hours: Some(threshold_hours),
            rate_per_hour,
            label: None,
        }
    }

    pub fn unbounded(rate_per_hour: f64) -> Self {
        Self {
            threshold_hours: None,
            rate_per_hour,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Upper bound as a number (`+inf` for the last tier).
    pub fn upper_bound(&self) -> f64 {
        self.threshold_hours.unwrap_or(f64::INFINITY)
    }
}

/// Validated tier table plus billing mode.
///
/// Thresholds are strictly increasing and the last tier is unbounded, so the
/// tiers partition `[0, inf)` without gaps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingSchedule {
    tiers: Vec<PricingTier>,
    mode: PricingMode,
}

impl PricingSchedule {
    pub fn new(tiers: Vec<PricingTier>, mode: PricingMode) -> SimResult<Self> {
        validate_tiers(&tiers)?;
        Ok(Self { tiers, mode })
    }

    /// The default three-tier table: discounted package up to 5 hours, bulk
    /// rate up to 10 hours, subscription beyond.
    pub fn standard() -> Self {
        Self {
            tiers: default_tiers(),
            mode: PricingMode::Graduated,
        }
    }

    pub fn tiers(&self) -> &[PricingTier] {
        &self.tiers
    }

    pub fn mode(&self) -> PricingMode {
        self.mode
    }

    pub fn with_mode(mut self, mode: PricingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Display label of tier `index`, falling back to "Tier N".
    pub fn tier_label(&self, index: usize) -> String {
        self.tiers
            .get(index)
            .and_then(|t| t.label.clone())
            .unwrap_or_else(|| format!("Tier {}", index + 1))
    }

    /// Finite tier boundaries in hours.
    pub fn boundaries(&self) -> Vec<f64> {
        self.tiers.iter().filter_map(|t| t.threshold_hours).collect()
    }
}

pub fn default_tiers() -> Vec<PricingTier> {
    vec![
        PricingTier::new(5.0, 30.0).with_label("Tier 1 (Discounted Package)"),
        PricingTier::new(10.0, 28.0).with_label("Tier 2 (Bulk Rate)"),
        PricingTier::unbounded(25.0).with_label("Tier 3 (Subscription)"),
    ]
}

fn invalid(message: String, parameter: &str) -> SimError {
    SimError::invalid_input_with_context(
        message,
        ErrorContext::new(OPERATION).with_parameter(parameter),
    )
}

fn validate_tiers(tiers: &[PricingTier]) -> SimResult<()> {
    let Some(last) = tiers.last() else {
        return Err(invalid("tier table is empty".to_string(), "tiers"));
    };
    if last.threshold_hours.is_some() {
        return Err(invalid(
            "last tier must be unbounded so tiers cover every hour".to_string(),
            "tiers",
        ));
    }

    let mut previous = 0.0;
    for (i, tier) in tiers.iter().enumerate() {
        if !tier.rate_per_hour.is_finite() || tier.rate_per_hour < 0.0 {
            return Err(invalid(
                format!(
                    "tier {} rate must be a non-negative number, got {}",
                    i + 1,
                    tier.rate_per_hour
                ),
                "rate_per_hour",
            ));
        }
        match tier.threshold_hours {
            Some(threshold) => {
                if !threshold.is_finite() || threshold <= previous {
                    return Err(invalid(
                        format!(
                            "tier {} threshold must be finite and greater than {}, got {}",
                            i + 1,
                            previous,
                            threshold
                        ),
                        "threshold_hours",
                    ));
                }
                previous = threshold;
            }
            None if i + 1 < tiers.len() => {
                return Err(invalid(
                    format!("only the last tier may be unbounded (tier {})", i + 1),
                    "threshold_hours",
                ));
            }
            None => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_schedule_is_valid() {
        let schedule = PricingSchedule::standard();
        assert!(PricingSchedule::new(schedule.tiers().to_vec(), schedule.mode()).is_ok());
        assert_eq!(schedule.boundaries(), vec![5.0, 10.0]);
        assert_eq!(schedule.tier_label(2), "Tier 3 (Subscription)");
    }

    #[test]
    fn test_rejects_empty_and_bounded_last_tier() {
        assert!(PricingSchedule::new(vec![], PricingMode::Graduated).is_err());
        let err = PricingSchedule::new(vec![PricingTier::new(10.0, 30.0)], PricingMode::Graduated)
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_rejects_non_increasing_thresholds() {
        let tiers = vec![
            PricingTier::new(10.0, 30.0),
            PricingTier::new(10.0, 28.0),
            PricingTier::unbounded(25.0),
        ];
        let err = PricingSchedule::new(tiers, PricingMode::Graduated).unwrap_err();
        assert_eq!(err.context().parameter.as_deref(), Some("threshold_hours"));
    }

    #[test]
    fn test_rejects_gap_from_unbounded_middle_tier() {
        let tiers = vec![PricingTier::unbounded(30.0), PricingTier::unbounded(25.0)];
        assert!(PricingSchedule::new(tiers, PricingMode::Graduated).is_err());
    }

    #[test]
    fn test_rejects_negative_rate() {
        let tiers = vec![PricingTier::new(5.0, -1.0), PricingTier::unbounded(25.0)];
        let err = PricingSchedule::new(tiers, PricingMode::Volume).unwrap_err();
        assert_eq!(err.context().parameter.as_deref(), Some("rate_per_hour"));
    }

    #[test]
    fn test_unlabelled_tier_falls_back() {
        let schedule = PricingSchedule::new(
            vec![PricingTier::new(10.0, 30.0), PricingTier::unbounded(25.0)],
            PricingMode::Graduated,
        )
        .unwrap();
        assert_eq!(schedule.tier_label(0), "Tier 1");
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Volume".parse::<PricingMode>().unwrap(), PricingMode::Volume);
        assert_eq!(
            "graduated".parse::<PricingMode>().unwrap(),
            PricingMode::Graduated
        );
        assert!("tiered".parse::<PricingMode>().is_err());
        assert_eq!(PricingMode::Volume.to_string(), "volume");
    }

    #[test]
    fn test_tier_serializes_unbounded_as_null() {
        let json = serde_json::to_value(PricingTier::unbounded(25.0)).unwrap();
        assert!(json["threshold_hours"].is_null());
        assert!(json.get("label").is_none());
    }
}
