use serde::{Deserialize, Serialize};

use crate::error::{ErrorContext, SimError, SimResult};
use crate::services::numeric::{ensure_finite, ensure_positive};

const OPERATION: &str = "seasonality.model";

/// Relative slack when checking that the harmonic fits the main period.
const PERIOD_RATIO_TOLERANCE: f64 = 1e-9;

/// Secondary cosine term `amplitude * cos(2*pi*t/period + phase)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Harmonic {
    pub amplitude: f64,
    pub period: f64,
    #[serde(default)]
    pub phase: f64,
}

/// Enrollment seasonality:
/// `enrollment(t) = baseline + amplitude * sin(2*pi*t/period + phase)` plus the
/// optional harmonic. `t` and `period` share a unit (months by default).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalityModel {
    pub baseline: f64,
    pub amplitude: f64,
    pub period: f64,
    #[serde(default)]
    pub phase: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub harmonic: Option<Harmonic>,
}

impl SeasonalityModel {
    pub fn new(baseline: f64, amplitude: f64, period: f64, phase: f64) -> SimResult<Self> {
        let model = Self {
            baseline,
            amplitude,
            period,
            phase,
            harmonic: None,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn with_harmonic(mut self, amplitude: f64, period: f64, phase: f64) -> SimResult<Self> {
        self.harmonic = Some(Harmonic {
            amplitude,
            period,
            phase,
        });
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> SimResult<()> {
        ensure_finite(self.baseline, "baseline", OPERATION)?;
        ensure_finite(self.amplitude, "amplitude", OPERATION)?;
        ensure_positive(self.period, "period", OPERATION)?;
        ensure_finite(self.phase, "phase", OPERATION)?;
        if let Some(harmonic) = &self.harmonic {
            ensure_finite(harmonic.amplitude, "harmonic.amplitude", OPERATION)?;
            ensure_positive(harmonic.period, "harmonic.period", OPERATION)?;
            ensure_finite(harmonic.phase, "harmonic.phase", OPERATION)?;

            // The curve repeats every `period` only if the harmonic completes
            // a whole number of cycles within it.
            let cycles = self.period / harmonic.period;
            let whole = cycles.round();
            if whole < 1.0 || (cycles - whole).abs() > PERIOD_RATIO_TOLERANCE * whole {
                return Err(SimError::invalid_input_with_context(
                    format!(
                        "harmonic period {} must divide the main period {} evenly",
                        harmonic.period, self.period
                    ),
                    ErrorContext::new(OPERATION)
                        .with_parameter("harmonic.period")
                        .with_details(format!("period / harmonic.period = {}", cycles)),
                ));
            }
        }
        Ok(())
    }

    /// True when the harmonic is present and contributes to the curve.
    pub fn has_active_harmonic(&self) -> bool {
        self.harmonic.as_ref().is_some_and(|h| h.amplitude != 0.0)
    }
}

impl Default for SeasonalityModel {
    /// Yearly cycle in months with a half-year secondary swing.
    fn default() -> Self {
        Self {
            baseline: 50.0,
            amplitude: 20.0,
            period: 12.0,
            phase: 0.0,
            harmonic: Some(Harmonic {
                amplitude: 10.0,
                period: 6.0,
                phase: 0.0,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_must_be_positive() {
        assert!(SeasonalityModel::new(100.0, 20.0, 0.0, 0.0)
            .unwrap_err()
            .is_invalid_input());
        assert!(SeasonalityModel::new(100.0, 20.0, -12.0, 0.0).is_err());
        assert!(SeasonalityModel::new(100.0, 20.0, 12.0, 0.0).is_ok());
    }

    #[test]
    fn test_harmonic_is_validated() {
        let model = SeasonalityModel::new(100.0, 20.0, 12.0, 0.0).unwrap();
        assert!(model.clone().with_harmonic(10.0, 0.0, 0.0).is_err());
        let model = model.with_harmonic(10.0, 6.0, 0.0).unwrap();
        assert!(model.has_active_harmonic());
    }

    #[test]
    fn test_harmonic_must_divide_period() {
        let model = SeasonalityModel::new(50.0, 20.0, 12.0, 0.0).unwrap();
        for period in [12.0, 6.0, 4.0, 3.0, 12.0 / 7.0] {
            assert!(model.clone().with_harmonic(10.0, period, 0.0).is_ok(), "{period}");
        }
        for period in [5.0, 8.0, 24.0] {
            let err = model.clone().with_harmonic(10.0, period, 0.0).unwrap_err();
            assert!(err.is_invalid_input());
            assert_eq!(err.context().parameter.as_deref(), Some("harmonic.period"));
        }
    }

    #[test]
    fn test_zero_amplitude_harmonic_is_inactive() {
        let model = SeasonalityModel::new(100.0, 20.0, 12.0, 0.0)
            .unwrap()
            .with_harmonic(0.0, 6.0, 0.0)
            .unwrap();
        assert!(!model.has_active_harmonic());
    }
}
