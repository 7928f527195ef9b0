use std::f64::consts::{FRAC_PI_2, TAU};

use chrono::Month;
use log::debug;

use crate::api::{
    ChartMarker, ChartSeries, ExtremaMethod, MonthlyEnrollment, MonthlySummary, ReferenceLine,
    SeasonalExtrema, SeasonalityData,
};
use crate::error::{SimError, SimResult};
use crate::models::SeasonalityModel;
use crate::services::numeric::{argmax, argmin, compute_stats, ensure_finite, ensure_points, linspace};

const OPERATION: &str = "seasonality.enrollment";

/// Samples per primary period when the harmonic rules out a closed form.
const EXTREMA_SAMPLES: usize = 4096;

impl SeasonalityModel {
    fn value_at(&self, t: f64) -> f64 {
        let primary = self.amplitude * (TAU * t / self.period + self.phase).sin();
        let secondary = self
            .harmonic
            .as_ref()
            .map_or(0.0, |h| h.amplitude * (TAU * t / h.period + h.phase).cos());
        self.baseline + primary + secondary
    }

    /// Expected enrollment at time `t`.
    pub fn enrollment(&self, t: f64) -> SimResult<f64> {
        self.validate()?;
        ensure_finite(t, "t", OPERATION)?;
        Ok(self.value_at(t))
    }

    pub fn enrollment_series(&self, start: f64, end: f64, points: usize) -> SimResult<ChartSeries> {
        ensure_finite(start, "start", OPERATION)?;
        ensure_finite(end, "end", OPERATION)?;
        ensure_points(points, OPERATION)?;
        ChartSeries::from_fn("Enrollment", linspace(start, end, points), |t| {
            self.enrollment(t)
        })
    }

    /// Peak and trough within `[0, period)`.
    ///
    /// `None` when the curve is flat.
    pub fn extrema(&self) -> Option<SeasonalExtrema> {
        if self.has_active_harmonic() {
            Some(self.sampled_extrema())
        } else if self.amplitude != 0.0 {
            Some(self.analytic_extrema())
        } else {
            None
        }
    }

    fn analytic_extrema(&self) -> SeasonalExtrema {
        let omega = TAU / self.period;
        let crest = ((FRAC_PI_2 - self.phase) / omega).rem_euclid(self.period);
        let hollow = (crest + self.period / 2.0).rem_euclid(self.period);
        let (peak_time, trough_time) = if self.amplitude > 0.0 {
            (crest, hollow)
        } else {
            (hollow, crest)
        };
        SeasonalExtrema {
            peak_time,
            peak_value: self.value_at(peak_time),
            trough_time,
            trough_value: self.value_at(trough_time),
            method: ExtremaMethod::Analytic,
        }
    }

    fn sampled_extrema(&self) -> SeasonalExtrema {
        let step = self.period / EXTREMA_SAMPLES as f64;
        let values: Vec<f64> = (0..EXTREMA_SAMPLES)
            .map(|i| self.value_at(i as f64 * step))
            .collect();

        let peak_time = argmax(&values)
            .map(|i| self.refine(i as f64 * step, step, 1.0))
            .unwrap_or(0.0);
        let trough_time = argmin(&values)
            .map(|i| self.refine(i as f64 * step, step, -1.0))
            .unwrap_or(0.0);

        SeasonalExtrema {
            peak_time,
            peak_value: self.value_at(peak_time),
            trough_time,
            trough_value: self.value_at(trough_time),
            method: ExtremaMethod::Sampled,
        }
    }

    /// Parabolic interpolation around a sampled extremum. `sign` is 1 for a
    /// maximum and -1 for a minimum.
    fn refine(&self, t: f64, step: f64, sign: f64) -> f64 {
        let left = sign * self.value_at(t - step);
        let mid = sign * self.value_at(t);
        let right = sign * self.value_at(t + step);
        let curvature = left - 2.0 * mid + right;
        if curvature >= 0.0 {
            return t;
        }
        let offset = (0.5 * step * (left - right) / curvature).clamp(-step, step);
        (t + offset).rem_euclid(self.period)
    }

    /// Enrollment for January through December, evaluated at `t = 1..=12`.
    pub fn monthly_summary(&self) -> SimResult<MonthlySummary> {
        let mut months = Vec::with_capacity(12);
        let mut month = Month::January;
        for _ in 0..12 {
            let number = month.number_from_month();
            months.push(MonthlyEnrollment {
                month: number,
                name: month.name().to_string(),
                enrollment: self.enrollment(f64::from(number))?,
            });
            month = month.succ();
        }

        let values: Vec<f64> = months.iter().map(|m| m.enrollment).collect();
        let (Some(peak), Some(trough)) = (argmax(&values), argmin(&values)) else {
            return Err(SimError::invalid_input("no months to summarize"));
        };

        Ok(MonthlySummary {
            peak: months[peak].clone(),
            trough: months[trough].clone(),
            stats: compute_stats(&values),
            months,
        })
    }
}

/// Build the seasonality dataset: curve over one period, monthly values,
/// extrema and the selected month.
pub fn compute_seasonality_data(
    model: &SeasonalityModel,
    month: f64,
    points: usize,
) -> SimResult<SeasonalityData> {
    model.validate()?;
    let enrollment = model.enrollment(month)?;
    let curve = model.enrollment_series(0.0, model.period, points)?;
    let summary = model.monthly_summary()?;

    let mut monthly_values = ChartSeries::new("Monthly Enrollment");
    for m in &summary.months {
        monthly_values.push(f64::from(m.month), m.enrollment);
    }

    let extrema = model.extrema();
    if let Some(e) = &extrema {
        debug!(
            "Seasonality: peak {:.2} at t={:.3}, trough {:.2} at t={:.3} ({:?})",
            e.peak_value, e.peak_time, e.trough_value, e.trough_time, e.method
        );
    }

    Ok(SeasonalityData {
        model: model.clone(),
        month,
        enrollment,
        curve,
        monthly_values,
        extrema,
        summary,
        baseline_line: ReferenceLine::horizontal("Baseline", model.baseline),
        current: ChartMarker::new("Selected Month", month, enrollment),
    })
}
