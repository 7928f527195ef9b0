//! Numeric helpers shared by the evaluators.

use crate::api::SummaryStats;
use crate::error::{ErrorContext, SimError, SimResult};

/// Largest number of samples a single chart series may request.
pub const MAX_CHART_POINTS: usize = 10_000;

/// `points` evenly spaced values over `[start, end]`, both ends included.
pub fn linspace(start: f64, end: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (points - 1) as f64;
            (0..points)
                .map(|i| {
                    if i == points - 1 {
                        end
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

/// Reject NaN and infinities.
pub fn ensure_finite(value: f64, parameter: &str, operation: &str) -> SimResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimError::invalid_input_with_context(
            format!("{} must be a finite number, got {}", parameter, value),
            ErrorContext::new(operation).with_parameter(parameter),
        ))
    }
}

/// Reject negative, NaN and infinite values.
pub fn ensure_non_negative(value: f64, parameter: &str, operation: &str) -> SimResult<f64> {
    ensure_finite(value, parameter, operation)?;
    if value < 0.0 {
        return Err(SimError::invalid_input_with_context(
            format!("{} must be non-negative, got {}", parameter, value),
            ErrorContext::new(operation).with_parameter(parameter),
        ));
    }
    Ok(value)
}

/// Reject zero, negative, NaN and infinite values.
pub fn ensure_positive(value: f64, parameter: &str, operation: &str) -> SimResult<f64> {
    ensure_finite(value, parameter, operation)?;
    if value <= 0.0 {
        return Err(SimError::invalid_input_with_context(
            format!("{} must be positive, got {}", parameter, value),
            ErrorContext::new(operation).with_parameter(parameter),
        ));
    }
    Ok(value)
}

/// Chart sample counts must be in `2..=MAX_CHART_POINTS`.
pub fn ensure_points(points: usize, operation: &str) -> SimResult<usize> {
    if (2..=MAX_CHART_POINTS).contains(&points) {
        Ok(points)
    } else {
        Err(SimError::invalid_input_with_context(
            format!(
                "points must be between 2 and {}, got {}",
                MAX_CHART_POINTS, points
            ),
            ErrorContext::new(operation).with_parameter("points"),
        ))
    }
}

/// Compute statistics for a set of values.
/// Calculates mean, median, population std dev, min, max, and sum.
pub fn compute_stats(values: &[f64]) -> SummaryStats {
    if values.is_empty() {
        return SummaryStats {
            count: 0,
            mean: 0.0,
            median: 0.0,
            std_dev: 0.0,
            min: 0.0,
            max: 0.0,
            sum: 0.0,
        };
    }

    let count = values.len();
    let sum: f64 = values.iter().sum();
    let mean = sum / count as f64;

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let median = if count % 2 == 0 {
        (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
    } else {
        sorted[count / 2]
    };

    let variance = values
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / count as f64;
    let std_dev = variance.sqrt();

    let min = sorted.first().copied().unwrap_or(0.0);
    let max = sorted.last().copied().unwrap_or(0.0);

    SummaryStats {
        count,
        mean,
        median,
        std_dev,
        min,
        max,
        sum,
    }
}

/// Index of the first maximum, `None` for an empty slice.
pub fn argmax(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

/// Index of the first minimum, `None` for an empty slice.
pub fn argmin(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, b)) if b <= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}
