use serde::{Deserialize, Serialize};

use crate::error::SimResult;

// =========================================================
// Chart primitives shared by every route
// =========================================================

/// One plotted line: parallel x/y arrays plus a legend label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl ChartSeries {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            x: Vec::new(),
            y: Vec::new(),
        }
    }

    /// Evaluate `f` at every x value, stopping at the first failure.
    pub fn from_fn<F>(label: impl Into<String>, xs: Vec<f64>, mut f: F) -> SimResult<Self>
    where
        F: FnMut(f64) -> SimResult<f64>,
    {
        let y = xs.iter().map(|&x| f(x)).collect::<SimResult<Vec<f64>>>()?;
        Ok(Self {
            label: label.into(),
            x: xs,
            y,
        })
    }

    pub fn push(&mut self, x: f64, y: f64) {
        self.x.push(x);
        self.y.push(y);
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// A single highlighted point (current position, optimum, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartMarker {
    pub label: String,
    pub x: f64,
    pub y: f64,
}

impl ChartMarker {
    pub fn new(label: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            label: label.into(),
            x,
            y,
        }
    }
}

/// Which axis a reference line is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Vertical line at `x = value`
    X,
    /// Horizontal line at `y = value`
    Y,
}

/// Dashed guide line (tier limits, targets, baselines).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLine {
    pub label: String,
    pub axis: Axis,
    pub value: f64,
}

impl ReferenceLine {
    pub fn vertical(label: impl Into<String>, x: f64) -> Self {
        Self {
            label: label.into(),
            axis: Axis::X,
            value: x,
        }
    }

    pub fn horizontal(label: impl Into<String>, y: f64) -> Self {
        Self {
            label: label.into(),
            axis: Axis::Y,
            value: y,
        }
    }
}

/// Categorical bar series (tutor loads, subject coverage).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    pub label: String,
    pub categories: Vec<String>,
    pub values: Vec<f64>,
}

impl BarSeries {
    pub fn new<I, S>(label: impl Into<String>, bars: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let (categories, values) = bars
            .into_iter()
            .map(|(category, value)| (category.into(), value))
            .unzip();
        Self {
            label: label.into(),
            categories,
            values,
        }
    }
}

/// Summary statistics over a set of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub sum: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;

    #[test]
    fn test_series_from_fn() {
        let series = ChartSeries::from_fn("square", vec![0.0, 1.0, 2.0], |x| Ok(x * x)).unwrap();
        assert_eq!(series.y, vec![0.0, 1.0, 4.0]);
        assert_eq!(series.len(), 3);
        assert!(!series.is_empty());
    }

    #[test]
    fn test_series_from_fn_propagates_error() {
        let result = ChartSeries::from_fn("bad", vec![1.0, -1.0], |x| {
            if x < 0.0 {
                Err(SimError::invalid_input("negative"))
            } else {
                Ok(x)
            }
        });
        assert!(result.unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_bar_series_keeps_order() {
        let bars = BarSeries::new("Hours", [("Amara", 11.0), ("Zuri", 10.0)]);
        assert_eq!(bars.categories, vec!["Amara", "Zuri"]);
        assert_eq!(bars.values, vec![11.0, 10.0]);
    }

    #[test]
    fn test_reference_line_serializes_axis() {
        let line = ReferenceLine::vertical("Tier 1 Limit", 5.0);
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["axis"], "x");
        assert_eq!(json["value"], 5.0);
    }
}
