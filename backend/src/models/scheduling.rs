use serde::{Deserialize, Serialize};

use crate::error::{ErrorContext, SimError, SimResult};

const OPERATION: &str = "scheduling.problem";

fn default_hourly_cost() -> f64 {
    1.0
}

/// A tutor who can be assigned hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tutor {
    pub name: String,
    /// Total hours the tutor can teach across all subjects; unlimited when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity_hours: Option<f64>,
    /// Cost of one assigned hour
    #[serde(default = "default_hourly_cost")]
    pub hourly_cost: f64,
}

impl Tutor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capacity_hours: None,
            hourly_cost: default_hourly_cost(),
        }
    }

    pub fn with_capacity(mut self, hours: f64) -> Self {
        self.capacity_hours = Some(hours);
        self
    }

    pub fn with_hourly_cost(mut self, cost: f64) -> Self {
        self.hourly_cost = cost;
        self
    }
}

/// A subject that needs tutoring hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
}

impl Subject {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// How unmet demand is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleMode {
    /// Every subject's demand must be covered; otherwise the problem is infeasible.
    #[default]
    Strict,
    /// Cover as much demand as possible, then minimize cost.
    BestEffort,
}

/// Small tutor/subject assignment instance.
///
/// `availability[t][s]` is the most hours tutor `t` can teach subject `s`
/// (zero when the tutor does not teach it); `demand[s]` is the hours subject
/// `s` needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingProblem {
    pub tutors: Vec<Tutor>,
    pub subjects: Vec<Subject>,
    pub availability: Vec<Vec<f64>>,
    pub demand: Vec<f64>,
}

impl SchedulingProblem {
    pub fn new(
        tutors: Vec<Tutor>,
        subjects: Vec<Subject>,
        availability: Vec<Vec<f64>>,
        demand: Vec<f64>,
    ) -> SimResult<Self> {
        let problem = Self {
            tutors,
            subjects,
            availability,
            demand,
        };
        problem.validate()?;
        Ok(problem)
    }

    /// Three tutors covering the three core subjects for one week.
    pub fn sample() -> Self {
        Self {
            tutors: vec![
                Tutor::new("Amara").with_capacity(20.0).with_hourly_cost(30.0),
                Tutor::new("Kwame").with_capacity(15.0).with_hourly_cost(28.0),
                Tutor::new("Zuri").with_capacity(10.0).with_hourly_cost(25.0),
            ],
            subjects: vec![
                Subject::new("Algebra II"),
                Subject::new("Trigonometry"),
                Subject::new("Precalculus"),
            ],
            availability: vec![
                vec![10.0, 8.0, 12.0],
                vec![6.0, 10.0, 0.0],
                vec![0.0, 5.0, 10.0],
            ],
            demand: vec![12.0, 10.0, 14.0],
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.tutors.is_empty() {
            return Err(invalid("at least one tutor is required", "tutors"));
        }
        if self.subjects.is_empty() {
            return Err(invalid("at least one subject is required", "subjects"));
        }
        if self.availability.len() != self.tutors.len() {
            return Err(invalid(
                format!(
                    "availability has {} rows but there are {} tutors",
                    self.availability.len(),
                    self.tutors.len()
                ),
                "availability",
            ));
        }
        if self.demand.len() != self.subjects.len() {
            return Err(invalid(
                format!(
                    "demand has {} entries but there are {} subjects",
                    self.demand.len(),
                    self.subjects.len()
                ),
                "demand",
            ));
        }
        for (t, row) in self.availability.iter().enumerate() {
            if row.len() != self.subjects.len() {
                return Err(invalid(
                    format!(
                        "availability row for {} has {} entries, expected {}",
                        self.tutors[t].name,
                        row.len(),
                        self.subjects.len()
                    ),
                    "availability",
                ));
            }
            if let Some(bad) = row.iter().find(|v| !is_non_negative(**v)) {
                return Err(invalid(
                    format!(
                        "availability for {} must be non-negative, got {}",
                        self.tutors[t].name, bad
                    ),
                    "availability",
                ));
            }
        }
        if let Some(bad) = self.demand.iter().find(|v| !is_non_negative(**v)) {
            return Err(invalid(
                format!("demand must be non-negative, got {}", bad),
                "demand",
            ));
        }
        for tutor in &self.tutors {
            if let Some(capacity) = tutor.capacity_hours {
                if !is_non_negative(capacity) {
                    return Err(invalid(
                        format!(
                            "capacity for {} must be non-negative, got {}",
                            tutor.name, capacity
                        ),
                        "capacity_hours",
                    ));
                }
            }
            if !is_non_negative(tutor.hourly_cost) {
                return Err(invalid(
                    format!(
                        "hourly cost for {} must be non-negative, got {}",
                        tutor.name, tutor.hourly_cost
                    ),
                    "hourly_cost",
                ));
            }
        }
        Ok(())
    }

    /// Total hours all tutors could give subject `s`, ignoring capacities.
    pub fn subject_availability(&self, s: usize) -> f64 {
        self.availability.iter().map(|row| row[s]).sum()
    }
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn invalid(message: impl Into<String>, parameter: &str) -> SimError {
    SimError::invalid_input_with_context(
        message,
        ErrorContext::new(OPERATION).with_parameter(parameter),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_is_valid() {
        assert!(SchedulingProblem::sample().validate().is_ok());
        assert_eq!(SchedulingProblem::sample().subject_availability(1), 23.0);
    }

    #[test]
    fn test_rejects_dimension_mismatch() {
        let mut problem = SchedulingProblem::sample();
        problem.availability[1].pop();
        let err = problem.validate().unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(err.context().parameter.as_deref(), Some("availability"));

        let mut problem = SchedulingProblem::sample();
        problem.demand.push(3.0);
        assert_eq!(
            problem.validate().unwrap_err().context().parameter.as_deref(),
            Some("demand")
        );
    }

    #[test]
    fn test_rejects_negative_values() {
        let mut problem = SchedulingProblem::sample();
        problem.availability[0][0] = -1.0;
        assert!(problem.validate().is_err());

        let mut problem = SchedulingProblem::sample();
        problem.demand[2] = f64::NAN;
        assert!(problem.validate().is_err());

        let mut problem = SchedulingProblem::sample();
        problem.tutors[0].capacity_hours = Some(-3.0);
        assert!(problem.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_sets() {
        let result = SchedulingProblem::new(vec![], vec![Subject::new("Algebra II")], vec![], vec![1.0]);
        assert!(result.is_err());
        let result = SchedulingProblem::new(vec![Tutor::new("Amara")], vec![], vec![vec![]], vec![]);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_defaults() {
        let problem: SchedulingProblem = serde_json::from_str(
            r#"{
                "tutors": [{"name": "Amara"}],
                "subjects": [{"name": "Trigonometry"}],
                "availability": [[4]],
                "demand": [3]
            }"#,
        )
        .unwrap();
        assert_eq!(problem.tutors[0].hourly_cost, 1.0);
        assert_eq!(problem.tutors[0].capacity_hours, None);
        assert!(problem.validate().is_ok());
    }

    #[test]
    fn test_mode_serialization() {
        assert_eq!(
            serde_json::to_value(ScheduleMode::BestEffort).unwrap(),
            "best_effort"
        );
        assert_eq!(ScheduleMode::default(), ScheduleMode::Strict);
    }
}
