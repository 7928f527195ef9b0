use serde::{Deserialize, Serialize};

use crate::api::BarSeries;
use crate::error::SimResult;
use crate::models::{ScheduleMode, SchedulingProblem};

// =========================================================
// Scheduling types + route
// =========================================================

/// Hours one tutor teaches one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentCell {
    pub tutor: String,
    pub subject: String,
    pub hours: f64,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorLoad {
    pub tutor: String,
    pub assigned_hours: f64,
    pub capacity_hours: Option<f64>,
    /// `assigned / capacity`; `None` without a positive capacity
    pub utilization: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectCoverage {
    pub subject: String,
    pub demand_hours: f64,
    pub covered_hours: f64,
    pub unmet_hours: f64,
}

/// Optimal tutor/subject assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub mode: ScheduleMode,
    /// `hours[t][s]`, same shape as the availability matrix
    pub hours: Vec<Vec<f64>>,
    /// Non-zero cells only
    pub cells: Vec<AssignmentCell>,
    pub tutor_loads: Vec<TutorLoad>,
    pub subject_coverage: Vec<SubjectCoverage>,
    pub total_hours: f64,
    pub total_cost: f64,
    pub total_unmet_hours: f64,
}

/// Complete scheduling dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleData {
    pub problem: SchedulingProblem,
    pub assignment: Assignment,
    pub load_chart: BarSeries,
    /// Covered hours and demand per subject
    pub coverage_chart: Vec<BarSeries>,
}

/// Route function name constant for scheduling data
pub const GET_SCHEDULE_DATA: &str = "get_schedule_data";

/// Solve a scheduling problem and chart the result (wraps service call)
pub fn get_schedule_data(
    problem: &SchedulingProblem,
    mode: ScheduleMode,
) -> SimResult<ScheduleData> {
    crate::services::scheduling::compute_schedule_data(problem, mode)
}
