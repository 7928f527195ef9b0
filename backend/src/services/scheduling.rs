//! Tutor/subject assignment as a linear program.
//!
//! Variables `x[t][s]` hold the hours tutor `t` teaches subject `s`; only
//! cells with positive availability get a variable. Each variable is capped
//! by its availability, each tutor by their capacity, and each subject's
//! hours must match its demand. Best-effort mode adds an unmet-demand slack
//! per subject priced far above any tutor hour, so the solver covers as much
//! as it can before it starts saving money.

use log::{debug, trace, warn};

use crate::api::{
    Assignment, AssignmentCell, BarSeries, ScheduleData, SubjectCoverage, TutorLoad,
};
use crate::error::{ErrorContext, SimError, SimResult};
use crate::models::{ScheduleMode, SchedulingProblem};
use crate::solver::{Cols, ConstrType, Constr, LpModel, LpOutcome, LpSolver, SimplexSolver};

const OPERATION: &str = "scheduling.solve";

/// Solver noise below this is reported as zero hours.
const SNAP: f64 = 1e-7;

/// Solve with the bundled simplex solver.
pub fn solve_schedule(problem: &SchedulingProblem, mode: ScheduleMode) -> SimResult<Assignment> {
    solve_schedule_with(problem, mode, &SimplexSolver::default())
}

/// Solve with any [`LpSolver`].
pub fn solve_schedule_with(
    problem: &SchedulingProblem,
    mode: ScheduleMode,
    solver: &dyn LpSolver,
) -> SimResult<Assignment> {
    problem.validate()?;
    if mode == ScheduleMode::Strict {
        check_subject_coverage(problem)?;
    }

    let layout = build_model(problem, mode)?;
    trace!("Scheduling model:\n{}", layout.model);

    let solution = match solver.solve(&layout.model)? {
        LpOutcome::Optimal(solution) => solution,
        LpOutcome::Infeasible => {
            warn!(
                "Scheduling infeasible: {} tutors, {} subjects, {:.1} demand hours",
                problem.tutors.len(),
                problem.subjects.len(),
                problem.demand.iter().sum::<f64>()
            );
            return Err(SimError::infeasible_with_context(
                "no assignment covers every subject's demand within tutor availability and capacity",
                ErrorContext::new(OPERATION).with_details(format!("mode={:?}", mode)),
            ));
        }
        LpOutcome::Unbounded => {
            return Err(SimError::solver(
                "scheduling model reported an unbounded objective",
            ));
        }
    };

    let assignment = assemble(problem, mode, &layout, &solution.values);
    debug!(
        "Scheduling ({:?}): {:.2} hours assigned, cost {:.2}, unmet {:.2}",
        mode, assignment.total_hours, assignment.total_cost, assignment.total_unmet_hours
    );
    Ok(assignment)
}

/// Solve and chart tutor loads and subject coverage.
pub fn compute_schedule_data(
    problem: &SchedulingProblem,
    mode: ScheduleMode,
) -> SimResult<ScheduleData> {
    let assignment = solve_schedule(problem, mode)?;

    let load_chart = BarSeries::new(
        "Assigned Hours",
        assignment
            .tutor_loads
            .iter()
            .map(|l| (l.tutor.clone(), l.assigned_hours)),
    );
    let coverage_chart = vec![
        BarSeries::new(
            "Covered Hours",
            assignment
                .subject_coverage
                .iter()
                .map(|c| (c.subject.clone(), c.covered_hours)),
        ),
        BarSeries::new(
            "Demand",
            assignment
                .subject_coverage
                .iter()
                .map(|c| (c.subject.clone(), c.demand_hours)),
        ),
    ];

    Ok(ScheduleData {
        problem: problem.clone(),
        assignment,
        load_chart,
        coverage_chart,
    })
}

/// Fail fast with the subject name when availability alone cannot cover demand.
fn check_subject_coverage(problem: &SchedulingProblem) -> SimResult<()> {
    for (s, subject) in problem.subjects.iter().enumerate() {
        let available = problem.subject_availability(s);
        if problem.demand[s] > available + SNAP {
            warn!(
                "Scheduling infeasible: {} needs {} hours, tutors offer {}",
                subject.name, problem.demand[s], available
            );
            return Err(SimError::infeasible_with_context(
                format!(
                    "{} needs {} hours but tutors are only available for {}",
                    subject.name, problem.demand[s], available
                ),
                ErrorContext::new(OPERATION).with_parameter("demand"),
            ));
        }
    }
    Ok(())
}

struct ModelLayout {
    model: LpModel,
    /// `cells[t][s]` is the variable index of `x[t][s]`, if any
    cells: Vec<Vec<Option<usize>>>,
    /// Unmet-demand slack per subject (best-effort only)
    unmet: Vec<Option<usize>>,
}

fn unmet_penalty(problem: &SchedulingProblem) -> f64 {
    let max_cost = problem
        .tutors
        .iter()
        .map(|t| t.hourly_cost)
        .fold(0.0, f64::max);
    (1.0 + max_cost) * (problem.tutors.len() + problem.subjects.len() + 1) as f64
}

fn build_model(problem: &SchedulingProblem, mode: ScheduleMode) -> SimResult<ModelLayout> {
    let mut model = LpModel::new("SCHEDULE");
    let mut objective = Cols::new();

    let mut cells = Vec::with_capacity(problem.tutors.len());
    for (t, tutor) in problem.tutors.iter().enumerate() {
        let mut row = Vec::with_capacity(problem.subjects.len());
        for s in 0..problem.subjects.len() {
            if problem.availability[t][s] > 0.0 {
                let var = model.add_var(format!("X{}_{}", t, s));
                objective.push(tutor.hourly_cost, var);
                row.push(Some(var));
            } else {
                row.push(None);
            }
        }
        cells.push(row);
    }

    let unmet = match mode {
        ScheduleMode::Strict => vec![None; problem.subjects.len()],
        ScheduleMode::BestEffort => {
            let penalty = unmet_penalty(problem);
            (0..problem.subjects.len())
                .map(|s| {
                    let var = model.add_var(format!("U{}", s));
                    objective.push(penalty, var);
                    Some(var)
                })
                .collect()
        }
    };

    // availability
    for (t, row) in cells.iter().enumerate() {
        for (s, var) in row.iter().enumerate() {
            if let Some(var) = *var {
                let mut cols = Cols::new();
                cols.push(1.0, var);
                model.add_constr(Constr {
                    name: format!("A{}_{}", t, s),
                    cols,
                    typ: ConstrType::LessEqual,
                    rhs: problem.availability[t][s],
                })?;
            }
        }
    }

    // capacity
    for (t, tutor) in problem.tutors.iter().enumerate() {
        let Some(capacity) = tutor.capacity_hours else {
            continue;
        };
        let mut cols = Cols::new();
        for var in cells[t].iter().flatten() {
            cols.push(1.0, *var);
        }
        if cols.is_empty() {
            continue;
        }
        model.add_constr(Constr {
            name: format!("C{}", t),
            cols,
            typ: ConstrType::LessEqual,
            rhs: capacity,
        })?;
    }

    // demand
    for s in 0..problem.subjects.len() {
        let mut cols = Cols::new();
        for row in &cells {
            if let Some(var) = row[s] {
                cols.push(1.0, var);
            }
        }
        if let Some(var) = unmet[s] {
            cols.push(1.0, var);
        }
        model.add_constr(Constr {
            name: format!("D{}", s),
            cols,
            typ: ConstrType::Equal,
            rhs: problem.demand[s],
        })?;
    }

    model.set_objective(objective)?;
    Ok(ModelLayout {
        model,
        cells,
        unmet,
    })
}

fn snap(value: f64) -> f64 {
    if value.abs() < SNAP {
        0.0
    } else {
        value
    }
}

fn assemble(
    problem: &SchedulingProblem,
    mode: ScheduleMode,
    layout: &ModelLayout,
    values: &[f64],
) -> Assignment {
    let hours: Vec<Vec<f64>> = layout
        .cells
        .iter()
        .map(|row| {
            row.iter()
                .map(|var| var.map_or(0.0, |v| snap(values[v])))
                .collect()
        })
        .collect();

    let mut cells = Vec::new();
    for (t, tutor) in problem.tutors.iter().enumerate() {
        for (s, subject) in problem.subjects.iter().enumerate() {
            let h = hours[t][s];
            if h > 0.0 {
                cells.push(AssignmentCell {
                    tutor: tutor.name.clone(),
                    subject: subject.name.clone(),
                    hours: h,
                    cost: h * tutor.hourly_cost,
                });
            }
        }
    }

    let tutor_loads = problem
        .tutors
        .iter()
        .zip(&hours)
        .map(|(tutor, row)| {
            let assigned_hours: f64 = row.iter().sum();
            TutorLoad {
                tutor: tutor.name.clone(),
                assigned_hours,
                capacity_hours: tutor.capacity_hours,
                utilization: tutor
                    .capacity_hours
                    .filter(|c| *c > 0.0)
                    .map(|c| assigned_hours / c),
            }
        })
        .collect();

    let subject_coverage: Vec<SubjectCoverage> = problem
        .subjects
        .iter()
        .enumerate()
        .map(|(s, subject)| {
            let covered_hours: f64 = hours.iter().map(|row| row[s]).sum();
            let unmet_hours = layout.unmet[s].map_or(0.0, |v| snap(values[v]));
            SubjectCoverage {
                subject: subject.name.clone(),
                demand_hours: problem.demand[s],
                covered_hours,
                unmet_hours,
            }
        })
        .collect();

    Assignment {
        mode,
        total_hours: cells.iter().map(|c| c.hours).sum(),
        total_cost: cells.iter().map(|c| c.cost).sum(),
        total_unmet_hours: subject_coverage.iter().map(|c| c.unmet_hours).sum(),
        hours,
        cells,
        tutor_loads,
        subject_coverage,
    }
}
