use std::fmt::Display;

use crate::error::{ErrorContext, SimError, SimResult};

/// Minimization problem over non-negative variables.
#[derive(Debug, Clone)]
pub struct LpModel {
    name: String,
    vars: Vec<Var>,
    constrs: Vec<Constr>,
    objective: Cols,
}

#[derive(Debug, Clone)]
struct Var {
    name: String,
    coes: Vec<(usize, f64)>,
    obj_coe: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstrType {
    Equal,
    LessEqual,
    GreaterEqual,
}

/// Sparse row: `(coefficient, variable index)` pairs.
#[derive(Debug, Clone, Default)]
pub struct Cols(Vec<(f64, usize)>);

#[derive(Debug, Clone)]
pub struct Constr {
    pub name: String,
    pub cols: Cols,
    pub typ: ConstrType,
    pub rhs: f64,
}

impl Display for LpModel {
    /// Free-format MPS, handy for replaying a model in another solver.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:14}{}", "NAME", self.name)?;

        const OBJ: &str = "OBJ";
        const EMPTY: &str = "";
        const IGNORED: &str = "RHS";

        writeln!(f, "ROWS")?;
        writeln!(f, "{EMPTY:1}{:3}{OBJ}", "N")?;
        for constr in &self.constrs {
            let typ = match &constr.typ {
                ConstrType::Equal => "E",
                ConstrType::LessEqual => "L",
                ConstrType::GreaterEqual => "G",
            };
            writeln!(f, "{EMPTY:1}{typ:3}{}", constr.name)?
        }

        writeln!(f, "COLUMNS")?;
        for var in &self.vars {
            if let Some(coe) = var.obj_coe {
                writeln!(f, "{EMPTY:4}{:10}{OBJ:10}{coe}", var.name)?
            }
            for &(constr_index, coe) in &var.coes {
                let constr_name = &self.constrs[constr_index].name;
                writeln!(f, "{EMPTY:4}{:10}{constr_name:10}{coe}", var.name)?
            }
        }

        writeln!(f, "RHS")?;
        for constr in &self.constrs {
            writeln!(f, "{EMPTY:4}{IGNORED:10}{:10}{}", constr.name, constr.rhs)?
        }

        write!(f, "ENDATA")
    }
}

impl LpModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vars: Default::default(),
            constrs: Default::default(),
            objective: Default::default(),
        }
    }

    /// Add a variable bounded below by zero and return its index.
    pub fn add_var(&mut self, name: impl Into<String>) -> usize {
        let index = self.vars.len();
        self.vars.push(Var {
            name: name.into(),
            coes: Default::default(),
            obj_coe: None,
        });
        index
    }

    pub fn add_constr(&mut self, constr: Constr) -> SimResult<()> {
        if !constr.rhs.is_finite() {
            return Err(model_error(format!(
                "row {} has non-finite right-hand side",
                constr.name
            )));
        }
        for &(coe, var_index) in &constr.cols.0 {
            if var_index >= self.vars.len() {
                return Err(model_error(format!(
                    "row {} references unknown variable {}",
                    constr.name, var_index
                )));
            }
            if !coe.is_finite() {
                return Err(model_error(format!(
                    "row {} has non-finite coefficient",
                    constr.name
                )));
            }
        }
        let index = self.constrs.len();
        for &(coe, var_index) in &constr.cols.0 {
            self.vars[var_index].coes.push((index, coe))
        }
        self.constrs.push(constr);
        Ok(())
    }

    pub fn set_objective(&mut self, objective: Cols) -> SimResult<()> {
        for var in &mut self.vars {
            var.obj_coe = None;
        }
        for &(coe, var_index) in &objective.0 {
            let var = self.vars.get_mut(var_index).ok_or_else(|| {
                model_error(format!("objective references unknown variable {}", var_index))
            })?;
            *var.obj_coe.get_or_insert(0.0) += coe;
        }
        self.objective = objective;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_vars(&self) -> usize {
        self.vars.len()
    }

    pub fn constrs(&self) -> &[Constr] {
        &self.constrs
    }

    /// Dense objective coefficients, one per variable.
    pub fn objective_coefficients(&self) -> Vec<f64> {
        self.vars.iter().map(|v| v.obj_coe.unwrap_or(0.0)).collect()
    }

    /// Evaluate the objective at `values`.
    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.objective.0.iter().map(|&(coe, i)| coe * values[i]).sum()
    }
}

impl Cols {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, coe: f64, var_index: usize) {
        self.0.push((coe, var_index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &(f64, usize)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn model_error(message: String) -> SimError {
    SimError::invalid_input_with_context(message, ErrorContext::new("solver.model"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_model() -> LpModel {
        let mut model = LpModel::new("tiny");
        let x = model.add_var("x");
        let y = model.add_var("y");
        let mut cols = Cols::new();
        cols.push(1.0, x);
        cols.push(1.0, y);
        model
            .add_constr(Constr {
                name: "R1".to_string(),
                cols,
                typ: ConstrType::GreaterEqual,
                rhs: 2.0,
            })
            .unwrap();
        let mut obj = Cols::new();
        obj.push(3.0, x);
        obj.push(1.0, y);
        model.set_objective(obj).unwrap();
        model
    }

    #[test]
    fn test_objective_coefficients() {
        let model = tiny_model();
        assert_eq!(model.num_vars(), 2);
        assert_eq!(model.objective_coefficients(), vec![3.0, 1.0]);
        assert_eq!(model.objective_value(&[1.0, 1.0]), 4.0);
    }

    #[test]
    fn test_rejects_unknown_variable() {
        let mut model = tiny_model();
        let mut cols = Cols::new();
        cols.push(1.0, 7);
        let err = model
            .add_constr(Constr {
                name: "bad".to_string(),
                cols,
                typ: ConstrType::Equal,
                rhs: 0.0,
            })
            .unwrap_err();
        assert!(err.message().contains("unknown variable"));
    }

    #[test]
    fn test_mps_output() {
        let mps = tiny_model().to_string();
        assert!(mps.starts_with("NAME          tiny"));
        assert!(mps.contains(" G  R1"));
        assert!(mps.contains("    x         OBJ       3"));
        assert!(mps.ends_with("ENDATA"));
    }
}
