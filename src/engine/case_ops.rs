use tracing::debug;

use crate::error::{EditorError, Result};
use crate::models::{Priority, Scenario, Side, TestCase};

/// Añade un escenario con un paso por defecto. Sin nombre se usa
/// "Scenario N".
pub fn add_scenario(case: &TestCase, name: Option<&str>) -> TestCase {
    let mut next = case.clone();
    let name = match name {
        Some(n) => n.to_string(),
        None => format!("Scenario {}", next.scenarios.len() + 1),
    };
    debug!(name = %name, "scenario added");
    next.scenarios.push(Scenario::with_default_step(name));
    next
}

pub fn remove_scenario(case: &TestCase, scenario_idx: usize) -> Result<TestCase> {
    let mut next = case.clone();
    if scenario_idx >= next.scenarios.len() {
        return Err(EditorError::InvalidScenario(scenario_idx));
    }
    next.scenarios.remove(scenario_idx);
    debug!(scenario = scenario_idx, "scenario removed");
    Ok(next)
}

pub fn rename_scenario(case: &TestCase, scenario_idx: usize, name: &str) -> Result<TestCase> {
    let mut next = case.clone();
    next.scenario_mut(scenario_idx)?.name = name.to_string();
    Ok(next)
}

pub fn set_step_id(case: &TestCase, scenario_idx: usize, step_idx: usize, case_no: &str) -> Result<TestCase> {
    let mut next = case.clone();
    next.step_mut(scenario_idx, step_idx)?.case_no = case_no.to_string();
    Ok(next)
}

pub fn set_step_priority(
    case: &TestCase,
    scenario_idx: usize,
    step_idx: usize,
    priority: Priority,
) -> Result<TestCase> {
    let mut next = case.clone();
    next.step_mut(scenario_idx, step_idx)?.priority = priority;
    Ok(next)
}

/// Sobrescribe una celda. Las claves sólo cambian mediante
/// `ColumnOp::Rename`, para que el esquema siga siendo el mismo en todo el
/// escenario.
pub fn set_value(
    case: &TestCase,
    scenario_idx: usize,
    step_idx: usize,
    side: Side,
    column: usize,
    value: &str,
) -> Result<TestCase> {
    let mut next = case.clone();
    let step = next.step_mut(scenario_idx, step_idx)?;
    let width = step.width(side).ok_or_else(|| EditorError::SchemaMismatch {
        scenario: scenario_idx,
        step: step_idx,
        reason: format!("claves y valores de {} con distinta longitud", side),
    })?;
    let (_, values) = step.columns_mut(side);
    let cell = values.get_mut(column).ok_or(EditorError::OutOfRange {
        what: "columna",
        index: column,
        len: width,
    })?;
    *cell = value.to_string();
    Ok(next)
}
