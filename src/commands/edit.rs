use std::path::Path;

use anyhow::{Context, Result};
use colored::*;

use test_case_editor::engine::{
    add_scenario, append_step, apply_column_op, remove_scenario, remove_step, rename_scenario,
    set_step_id, set_step_priority, set_value, ColumnOp,
};
use test_case_editor::models::{Priority, Side, TestCase};
use test_case_editor::utils::{load_case, save_case};

/// Acciones sobre escenarios
#[derive(Debug, Clone)]
pub enum ScenarioEdit {
    Add { name: Option<String> },
    Remove { index: usize },
    Rename { index: usize, name: String },
}

/// Acciones sobre pasos
#[derive(Debug, Clone)]
pub enum StepEdit {
    Add { scenario: usize, copy_from_last: bool },
    Remove { scenario: usize, step: usize },
    SetId { scenario: usize, step: usize, id: String },
    SetPriority { scenario: usize, step: usize, priority: Priority },
    SetValue { scenario: usize, step: usize, side: Side, column: usize, value: String },
}

/// Carga el caso, aplica la edición y lo guarda sólo si tuvo éxito
fn apply_and_save<F>(file_path: &Path, edit: F) -> Result<TestCase>
where
    F: FnOnce(&TestCase) -> test_case_editor::Result<TestCase>,
{
    let case = load_case(file_path)
        .with_context(|| format!("no se pudo cargar {}", file_path.display()))?;
    let next = edit(&case)?;
    save_case(file_path, &next)
        .with_context(|| format!("no se pudo guardar {}", file_path.display()))?;
    Ok(next)
}

pub fn edit_scenario(file_path: &Path, action: ScenarioEdit) -> Result<()> {
    let message = match &action {
        ScenarioEdit::Add { .. } => "Escenario añadido.".to_string(),
        ScenarioEdit::Remove { index } => format!("Escenario {} eliminado.", index),
        ScenarioEdit::Rename { index, name } => format!("Escenario {} renombrado a '{}'.", index, name),
    };

    apply_and_save(file_path, |case| match action {
        ScenarioEdit::Add { name } => Ok(add_scenario(case, name.as_deref())),
        ScenarioEdit::Remove { index } => remove_scenario(case, index),
        ScenarioEdit::Rename { index, name } => rename_scenario(case, index, &name),
    })?;

    println!("{}", message.green());
    Ok(())
}

pub fn edit_step(file_path: &Path, action: StepEdit) -> Result<()> {
    let case = apply_and_save(file_path, |case| match &action {
        StepEdit::Add {
            scenario,
            copy_from_last,
        } => append_step(case, *scenario, *copy_from_last),
        StepEdit::Remove { scenario, step } => remove_step(case, *scenario, *step),
        StepEdit::SetId { scenario, step, id } => set_step_id(case, *scenario, *step, id),
        StepEdit::SetPriority {
            scenario,
            step,
            priority,
        } => set_step_priority(case, *scenario, *step, *priority),
        StepEdit::SetValue {
            scenario,
            step,
            side,
            column,
            value,
        } => set_value(case, *scenario, *step, *side, *column, value),
    })?;

    let message = match action {
        StepEdit::Add { scenario, .. } => {
            let id = case
                .scenarios
                .get(scenario)
                .and_then(|s| s.steps.last())
                .map(|s| s.case_no.clone())
                .unwrap_or_default();
            format!("Paso {} añadido al escenario {}.", id, scenario)
        }
        StepEdit::Remove { scenario, step } => {
            format!("Paso {} eliminado del escenario {}.", step, scenario)
        }
        _ => "Paso actualizado.".to_string(),
    };
    println!("{}", message.green());
    Ok(())
}

pub fn edit_column(file_path: &Path, scenario: usize, op: ColumnOp) -> Result<()> {
    apply_and_save(file_path, |case| apply_column_op(case, scenario, &op))?;

    let message = match &op {
        ColumnOp::Add { side } => format!("Columna {} añadida.", side),
        ColumnOp::Remove { side, index } => format!("Columna {} {} eliminada.", side, index),
        ColumnOp::Move { side, from, to } => format!("Columna {} movida de {} a {}.", side, from, to),
        ColumnOp::Rename { side, index, name } => {
            format!("Columna {} {} renombrada a '{}'.", side, index, name)
        }
    };
    println!("{}", message.green());
    Ok(())
}
