//! Sesión de edición: un caso más la selección efímera de pasos.

use crate::engine::{apply_batch_update, apply_column_op, append_step, remove_step, BatchRequest, ColumnOp};
use crate::error::Result;
use crate::models::{SelectionSet, TestCase};

#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    case: TestCase,
    selection: SelectionSet,
}

impl EditorSession {
    /// Abre una sesión con la selección vacía.
    pub fn new(case: TestCase) -> Self {
        EditorSession {
            case,
            selection: SelectionSet::new(),
        }
    }

    pub fn case(&self) -> &TestCase {
        &self.case
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn into_case(self) -> TestCase {
        self.case
    }

    pub fn toggle(&mut self, scenario: usize, step: usize, shift_held: bool) {
        self.selection.toggle(scenario, step, shift_held);
    }

    /// Sustituye el caso por el resultado de `edit` sólo si tiene éxito. La
    /// selección no se ajusta.
    pub fn edit<F>(&mut self, edit: F) -> Result<()>
    where
        F: FnOnce(&TestCase) -> Result<TestCase>,
    {
        self.case = edit(&self.case)?;
        Ok(())
    }

    pub fn apply_column_op(&mut self, scenario_idx: usize, op: &ColumnOp) -> Result<()> {
        self.edit(|case| apply_column_op(case, scenario_idx, op))
    }

    pub fn append_step(&mut self, scenario_idx: usize, copy_from_last: bool) -> Result<()> {
        self.edit(|case| append_step(case, scenario_idx, copy_from_last))
    }

    pub fn remove_step(&mut self, scenario_idx: usize, step_idx: usize) -> Result<()> {
        self.edit(|case| remove_step(case, scenario_idx, step_idx))
    }

    /// Aplica una actualización masiva y, si tiene éxito, vacía la
    /// selección. Devuelve el número de pasos actualizados.
    pub fn apply_batch(&mut self, request: &BatchRequest) -> Result<usize> {
        let outcome = apply_batch_update(&self.case, &self.selection, request)?;
        self.case = outcome.case;
        self.selection.clear();
        Ok(outcome.updated_count)
    }

    pub fn cancel_batch(&mut self) {
        self.selection.clear();
    }
}
