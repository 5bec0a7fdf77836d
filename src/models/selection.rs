use std::collections::BTreeSet;

/// Posición de un paso dentro de un caso.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StepRef {
    pub scenario: usize,
    pub step: usize,
}

impl StepRef {
    pub fn new(scenario: usize, step: usize) -> Self {
        StepRef { scenario, step }
    }
}

/// Pasos elegidos para una actualización masiva.
///
/// Es puramente posicional: no se ajusta cuando el caso cambia de forma, y
/// nunca se guarda junto al caso.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    selected: BTreeSet<StepRef>,
    last_touched: Option<StepRef>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clic sobre un paso.
    ///
    /// Un clic normal alterna ese paso y lo toma como ancla. Con shift, y
    /// sólo si el ancla está en el mismo escenario, marca todo el rango entre
    /// el ancla y el paso sin mover el ancla. Un shift-clic en otro escenario
    /// no hace nada.
    pub fn toggle(&mut self, scenario: usize, step: usize, shift_held: bool) {
        let target = StepRef::new(scenario, step);

        if shift_held {
            if let Some(anchor) = self.last_touched {
                if anchor.scenario == scenario {
                    let start = anchor.step.min(step);
                    let end = anchor.step.max(step);
                    for i in start..=end {
                        self.selected.insert(StepRef::new(scenario, i));
                    }
                }
                return;
            }
        }

        if !self.selected.remove(&target) {
            self.selected.insert(target);
        }
        self.last_touched = Some(target);
    }

    /// Vacía la selección y el ancla.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.last_touched = None;
    }

    pub fn is_selected(&self, scenario: usize, step: usize) -> bool {
        self.selected.contains(&StepRef::new(scenario, step))
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn last_touched(&self) -> Option<StepRef> {
        self.last_touched
    }

    /// Pasos seleccionados en orden ascendente (escenario, paso).
    pub fn iter(&self) -> impl Iterator<Item = StepRef> + '_ {
        self.selected.iter().copied()
    }
}

/// Devuelve una selección nueva tras aplicar un clic.
pub fn toggle_selection(
    selection: &SelectionSet,
    scenario: usize,
    step: usize,
    shift_held: bool,
) -> SelectionSet {
    let mut next = selection.clone();
    next.toggle(scenario, step, shift_held);
    next
}
