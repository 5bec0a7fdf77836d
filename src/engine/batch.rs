use tracing::debug;

use crate::error::{EditorError, Result};
use crate::models::{Priority, SelectionSet, Side, Step, TestCase};

/// Cambio a aplicar sobre todos los pasos seleccionados.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchRequest {
    /// Sobrescribe `target_key` en cada paso que la tenga.
    Basic {
        target_side: Side,
        target_key: String,
        new_value: String,
    },
    /// Igual que `Basic`, pero sólo en los pasos donde `condition_key` vale
    /// exactamente `condition_value`.
    Conditional {
        condition_side: Side,
        condition_key: String,
        condition_value: String,
        target_side: Side,
        target_key: String,
        new_value: String,
    },
    /// Cambia la prioridad de todos los pasos seleccionados.
    Priority { new_priority: Priority },
}

impl BatchRequest {
    /// Campos obligatorios: las claves no pueden estar vacías. Los valores
    /// vacíos son válidos (limpian el campo).
    pub fn validate(&self) -> Result<()> {
        match self {
            BatchRequest::Basic { target_key, .. } => {
                if target_key.trim().is_empty() {
                    return Err(EditorError::InvalidRequest("la clave destino es obligatoria".into()));
                }
            }
            BatchRequest::Conditional {
                condition_key,
                target_key,
                ..
            } => {
                if condition_key.trim().is_empty() || target_key.trim().is_empty() {
                    return Err(EditorError::InvalidRequest(
                        "la clave de condición y la clave destino son obligatorias".into(),
                    ));
                }
            }
            BatchRequest::Priority { .. } => {}
        }
        Ok(())
    }
}

/// Caso resultante y número de pasos efectivamente actualizados.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub case: TestCase,
    pub updated_count: usize,
}

fn condition_holds(step: &Step, side: Side, key: &str, expected: &str) -> bool {
    step.value_of(side, key) == Some(expected)
}

/// Aplica `request` a los pasos seleccionados, en orden (escenario, paso).
///
/// Las posiciones seleccionadas que ya no existen en el caso se ignoran. Si
/// la solicitud falla, no se devuelve ningún caso parcial.
pub fn apply_batch_update(
    case: &TestCase,
    selection: &SelectionSet,
    request: &BatchRequest,
) -> Result<BatchOutcome> {
    request.validate()?;
    if selection.is_empty() {
        return Err(EditorError::InvalidRequest("no hay pasos seleccionados".into()));
    }

    let targets: Vec<_> = selection
        .iter()
        .filter(|r| {
            case.scenarios
                .get(r.scenario)
                .is_some_and(|s| r.step < s.steps.len())
        })
        .collect();

    for r in &targets {
        let step = &case.scenarios[r.scenario].steps[r.step];
        for side in [Side::Request, Side::Expected] {
            if step.width(side).is_none() {
                return Err(EditorError::SchemaMismatch {
                    scenario: r.scenario,
                    step: r.step,
                    reason: format!("claves y valores de {} con distinta longitud", side),
                });
            }
        }
    }

    let mut next = case.clone();
    let mut updated_count = 0;

    for r in &targets {
        let step = next.step_mut(r.scenario, r.step)?;
        let updated = match request {
            BatchRequest::Priority { new_priority } => {
                step.priority = *new_priority;
                true
            }
            BatchRequest::Basic {
                target_side,
                target_key,
                new_value,
            } => step.set_value_of(*target_side, target_key, new_value),
            BatchRequest::Conditional {
                condition_side,
                condition_key,
                condition_value,
                target_side,
                target_key,
                new_value,
            } => {
                condition_holds(step, *condition_side, condition_key, condition_value)
                    && step.set_value_of(*target_side, target_key, new_value)
            }
        };
        if updated {
            updated_count += 1;
        }
    }

    if let BatchRequest::Basic {
        target_side,
        target_key,
        ..
    } = request
    {
        if updated_count == 0 {
            return Err(EditorError::NoMatchingKey {
                side: *target_side,
                key: target_key.clone(),
            });
        }
    }

    debug!(
        selected = selection.len(),
        visited = targets.len(),
        updated = updated_count,
        "batch update applied"
    );

    Ok(BatchOutcome {
        case: next,
        updated_count,
    })
}
