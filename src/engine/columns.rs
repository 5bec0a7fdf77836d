use tracing::debug;

use crate::error::{EditorError, Result};
use crate::models::step::DEFAULT_CASE_NO;
use crate::models::{next_case_no, Scenario, Side, Step, TestCase};

/// Operación sobre una columna, aplicada a todos los pasos de un escenario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnOp {
    /// Añade una columna vacía al final.
    Add { side: Side },
    /// Elimina la columna en `index`.
    Remove { side: Side, index: usize },
    /// Mueve la columna de `from` a `to` conservando el orden del resto.
    Move { side: Side, from: usize, to: usize },
    /// Cambia el nombre de la clave en `index`; los valores no cambian.
    Rename { side: Side, index: usize, name: String },
}

impl ColumnOp {
    pub fn side(&self) -> Side {
        match self {
            ColumnOp::Add { side }
            | ColumnOp::Remove { side, .. }
            | ColumnOp::Move { side, .. }
            | ColumnOp::Rename { side, .. } => *side,
        }
    }
}

fn check_index(side: Side, index: usize, width: usize) -> Result<()> {
    if index < width {
        return Ok(());
    }
    Err(EditorError::OutOfRange {
        what: match side {
            Side::Request => "columna de solicitud",
            Side::Expected => "columna esperada",
        },
        index,
        len: width,
    })
}

/// Aplica `op` a todos los pasos del escenario o a ninguno.
///
/// Todas las comprobaciones se hacen antes de tocar el primer paso.
pub fn apply_to_scenario(scenario: &mut Scenario, scenario_idx: usize, op: &ColumnOp) -> Result<()> {
    let side = op.side();
    let width = scenario.schema_width(scenario_idx, side)?;

    match op {
        ColumnOp::Add { .. } => {
            for step in &mut scenario.steps {
                let (keys, values) = step.columns_mut(side);
                keys.push(String::new());
                values.push(String::new());
            }
        }
        ColumnOp::Remove { index, .. } => {
            check_index(side, *index, width)?;
            for step in &mut scenario.steps {
                let (keys, values) = step.columns_mut(side);
                keys.remove(*index);
                values.remove(*index);
            }
        }
        ColumnOp::Move { from, to, .. } => {
            check_index(side, *from, width)?;
            check_index(side, *to, width)?;
            if from == to {
                return Ok(());
            }
            for step in &mut scenario.steps {
                let (keys, values) = step.columns_mut(side);
                let key = keys.remove(*from);
                keys.insert(*to, key);
                let value = values.remove(*from);
                values.insert(*to, value);
            }
        }
        ColumnOp::Rename { index, name, .. } => {
            check_index(side, *index, width)?;
            for step in &mut scenario.steps {
                let (keys, _) = step.columns_mut(side);
                keys[*index] = name.clone();
            }
        }
    }

    debug!(scenario = scenario_idx, ?op, "column operation applied");
    Ok(())
}

/// Devuelve una copia del caso con `op` aplicada al escenario indicado.
pub fn apply_column_op(case: &TestCase, scenario_idx: usize, op: &ColumnOp) -> Result<TestCase> {
    let mut next = case.clone();
    apply_to_scenario(next.scenario_mut(scenario_idx)?, scenario_idx, op)?;
    Ok(next)
}

/// Paso que se añadiría al final del escenario.
///
/// Al copiar del último paso se heredan sus claves y su prioridad con los
/// valores vacíos; si su identificador no admite un sucesor de cuatro
/// dígitos se usa "0001". Sin copia, o en un escenario vacío, se usa el
/// esquema por defecto, que sólo se admite si el escenario ya lo tiene.
pub fn new_step_for(scenario: &Scenario, scenario_idx: usize, copy_from_last: bool) -> Result<Step> {
    let Some(last) = scenario.steps.last() else {
        return Ok(Step::default());
    };
    if copy_from_last {
        let case_no = next_case_no(&last.case_no).unwrap_or_else(|| DEFAULT_CASE_NO.to_string());
        return Ok(last.blank_copy(case_no));
    }

    let step = Step::default();
    if scenario.header(Side::Request) != step.keys.as_slice()
        || scenario.header(Side::Expected) != step.expected_keys.as_slice()
    {
        return Err(EditorError::SchemaMismatch {
            scenario: scenario_idx,
            step: scenario.steps.len(),
            reason: "el esquema por defecto no coincide con las columnas del escenario".into(),
        });
    }
    Ok(step)
}

/// Devuelve una copia del caso con un paso más al final del escenario.
pub fn append_step(case: &TestCase, scenario_idx: usize, copy_from_last: bool) -> Result<TestCase> {
    let mut next = case.clone();
    let scenario = next.scenario_mut(scenario_idx)?;
    let step = new_step_for(scenario, scenario_idx, copy_from_last)?;
    debug!(scenario = scenario_idx, case_no = %step.case_no, "step appended");
    scenario.steps.push(step);
    Ok(next)
}

/// Devuelve una copia del caso sin el paso indicado. Los identificadores de
/// los pasos restantes no se renumeran.
pub fn remove_step(case: &TestCase, scenario_idx: usize, step_idx: usize) -> Result<TestCase> {
    let mut next = case.clone();
    let scenario = next.scenario_mut(scenario_idx)?;
    if step_idx >= scenario.steps.len() {
        return Err(EditorError::InvalidStep {
            scenario: scenario_idx,
            step: step_idx,
        });
    }
    scenario.steps.remove(step_idx);
    debug!(scenario = scenario_idx, step = step_idx, "step removed");
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;

    fn sample_case() -> TestCase {
        let mut first = Step::default();
        first.values = vec!["4111".into(), "1".into(), "5411".into(), "100".into()];
        let mut second = first.clone();
        second.case_no = "0002".into();
        second.values[3] = "200".into();

        let scenario = Scenario {
            name: "Compra".into(),
            steps: vec![first, second],
        };

        let mut case = TestCase::new("Autorización", "");
        case.scenarios.push(scenario);
        case
    }

    #[test]
    fn test_add_column_extends_every_step() {
        let case = sample_case();
        let next = apply_column_op(&case, 0, &ColumnOp::Add { side: Side::Expected }).unwrap();

        for (before, after) in case.scenarios[0].steps.iter().zip(&next.scenarios[0].steps) {
            assert_eq!(after.expected_keys.len(), before.expected_keys.len() + 1);
            assert_eq!(after.expected_keys.last().map(String::as_str), Some(""));
            assert_eq!(after.expected_values.last().map(String::as_str), Some(""));
            assert_eq!(after.expected_keys[..3], before.expected_keys[..]);
            assert_eq!(after.keys, before.keys);
        }
    }

    #[test]
    fn test_remove_column() {
        let case = sample_case();
        let next = apply_column_op(&case, 0, &ColumnOp::Remove { side: Side::Request, index: 1 })
            .unwrap();
        for step in &next.scenarios[0].steps {
            assert_eq!(step.keys, vec!["bin", "wcc", "amount"]);
            assert_eq!(step.values.len(), 3);
        }
        assert_eq!(next.scenarios[0].steps[1].values[2], "200");
    }

    #[test]
    fn test_remove_column_out_of_range_leaves_case_untouched() {
        let case = sample_case();
        let result = apply_column_op(&case, 0, &ColumnOp::Remove { side: Side::Expected, index: 3 });
        assert!(matches!(
            result,
            Err(EditorError::OutOfRange { index: 3, len: 3, .. })
        ));
        assert_eq!(case, sample_case());
    }

    #[test]
    fn test_remove_every_column_is_allowed() {
        let mut case = sample_case();
        for _ in 0..3 {
            case = apply_column_op(&case, 0, &ColumnOp::Remove { side: Side::Expected, index: 0 })
                .unwrap();
        }
        assert!(case.scenarios[0].steps.iter().all(|s| s.expected_keys.is_empty()));
        assert!(case.validate_schema().is_ok());
    }

    #[test]
    fn test_move_column_is_stable() {
        let case = sample_case();
        let next = apply_column_op(
            &case,
            0,
            &ColumnOp::Move { side: Side::Request, from: 3, to: 0 },
        )
        .unwrap();
        let step = &next.scenarios[0].steps[1];
        assert_eq!(step.keys, vec!["amount", "bin", "chkDgt", "wcc"]);
        assert_eq!(step.values, vec!["200", "4111", "1", "5411"]);

        let next = apply_column_op(
            &case,
            0,
            &ColumnOp::Move { side: Side::Request, from: 0, to: 2 },
        )
        .unwrap();
        assert_eq!(next.scenarios[0].steps[0].keys, vec!["chkDgt", "wcc", "bin", "amount"]);
    }

    #[test]
    fn test_move_column_rejects_bad_target() {
        let case = sample_case();
        let result = apply_column_op(
            &case,
            0,
            &ColumnOp::Move { side: Side::Request, from: 0, to: 4 },
        );
        assert!(matches!(result, Err(EditorError::OutOfRange { index: 4, .. })));

        let result = apply_column_op(
            &case,
            0,
            &ColumnOp::Move { side: Side::Request, from: 4, to: 0 },
        );
        assert!(matches!(result, Err(EditorError::OutOfRange { index: 4, len: 4, .. })));
        assert_eq!(case, sample_case());
    }

    #[test]
    fn test_rename_column_out_of_range_leaves_case_untouched() {
        let case = sample_case();
        let op = ColumnOp::Rename {
            side: Side::Expected,
            index: 3,
            name: "extra".into(),
        };
        let result = apply_column_op(&case, 0, &op);
        assert!(matches!(result, Err(EditorError::OutOfRange { index: 3, len: 3, .. })));
        assert_eq!(case, sample_case());
    }

    #[test]
    fn test_rename_column_keeps_values() {
        let case = sample_case();
        let op = ColumnOp::Rename {
            side: Side::Request,
            index: 3,
            name: "monto".into(),
        };
        let next = apply_column_op(&case, 0, &op).unwrap();
        for (before, after) in case.scenarios[0].steps.iter().zip(&next.scenarios[0].steps) {
            assert_eq!(after.keys[3], "monto");
            assert_eq!(after.values, before.values);
        }

        let op = ColumnOp::Rename {
            side: Side::Request,
            index: 0,
            name: String::new(),
        };
        assert!(apply_column_op(&case, 0, &op).is_ok());
    }

    #[test]
    fn test_column_op_refuses_misaligned_scenario() {
        let mut case = sample_case();
        case.scenarios[0].steps[1].values.pop();
        let result = apply_column_op(&case, 0, &ColumnOp::Add { side: Side::Request });
        assert!(matches!(result, Err(EditorError::SchemaMismatch { step: 1, .. })));
        assert_eq!(case.scenarios[0].steps[0].keys.len(), 4);
    }

    #[test]
    fn test_column_op_on_missing_scenario() {
        let case = sample_case();
        let result = apply_column_op(&case, 5, &ColumnOp::Add { side: Side::Request });
        assert!(matches!(result, Err(EditorError::InvalidScenario(5))));
    }

    #[test]
    fn test_append_step_copies_last() {
        let mut case = sample_case();
        case.scenarios[0].steps[1].case_no = "0007".into();
        case.scenarios[0].steps[1].priority = Priority::High;

        let next = append_step(&case, 0, true).unwrap();
        let step = next.scenarios[0].steps.last().unwrap();
        assert_eq!(step.case_no, "0008");
        assert_eq!(step.priority, Priority::High);
        assert_eq!(step.keys, case.scenarios[0].steps[1].keys);
        assert_eq!(step.values, vec![""; 4]);
        assert_eq!(step.expected_values, vec![""; 3]);
    }

    #[test]
    fn test_append_step_id_fallback() {
        let mut case = sample_case();
        case.scenarios[0].steps[1].case_no = "9999".into();
        case = apply_column_op(&case, 0, &ColumnOp::Add { side: Side::Request }).unwrap();

        let next = append_step(&case, 0, true).unwrap();
        let step = next.scenarios[0].steps.last().unwrap();
        assert_eq!(step.case_no, "0001");
        assert_eq!(step.keys.len(), 5);
        assert!(next.validate_schema().is_ok());
    }

    #[test]
    fn test_append_step_without_copy_uses_default() {
        let mut case = TestCase::new("t", "");
        case.scenarios.push(Scenario::default());

        let next = append_step(&case, 0, true).unwrap();
        assert_eq!(next.scenarios[0].steps, vec![Step::default()]);

        let next = append_step(&next, 0, false).unwrap();
        assert_eq!(next.scenarios[0].steps[1], Step::default());
    }

    #[test]
    fn test_append_default_step_refuses_custom_schema() {
        let case = sample_case();
        let next = append_step(&case, 0, false).unwrap();
        assert_eq!(next.scenarios[0].steps.len(), 3);
        assert!(next.validate_for_save().is_ok());

        let widened = apply_column_op(&case, 0, &ColumnOp::Add { side: Side::Request }).unwrap();
        assert!(matches!(
            append_step(&widened, 0, false),
            Err(EditorError::SchemaMismatch { scenario: 0, step: 2, .. })
        ));

        let renamed = apply_column_op(
            &case,
            0,
            &ColumnOp::Rename {
                side: Side::Request,
                index: 3,
                name: "monto".into(),
            },
        )
        .unwrap();
        assert!(matches!(
            append_step(&renamed, 0, false),
            Err(EditorError::SchemaMismatch { .. })
        ));
        assert!(renamed.scenarios[0].has_uniform_keys());

        // copiando del último paso el esquema propio sigue siendo válido
        let next = append_step(&widened, 0, true).unwrap();
        assert!(next.validate_for_save().is_ok());
    }

    #[test]
    fn test_remove_step_keeps_ids() {
        let case = append_step(&sample_case(), 0, true).unwrap();
        let next = remove_step(&case, 0, 1).unwrap();
        let ids: Vec<_> = next.scenarios[0].steps.iter().map(|s| s.case_no.as_str()).collect();
        assert_eq!(ids, vec!["0001", "0003"]);

        assert!(matches!(
            remove_step(&case, 0, 3),
            Err(EditorError::InvalidStep { scenario: 0, step: 3 })
        ));
    }
}
