use serde::{Deserialize, Serialize};

use crate::error::{EditorError, Result};
use crate::models::{Side, Step};

/// Grupo ordenado de pasos que comparten un mismo esquema de columnas.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct Scenario {
    #[serde(rename = "scenarioName", default)]
    pub name: String,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    /// Escenario nuevo con un único paso por defecto.
    pub fn with_default_step(name: impl Into<String>) -> Self {
        Scenario {
            name: name.into(),
            steps: vec![Step::default()],
        }
    }

    /// Claves de cabecera de un lado, tomadas del primer paso.
    pub fn header(&self, side: Side) -> &[String] {
        self.steps.first().map(|s| s.keys(side)).unwrap_or(&[])
    }

    /// Número de columnas de un lado, comprobando que todos los pasos tengan
    /// claves y valores alineados y la misma anchura.
    pub fn schema_width(&self, scenario_idx: usize, side: Side) -> Result<usize> {
        let mut expected_width = None;
        for (step_idx, step) in self.steps.iter().enumerate() {
            let width = step.width(side).ok_or_else(|| EditorError::SchemaMismatch {
                scenario: scenario_idx,
                step: step_idx,
                reason: format!(
                    "{} tiene {} claves y {} valores",
                    side,
                    step.keys(side).len(),
                    step.values(side).len()
                ),
            })?;
            match expected_width {
                None => expected_width = Some(width),
                Some(w) if w != width => {
                    return Err(EditorError::SchemaMismatch {
                        scenario: scenario_idx,
                        step: step_idx,
                        reason: format!("{} tiene {} columnas y el primer paso {}", side, width, w),
                    });
                }
                Some(_) => {}
            }
        }
        Ok(expected_width.unwrap_or(0))
    }

    /// Comprueba la alineación de ambos lados.
    pub fn validate_schema(&self, scenario_idx: usize) -> Result<()> {
        self.schema_width(scenario_idx, Side::Request)?;
        self.schema_width(scenario_idx, Side::Expected)?;
        Ok(())
    }

    /// `true` si todos los pasos repiten exactamente las claves del primero.
    pub fn has_uniform_keys(&self) -> bool {
        let request = self.header(Side::Request);
        let expected = self.header(Side::Expected);
        self.steps
            .iter()
            .all(|s| s.keys == request && s.expected_keys == expected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_width_of_default_scenario() {
        let scenario = Scenario::with_default_step("s");
        assert_eq!(scenario.schema_width(0, Side::Request).unwrap(), 4);
        assert_eq!(scenario.schema_width(0, Side::Expected).unwrap(), 3);
        assert!(scenario.has_uniform_keys());
    }

    #[test]
    fn test_empty_scenario_has_zero_width() {
        let scenario = Scenario::default();
        assert_eq!(scenario.schema_width(2, Side::Request).unwrap(), 0);
        assert!(scenario.header(Side::Expected).is_empty());
    }

    #[test]
    fn test_schema_width_detects_misaligned_step() {
        let mut scenario = Scenario::with_default_step("s");
        scenario.steps.push(Step::default());
        scenario.steps[1].values.pop();

        let result = scenario.schema_width(3, Side::Request);
        assert!(matches!(
            result,
            Err(EditorError::SchemaMismatch { scenario: 3, step: 1, .. })
        ));
        assert!(scenario.schema_width(3, Side::Expected).is_ok());
    }

    #[test]
    fn test_schema_width_detects_uneven_steps() {
        let mut scenario = Scenario::with_default_step("s");
        let mut wide = Step::default();
        wide.keys.push("extra".into());
        wide.values.push(String::new());
        scenario.steps.push(wide);

        assert!(matches!(
            scenario.validate_schema(0),
            Err(EditorError::SchemaMismatch { step: 1, .. })
        ));
    }

    #[test]
    fn test_scenario_name_wire_field() {
        let json = r#"{"scenarioName":"Compra","steps":[]}"#;
        let scenario: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.name, "Compra");
        let back = serde_json::to_value(&scenario).unwrap();
        assert_eq!(back["scenarioName"], "Compra");
    }
}
