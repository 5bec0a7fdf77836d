use serde::{Deserialize, Serialize};

use crate::error::{EditorError, Result};
use crate::models::{Scenario, Step};

/// Caso de prueba: título, nota libre y escenarios.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct TestCase {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

impl TestCase {
    pub fn new(title: impl Into<String>, note: impl Into<String>) -> Self {
        TestCase {
            title: title.into(),
            note: note.into(),
            scenarios: Vec::new(),
        }
    }

    pub fn scenario(&self, scenario_idx: usize) -> Result<&Scenario> {
        self.scenarios
            .get(scenario_idx)
            .ok_or(EditorError::InvalidScenario(scenario_idx))
    }

    pub fn scenario_mut(&mut self, scenario_idx: usize) -> Result<&mut Scenario> {
        self.scenarios
            .get_mut(scenario_idx)
            .ok_or(EditorError::InvalidScenario(scenario_idx))
    }

    pub fn step_mut(&mut self, scenario_idx: usize, step_idx: usize) -> Result<&mut Step> {
        self.scenario_mut(scenario_idx)?
            .steps
            .get_mut(step_idx)
            .ok_or(EditorError::InvalidStep {
                scenario: scenario_idx,
                step: step_idx,
            })
    }

    /// Número total de pasos en todos los escenarios.
    pub fn step_count(&self) -> usize {
        self.scenarios.iter().map(|s| s.steps.len()).sum()
    }

    /// Comprueba la alineación de claves y valores de todos los escenarios.
    pub fn validate_schema(&self) -> Result<()> {
        for (idx, scenario) in self.scenarios.iter().enumerate() {
            scenario.validate_schema(idx)?;
        }
        Ok(())
    }

    /// Comprobaciones previas a guardar: título obligatorio y esquema válido.
    pub fn validate_for_save(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(EditorError::MissingTitle);
        }
        self.validate_schema()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_for_save_requires_title() {
        let case = TestCase::new("   ", "nota");
        assert!(matches!(case.validate_for_save(), Err(EditorError::MissingTitle)));

        let case = TestCase::new("Compras", "");
        assert!(case.validate_for_save().is_ok());
    }

    #[test]
    fn test_step_lookup_errors() {
        let mut case = TestCase::new("t", "");
        case.scenarios.push(Scenario::with_default_step("s"));

        assert!(case.step_mut(0, 0).is_ok());
        assert!(matches!(
            case.step_mut(0, 1),
            Err(EditorError::InvalidStep { scenario: 0, step: 1 })
        ));
        assert!(matches!(case.step_mut(4, 0), Err(EditorError::InvalidScenario(4))));
    }

    #[test]
    fn test_load_collaborator_shape() {
        let json = r#"{
            "title": "Autorización",
            "scenarios": [{
                "scenarioName": "Escenario 1",
                "steps": [{
                    "caseNo": "0001",
                    "priority": "높음",
                    "keys": ["bin", "amount"],
                    "values": ["411111", "100"],
                    "expectedKeys": ["responseCode"],
                    "expectedValues": ["00"]
                }]
            }]
        }"#;
        let case: TestCase = serde_json::from_str(json).unwrap();
        assert_eq!(case.note, "");
        assert_eq!(case.step_count(), 1);
        assert_eq!(case.scenarios[0].steps[0].priority, crate::models::Priority::High);
        assert!(case.validate_schema().is_ok());
    }
}
