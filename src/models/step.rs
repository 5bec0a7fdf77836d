use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::Priority;

/// Identificador del primer paso de un escenario.
pub const DEFAULT_CASE_NO: &str = "0001";

/// Claves de solicitud de un paso nuevo sin paso previo que copiar.
pub const DEFAULT_REQUEST_KEYS: [&str; 4] = ["bin", "chkDgt", "wcc", "amount"];

/// Claves de resultado esperado de un paso nuevo sin paso previo que copiar.
pub const DEFAULT_EXPECTED_KEYS: [&str; 3] = ["responseCode", "approvalNumber", "note"];

/// Lado de un paso: datos de solicitud o resultado esperado.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Request,
    Expected,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Request => write!(f, "request"),
            Side::Expected => write!(f, "expected"),
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "request" | "req" | "solicitud" => Ok(Side::Request),
            "expected" | "exp" | "esperado" => Ok(Side::Expected),
            other => Err(format!("lado desconocido: '{}' (use request o expected)", other)),
        }
    }
}

fn default_case_no() -> String {
    DEFAULT_CASE_NO.to_string()
}

/// Una fila de datos de prueba: dos juegos de columnas clave/valor alineadas
/// por posición.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    #[serde(default = "default_case_no")]
    pub case_no: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub expected_keys: Vec<String>,
    #[serde(default)]
    pub expected_values: Vec<String>,
}

impl Default for Step {
    /// Paso con el esquema por defecto y todos los valores vacíos.
    fn default() -> Self {
        Step {
            case_no: default_case_no(),
            priority: Priority::Normal,
            keys: DEFAULT_REQUEST_KEYS.iter().map(|k| k.to_string()).collect(),
            values: vec![String::new(); DEFAULT_REQUEST_KEYS.len()],
            expected_keys: DEFAULT_EXPECTED_KEYS.iter().map(|k| k.to_string()).collect(),
            expected_values: vec![String::new(); DEFAULT_EXPECTED_KEYS.len()],
        }
    }
}

impl Step {
    pub fn keys(&self, side: Side) -> &[String] {
        match side {
            Side::Request => &self.keys,
            Side::Expected => &self.expected_keys,
        }
    }

    pub fn values(&self, side: Side) -> &[String] {
        match side {
            Side::Request => &self.values,
            Side::Expected => &self.expected_values,
        }
    }

    /// Claves y valores de un lado, mutables a la vez.
    pub fn columns_mut(&mut self, side: Side) -> (&mut Vec<String>, &mut Vec<String>) {
        match side {
            Side::Request => (&mut self.keys, &mut self.values),
            Side::Expected => (&mut self.expected_keys, &mut self.expected_values),
        }
    }

    /// Número de columnas de un lado, si claves y valores están alineados.
    pub fn width(&self, side: Side) -> Option<usize> {
        let keys = self.keys(side).len();
        (keys == self.values(side).len()).then_some(keys)
    }

    pub fn is_aligned(&self) -> bool {
        self.width(Side::Request).is_some() && self.width(Side::Expected).is_some()
    }

    /// Posición de la primera clave igual a `key`.
    pub fn position_of(&self, side: Side, key: &str) -> Option<usize> {
        self.keys(side).iter().position(|k| k == key)
    }

    /// Valor de la primera columna llamada `key`.
    pub fn value_of(&self, side: Side, key: &str) -> Option<&str> {
        self.position_of(side, key)
            .and_then(|i| self.values(side).get(i))
            .map(String::as_str)
    }

    /// Sobrescribe el valor de la primera columna llamada `key`.
    /// Devuelve `false` si la clave no existe en este paso.
    pub fn set_value_of(&mut self, side: Side, key: &str, value: &str) -> bool {
        let Some(index) = self.position_of(side, key) else {
            return false;
        };
        let (_, values) = self.columns_mut(side);
        match values.get_mut(index) {
            Some(cell) => {
                *cell = value.to_string();
                true
            }
            None => false,
        }
    }

    /// Paso nuevo que hereda las claves y la prioridad de `self` con todos
    /// los valores vacíos.
    pub fn blank_copy(&self, case_no: String) -> Step {
        Step {
            case_no,
            priority: self.priority,
            keys: self.keys.clone(),
            values: vec![String::new(); self.keys.len()],
            expected_keys: self.expected_keys.clone(),
            expected_values: vec![String::new(); self.expected_keys.len()],
        }
    }
}

/// Siguiente identificador de paso: el anterior más uno, con cuatro dígitos.
///
/// Devuelve `None` si el identificador no es numérico o si el siguiente no
/// cabe en cuatro dígitos.
pub fn next_case_no(previous: &str) -> Option<String> {
    if previous.is_empty() || !previous.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let next = previous.parse::<u32>().ok()?.checked_add(1)?;
    (next <= 9999).then(|| format!("{:04}", next))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_step_schema() {
        let step = Step::default();
        assert_eq!(step.case_no, "0001");
        assert_eq!(step.priority, Priority::Normal);
        assert_eq!(step.keys, vec!["bin", "chkDgt", "wcc", "amount"]);
        assert_eq!(step.expected_keys, vec!["responseCode", "approvalNumber", "note"]);
        assert!(step.values.iter().all(String::is_empty));
        assert!(step.is_aligned());
    }

    #[test]
    fn test_next_case_no() {
        assert_eq!(next_case_no("0007").as_deref(), Some("0008"));
        assert_eq!(next_case_no("0099").as_deref(), Some("0100"));
        assert_eq!(next_case_no("7").as_deref(), Some("0008"));
        assert_eq!(next_case_no("9999"), None);
        assert_eq!(next_case_no("abc"), None);
        assert_eq!(next_case_no("12a"), None);
        assert_eq!(next_case_no(""), None);
        assert_eq!(next_case_no("99999999999999999999"), None);
    }

    #[test]
    fn test_first_duplicate_key_wins() {
        let mut step = Step {
            keys: vec!["amount".into(), "amount".into()],
            values: vec!["1".into(), "2".into()],
            ..Step::default()
        };
        assert_eq!(step.value_of(Side::Request, "amount"), Some("1"));
        assert!(step.set_value_of(Side::Request, "amount", "9"));
        assert_eq!(step.values, vec!["9", "2"]);
        assert!(!step.set_value_of(Side::Request, "missing", "9"));
    }

    #[test]
    fn test_wire_shape() {
        let json = r#"{"caseNo":"0003","keys":["bin"],"values":["4111"]}"#;
        let step: Step = serde_json::from_str(json).unwrap();
        assert_eq!(step.case_no, "0003");
        assert_eq!(step.priority, Priority::Normal);
        assert!(step.expected_keys.is_empty());

        let back = serde_json::to_value(&step).unwrap();
        assert!(back.get("expectedKeys").is_some());
        assert!(back.get("expectedValues").is_some());
        assert_eq!(back["priority"], "보통");
    }

    #[test]
    fn test_missing_case_no_defaults() {
        let step: Step = serde_json::from_str("{}").unwrap();
        assert_eq!(step.case_no, "0001");
        assert!(step.keys.is_empty());
        assert!(step.is_aligned());
    }
}
