use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prioridad de un paso. En el formato de intercambio se usan las etiquetas
/// del editor web ("낮음", "보통", "높음").
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    #[serde(rename = "낮음", alias = "Low", alias = "low")]
    Low,
    #[default]
    #[serde(rename = "보통", alias = "Normal", alias = "normal")]
    Normal,
    #[serde(rename = "높음", alias = "High", alias = "high")]
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Normal, Priority::High];

    /// Etiqueta usada en el formato de intercambio.
    pub fn wire_label(self) -> &'static str {
        match self {
            Priority::Low => "낮음",
            Priority::Normal => "보통",
            Priority::High => "높음",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "🔵 Baja"),
            Priority::Normal => write!(f, "🟡 Normal"),
            Priority::High => write!(f, "🔴 Alta"),
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" | "baja" | "낮음" => Ok(Priority::Low),
            "normal" | "보통" => Ok(Priority::Normal),
            "high" | "alta" | "높음" => Ok(Priority::High),
            other => Err(format!("prioridad desconocida: '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_labels() {
        let json = serde_json::to_string(&Priority::High).unwrap();
        assert_eq!(json, "\"높음\"");
        let parsed: Priority = serde_json::from_str("\"낮음\"").unwrap();
        assert_eq!(parsed, Priority::Low);
    }

    #[test]
    fn test_english_aliases_accepted() {
        let parsed: Priority = serde_json::from_str("\"Normal\"").unwrap();
        assert_eq!(parsed, Priority::Normal);
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
    }
}
