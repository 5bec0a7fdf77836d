//! Tipos de error del editor de casos de prueba.

use thiserror::Error;

use crate::models::Side;

/// Error de las operaciones sobre casos, escenarios y pasos.
///
/// Toda operación que falla deja el caso original sin modificar.
#[derive(Error, Debug)]
pub enum EditorError {
    /// Índice de columna o de paso fuera del rango válido.
    #[error("índice {index} de {what} fuera de rango (longitud {len})")]
    OutOfRange {
        /// Qué se estaba indexando ("columna de solicitud", "columna", ...)
        what: &'static str,
        /// Índice solicitado
        index: usize,
        /// Longitud actual
        len: usize,
    },

    /// El escenario no existe en el caso.
    #[error("el escenario {0} no existe")]
    InvalidScenario(usize),

    /// El paso no existe en el escenario.
    #[error("el paso {step} no existe en el escenario {scenario}")]
    InvalidStep { scenario: usize, step: usize },

    /// Falta un campo obligatorio en la solicitud de actualización masiva.
    #[error("solicitud de actualización masiva no válida: {0}")]
    InvalidRequest(String),

    /// La clave no aparece en ninguno de los pasos seleccionados.
    #[error("la clave \"{key}\" no aparece en ningún paso seleccionado (lado {side})")]
    NoMatchingKey { side: Side, key: String },

    /// Las listas de claves y valores de un paso no están alineadas.
    #[error("esquema incoherente en el escenario {scenario}, paso {step}: {reason}")]
    SchemaMismatch {
        scenario: usize,
        step: usize,
        reason: String,
    },

    /// El caso no tiene título y no puede guardarse.
    #[error("el título del caso de prueba es obligatorio")]
    MissingTitle,

    #[error("error de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("error de JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("error de CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Resultado de las operaciones del editor.
pub type Result<T> = std::result::Result<T, EditorError>;
