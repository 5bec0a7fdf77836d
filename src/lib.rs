//! Editor de casos de prueba con varios escenarios.
//!
//! Un caso contiene escenarios; cada escenario, pasos con columnas de
//! solicitud y de resultado esperado que comparten el mismo esquema. Este
//! crate mantiene ese esquema coherente al editar columnas y aplica
//! actualizaciones masivas sobre los pasos seleccionados.

pub mod engine;
pub mod error;
pub mod models;
pub mod utils;

pub use error::{EditorError, Result};
