//! Transformaciones puras sobre un caso: columnas, pasos, escenarios y
//! actualizaciones masivas. Cada operación devuelve un caso nuevo o un error,
//! nunca un caso a medio modificar.

pub mod batch;
pub mod case_ops;
pub mod columns;
pub mod session;

pub use batch::{apply_batch_update, BatchOutcome, BatchRequest};
pub use case_ops::{add_scenario, remove_scenario, rename_scenario, set_step_id, set_step_priority, set_value};
pub use columns::{append_step, apply_column_op, remove_step, ColumnOp};
pub use session::EditorSession;
