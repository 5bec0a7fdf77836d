pub mod batch;
pub mod create;
pub mod edit;
pub mod export;
pub mod modify;
pub mod view;

pub use batch::*;
pub use create::*;
pub use edit::*;
pub use export::*;
pub use modify::*;
pub use view::*;

use std::path::{Path, PathBuf};

/// Resuelve la ruta de un caso: tal cual si existe o es absoluta, si no
/// relativa al directorio de trabajo.
pub fn resolve_case_path(dir: &Path, file: &Path) -> PathBuf {
    if file.is_absolute() || file.exists() {
        return file.to_path_buf();
    }
    let path = dir.join(file);
    if path.extension().is_none() {
        path.with_extension("json")
    } else {
        path
    }
}
