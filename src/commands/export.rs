use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use colored::*;

use test_case_editor::utils::{load_case, save_to_csv, save_to_markdown};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Markdown,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "CSV"),
            ExportFormat::Markdown => write!(f, "Markdown"),
        }
    }
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Markdown => "md",
        }
    }
}

/// Exporta un caso guardado a CSV o Markdown
///
/// Sin ruta de salida se usa la del caso con la extensión del formato.
pub fn export_case(file_path: &Path, format: ExportFormat, out: Option<PathBuf>) -> Result<PathBuf> {
    let case = load_case(file_path)
        .with_context(|| format!("no se pudo cargar {}", file_path.display()))?;
    let out = out.unwrap_or_else(|| file_path.with_extension(format.extension()));

    match format {
        ExportFormat::Csv => save_to_csv(&out, &case),
        ExportFormat::Markdown => save_to_markdown(&out, &case),
    }
    .with_context(|| format!("no se pudo exportar a {}", out.display()))?;

    println!("{}", format!("Caso exportado a {}", out.display()).green());
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use test_case_editor::engine::add_scenario;
    use test_case_editor::models::TestCase;
    use test_case_editor::utils::save_case;

    #[test]
    fn test_export_default_paths() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("caso.json");
        save_case(&path, &add_scenario(&TestCase::new("Caso", ""), None)).unwrap();

        let csv = export_case(&path, ExportFormat::Csv, None).unwrap();
        assert_eq!(csv, tmp.path().join("caso.csv"));
        assert!(csv.exists());

        let md = export_case(&path, ExportFormat::Markdown, None).unwrap();
        assert_eq!(md, tmp.path().join("caso.md"));
        assert!(md.exists());
    }
}
