use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::*;
use inquire::{Select, Text};

use test_case_editor::engine::add_scenario;
use test_case_editor::models::TestCase;
use test_case_editor::utils::save_case;

/// Crea un caso de prueba nuevo con un escenario por defecto
///
/// Devuelve la ruta del archivo creado, o `None` si se canceló.
pub fn create_case(
    dir: &Path,
    name: &str,
    title: Option<String>,
    note: Option<String>,
) -> Result<Option<PathBuf>> {
    let file_name = if name.ends_with(".json") {
        name.to_string()
    } else {
        format!("{}.json", name)
    };
    let path = dir.join(file_name);

    // Verificar si ya existe un archivo con ese nombre
    if path.exists() {
        let options = vec!["Sí", "No"];
        let selection = Select::new(
            format!(
                "Ya existe un archivo con el nombre '{}'. ¿Deseas sobrescribirlo?",
                path.display()
            )
            .as_str(),
            options,
        )
        .prompt();

        if !matches!(selection, Ok("Sí")) {
            println!("{}", "Operación cancelada.".yellow());
            return Ok(None);
        }
    }

    // Con el título en la línea de órdenes no se pregunta nada más
    let interactive = title.is_none();

    // Solicitar título si no se proporcionó
    let title = match title {
        Some(t) => t,
        None => Text::new("Título del caso de prueba:")
            .prompt()
            .unwrap_or_default(),
    };
    if title.trim().is_empty() {
        println!("{}", "El título es obligatorio.".red());
        return Ok(None);
    }

    let note = match note {
        Some(n) => n,
        None if interactive => Text::new("Nota (opcional):").prompt().unwrap_or_default(),
        None => String::new(),
    };

    let case = add_scenario(&TestCase::new(title, note), None);
    save_case(&path, &case).with_context(|| format!("no se pudo guardar {}", path.display()))?;

    println!(
        "{}",
        format!("Caso de prueba creado y guardado en {}", path.display()).green()
    );

    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use test_case_editor::utils::load_case;

    #[test]
    fn test_create_with_title_only_leaves_note_empty() {
        let tmp = TempDir::new().unwrap();
        let path = create_case(tmp.path(), "autorizacion", Some("Autorización".into()), None)
            .unwrap()
            .unwrap();
        assert_eq!(path, tmp.path().join("autorizacion.json"));

        let case = load_case(&path).unwrap();
        assert_eq!(case.title, "Autorización");
        assert_eq!(case.note, "");
        assert_eq!(case.scenarios.len(), 1);
    }
}
