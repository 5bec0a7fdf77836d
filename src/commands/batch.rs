use std::path::Path;

use anyhow::{bail, Context, Result};
use colored::*;

use test_case_editor::engine::{apply_batch_update, BatchRequest};
use test_case_editor::models::SelectionSet;
use test_case_editor::utils::{load_case, save_case};

fn parse_index(text: &str, spec: &str) -> Result<usize> {
    text.trim()
        .parse::<usize>()
        .with_context(|| format!("índice inválido '{}' en '{}'", text.trim(), spec))
}

/// Construye una selección a partir de "s:i" o "s:i-j" separados por comas
///
/// Cada "s:i" es un clic normal; "s:i-j" es un clic en `i` seguido de un
/// shift-clic en `j`.
pub fn parse_selection(spec: &str) -> Result<SelectionSet> {
    let mut selection = SelectionSet::new();

    for item in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let Some((scenario, steps)) = item.split_once(':') else {
            bail!("selección inválida '{}': use escenario:paso", item);
        };
        let scenario = parse_index(scenario, item)?;

        match steps.split_once('-') {
            Some((start, end)) => {
                selection.toggle(scenario, parse_index(start, item)?, false);
                selection.toggle(scenario, parse_index(end, item)?, true);
            }
            None => selection.toggle(scenario, parse_index(steps, item)?, false),
        }
    }

    if selection.is_empty() {
        bail!("la selección '{}' no contiene pasos", spec);
    }
    Ok(selection)
}

/// Aplica una actualización masiva a un caso guardado
pub fn run_batch(file_path: &Path, selection: &SelectionSet, request: &BatchRequest) -> Result<()> {
    let case = load_case(file_path)
        .with_context(|| format!("no se pudo cargar {}", file_path.display()))?;

    let outcome = apply_batch_update(&case, selection, request)?;
    save_case(file_path, &outcome.case)
        .with_context(|| format!("no se pudo guardar {}", file_path.display()))?;

    let message = match request {
        BatchRequest::Priority { new_priority } => format!(
            "La prioridad de {} pasos cambió a '{}'.",
            outcome.updated_count, new_priority
        ),
        BatchRequest::Basic { target_key, .. } => format!(
            "El valor de \"{}\" cambió en {} pasos.",
            target_key, outcome.updated_count
        ),
        BatchRequest::Conditional { .. } => format!(
            "{} pasos cumplían la condición y fueron actualizados.",
            outcome.updated_count
        ),
    };
    println!("{}", message.green());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case_editor::models::StepRef;

    #[test]
    fn test_parse_selection_single_and_range() {
        let selection = parse_selection("0:0, 1:2-5").unwrap();
        let steps: Vec<_> = selection.iter().collect();
        assert_eq!(steps.len(), 5);
        assert!(selection.is_selected(0, 0));
        assert!(selection.is_selected(1, 2));
        assert!(selection.is_selected(1, 5));
        assert_eq!(selection.last_touched(), Some(StepRef::new(1, 2)));
    }

    #[test]
    fn test_parse_selection_reverse_range() {
        let selection = parse_selection("0:4-1").unwrap();
        assert_eq!(selection.len(), 4);
    }

    #[test]
    fn test_parse_selection_toggles_repeats() {
        assert!(parse_selection("0:1,0:1").is_err());
    }

    #[test]
    fn test_parse_selection_errors() {
        assert!(parse_selection("").is_err());
        assert!(parse_selection("3").is_err());
        assert!(parse_selection("a:1").is_err());
        assert!(parse_selection("0:1-x").is_err());
    }
}
