use std::path::Path;

use anyhow::{Context, Result};
use colored::*;

use test_case_editor::models::{Scenario, SelectionSet, Side, TestCase};
use test_case_editor::utils::{list_case_files, load_case};

/// Muestra un caso de prueba guardado
pub fn show_case(file_path: &Path) -> Result<()> {
    let case = load_case(file_path)
        .with_context(|| format!("no se pudo cargar {}", file_path.display()))?;
    print_case(&case, None);
    Ok(())
}

/// Lista los casos de prueba disponibles
pub fn list_cases(dir: &Path) -> Result<()> {
    let files = list_case_files(dir)?;

    if files.is_empty() {
        println!("{}", "No hay casos de prueba disponibles.".yellow());
        return Ok(());
    }

    println!("{}", "Casos de prueba disponibles:".green());
    for (i, file) in files.iter().enumerate() {
        match load_case(file) {
            Ok(case) => println!(
                "{}: {} - {} ({} escenarios, {} pasos)",
                i + 1,
                file.display(),
                case.title,
                case.scenarios.len(),
                case.step_count()
            ),
            Err(e) => println!("{}: {} - {}", i + 1, file.display(), e.to_string().red()),
        }
    }

    Ok(())
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

fn column_widths(scenario: &Scenario, side: Side) -> Vec<usize> {
    scenario
        .header(side)
        .iter()
        .enumerate()
        .map(|(i, key)| {
            scenario
                .steps
                .iter()
                .filter_map(|s| s.values(side).get(i))
                .map(|v| v.chars().count())
                .chain(std::iter::once(key.chars().count()))
                .max()
                .unwrap_or(0)
                .max(3)
        })
        .collect()
}

fn row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(c, w)| pad(c, *w))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Imprime un caso; los pasos seleccionados se marcan con [x]
pub fn print_case(case: &TestCase, selection: Option<&SelectionSet>) {
    println!("{} {}", "Caso:".blue().bold(), case.title.bold());
    if !case.note.is_empty() {
        println!("{} {}", "Nota:".blue(), case.note);
    }

    if case.scenarios.is_empty() {
        println!("{}", "El caso no tiene escenarios.".yellow());
        return;
    }

    for (s_idx, scenario) in case.scenarios.iter().enumerate() {
        println!();
        println!("{}", format!("[{}] {}", s_idx, scenario.name).blue().bold());

        if scenario.steps.is_empty() {
            println!("{}", "  Sin pasos.".yellow());
            continue;
        }

        let request_widths = column_widths(scenario, Side::Request);
        let expected_widths = column_widths(scenario, Side::Expected);

        println!(
            "      {} {} ║ {} ║ {}",
            pad("No", 4),
            pad("Prioridad", 10),
            row(scenario.header(Side::Request), &request_widths).cyan(),
            row(scenario.header(Side::Expected), &expected_widths).green()
        );

        for (st_idx, step) in scenario.steps.iter().enumerate() {
            let selected = selection.map_or(false, |sel| sel.is_selected(s_idx, st_idx));
            let mark = if selected { "[x]".green() } else { "[ ]".normal() };
            println!(
                "{} {:>2} {} {} ║ {} ║ {}",
                mark,
                st_idx,
                pad(&step.case_no, 4),
                pad(&step.priority.to_string(), 10),
                row(&step.values, &request_widths),
                row(&step.expected_values, &expected_widths)
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case_editor::engine::add_scenario;

    #[test]
    fn test_column_widths_cover_keys_and_values() {
        let mut case = add_scenario(&TestCase::new("t", ""), None);
        case.scenarios[0].steps[0].values[0] = "4111111111".into();
        let widths = column_widths(&case.scenarios[0], Side::Request);
        assert_eq!(widths, vec![10, 6, 3, 6]);
    }

    #[test]
    fn test_pad_counts_chars() {
        assert_eq!(pad("año", 5), "año  ");
        assert_eq!(pad("largo", 2), "largo");
    }
}
