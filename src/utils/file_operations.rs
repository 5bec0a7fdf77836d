use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use csv::WriterBuilder;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Priority, Scenario, Side, TestCase};

/// Carga un caso de prueba desde un archivo JSON
///
/// Los campos ausentes toman sus valores por defecto; un paso con claves y
/// valores desalineados se rechaza.
pub fn load_case(file_path: &Path) -> Result<TestCase> {
    let content = fs::read_to_string(file_path)?;
    let case: TestCase = serde_json::from_str(&content)?;
    case.validate_schema()?;

    for (idx, scenario) in case.scenarios.iter().enumerate() {
        if !scenario.has_uniform_keys() {
            warn!(
                scenario = idx,
                name = %scenario.name,
                "steps disagree on key names; first step is used as header"
            );
        }
    }

    debug!(path = %file_path.display(), scenarios = case.scenarios.len(), "case loaded");
    Ok(case)
}

/// Guarda un caso de prueba en JSON
///
/// Se escribe primero en un archivo temporal junto al destino y luego se
/// renombra.
pub fn save_case(file_path: &Path, case: &TestCase) -> Result<()> {
    case.validate_for_save()?;

    let json = serde_json::to_string_pretty(case)?;
    let tmp_path = file_path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));
    {
        let mut file = File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.write_all(b"\n")?;
        file.sync_all()?;
    }
    if let Err(e) = fs::rename(&tmp_path, file_path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    debug!(path = %file_path.display(), "case saved");
    Ok(())
}

/// Obtiene la lista de archivos de casos disponibles
pub fn list_case_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if !dir.exists() {
        return Ok(files);
    }

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == "json") {
            files.push(path);
        }
    }

    // Ordenar alfabéticamente
    files.sort();

    Ok(files)
}

fn header_record(scenario: &Scenario) -> Vec<String> {
    let mut record = vec![
        "scenario".to_string(),
        "caseNo".to_string(),
        "priority".to_string(),
    ];
    record.extend(scenario.header(Side::Request).iter().cloned());
    record.extend(scenario.header(Side::Expected).iter().cloned());
    record
}

/// Exporta los pasos de un caso a CSV
///
/// Cada escenario empieza con su propia fila de cabecera, porque los
/// esquemas pueden variar entre escenarios.
pub fn save_to_csv(file_path: &Path, case: &TestCase) -> Result<()> {
    let mut writer = WriterBuilder::new().flexible(true).from_path(file_path)?;

    for scenario in &case.scenarios {
        writer.write_record(header_record(scenario))?;
        for step in &scenario.steps {
            let mut record = vec![
                scenario.name.clone(),
                step.case_no.clone(),
                step.priority.wire_label().to_string(),
            ];
            record.extend(step.values.iter().cloned());
            record.extend(step.expected_values.iter().cloned());
            writer.write_record(&record)?;
        }
    }

    writer.flush()?;

    Ok(())
}

fn markdown_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Guarda un caso de prueba en formato Markdown
pub fn save_to_markdown(file_path: &Path, case: &TestCase) -> Result<()> {
    let mut file = File::create(file_path)?;

    // Escribir encabezado
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    writeln!(file, "# Caso de Prueba: {}", case.title)?;
    writeln!(file, "\nFecha de generación: {}", timestamp)?;
    if !case.note.trim().is_empty() {
        writeln!(file, "\n> {}", case.note.trim().replace('\n', "\n> "))?;
    }
    writeln!(file)?;

    // Calcular resumen
    let count = |priority: Priority| {
        case.scenarios
            .iter()
            .flat_map(|s| &s.steps)
            .filter(|st| st.priority == priority)
            .count()
    };
    let counts: Vec<(Priority, usize)> = Priority::ALL.iter().map(|p| (*p, count(*p))).collect();

    writeln!(file, "## Resumen Numérico\n")?;
    writeln!(file, "- Escenarios: {}", case.scenarios.len())?;
    writeln!(file, "- Total de pasos: {}", case.step_count())?;
    for (priority, n) in &counts {
        writeln!(file, "- {}: {}", priority, n)?;
    }
    writeln!(file)?;

    // Gráfico circular con Mermaid, sólo con prioridades presentes
    if case.step_count() > 0 {
        writeln!(file, "## Resumen Visual\n")?;
        writeln!(file, "```mermaid")?;
        writeln!(file, "pie title Distribución de Pasos por Prioridad")?;
        for (priority, n) in &counts {
            if *n > 0 {
                writeln!(file, "    \"{}\" : {}", priority, n)?;
            }
        }
        writeln!(file, "```\n")?;
    }

    writeln!(file, "## Escenarios\n")?;
    for (i, scenario) in case.scenarios.iter().enumerate() {
        writeln!(file, "### {}. {}\n", i + 1, markdown_cell(&scenario.name))?;

        if scenario.steps.is_empty() {
            writeln!(file, "_Sin pasos._\n")?;
            continue;
        }

        let request = scenario.header(Side::Request);
        let expected = scenario.header(Side::Expected);
        let mut header = vec!["No".to_string(), "Prioridad".to_string()];
        header.extend(request.iter().map(|k| format!("➡️ {}", markdown_cell(k))));
        header.extend(expected.iter().map(|k| format!("✔️ {}", markdown_cell(k))));

        writeln!(file, "| {} |", header.join(" | "))?;
        writeln!(file, "|{}", " --- |".repeat(header.len()))?;
        for step in &scenario.steps {
            let mut row = vec![markdown_cell(&step.case_no), step.priority.to_string()];
            row.extend(step.values.iter().map(|v| markdown_cell(v)));
            row.extend(step.expected_values.iter().map(|v| markdown_cell(v)));
            writeln!(file, "| {} |", row.join(" | "))?;
        }
        writeln!(file)?;
    }

    Ok(())
}
