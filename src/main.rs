mod commands;

use std::fs::create_dir_all;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use inquire::{Select, Text};

use commands::{
    create_case, edit_column, edit_scenario, edit_step, export_case, list_cases, modify_case,
    parse_selection, resolve_case_path, run_batch, show_case, ExportFormat, ScenarioEdit, StepEdit,
};
use test_case_editor::engine::{BatchRequest, ColumnOp};
use test_case_editor::models::{Priority, Side};
use test_case_editor::utils::list_case_files;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directorio de trabajo de los casos de prueba
    #[arg(long, global = true, env = "TEST_CASE_DIR", default_value = "cases")]
    dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Crear un caso de prueba nuevo
    New {
        /// Nombre del archivo (sin extensión)
        #[arg(short, long)]
        name: String,

        /// Título del caso
        #[arg(short, long)]
        title: Option<String>,

        /// Nota libre
        #[arg(long)]
        note: Option<String>,
    },
    /// Mostrar un caso de prueba
    Show {
        /// Ruta al archivo JSON del caso
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Listar casos de prueba disponibles
    List,
    /// Añadir, eliminar o renombrar escenarios
    Scenario {
        #[arg(short, long)]
        file: PathBuf,

        #[command(subcommand)]
        action: ScenarioAction,
    },
    /// Añadir, eliminar o editar pasos
    Step {
        #[arg(short, long)]
        file: PathBuf,

        #[command(subcommand)]
        action: StepAction,
    },
    /// Añadir, eliminar, mover o renombrar columnas de un escenario
    Column {
        #[arg(short, long)]
        file: PathBuf,

        /// Índice del escenario
        #[arg(short, long)]
        scenario: usize,

        #[command(subcommand)]
        action: ColumnAction,
    },
    /// Actualización masiva de los pasos seleccionados
    Batch {
        #[arg(short, long)]
        file: PathBuf,

        /// Pasos: "escenario:paso" o "escenario:desde-hasta", separados por comas
        #[arg(long)]
        select: String,

        #[command(subcommand)]
        mode: BatchMode,
    },
    /// Exportar un caso a CSV o Markdown
    Export {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(long, value_enum, default_value_t = ExportFormat::Markdown)]
        format: ExportFormat,

        /// Ruta de salida
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Editar un caso de forma interactiva
    Edit {
        #[arg(short, long)]
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum ScenarioAction {
    Add {
        #[arg(long)]
        name: Option<String>,
    },
    Remove {
        index: usize,
    },
    Rename {
        index: usize,
        name: String,
    },
}

#[derive(Subcommand)]
enum StepAction {
    /// Añadir un paso al final (copia el esquema del último)
    Add {
        scenario: usize,

        /// Usar el esquema por defecto en lugar de copiar el último paso
        #[arg(long)]
        blank: bool,
    },
    Remove {
        scenario: usize,
        step: usize,
    },
    SetId {
        scenario: usize,
        step: usize,
        id: String,
    },
    SetPriority {
        scenario: usize,
        step: usize,
        priority: Priority,
    },
    SetValue {
        scenario: usize,
        step: usize,
        side: Side,
        column: usize,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
}

#[derive(Subcommand)]
enum ColumnAction {
    Add {
        side: Side,
    },
    Remove {
        side: Side,
        index: usize,
    },
    Move {
        side: Side,
        from: usize,
        to: usize,
    },
    Rename {
        side: Side,
        index: usize,
        #[arg(allow_hyphen_values = true)]
        name: String,
    },
}

#[derive(Subcommand)]
enum BatchMode {
    /// Cambiar una clave en todos los pasos seleccionados
    Basic {
        #[arg(long)]
        side: Side,
        #[arg(long)]
        key: String,
        #[arg(long, allow_hyphen_values = true)]
        value: String,
    },
    /// Cambiar una clave sólo donde otra clave tiene un valor dado
    Conditional {
        #[arg(long)]
        if_side: Side,
        #[arg(long)]
        if_key: String,
        #[arg(long, allow_hyphen_values = true)]
        if_value: String,
        #[arg(long)]
        side: Side,
        #[arg(long)]
        key: String,
        #[arg(long, allow_hyphen_values = true)]
        value: String,
    },
    /// Cambiar la prioridad de los pasos seleccionados
    Priority {
        priority: Priority,
    },
}

impl From<BatchMode> for BatchRequest {
    fn from(mode: BatchMode) -> Self {
        match mode {
            BatchMode::Basic { side, key, value } => BatchRequest::Basic {
                target_side: side,
                target_key: key,
                new_value: value,
            },
            BatchMode::Conditional {
                if_side,
                if_key,
                if_value,
                side,
                key,
                value,
            } => BatchRequest::Conditional {
                condition_side: if_side,
                condition_key: if_key,
                condition_value: if_value,
                target_side: side,
                target_key: key,
                new_value: value,
            },
            BatchMode::Priority { priority } => BatchRequest::Priority {
                new_priority: priority,
            },
        }
    }
}

impl From<ColumnAction> for ColumnOp {
    fn from(action: ColumnAction) -> Self {
        match action {
            ColumnAction::Add { side } => ColumnOp::Add { side },
            ColumnAction::Remove { side, index } => ColumnOp::Remove { side, index },
            ColumnAction::Move { side, from, to } => ColumnOp::Move { side, from, to },
            ColumnAction::Rename { side, index, name } => ColumnOp::Rename { side, index, name },
        }
    }
}

impl From<StepAction> for StepEdit {
    fn from(action: StepAction) -> Self {
        match action {
            StepAction::Add { scenario, blank } => StepEdit::Add {
                scenario,
                copy_from_last: !blank,
            },
            StepAction::Remove { scenario, step } => StepEdit::Remove { scenario, step },
            StepAction::SetId { scenario, step, id } => StepEdit::SetId { scenario, step, id },
            StepAction::SetPriority {
                scenario,
                step,
                priority,
            } => StepEdit::SetPriority {
                scenario,
                step,
                priority,
            },
            StepAction::SetValue {
                scenario,
                step,
                side,
                column,
                value,
            } => StepEdit::SetValue {
                scenario,
                step,
                side,
                column,
                value,
            },
        }
    }
}

impl From<ScenarioAction> for ScenarioEdit {
    fn from(action: ScenarioAction) -> Self {
        match action {
            ScenarioAction::Add { name } => ScenarioEdit::Add { name },
            ScenarioAction::Remove { index } => ScenarioEdit::Remove { index },
            ScenarioAction::Rename { index, name } => ScenarioEdit::Rename { index, name },
        }
    }
}

fn main() -> Result<()> {
    // RUST_LOG controla el nivel de detalle (por ejemplo RUST_LOG=debug)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let dir = cli.dir;

    // Crear el directorio de casos si no existe
    if !dir.exists() {
        create_dir_all(&dir).with_context(|| format!("no se pudo crear {}", dir.display()))?;
    }

    let path = |file: &Path| resolve_case_path(&dir, file);

    match cli.command {
        Some(Commands::New { name, title, note }) => {
            create_case(&dir, &name, title, note)?;
        }
        Some(Commands::Show { file }) => show_case(&path(&file))?,
        Some(Commands::List) => list_cases(&dir)?,
        Some(Commands::Scenario { file, action }) => edit_scenario(&path(&file), action.into())?,
        Some(Commands::Step { file, action }) => edit_step(&path(&file), action.into())?,
        Some(Commands::Column {
            file,
            scenario,
            action,
        }) => edit_column(&path(&file), scenario, action.into())?,
        Some(Commands::Batch { file, select, mode }) => {
            let selection = parse_selection(&select)?;
            run_batch(&path(&file), &selection, &mode.into())?
        }
        Some(Commands::Export { file, format, out }) => {
            export_case(&path(&file), format, out)?;
        }
        Some(Commands::Edit { file }) => modify_case(&path(&file))?,
        None => interactive_menu(&dir)?,
    }

    Ok(())
}

/// Menú interactivo si no se proporciona un comando
fn interactive_menu(dir: &Path) -> Result<()> {
    let options = vec![
        "Crear caso de prueba",
        "Editar caso de prueba",
        "Ver caso de prueba",
        "Exportar caso de prueba",
        "Listar casos de prueba",
        "Salir",
    ];

    let selection = Select::new("¿Qué deseas hacer?", options).prompt();

    match selection {
        Ok("Crear caso de prueba") => {
            let name = Text::new("Nombre del archivo:").prompt().unwrap_or_default();
            if name.trim().is_empty() {
                println!("{}", "Operación cancelada.".yellow());
                return Ok(());
            }
            if let Some(path) = create_case(dir, name.trim(), None, None)? {
                modify_case(&path)?;
            }
        }
        Ok("Editar caso de prueba") => {
            if let Some(file) = select_case_file(dir)? {
                modify_case(&file)?
            }
        }
        Ok("Ver caso de prueba") => {
            if let Some(file) = select_case_file(dir)? {
                show_case(&file)?
            }
        }
        Ok("Exportar caso de prueba") => {
            if let Some(file) = select_case_file(dir)? {
                let format = Select::new("Formato:", vec![ExportFormat::Markdown, ExportFormat::Csv])
                    .prompt();
                if let Ok(format) = format {
                    export_case(&file, format, None)?;
                }
            }
        }
        Ok("Listar casos de prueba") => list_cases(dir)?,
        _ => println!("¡Hasta pronto!"),
    }

    Ok(())
}

/// Selecciona un archivo de caso existente
fn select_case_file(dir: &Path) -> Result<Option<PathBuf>> {
    let files = list_case_files(dir)?;

    if files.is_empty() {
        println!("{}", "No hay casos de prueba disponibles.".red());
        return Ok(None);
    }

    let names: Vec<String> = files.iter().map(|f| f.display().to_string()).collect();
    match Select::new("Selecciona un caso de prueba:", names).prompt() {
        Ok(name) => Ok(Some(PathBuf::from(name))),
        Err(_) => Ok(None),
    }
}
