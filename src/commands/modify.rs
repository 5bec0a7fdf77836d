use std::path::Path;

use anyhow::{Context, Result};
use colored::*;
use inquire::{Confirm, CustomType, Select, Text};

use test_case_editor::engine::{
    add_scenario, remove_scenario, rename_scenario, set_step_id, set_step_priority, set_value,
    BatchRequest, ColumnOp, EditorSession,
};
use test_case_editor::models::{Priority, Side};
use test_case_editor::utils::{load_case, save_case};

use crate::commands::print_case;

fn prompt_index(message: &str) -> Option<usize> {
    CustomType::<usize>::new(message)
        .with_error_message("Introduce un número entero no negativo")
        .prompt()
        .ok()
}

fn prompt_side(message: &str) -> Option<Side> {
    match Select::new(message, vec!["Solicitud", "Esperado"]).prompt() {
        Ok("Solicitud") => Some(Side::Request),
        Ok(_) => Some(Side::Expected),
        Err(_) => None,
    }
}

fn prompt_priority() -> Option<Priority> {
    Select::new("Nueva prioridad:", Priority::ALL.to_vec()).prompt().ok()
}

fn prompt_text(message: &str) -> Option<String> {
    Text::new(message).prompt().ok()
}

/// Modifica un caso de prueba de forma interactiva
pub fn modify_case(file_path: &Path) -> Result<()> {
    let case = load_case(file_path)
        .with_context(|| format!("no se pudo cargar {}", file_path.display()))?;
    let mut session = EditorSession::new(case);
    let mut dirty = false;

    loop {
        let options = vec![
            "Ver caso",
            "Seleccionar pasos",
            "Actualización masiva",
            "Columnas",
            "Pasos",
            "Escenarios",
            "Título y nota",
            "Guardar",
            "Salir",
        ];

        let choice = match Select::new("¿Qué deseas hacer?", options).prompt() {
            Ok(choice) => choice,
            Err(_) => "Salir",
        };

        let result = match choice {
            "Ver caso" => {
                print_case(session.case(), Some(session.selection()));
                Ok(false)
            }
            "Seleccionar pasos" => {
                select_steps(&mut session);
                Ok(false)
            }
            "Actualización masiva" => batch_update(&mut session),
            "Columnas" => column_menu(&mut session),
            "Pasos" => step_menu(&mut session),
            "Escenarios" => scenario_menu(&mut session),
            "Título y nota" => title_and_note(&mut session),
            "Guardar" => {
                match save_case(file_path, session.case()) {
                    Ok(()) => {
                        dirty = false;
                        println!("{}", format!("Caso guardado en {}", file_path.display()).green());
                    }
                    Err(e) => println!("{}", format!("No se pudo guardar: {}", e).red()),
                }
                Ok(false)
            }
            _ => {
                if dirty
                    && Confirm::new("Hay cambios sin guardar. ¿Guardar antes de salir?")
                        .with_default(true)
                        .prompt()
                        .unwrap_or(false)
                {
                    save_case(file_path, session.case())
                        .with_context(|| format!("no se pudo guardar {}", file_path.display()))?;
                    println!("{}", "Caso guardado.".green());
                }
                println!("¡Hasta pronto!");
                return Ok(());
            }
        };

        match result {
            Ok(changed) => dirty |= changed,
            Err(e) => println!("{}", e.to_string().red()),
        }
    }
}

fn select_steps(session: &mut EditorSession) {
    let Some(text) = prompt_text("Paso (escenario:paso):") else {
        return;
    };
    let parsed = text
        .split_once(':')
        .and_then(|(s, i)| Some((s.trim().parse::<usize>().ok()?, i.trim().parse::<usize>().ok()?)));

    let Some((scenario, step)) = parsed else {
        println!("{}", "Formato inválido. Usa escenario:paso, por ejemplo 0:3.".red());
        return;
    };

    let shift = Confirm::new("¿Seleccionar el rango desde el último paso marcado (shift)?")
        .with_default(false)
        .prompt()
        .unwrap_or(false);

    session.toggle(scenario, step, shift);
    println!(
        "{}",
        format!("{} pasos seleccionados.", session.selection().len()).blue()
    );
}

fn batch_update(session: &mut EditorSession) -> test_case_editor::Result<bool> {
    if session.selection().is_empty() {
        println!("{}", "Selecciona los pasos a cambiar primero.".yellow());
        return Ok(false);
    }

    let modes = vec!["Básica", "Condicional", "Prioridad", "Cancelar"];
    let request = match Select::new("Modo de actualización:", modes).prompt() {
        Ok("Básica") => prompt_basic(),
        Ok("Condicional") => prompt_conditional(),
        Ok("Prioridad") => prompt_priority().map(|new_priority| BatchRequest::Priority { new_priority }),
        _ => None,
    };

    let Some(request) = request else {
        session.cancel_batch();
        println!("{}", "Actualización cancelada.".yellow());
        return Ok(false);
    };

    let updated = session.apply_batch(&request)?;
    println!("{}", format!("{} pasos actualizados.", updated).green());
    Ok(updated > 0)
}

fn prompt_basic() -> Option<BatchRequest> {
    let target_side = prompt_side("Lado del campo a cambiar:")?;
    let target_key = prompt_text("Clave a cambiar:")?;
    let new_value = prompt_text("Nuevo valor:")?;
    Some(BatchRequest::Basic {
        target_side,
        target_key: target_key.trim().to_string(),
        new_value,
    })
}

fn prompt_conditional() -> Option<BatchRequest> {
    let condition_side = prompt_side("Lado de la condición:")?;
    let condition_key = prompt_text("Clave de la condición:")?;
    let condition_value = prompt_text("Valor que debe tener:")?;
    let target_side = prompt_side("Lado del campo a cambiar:")?;
    let target_key = prompt_text("Clave a cambiar:")?;
    let new_value = prompt_text("Nuevo valor:")?;
    Some(BatchRequest::Conditional {
        condition_side,
        condition_key: condition_key.trim().to_string(),
        condition_value,
        target_side,
        target_key: target_key.trim().to_string(),
        new_value,
    })
}

fn column_menu(session: &mut EditorSession) -> test_case_editor::Result<bool> {
    let actions = vec!["Añadir", "Eliminar", "Mover", "Renombrar"];
    let Ok(action) = Select::new("Acción sobre columnas:", actions).prompt() else {
        return Ok(false);
    };
    let Some(scenario) = prompt_index("Escenario:") else {
        return Ok(false);
    };
    let Some(side) = prompt_side("Lado:") else {
        return Ok(false);
    };

    match prompt_column_op(action, side) {
        Some(op) => {
            session.apply_column_op(scenario, &op)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

fn prompt_column_op(action: &str, side: Side) -> Option<ColumnOp> {
    let op = match action {
        "Añadir" => ColumnOp::Add { side },
        "Eliminar" => ColumnOp::Remove {
            side,
            index: prompt_index("Columna:")?,
        },
        "Mover" => ColumnOp::Move {
            side,
            from: prompt_index("Desde la columna:")?,
            to: prompt_index("Hasta la columna:")?,
        },
        _ => ColumnOp::Rename {
            side,
            index: prompt_index("Columna:")?,
            name: prompt_text("Nuevo nombre:")?,
        },
    };
    Some(op)
}

fn step_menu(session: &mut EditorSession) -> test_case_editor::Result<bool> {
    let actions = vec!["Añadir", "Eliminar", "Cambiar número", "Cambiar prioridad", "Editar valor"];
    let Ok(action) = Select::new("Acción sobre pasos:", actions).prompt() else {
        return Ok(false);
    };
    let Some(scenario) = prompt_index("Escenario:") else {
        return Ok(false);
    };

    if action == "Añadir" {
        let copy = Confirm::new("¿Copiar el esquema del último paso?")
            .with_default(true)
            .prompt()
            .unwrap_or(true);
        session.append_step(scenario, copy)?;
        return Ok(true);
    }

    let Some(step) = prompt_index("Paso:") else {
        return Ok(false);
    };

    match action {
        "Eliminar" => session.remove_step(scenario, step)?,
        "Cambiar número" => {
            let Some(id) = prompt_text("Nuevo número:") else {
                return Ok(false);
            };
            session.edit(|case| set_step_id(case, scenario, step, &id))?;
        }
        "Cambiar prioridad" => {
            let Some(priority) = prompt_priority() else {
                return Ok(false);
            };
            session.edit(|case| set_step_priority(case, scenario, step, priority))?;
        }
        _ => {
            let Some(side) = prompt_side("Lado:") else {
                return Ok(false);
            };
            let Some(column) = prompt_index("Columna:") else {
                return Ok(false);
            };
            let Some(value) = prompt_text("Valor:") else {
                return Ok(false);
            };
            session.edit(|case| set_value(case, scenario, step, side, column, &value))?;
        }
    }
    Ok(true)
}

fn scenario_menu(session: &mut EditorSession) -> test_case_editor::Result<bool> {
    let actions = vec!["Añadir", "Eliminar", "Renombrar"];
    match Select::new("Acción sobre escenarios:", actions).prompt() {
        Ok("Añadir") => {
            let name = prompt_text("Nombre (vacío para el nombre por defecto):").unwrap_or_default();
            let name = Some(name.trim()).filter(|n| !n.is_empty());
            session.edit(|case| Ok(add_scenario(case, name)))?;
            Ok(true)
        }
        Ok("Eliminar") => {
            let Some(index) = prompt_index("Escenario:") else {
                return Ok(false);
            };
            let confirmed = Confirm::new("¿Eliminar el escenario?")
                .with_default(false)
                .prompt()
                .unwrap_or(false);
            if !confirmed {
                return Ok(false);
            }
            session.edit(|case| remove_scenario(case, index))?;
            Ok(true)
        }
        Ok(_) => {
            let Some(index) = prompt_index("Escenario:") else {
                return Ok(false);
            };
            let Some(name) = prompt_text("Nuevo nombre:") else {
                return Ok(false);
            };
            session.edit(|case| rename_scenario(case, index, &name))?;
            Ok(true)
        }
        Err(_) => Ok(false),
    }
}

fn title_and_note(session: &mut EditorSession) -> test_case_editor::Result<bool> {
    let title = Text::new("Título:")
        .with_initial_value(&session.case().title)
        .prompt()
        .unwrap_or_else(|_| session.case().title.clone());
    let note = Text::new("Nota:")
        .with_initial_value(&session.case().note)
        .prompt()
        .unwrap_or_else(|_| session.case().note.clone());

    session.edit(|case| {
        let mut next = case.clone();
        next.title = title;
        next.note = note;
        Ok(next)
    })?;
    Ok(true)
}
