use anyhow::Result;
use chrono::Local;
use std::env;
use uuid::Uuid;

use crate::config;
use crate::models::{FilterPatch, PriorityFilter, StatusFilter, TaskDraft};
use crate::store::TaskStore;
use crate::store::storage::JsonFileStorage;
use crate::ui::form::parse_due_date;

/// Handle command line arguments
/// Returns true when the TUI should start, false when a CLI command was
/// handled and the process should exit
pub fn handle_cli() -> Result<bool> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        return Ok(true);
    }

    match args[1].as_str() {
        "add" => {
            if let Err(e) = cli_add(&args[2..]) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
            Ok(false)
        }
        "list" => {
            if let Err(e) = cli_list(&args[2..]) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
            Ok(false)
        }
        "done" => {
            if args.len() < 3 {
                eprintln!("Usage: tfl done <id-prefix>");
                std::process::exit(1);
            }
            if let Err(e) = cli_done(&args[2]) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
            Ok(false)
        }
        "delete" => {
            if args.len() < 3 {
                eprintln!("Usage: tfl delete <id-prefix>");
                std::process::exit(1);
            }
            if let Err(e) = cli_delete(&args[2]) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
            Ok(false)
        }
        "stats" => {
            cli_stats()?;
            Ok(false)
        }
        "categories" => {
            cli_categories()?;
            Ok(false)
        }
        "config" => {
            if args.len() < 3 {
                config::show_config()?;
            } else {
                match args[2].as_str() {
                    "show" => config::show_config()?,
                    "path" => println!("{}", config::get_config_path().display()),
                    "data-file" => {
                        if args.len() < 4 {
                            eprintln!("Usage: tfl config data-file <path>");
                            std::process::exit(1);
                        }
                        config::set_data_file(args[3].clone())?;
                    }
                    "confirm-delete" => {
                        if args.len() < 4 {
                            eprintln!("Usage: tfl config confirm-delete <true|false>");
                            std::process::exit(1);
                        }
                        match args[3].parse::<bool>() {
                            Ok(value) => config::set_confirm_delete(value)?,
                            Err(_) => {
                                eprintln!("Expected true or false, got '{}'", args[3]);
                                std::process::exit(1);
                            }
                        }
                    }
                    other => {
                        eprintln!("Unknown config option: {}", other);
                        eprintln!("Available options: show, path, data-file, confirm-delete");
                        std::process::exit(1);
                    }
                }
            }
            Ok(false)
        }
        "--help" | "-h" => {
            print_help();
            Ok(false)
        }
        "--version" | "-V" | "-v" => {
            println!("tfl {}", env!("CARGO_PKG_VERSION"));
            Ok(false)
        }
        other => {
            eprintln!("Unknown command: {}", other);
            eprintln!("Run 'tfl --help' for usage");
            std::process::exit(1);
        }
    }
}

fn open_store() -> Result<TaskStore> {
    let config = config::load_config()?;
    let storage = JsonFileStorage::new(config::tasks_file_path(&config));
    Ok(TaskStore::open(Box::new(storage)))
}

// ============================================================================
// Task Commands
// ============================================================================

fn cli_add(args: &[String]) -> Result<(), String> {
    if args.is_empty() || args[0].starts_with("--") {
        return Err("Missing task title\nUsage: tfl add <title> [--description <text>] [--priority <low|medium|high>] [--category <name>] [--due <YYYY-MM-DD [HH:MM]>] [--completed]".to_string());
    }

    let mut draft = TaskDraft::new(args[0].clone());

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--description" => {
                draft.description = flag_value(args, i, "--description")?;
                i += 2;
            }
            "--priority" => {
                draft.priority = flag_value(args, i, "--priority")?.parse()?;
                i += 2;
            }
            "--category" => {
                draft.category = flag_value(args, i, "--category")?;
                i += 2;
            }
            "--due" => {
                draft.due_date = parse_due_date(&flag_value(args, i, "--due")?)?;
                i += 2;
            }
            "--completed" => {
                draft.completed = true;
                i += 1;
            }
            other => return Err(format!("Unknown flag: {}", other)),
        }
    }

    let mut store = open_store().map_err(|e| e.to_string())?;
    let id = store.add_task(draft);
    let task = store.get(id).expect("task just added");
    println!("✓ Added task {} ({})", short_id(id), task.title);
    Ok(())
}

fn cli_list(args: &[String]) -> Result<(), String> {
    let mut patch = FilterPatch::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--status" => {
                patch.status = Some(flag_value(args, i, "--status")?.parse::<StatusFilter>()?);
                i += 2;
            }
            "--priority" => {
                patch.priority = Some(flag_value(args, i, "--priority")?.parse::<PriorityFilter>()?);
                i += 2;
            }
            "--category" => {
                patch.category = Some(flag_value(args, i, "--category")?);
                i += 2;
            }
            "--search" => {
                patch.search = Some(flag_value(args, i, "--search")?);
                i += 2;
            }
            other => return Err(format!("Unknown flag: {}", other)),
        }
    }

    let mut store = open_store().map_err(|e| e.to_string())?;
    store.set_filter(patch);

    let tasks = store.filtered_tasks();
    if tasks.is_empty() {
        println!("No tasks match.");
        return Ok(());
    }

    println!("ID        DONE  PRI     DUE               TITLE");
    println!("--------  ----  ------  ----------------  ------------------------------");
    for task in tasks {
        let done = if task.completed { "[x]" } else { "[ ]" };
        let due = task.due_date.with_timezone(&Local).format("%Y-%m-%d %H:%M");
        let category = if task.category.is_empty() {
            String::new()
        } else {
            format!("  #{}", task.category)
        };
        println!(
            "{}  {:<4}  {:<6}  {}  {}{}",
            short_id(task.id),
            done,
            task.priority,
            due,
            task.title,
            category
        );
    }
    Ok(())
}

fn cli_done(prefix: &str) -> Result<(), String> {
    let mut store = open_store().map_err(|e| e.to_string())?;
    let id = resolve_id(&store, prefix)?;
    store.toggle_completion(id);

    let task = store.get(id).expect("task still present");
    let state = if task.completed { "completed" } else { "pending" };
    println!("✓ Task {} is now {}", short_id(id), state);
    Ok(())
}

fn cli_delete(prefix: &str) -> Result<(), String> {
    let mut store = open_store().map_err(|e| e.to_string())?;
    let id = resolve_id(&store, prefix)?;
    let title = store.get(id).map(|t| t.title.clone()).unwrap_or_default();
    store.delete_task(id);
    println!("✓ Deleted task {} ({})", short_id(id), title);
    Ok(())
}

fn cli_stats() -> Result<()> {
    let store = open_store()?;
    let stats = store.statistics();

    println!("Tasks:");
    println!("  Total:          {}", stats.total);
    println!("  Completed:      {}", stats.completed);
    println!("  Pending:        {}", stats.pending);
    println!("  High priority:  {}", stats.high_priority);
    Ok(())
}

fn cli_categories() -> Result<()> {
    let store = open_store()?;
    let categories = store.distinct_categories();

    if categories.is_empty() {
        println!("No categories.");
        return Ok(());
    }

    for category in categories {
        println!("{}", category);
    }
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn flag_value(args: &[String], i: usize, flag: &str) -> Result<String, String> {
    args.get(i + 1)
        .cloned()
        .ok_or_else(|| format!("Missing value for {}", flag))
}

/// Resolve a task by unique id prefix
fn resolve_id(store: &TaskStore, prefix: &str) -> Result<Uuid, String> {
    let matches: Vec<Uuid> = store
        .tasks()
        .iter()
        .filter(|t| t.id.to_string().starts_with(prefix))
        .map(|t| t.id)
        .collect();

    match matches.as_slice() {
        [] => Err(format!("No task matching id '{}'", prefix)),
        [id] => Ok(*id),
        _ => Err(format!("Id prefix '{}' is ambiguous ({} matches)", prefix, matches.len())),
    }
}

fn short_id(id: Uuid) -> String {
    id.to_string()[..8].to_string()
}

fn print_help() {
    println!(
        "taskflow - terminal task manager

USAGE:
    tfl                 Start the TUI
    tfl <COMMAND>

COMMANDS:
    add <title>         Add a task
                          --description <text>
                          --priority <low|medium|high>
                          --category <name>
                          --due <YYYY-MM-DD [HH:MM]>
                          --completed
    list                List tasks
                          --status <all|pending|completed>
                          --priority <all|low|medium|high>
                          --category <name>
                          --search <text>
    done <id-prefix>    Toggle a task's completion
    delete <id-prefix>  Delete a task
    stats               Show aggregate counts
    categories          List distinct categories
    config              Show or change configuration
    -h, --help          Show this help
    -V, --version       Show version

EXAMPLES:
    tfl add \"Write report\" --priority high --due \"2025-07-01 17:00\"
    tfl list --status pending --category Work
    tfl done 3f2a"
    );
}
