// launchpad - your projects and their startup commands, one command away
//
// This is the main entry point. Parses CLI args and dispatches to handlers.

use launchpad_lib::{
    store::{Searcher, StoreConfig},
    CommandDispatcher, LaunchpadError, ProjectPatch, ProjectRecord, ProjectStore, Result,
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Log filter variable, e.g. `LAUNCHPAD_LOG=debug`
const LOG_ENV: &str = "LAUNCHPAD_LOG";

fn main() -> ExitCode {
    init_logging();

    let mut args: Vec<String> = env::args().skip(1).collect();

    // Global option goes before the command
    let mut data_file: Option<PathBuf> = None;
    if args.first().map(String::as_str) == Some("--data-file") {
        if args.len() < 2 {
            eprintln!("Error: --data-file needs a path");
            return ExitCode::FAILURE;
        }
        data_file = Some(PathBuf::from(args.remove(1)));
        args.remove(0);
    }

    let Some(command) = args.first().cloned() else {
        print_usage();
        return ExitCode::SUCCESS;
    };
    let rest = &args[1..];

    let result = match command.as_str() {
        "list" => open_store(data_file).and_then(|s| handle_list(&s)),
        "show" => open_store(data_file).and_then(|s| handle_show(&s, rest)),
        "add" => open_store(data_file).and_then(|s| handle_add(&s, rest)),
        "update" => open_store(data_file).and_then(|s| handle_update(&s, rest)),
        "set-command" => open_store(data_file).and_then(|s| handle_set_command(&s, rest)),
        "remove" => open_store(data_file).and_then(|s| handle_remove(&s, rest)),
        "reorder" => open_store(data_file).and_then(|s| handle_reorder(&s, rest)),
        "search" => open_store(data_file).and_then(|s| handle_search(&s, rest)),
        "run" => open_store(data_file).and_then(|s| handle_run(&s, rest)),
        "open" => open_store(data_file).and_then(|s| handle_open(&s, rest)),
        "export" => open_store(data_file).and_then(|s| handle_export(&s, rest)),
        "import" => open_store(data_file).and_then(|s| handle_import(&s, rest)),
        "version" | "-v" | "--version" => {
            println!("launchpad v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "-h" | "--help" => {
            print_usage();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("✗ {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_store(data_file: Option<PathBuf>) -> Result<ProjectStore> {
    ProjectStore::with_config(StoreConfig::from_env(data_file))
}

// Look a project up by id, falling back to exact name
fn find_project(store: &ProjectStore, key: &str) -> Result<ProjectRecord> {
    let projects = store.get_all();
    projects
        .iter()
        .find(|p| p.id == key)
        .or_else(|| projects.iter().find(|p| p.name == key))
        .cloned()
        .ok_or_else(|| LaunchpadError::NotFound(key.to_string()))
}

fn required<'a>(args: &'a [String], index: usize, what: &str) -> Result<&'a str> {
    args.get(index)
        .map(String::as_str)
        .ok_or_else(|| LaunchpadError::Config(format!("missing {}", what)))
}

fn flag_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| LaunchpadError::Config(format!("{} needs a value", flag)))
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn handle_list(store: &ProjectStore) -> Result<()> {
    // Surface a corrupt file instead of showing an empty list
    store.try_load()?;
    let projects = store.get_all();

    if projects.is_empty() {
        println!("No projects yet. Add one with: launchpad add <name> <path>");
        return Ok(());
    }

    println!("\nProjects:");
    println!("{}", "=".repeat(60));
    for project in &projects {
        println!(
            "{:3}. {:<20} {}  ({} command{})",
            project.order + 1,
            project.name,
            short_id(&project.id),
            project.commands.len(),
            if project.commands.len() == 1 { "" } else { "s" }
        );
        println!("     {}", project.path);
    }
    println!("{}", "=".repeat(60));

    Ok(())
}

fn handle_show(store: &ProjectStore, args: &[String]) -> Result<()> {
    let project = find_project(store, required(args, 0, "project id or name")?)?;
    println!("{}", serde_json::to_string_pretty(&project)?);
    Ok(())
}

fn handle_add(store: &ProjectStore, args: &[String]) -> Result<()> {
    let name = required(args, 0, "project name")?;
    let path = required(args, 1, "project path")?;

    let mut commands: Vec<String> = Vec::new();
    let mut result_path = String::new();

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--command" => commands.push(flag_value(args, &mut i, "--command")?.to_string()),
            "--result" => result_path = flag_value(args, &mut i, "--result")?.to_string(),
            other => {
                return Err(LaunchpadError::Config(format!("unknown option: {}", other)));
            }
        }
        i += 1;
    }

    let legacy = commands.first().cloned().unwrap_or_default();
    let commands = if commands.is_empty() { None } else { Some(commands) };
    let project = store.add(name, path, &legacy, &result_path, commands)?;

    println!("✓ Added '{}' ({})", project.name, project.id);
    Ok(())
}

fn handle_update(store: &ProjectStore, args: &[String]) -> Result<()> {
    let project = find_project(store, required(args, 0, "project id or name")?)?;

    let mut patch = ProjectPatch::new();
    let mut commands: Option<Vec<String>> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--name" => patch = patch.name(flag_value(args, &mut i, "--name")?),
            "--path" => patch = patch.path(flag_value(args, &mut i, "--path")?),
            "--result" => patch = patch.result_path(flag_value(args, &mut i, "--result")?),
            "--legacy" => patch = patch.legacy_command(flag_value(args, &mut i, "--legacy")?),
            "--command" => commands
                .get_or_insert_with(Vec::new)
                .push(flag_value(args, &mut i, "--command")?.to_string()),
            "--clear-commands" => {
                commands.get_or_insert_with(Vec::new);
            }
            other => {
                return Err(LaunchpadError::Config(format!("unknown option: {}", other)));
            }
        }
        i += 1;
    }
    if let Some(commands) = commands {
        patch = patch.commands(commands);
    }

    if patch.is_empty() {
        println!("Nothing to update.");
        return Ok(());
    }

    let updated = store.update(&project.id, patch)?;
    println!("✓ Updated '{}'", updated.name);
    Ok(())
}

fn handle_set_command(store: &ProjectStore, args: &[String]) -> Result<()> {
    let project = find_project(store, required(args, 0, "project id or name")?)?;
    let index: usize = required(args, 1, "command index")?
        .parse()
        .map_err(|_| LaunchpadError::Config("command index must be a number".to_string()))?;
    let command = required(args, 2, "command")?;

    let updated = store.update_command_at(&project.id, index, command)?;
    if index >= updated.commands.len() {
        println!("'{}' has no command #{}; nothing changed.", updated.name, index);
    } else {
        println!("✓ Command #{} of '{}' is now: {}", index, updated.name, command);
    }
    Ok(())
}

fn handle_remove(store: &ProjectStore, args: &[String]) -> Result<()> {
    let key = required(args, 0, "project id or name")?;
    let id = find_project(store, key).map(|p| p.id)?;

    if store.delete(&id)? {
        println!("✓ Removed '{}'", key);
    } else {
        println!("'{}' was already gone.", key);
    }
    Ok(())
}

fn handle_reorder(store: &ProjectStore, args: &[String]) -> Result<()> {
    if args.is_empty() {
        return Err(LaunchpadError::Config(
            "reorder needs at least one project".to_string(),
        ));
    }

    let ids = args
        .iter()
        .map(|key| find_project(store, key).map(|p| p.id))
        .collect::<Result<Vec<_>>>()?;
    store.reorder(&ids)?;

    handle_list(store)
}

fn handle_search(store: &ProjectStore, args: &[String]) -> Result<()> {
    if args.is_empty() {
        eprintln!("Error: No search query provided");
        return Ok(());
    }

    let query = args.join(" ");
    let results = Searcher::new(store).search(&query, 20);

    if results.is_empty() {
        println!("No projects found matching '{}'", query);
    } else {
        println!("\nFound {} project(s) matching '{}':", results.len(), query);
        println!("{}", "=".repeat(60));
        for (i, result) in results.iter().enumerate() {
            println!(
                "{:3}. {:<20} {}",
                i + 1,
                result.project.name,
                result.project.path
            );
        }
        println!("{}", "=".repeat(60));
    }

    Ok(())
}

fn handle_run(store: &ProjectStore, args: &[String]) -> Result<()> {
    let project = find_project(store, required(args, 0, "project id or name")?)?;
    let mut only = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--only" => {
                let raw = flag_value(args, &mut i, "--only")?;
                let index = raw.parse::<usize>().map_err(|_| {
                    LaunchpadError::Config(format!("invalid command index '{}'", raw))
                })?;
                only = Some(index);
            }
            other => return Err(LaunchpadError::Config(format!("unknown option: {}", other))),
        }
        i += 1;
    }

    let dispatcher = CommandDispatcher::detect();
    let dir = Path::new(&project.path);

    match only {
        Some(index) => dispatcher.launch_one(dir, &project.commands, index)?,
        None => dispatcher.launch(dir, &project.commands)?,
    }
    println!("✓ Launched '{}' in a new terminal", project.name);
    Ok(())
}

fn handle_open(store: &ProjectStore, args: &[String]) -> Result<()> {
    let project = find_project(store, required(args, 0, "project id or name")?)?;
    let want_result = args.iter().skip(1).any(|a| a == "--result");

    let target = if want_result {
        if project.result_path.is_empty() {
            return Err(LaunchpadError::Config(format!(
                "'{}' has no result path",
                project.name
            )));
        }
        &project.result_path
    } else {
        &project.path
    };

    CommandDispatcher::detect().open_folder(Path::new(target))?;
    Ok(())
}

fn handle_export(store: &ProjectStore, args: &[String]) -> Result<()> {
    let json = serde_json::to_string_pretty(&store.export())?;

    match args.first() {
        Some(file) => {
            fs::write(file, json)?;
            println!("✓ Exported to {}", file);
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn handle_import(store: &ProjectStore, args: &[String]) -> Result<()> {
    let file = required(args, 0, "import file")?;
    let data: serde_json::Value = serde_json::from_slice(&fs::read(file)?)?;

    let summary = store.import(&data)?;
    println!(
        "✓ Imported {} project(s), skipped {}",
        summary.imported, summary.skipped
    );
    Ok(())
}

fn print_usage() {
    println!(
        r#"launchpad v{} - Your projects, one command away

USAGE:
    launchpad [--data-file PATH] <COMMAND> [OPTIONS]

COMMANDS:
    list                               List projects in order
    show <project>                     Show one project as JSON
    add <name> <path> [OPTIONS]        Register a project
        --command <cmd>                  Command to run (repeatable, in order)
        --result <path>                  Where the project's output lands
    update <project> [OPTIONS]         Change a project
        --name <name> --path <path> --result <path>
        --command <cmd> (repeatable)     Replace the command list
        --clear-commands                 Remove all commands
        --legacy <cmd>                   Replace only the first command
    set-command <project> <i> <cmd>    Replace command number i (from 0)
    remove <project>                   Delete a project
    reorder <project>...               Move these projects to the top, in order
    search <query>                     Fuzzy search project names
    run <project> [--only <i>]         Run the commands (or only command i) in a new terminal
    open <project> [--result]          Open the project (or result) folder
    export [file]                      Export all projects as JSON
    import <file>                      Import projects from an export
    version                            Show version
    help                               Show this help

<project> is a project id or its exact name.

ENVIRONMENT:
    APP_DATA_DIR      Store lives in $APP_DATA_DIR/data/projects.json
    LAUNCHPAD_LOG     Log filter (e.g. info, debug)

EXAMPLES:
    launchpad add api ~/code/api --command "npm install" --command "npm run dev"
    launchpad run api
    launchpad reorder web api
"#,
        env!("CARGO_PKG_VERSION")
    );
}
