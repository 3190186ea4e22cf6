use std::io::{self, BufRead, Write};

use colored::Colorize;
use wf_core::TemplateCatalog;
use wf_fiction::{EngineConfig, SceneData, StoryEngine};

/// How to begin a play session.
pub struct Options {
    pub seed: Option<String>,
    pub load: Option<String>,
    pub name: Option<String>,
    pub class: Option<String>,
}

const META_HELP: &str = "  Session: save [name], load <name>, saves, status, quit";

pub fn run(catalog: TemplateCatalog, config: EngineConfig, options: Options) -> Result<(), String> {
    let title = catalog
        .game_settings
        .title
        .clone()
        .unwrap_or_else(|| "Wayfarer".to_string());
    let mut engine = StoryEngine::new(catalog, config);

    match options.load.as_deref() {
        Some(save) => {
            let msg = engine.load_run(save).map_err(|e| e.to_string())?;
            println!("  {msg}");
        }
        None => {
            let msg = engine.start_new_run(options.seed.as_deref(), options.name, options.class);
            println!("  {} {title}", "Starting".bold());
            println!("  {msg}");
        }
    }
    println!("  Type 'help' for commands, 'quit' to exit.");
    println!("{META_HELP}");

    let mut current = engine.current_scene_data().map_err(|e| e.to_string())?;
    print_scene(&current);

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
            break;
        }

        match session_command(&mut engine, input) {
            Some(Ok(output)) => println!("{output}\n"),
            Some(Err(e)) => println!("{}\n", e.yellow()),
            None => println!("{}\n", engine.process_command(input)),
        }

        let data = engine.current_scene_data().map_err(|e| e.to_string())?;
        if data.scene_id != current.scene_id {
            print_scene(&data);
        }
        current = data;
    }

    Ok(())
}

/// Commands about the session rather than the story. `None` means the input
/// is for the story engine.
///
/// The verb must be the whole first word and take at most one argument, so
/// story input such as `save the cat` still reaches the engine.
fn session_command(engine: &mut StoryEngine, input: &str) -> Option<Result<String, String>> {
    let words: Vec<&str> = input.split_whitespace().collect();
    let (verb, arg) = match words.as_slice() {
        [verb] => (*verb, None),
        [verb, arg] => (*verb, Some(*arg)),
        _ => return None,
    };
    let result = match verb.to_lowercase().as_str() {
        "save" => engine.save_run(arg),
        "load" => match arg {
            Some(name) => engine.load_run(name),
            None => return Some(Err("Load which save?".to_string())),
        },
        "saves" if arg.is_none() => engine.list_saves().map(|saves| {
            if saves.is_empty() {
                "No saves found.".to_string()
            } else {
                saves.join("\n")
            }
        }),
        "status" if arg.is_none() => engine.status().map(|s| {
            format!(
                "Seed: {} | Location: {} | Visited: {} | Carrying: {}",
                s.seed, s.location, s.visited_scenes, s.inventory_count
            )
        }),
        _ => return None,
    };
    Some(result.map_err(|e| e.to_string()))
}

fn print_scene(data: &SceneData) {
    println!();
    println!("  {}", data.name.bold());
    println!("  {}", data.description);
    if !data.items.is_empty() {
        println!("  {} {}", "Items:".dimmed(), data.items.join(", "));
    }
    if !data.npcs.is_empty() {
        println!("  {} {}", "Present:".dimmed(), data.npcs.join(", "));
    }
    if !data.exits.is_empty() {
        let exits: Vec<String> = data
            .exits
            .iter()
            .map(|e| format!("{} ({})", e.direction, e.destination))
            .collect();
        println!("  {} {}", "Exits:".dimmed(), exits.join(", "));
    }
    if let Some(npc) = &data.current_conversation {
        println!("  {} {npc}", "Talking to:".dimmed());
    }
    println!();
}
