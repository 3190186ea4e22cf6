use comfy_table::{ContentArrangement, Table};
use wf_core::{Scene, TemplateCatalog};
use wf_worldgen::{Seed, WorldGenerator};

pub fn run(catalog: &TemplateCatalog, seed: &str, json: bool) -> Result<(), String> {
    let seed = Seed::new(seed);
    let run = WorldGenerator::new(catalog).generate(&seed);
    let scenes: Vec<&Scene> = run.graph.scenes().collect();

    if json {
        let doc = serde_json::json!({ "seed": seed.as_str(), "scenes": scenes });
        let out = serde_json::to_string_pretty(&doc).map_err(|e| e.to_string())?;
        println!("{out}");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Scene", "Name", "Exits", "Items", "NPCs"]);

    for scene in &scenes {
        let exits: Vec<String> = scene
            .connections
            .iter()
            .map(|(dir, to)| format!("{dir} -> {to}"))
            .collect();
        let items: Vec<String> = scene
            .items
            .iter()
            .map(|i| {
                if i.properties.is_empty() {
                    return i.name.clone();
                }
                let props: Vec<String> =
                    i.properties.iter().map(|(k, v)| format!("{k}={v}")).collect();
                format!("{} [{}]", i.name, props.join(", "))
            })
            .collect();
        let npcs: Vec<&str> = scene.npcs.iter().map(|n| n.name.as_str()).collect();
        table.add_row(vec![
            scene.id.clone(),
            scene.name.clone(),
            or_dash(exits.join("\n")),
            or_dash(items.join("\n")),
            or_dash(npcs.join(", ")),
        ]);
    }

    println!("  Seed: {seed}");
    println!("{table}");
    println!();
    println!("  {} scenes", scenes.len());

    Ok(())
}

fn or_dash(s: String) -> String {
    if s.is_empty() { "-".to_string() } else { s }
}
