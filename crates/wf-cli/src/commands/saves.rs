use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use wf_fiction::persistence::SaveStore;

pub fn run(dir: &Path) -> Result<(), String> {
    let store = SaveStore::new(dir);
    let saves = store.list().map_err(|e| e.to_string())?;

    if saves.is_empty() {
        println!("  No saves found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Save", "Seed", "Location", "Items"]);

    for name in &saves {
        match store.read(name) {
            Ok(save) => table.add_row(vec![
                name.clone(),
                save.seed,
                save.game_state.location,
                save.game_state.inventory.len().to_string(),
            ]),
            Err(e) => table.add_row(vec![name.clone(), format!("unreadable: {e}"), String::new(), String::new()]),
        };
    }

    println!("{table}");
    println!();
    println!("  {} saves", saves.len());

    Ok(())
}
