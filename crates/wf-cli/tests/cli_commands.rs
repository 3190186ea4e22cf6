//! End-to-end tests for the `wayfarer` binary.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn wayfarer() -> Command {
    Command::cargo_bin("wayfarer").unwrap()
}

/// A tiny two-room catalog.
fn custom_templates() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("templates.json"),
        r#"{
    "game_settings": {"title": "Cellar Test", "starting_location": "cellar"},
    "locations": {
        "cellar": {
            "name": "Damp Cellar",
            "description": "Barrels line the walls.",
            "items": ["candle"],
            "connections": {"up": "kitchen"}
        },
        "kitchen": {"name": "Kitchen", "description": "A cold hearth."}
    },
    "items": {
        "candle": {"name": "Candle", "description": "A stub of wax.", "properties": {"light": "dim"}}
    }
}"#,
    )
    .unwrap();
    dir
}

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

#[test]
fn help_lists_subcommands() {
    wayfarer()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("play")
                .and(predicate::str::contains("generate"))
                .and(predicate::str::contains("saves")),
        );
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

#[test]
fn generate_prints_world_table() {
    wayfarer()
        .args(["generate", "abc123"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("forest_clearing")
                .and(predicate::str::contains("north -> old_oak"))
                .and(predicate::str::contains("Sword [damage=5]"))
                .and(predicate::str::contains("12 scenes")),
        );
}

#[test]
fn generate_is_deterministic() {
    let first = wayfarer().args(["generate", "same"]).output().unwrap();
    let second = wayfarer().args(["generate", "same"]).output().unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn generate_json_is_valid() {
    let output = wayfarer()
        .args(["generate", "abc123", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["seed"], "abc123");
    let scenes = doc["scenes"].as_array().unwrap();
    assert_eq!(scenes.len(), 12);
    let oak = scenes.iter().find(|s| s["id"] == "old_oak").unwrap();
    assert_eq!(oak["connections"]["south"], "forest_clearing");
}

#[test]
fn generate_with_custom_templates() {
    let dir = custom_templates();
    let path = dir.path().join("templates.json");
    wayfarer()
        .args(["--templates", path.to_str().unwrap(), "generate", "x"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Damp Cellar")
                .and(predicate::str::contains("down -> cellar"))
                .and(predicate::str::contains("2 scenes")),
        );
}

#[test]
fn debug_logging_reports_catalog_on_stderr() {
    wayfarer()
        .env("RUST_LOG", "wayfarer=debug")
        .args(["generate", "abc123"])
        .assert()
        .success()
        .stderr(predicate::str::contains("catalog ready").and(predicate::str::contains("bundled")));
}

#[test]
fn missing_templates_is_fatal() {
    wayfarer()
        .args(["--templates", "/definitely/not/here.json", "generate", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load templates"));
}

#[test]
fn malformed_templates_is_fatal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();
    wayfarer()
        .args(["--templates", path.to_str().unwrap(), "generate", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_describes_start_and_runs_commands() {
    let saves = TempDir::new().unwrap();
    wayfarer()
        .args(["play", "--seed", "abc123", "--save-dir", saves.path().to_str().unwrap()])
        .write_stdin("take sword\ninventory\nn\nquit\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Started new run with seed: abc123")
                .and(predicate::str::contains("Forest Clearing"))
                .and(predicate::str::contains("You take the Sword."))
                .and(predicate::str::contains("You are carrying: Sword"))
                .and(predicate::str::contains("You go north to The Old Oak.")),
        );
}

#[test]
fn play_reports_unknown_commands() {
    wayfarer()
        .args(["play", "--seed", "abc123"])
        .write_stdin("xyzzy\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("I don't understand that command."));
}

#[test]
fn play_conversation_suffixes() {
    wayfarer()
        .args(["play", "--seed", "abc123"])
        .write_stdin("talk to hermit\nquest\ngoodbye\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("(Now talking to Hermit)")
                .and(predicate::str::contains("(Still talking to Hermit)"))
                .and(predicate::str::contains("(Conversation ended)")),
        );
}

#[test]
fn play_custom_templates() {
    let dir = custom_templates();
    let path = dir.path().join("templates.json");
    wayfarer()
        .args(["--templates", path.to_str().unwrap(), "play", "--seed", "x"])
        .write_stdin("take candle\nup\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Cellar Test")
                .and(predicate::str::contains("You take the Candle."))
                .and(predicate::str::contains("You go up to Kitchen.")),
        );
}

#[test]
fn save_then_load_in_new_session() {
    let saves = TempDir::new().unwrap();
    let dir = saves.path().to_str().unwrap();

    wayfarer()
        .args(["play", "--seed", "abc123", "--save-dir", dir])
        .write_stdin("take sword\nn\nsave slot\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Run saved to slot.json"));
    assert!(saves.path().join("slot.json").exists());

    wayfarer()
        .args(["play", "--save-dir", dir, "--load", "slot"])
        .write_stdin("inventory\nstatus\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Run loaded from slot.json")
                .and(predicate::str::contains("The Old Oak"))
                .and(predicate::str::contains("You are carrying: Sword"))
                .and(predicate::str::contains("Seed: abc123")),
        );
}

#[test]
fn load_missing_save_fails() {
    let saves = TempDir::new().unwrap();
    wayfarer()
        .args(["play", "--save-dir", saves.path().to_str().unwrap(), "--load", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no save named nope.json"));
}

// ---------------------------------------------------------------------------
// saves
// ---------------------------------------------------------------------------

#[test]
fn saves_empty_directory() {
    let saves = TempDir::new().unwrap();
    wayfarer()
        .args(["saves", "--save-dir", saves.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No saves found."));
}

#[test]
fn saves_lists_timestamped_saves() {
    let saves = TempDir::new().unwrap();
    let dir = saves.path().to_str().unwrap();

    wayfarer()
        .args(["play", "--seed", "listed", "--save-dir", dir])
        .write_stdin("save\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Run saved to save_"));

    wayfarer()
        .args(["saves", "--save-dir", dir])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("save_")
                .and(predicate::str::contains("listed"))
                .and(predicate::str::contains("forest_clearing"))
                .and(predicate::str::contains("1 saves")),
        );
}

#[test]
fn save_with_several_words_goes_to_the_story() {
    let saves = TempDir::new().unwrap();

    wayfarer()
        .args(["play", "--seed", "abc123", "--save-dir", saves.path().to_str().unwrap()])
        .write_stdin("save the princess\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Run saved")
                .not()
                .and(predicate::str::contains("I don't understand that command.")),
        );

    assert_eq!(fs::read_dir(saves.path()).unwrap().count(), 0);
}
