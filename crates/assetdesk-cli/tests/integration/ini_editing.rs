//! Integration tests for reading and editing INI files.

use assetdesk_cli::{AppConfig, Error};

use crate::common::{GAME_INI, TestAssets, lines, run_with};

const FILE: &str = "Config/game.ini";

// ----------------------------------------------------------------------------
// Reading
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_sections() {
    let harness = TestAssets::new();
    let output = harness.run(&["sections", FILE]).await.unwrap();
    assert_eq!(lines(&output), vec!["Main", "Tips"]);
}

#[tokio::test]
async fn test_keys_with_previews_and_defaults() {
    let harness = TestAssets::new();
    let output = harness.run(&["keys", FILE, "Main"]).await.unwrap();
    assert_eq!(
        lines(&output),
        vec!["title = Dragon Quest", "width = 800", "skip_intro", "lang = en"]
    );
}

#[tokio::test]
async fn test_keys_unknown_section() {
    let harness = TestAssets::new();
    let err = harness.run(&["keys", FILE, "Audio"]).await.unwrap_err();
    assert_eq!(err.to_string(), "No section: 'Audio'");
}

#[tokio::test]
async fn test_get_multiline_value() {
    let harness = TestAssets::new();
    let output = harness.run(&["get", FILE, "Tips", "LOADING"]).await.unwrap();
    assert_eq!(output, "Press start\nto continue\n");
}

#[tokio::test]
async fn test_get_default_and_valueless() {
    let harness = TestAssets::new();
    assert_eq!(harness.run(&["get", FILE, "Tips", "lang"]).await.unwrap(), "en\n");
    assert_eq!(harness.run(&["get", FILE, "Main", "skip_intro"]).await.unwrap(), "");
}

#[tokio::test]
async fn test_get_missing_key() {
    let harness = TestAssets::new();
    let err = harness.run(&["get", FILE, "Main", "height"]).await.unwrap_err();
    assert!(err.to_string().contains("No key 'height'"));
}

// ----------------------------------------------------------------------------
// Editing
// ----------------------------------------------------------------------------

#[tokio::test]
async fn test_set_rewrites_file_and_keeps_backup() {
    let harness = TestAssets::new();
    let output = harness
        .run(&["set", FILE, "Main", "Title", "Final Fantasy"])
        .await
        .unwrap();

    let lines = lines(&output);
    assert!(lines[0].starts_with("Saved ") && lines[0].ends_with("game.ini"));
    assert!(lines[1].starts_with("Backup: ") && lines[1].ends_with("game.ini.bak"));

    assert_eq!(
        harness.read(FILE),
        "[DEFAULT]\nlang = en\n\n\
         [Main]\ntitle = Final Fantasy\nwidth = 800\nskip_intro\n\n\
         [Tips]\nloading = Press start\n\tto continue\n\n"
    );
    assert_eq!(harness.read("Config/game.ini.bak"), GAME_INI);
}

#[tokio::test]
async fn test_set_new_key_multiline() {
    let harness = TestAssets::new();
    harness
        .run(&["set", FILE, "Tips", "combat", "Block often\nDodge late"])
        .await
        .unwrap();

    assert!(harness.read(FILE).contains("combat = Block often\n\tDodge late\n"));
    let output = harness.run(&["get", FILE, "Tips", "combat"]).await.unwrap();
    assert_eq!(output, "Block often\nDodge late\n");
}

#[tokio::test]
async fn test_set_without_value() {
    let harness = TestAssets::new();
    harness
        .run(&["set", FILE, "Main", "fullscreen", "--no-value"])
        .await
        .unwrap();
    assert!(harness.read(FILE).contains("\nfullscreen\n"));
}

#[tokio::test]
async fn test_set_default_section() {
    let harness = TestAssets::new();
    harness
        .run(&["set", FILE, "DEFAULT", "difficulty", "normal"])
        .await
        .unwrap();
    let output = harness.run(&["get", FILE, "Tips", "difficulty"]).await.unwrap();
    assert_eq!(output, "normal\n");
}

#[tokio::test]
async fn test_set_unknown_section_leaves_file() {
    let harness = TestAssets::new();
    let err = harness
        .run(&["set", FILE, "Audio", "volume", "7"])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("No section"));
    assert_eq!(harness.read(FILE), GAME_INI);
    assert!(!harness.path("Config/game.ini.bak").exists());
}

#[tokio::test]
async fn test_add_section() {
    let harness = TestAssets::new();
    harness.run(&["add-section", FILE, "Audio"]).await.unwrap();
    harness
        .run(&["set", FILE, "Audio", "volume", "7"])
        .await
        .unwrap();

    let output = harness.run(&["sections", FILE]).await.unwrap();
    assert_eq!(lines(&output), vec!["Main", "Tips", "Audio"]);
    assert!(harness.read(FILE).ends_with("[Audio]\nvolume = 7\n\n"));
}

#[tokio::test]
async fn test_add_duplicate_section() {
    let harness = TestAssets::new();
    let err = harness.run(&["add-section", FILE, "Main"]).await.unwrap_err();
    assert_eq!(err.to_string(), "Section 'Main' already exists");
}

#[tokio::test]
async fn test_remove_section() {
    let harness = TestAssets::new();
    harness.run(&["remove-section", FILE, "Tips"]).await.unwrap();
    assert!(!harness.read(FILE).contains("[Tips]"));

    let err = harness
        .run(&["remove-section", FILE, "Tips"])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("No section"));
}

#[tokio::test]
async fn test_remove_key() {
    let harness = TestAssets::new();
    harness.run(&["remove-key", FILE, "Main", "width"]).await.unwrap();
    assert!(!harness.read(FILE).contains("width"));

    // Inherited defaults cannot be removed from a section.
    let err = harness
        .run(&["remove-key", FILE, "Main", "lang"])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("No key 'lang'"));
}

#[tokio::test]
async fn test_second_save_replaces_backup() {
    let harness = TestAssets::new();
    harness.run(&["set", FILE, "Main", "width", "1024"]).await.unwrap();
    let first_save = harness.read(FILE);
    harness.run(&["set", FILE, "Main", "width", "1280"]).await.unwrap();

    assert_eq!(harness.read("Config/game.ini.bak"), first_save);
}

#[tokio::test]
async fn test_backup_disabled() {
    let harness = TestAssets::new();
    let config = AppConfig {
        backup: false,
        ..AppConfig::default()
    };
    let output = run_with(
        &harness.context_with(config),
        &["set", FILE, "Main", "width", "640"],
    )
    .await
    .unwrap();

    assert_eq!(lines(&output).len(), 1);
    assert!(!harness.path("Config/game.ini.bak").exists());
}

#[tokio::test]
async fn test_editing_item_file_is_rejected() {
    let harness = TestAssets::new().with_items();
    let err = harness
        .run(&["set", "Items/Item.txt", "Main", "k", "v"])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotIni { kind: "items", .. }));
}

#[tokio::test]
async fn test_editing_raw_file_is_rejected() {
    let harness = TestAssets::new();
    harness.write("Config/notes.txt", "free text\n");
    let err = harness
        .run(&["add-section", "Config/notes.txt", "Main"])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("is raw content, not an INI document"));
}
