//! Integration tests for `show`.

use assetdesk_cli::AppConfig;

use crate::common::{TestAssets, lines, run_with};

#[tokio::test]
async fn test_show_ini_document() {
    let harness = TestAssets::new();
    let output = harness.run(&["show", "Config/game.ini"]).await.unwrap();
    let lines = lines(&output);

    assert!(lines[0].ends_with("game.ini (ini, utf-8)"));
    assert_eq!(
        &lines[1..],
        &[
            "[DEFAULT]",
            "  lang = en",
            "[Main]",
            "  title = Dragon Quest",
            "  width = 800",
            "  skip_intro",
            "[Tips]",
            "  loading = Press start",
        ]
    );
}

#[tokio::test]
async fn test_show_ini_limit() {
    let harness = TestAssets::new();
    let output = harness
        .run(&["show", "Config/game.ini", "--limit", "1"])
        .await
        .unwrap();
    assert!(output.contains("[Main]"));
    assert!(!output.contains("[Tips]"));
    assert!(output.ends_with("... 1 more sections\n"));
}

#[tokio::test]
async fn test_show_item_table() {
    let harness = TestAssets::new().with_items();
    let output = harness.run(&["show", "Items/Item.txt"]).await.unwrap();
    let lines = lines(&output);

    assert!(lines[0].ends_with("Item.txt (items, utf-8)"));
    assert!(lines[1].starts_with("headers: ") && lines[1].ends_with("H_Item.ini"));
    assert_eq!(lines[2], "ID | Name | Tip | Price");
    assert_eq!(lines[3], "1 | Sword | A sharp blade | 100");
    // Wrapped tip is previewed by its first line.
    assert_eq!(lines[4], "2 | Shield | Blocks arrows | 80");
    assert_eq!(lines.len(), 8);
}

#[tokio::test]
async fn test_show_item_table_limit() {
    let harness = TestAssets::new().with_items();
    let output = harness
        .run(&["show", "Items/Item.txt", "--limit", "2"])
        .await
        .unwrap();
    assert!(output.ends_with("... 3 more rows\n"));
}

#[tokio::test]
async fn test_show_items_json() {
    let harness = TestAssets::new().with_items();
    let output = harness
        .run(&["show", "Items/Item.txt", "--json"])
        .await
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["encoding"], "utf-8");
    assert_eq!(value["content"]["kind"], "items");
    let data = &value["content"]["data"];
    assert_eq!(data["header_source"]["kind"], "file");
    assert_eq!(data["table"]["headers"][2], "Tip");
    assert_eq!(data["table"]["rows"][1][2], "Blocks arrows\nand most swords");
}

#[tokio::test]
async fn test_show_ini_json() {
    let harness = TestAssets::new();
    let output = harness
        .run(&["show", "Config/game.ini", "--json"])
        .await
        .unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["content"]["kind"], "ini");
    let doc = &value["content"]["data"];
    assert_eq!(doc["defaults"]["lang"], "en");
    assert_eq!(doc["sections"]["Main"]["skip_intro"], serde_json::Value::Null);
    assert_eq!(doc["sections"]["Tips"]["loading"], "Press start\nto continue");
}

#[tokio::test]
async fn test_show_raw_text() {
    let harness = TestAssets::new();
    harness.write("Config/notes.txt", "free text\nwithout sections\n");

    let output = harness.run(&["show", "Config/notes.txt"]).await.unwrap();
    let lines = lines(&output);
    assert!(lines[0].ends_with("notes.txt (raw, utf-8)"));
    assert_eq!(&lines[1..], &["free text", "without sections"]);
}

#[tokio::test]
async fn test_show_by_listed_path() {
    let harness = TestAssets::new();
    let output = harness
        .run(&["show", "Assets/Config/game.ini"])
        .await
        .unwrap();
    assert!(output.contains("[Main]"));
}

#[tokio::test]
async fn test_show_missing_file() {
    let harness = TestAssets::new();
    let err = harness.run(&["show", "Config/none.ini"]).await.unwrap_err();
    assert!(err.to_string().contains("Not found"));
}

#[tokio::test]
async fn test_show_with_unknown_encoding_in_config() {
    let harness = TestAssets::new();
    let config = AppConfig {
        encodings: vec!["ebcdic".into()],
        ..AppConfig::default()
    };
    let err = run_with(&harness.context_with(config), &["show", "Config/game.ini"])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Unknown encoding 'ebcdic'"));
}

#[tokio::test]
async fn test_show_preview_width_from_config() {
    let harness = TestAssets::new();
    harness.write("Config/long.ini", format!("[s]\ntext = {}\n", "x".repeat(50)));
    let config = AppConfig {
        preview_width: 10,
        ..AppConfig::default()
    };
    let output = run_with(&harness.context_with(config), &["keys", "Config/long.ini", "s"])
        .await
        .unwrap();
    assert_eq!(output, "text = xxxxxxx...\n");
}
