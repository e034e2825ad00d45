//! Integration tests for `list`.

use assetdesk_cli::{AppConfig, Cli, Context, Error};
use assetdesk_core::Surroundings;
use clap::Parser;

use crate::common::{TestAssets, lines, run_with};

#[tokio::test]
async fn test_list_sorted_relative_paths() {
    let harness = TestAssets::new().with_items();
    harness.write("Config/UPPER.INI", "[a]\n");
    harness.write("Config/readme.md", "not listed");

    let output = harness.run(&["list"]).await.unwrap();
    assert_eq!(
        lines(&output),
        vec![
            "Assets/Config/UPPER.INI",
            "Assets/Config/game.ini",
            "Assets/Headers/H_Item.ini",
            "Assets/Items/Item.txt",
        ]
    );
}

#[tokio::test]
async fn test_list_skips_backups() {
    let harness = TestAssets::new();
    harness
        .run(&["set", "Config/game.ini", "Main", "title", "New"])
        .await
        .unwrap();
    assert!(harness.path("Config/game.ini.bak").exists());

    let output = harness.run(&["list"]).await.unwrap();
    assert_eq!(lines(&output), vec!["Assets/Config/game.ini"]);
}

#[tokio::test]
async fn test_list_json() {
    let harness = TestAssets::new();
    let output = harness.run(&["list", "--json"]).await.unwrap();

    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    let files = value.as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["relative"], "Assets/Config/game.ini");
    assert!(files[0]["path"].as_str().unwrap().ends_with("game.ini"));
}

#[tokio::test]
async fn test_list_custom_patterns() {
    let harness = TestAssets::new().with_items();
    let config = AppConfig {
        patterns: vec!["*.txt".into()],
        ..AppConfig::default()
    };
    let output = run_with(&harness.context_with(config), &["list"]).await.unwrap();
    assert_eq!(lines(&output), vec!["Assets/Items/Item.txt"]);
}

#[tokio::test]
async fn test_list_missing_assets_folder() {
    let harness = TestAssets::new();
    let ctx = Context::new(AppConfig::default(), Some(harness.path("Missing")), false);

    let err = run_with(&ctx, &["list"]).await.unwrap_err();
    assert!(matches!(err, Error::AssetsNotFound { .. }));
    assert!(err.to_string().contains("Missing"));
}

#[tokio::test]
async fn test_no_prompt_without_assets_reports_not_found() {
    let harness = TestAssets::new();
    let cli = Cli::try_parse_from(["assetdesk", "--no-prompt", "list"]).unwrap();
    assert!(cli.assets.is_none());

    // Nothing to discover: no env var, no binary dir, a working dir without Assets.
    let around = Surroundings {
        current_dir: Some(harness.path("Config")),
        ..Surroundings::default()
    };
    let ctx = Context::new(AppConfig::default(), cli.assets, !cli.no_prompt).with_surroundings(around);

    let err = run_with(&ctx, &["list"]).await.unwrap_err();
    assert!(matches!(err, Error::AssetsNotFound { .. }));
}

#[tokio::test]
async fn test_assets_found_from_working_dir() {
    let harness = TestAssets::new();
    let around = Surroundings {
        current_dir: Some(harness.dir.path().to_path_buf()),
        ..Surroundings::default()
    };
    let ctx = Context::new(AppConfig::default(), None, false).with_surroundings(around);

    let output = run_with(&ctx, &["list"]).await.unwrap();
    assert_eq!(lines(&output), vec!["Assets/Config/game.ini"]);
}
