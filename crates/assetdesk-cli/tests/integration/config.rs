//! Integration tests for `config` subcommands routed through `run`.

use assetdesk_cli::{AppConfig, Context};

use crate::common::{TestAssets, lines, run_with};

fn config_context(harness: &TestAssets) -> (Context, String) {
    let path = harness.dir.path().join("config.toml");
    let path = path.to_string_lossy().into_owned();
    let ctx = harness.context().with_config_path(Some(path.clone()));
    (ctx, path)
}

#[tokio::test]
async fn test_init_set_get() {
    let harness = TestAssets::new();
    let (ctx, path) = config_context(&harness);

    let output = run_with(&ctx, &["config", "init"]).await.unwrap();
    assert!(output.contains(&path));

    run_with(&ctx, &["config", "set", "preview_width", "40"])
        .await
        .unwrap();
    let output = run_with(&ctx, &["config", "get", "preview_width"])
        .await
        .unwrap();
    assert_eq!(lines(&output), vec!["40"]);

    let loaded: AppConfig = toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(loaded.preview_width, 40);
}

#[tokio::test]
async fn test_path_and_export() {
    let harness = TestAssets::new();
    let (ctx, path) = config_context(&harness);

    let output = run_with(&ctx, &["config", "path"]).await.unwrap();
    assert_eq!(lines(&output), vec![path.as_str()]);

    run_with(&ctx, &["config", "init"]).await.unwrap();
    let output = run_with(&ctx, &["config", "export"]).await.unwrap();
    assert!(lines(&output).contains(&"ASSETDESK_HEADERS_SUBDIR=Headers"));
}
