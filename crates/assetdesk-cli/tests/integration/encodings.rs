//! Integration tests for legacy encodings.

use assetdesk_core::TextEncoding;

use crate::common::TestAssets;

const BIG5_ITEMS: &str = "\
1|長劍|鋒利的劍|100|
2|盾牌|堅固|80|
3|弓|遠程武器|120|
4|箭|尖|1|
5|藥水|回復生命|25|
";

#[tokio::test]
async fn test_big5_ini_edit_keeps_encoding() {
    let harness = TestAssets::new();
    harness.write(
        "Config/names.ini",
        TextEncoding::Big5.encode("[物品]\n名稱 = 長劍\n"),
    );

    let output = harness.run(&["show", "Config/names.ini"]).await.unwrap();
    assert!(output.lines().next().unwrap().ends_with("(ini, big5)"));

    harness
        .run(&["set", "Config/names.ini", "物品", "重量", "十二"])
        .await
        .unwrap();

    let bytes = harness.read_bytes("Config/names.ini");
    assert!(std::str::from_utf8(&bytes).is_err());
    assert_eq!(
        TextEncoding::Big5.decode(&bytes),
        "[物品]\n名稱 = 長劍\n重量 = 十二\n\n"
    );
}

#[tokio::test]
async fn test_cp1252_accents_survive_save() {
    let harness = TestAssets::new();
    harness.write("Config/menu.ini", b"[menu]\nitem = Caf\xe9\n".as_slice());

    let output = harness.run(&["show", "Config/menu.ini"]).await.unwrap();
    assert!(output.lines().next().unwrap().ends_with("(ini, cp1252)"));
    assert!(output.contains("item = Café"));

    harness
        .run(&["set", "Config/menu.ini", "menu", "drink", "Thé"])
        .await
        .unwrap();
    assert_eq!(
        harness.read_bytes("Config/menu.ini"),
        b"[menu]\nitem = Caf\xe9\ndrink = Th\xe9\n\n".to_vec()
    );
}

#[tokio::test]
async fn test_big5_items_export_in_source_encoding() {
    let harness = TestAssets::new();
    harness.write("Items/Names.txt", TextEncoding::Big5.encode(BIG5_ITEMS));
    harness.write("Headers/H_Names.ini", "ID,Name,Tip,Price");
    let csv = harness.dir.path().join("names.csv");

    let output = harness
        .run(&["items", "export", "Items/Names.txt", csv.to_str().unwrap()])
        .await
        .unwrap();
    assert!(output.trim_end().ends_with("(big5)"));

    let bytes = std::fs::read(&csv).unwrap();
    assert!(std::str::from_utf8(&bytes).is_err());
    let text = TextEncoding::Big5.decode(&bytes);
    assert!(text.starts_with("ID,Name,Tip,Price\n1,長劍,鋒利的劍,100\n"));
}

#[tokio::test]
async fn test_unmappable_characters_become_question_marks() {
    let harness = TestAssets::new();
    harness.write("Config/menu.ini", b"[menu]\nitem = Caf\xe9\n".as_slice());

    harness
        .run(&["set", "Config/menu.ini", "menu", "title", "長劍"])
        .await
        .unwrap();
    let bytes = harness.read_bytes("Config/menu.ini");
    assert!(TextEncoding::Windows1252.decode(&bytes).contains("title = ??\n"));
}
