//! Config file to served page, through the bundled tree path.

use std::fs;

use prerender::config::load_config;
use prerender::lifecycle::startup;
use prerender::render::HandlerRegistry;
use tempfile::TempDir;

mod common;

const SOURCE: &str = concat!(
    "!function(){var e=1}();",
    "/* ROUTER POINT FOR SSR */",
    "Nav();RouterPoint(Home,!0,'/');RouterPoint(Docs,false,\"/docs\");function x(){};",
    "/* END OF ROUTER POINT FOR SSR */",
    "render();"
);

const TREES: &str = r#"{
    "Nav": {"body": {"type": "body"}, "nav": {"type": "nav", "parentId": "body", "className": "top"}},
    "Home": {"body": {"type": "body"}, "h": {"type": "h1", "parent": "body", "text": "Home"}},
    "Docs": {"body": {"type": "body"}, "d": {"type": "article", "parent": "body", "text": "Docs"}}
}"#;

fn write_site(dir: &TempDir) -> std::path::PathBuf {
    fs::write(dir.path().join("index.html"), common::template_html()).unwrap();
    fs::write(dir.path().join("main.js"), SOURCE).unwrap();
    fs::write(dir.path().join("trees.json"), TREES).unwrap();

    let config_path = dir.path().join("prerender.toml");
    let root = dir.path().display();
    fs::write(
        &config_path,
        format!(
            r#"
[settings]
output_folder = "{root}"

[ssr]
source = "{root}/main.js"
trees = "{root}/trees.json"
"#
        ),
    )
    .unwrap();
    config_path
}

#[test]
fn test_route_table_from_source() {
    let dir = TempDir::new().unwrap();
    let config = load_config(&write_site(&dir)).unwrap();

    let table = startup::load_route_table(&config).unwrap();
    assert_eq!(table.globals(), ["Nav"]);
    assert_eq!(table.routes().len(), 2);
    assert!(table.route_for("Home").unwrap().exact);
    assert!(!table.route_for("Docs").unwrap().exact);
}

#[tokio::test]
async fn test_configured_site_serves_prefix_routes() {
    let dir = TempDir::new().unwrap();
    let config = load_config(&write_site(&dir)).unwrap();
    let site = startup::prepare(&config, HandlerRegistry::new()).unwrap();
    assert_eq!(site.cache().len(), 2);

    let (addr, shutdown) = common::start_server(site).await;

    let body = reqwest::get(format!("http://{addr}/docs/getting-started"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains(r#"<nav class="top" id="nav"></nav><article class="" id="d">Docs</article>"#));

    let body = reqwest::get(format!("http://{addr}/")).await.unwrap().text().await.unwrap();
    assert!(body.contains(r#"<h1 class="" id="h">Home</h1>"#));
    assert!(!body.contains("Docs"));

    shutdown.trigger();
}
