use layout_chain::config::{ConfigFile, parse_config};
use layout_chain::test_utils::{SiteFixture, TestSite};

use crate::common::{FileAssert, run_layout_chain};

const CONFIG: &str = r#"
[layouts]
pattern = ["**/*.md", "!drafts/**"]
directory = "src/layouts"

[metadata]
site_name = "Configured"
"#;

#[test]
fn test_config_file_is_picked_up() {
    let fixture = SiteFixture::in_source_layouts()
        .with_file("layout-chain.toml", CONFIG)
        .with_file("src/drafts/wip.md", "---\nlayout: base.html\n---\nWIP");
    let site = TestSite::from_fixture(&fixture).unwrap();

    let output = run_layout_chain(site.root(), &["build"]);

    output.assert_success();
    FileAssert::contains(site.root().join("build/about.md"), "<html>Configured|About</html>");
    FileAssert::contains(site.root().join("build/drafts/wip.md"), "WIP");
    let draft = site.read_file("build/drafts/wip.md").unwrap();
    assert!(!draft.contains("<html>"), "draft should not be rendered: {draft}");
    FileAssert::not_exists(site.root().join("build/layouts"));
}

#[test]
fn test_yaml_config_via_flag() {
    let yaml = "layouts:\n  directory: src/layouts\nmetadata:\n  site_name: Yaml\n";
    let fixture = SiteFixture::in_source_layouts().with_file("site.yaml", yaml);
    let site = TestSite::from_fixture(&fixture).unwrap();

    run_layout_chain(site.root(), &["build", "--config", "site.yaml"]).assert_success();

    FileAssert::contains(site.root().join("build/about.md"), "<html>Yaml|About</html>");
}

#[test]
fn test_directory_flag_overrides_config() {
    let fixture = SiteFixture::grandparent_chain()
        .with_file("layout-chain.toml", "[layouts]\ndirectory = \"somewhere-else\"\n");
    let site = TestSite::from_fixture(&fixture).unwrap();

    run_layout_chain(site.root(), &["build", "--directory", "layouts"]).assert_success();

    FileAssert::contains(site.root().join("build/index.md"), "<title>Grandparent</title>");
}

#[test]
fn test_invalid_pattern_type_is_reported() {
    let fixture = SiteFixture::grandparent_chain().with_file("layout-chain.toml", "[layouts]\npattern = 3\n");
    let site = TestSite::from_fixture(&fixture).unwrap();

    run_layout_chain(site.root(), &["build"])
        .assert_failure()
        .assert_stderr_contains("Invalid pattern option");
}

#[test]
fn test_parse_config_reads_engine_options() {
    let site = TestSite::new().unwrap();
    let path = site
        .create_file("layout-chain.toml", "[layouts]\ndefault = \"page.html\"\n\n[layouts.engineOptions]\nautoescape = true\n")
        .unwrap();

    let config: ConfigFile = parse_config(&path).unwrap();
    let options = config.layouts_options().unwrap();

    assert_eq!(options.default.as_deref(), Some("page.html"));
    assert_eq!(options.engine_options["autoescape"], serde_json::json!(true));
    assert!(config.metadata.is_empty());
}
