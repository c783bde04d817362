use assert_cmd::Command;
use layout_chain::test_utils::{SiteFixture, TestSite};
use predicates::prelude::*;

use crate::common::{FileAssert, run_layout_chain};

#[test]
fn test_build_writes_rendered_site() {
    let site = TestSite::from_fixture(&SiteFixture::grandparent_chain()).unwrap();

    let output = run_layout_chain(site.root(), &["build"]);

    output.assert_success().assert_stdout_contains("Rendered 1 files with 2 layouts");
    let index = site.root().join("build/index.md");
    FileAssert::contains(&index, "<title>Grandparent</title>");
    FileAssert::contains(&index, "<body class=\"docs\"><p>Hello</p></body>");
}

#[test]
fn test_build_custom_destination() {
    let site = TestSite::from_fixture(&SiteFixture::grandparent_chain()).unwrap();

    run_layout_chain(site.root(), &["build", "--destination", "public"]).assert_success();

    FileAssert::exists(site.root().join("public/index.md"));
    FileAssert::not_exists(site.root().join("build"));
}

#[test]
fn test_build_cycle_fails_without_output() {
    let site = TestSite::from_fixture(&SiteFixture::cyclic()).unwrap();

    let output = run_layout_chain(site.root(), &["build"]);

    output
        .assert_failure()
        .assert_stderr_contains("Circular layout dependency detected at 'a.html'")
        .assert_stderr_contains("a.html → b.html → a.html");
    assert_eq!(output.code, Some(1));
    FileAssert::not_exists(site.root().join("build"));
}

#[test]
fn test_build_excludes_in_source_layouts() {
    let fixture = SiteFixture::in_source_layouts().with_file("layout-chain.toml", "[metadata]\nsite_name = \"Demo\"\n");
    let site = TestSite::from_fixture(&fixture).unwrap();

    let output = run_layout_chain(site.root(), &["build", "--directory", "src/layouts"]);

    output.assert_success();
    FileAssert::contains(site.root().join("build/posts/first.md"), "<html>Demo|<article>First post</article></html>");
    FileAssert::contains(site.root().join("build/robots.txt"), "User-agent: *");
    FileAssert::not_exists(site.root().join("build/layouts"));
}

#[test]
fn test_build_missing_layout_suggests_name() {
    let fixture = SiteFixture::new("typo")
        .with_file("layouts/page.html", "<div>{{ contents }}</div>")
        .with_file("src/a.md", "---\nlayout: pgae.html\n---\nA");
    let site = TestSite::from_fixture(&fixture).unwrap();

    let output = run_layout_chain(site.root(), &["build"]);

    output
        .assert_failure()
        .assert_stderr_contains("Layout 'pgae.html' referenced by 'a.md' could not be found")
        .assert_stderr_contains("Did you mean 'page.html'?");
}

#[test]
fn test_build_pattern_flag_filters_everything() {
    let site = TestSite::from_fixture(&SiteFixture::grandparent_chain()).unwrap();

    let output = run_layout_chain(site.root(), &["build", "--pattern", "**/*.txt"]);

    output.assert_failure().assert_stderr_contains("No valid files to process");
}

#[test]
fn test_build_missing_source_directory() {
    let site = TestSite::new().unwrap();

    let output = run_layout_chain(site.root(), &["build"]);

    output.assert_failure().assert_stderr_contains("Failed to read source directory 'src'");
}

#[test]
fn test_tree_prints_forest() {
    let site = TestSite::from_fixture(&SiteFixture::grandparent_chain()).unwrap();

    let output = run_layout_chain(site.root(), &["tree"]);

    output
        .assert_success()
        .assert_stdout_contains("└── grandparent.html")
        .assert_stdout_contains("    └── parent.html")
        .assert_stdout_contains("2 layouts, 1 roots");
    FileAssert::not_exists(site.root().join("build"));
}

#[test]
fn test_tree_json_levels() {
    let site = TestSite::from_fixture(&SiteFixture::grandparent_chain()).unwrap();

    let output = run_layout_chain(site.root(), &["tree", "--format", "json"]);

    output.assert_success();
    let levels: Vec<Vec<String>> = serde_json::from_str(&output.stdout).unwrap();
    assert_eq!(levels, vec![vec!["grandparent.html".to_string()], vec!["parent.html".to_string()]]);
}

#[test]
fn test_tree_reports_cycle() {
    let site = TestSite::from_fixture(&SiteFixture::cyclic()).unwrap();

    run_layout_chain(site.root(), &["tree"])
        .assert_failure()
        .assert_stderr_contains("Circular layout dependency");
}

#[test]
fn test_verbose_logs_skip_reasons() {
    let fixture = SiteFixture::grandparent_chain().with_file("src/notes.txt", "plain");
    let site = TestSite::from_fixture(&fixture).unwrap();

    Command::cargo_bin("layout-chain")
        .unwrap()
        .args(["--verbose", "build", "--root"])
        .arg(site.root())
        .env("NO_COLOR", "1")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 skipped"))
        .stderr(predicate::str::contains("Skipping 'notes.txt': no layout set"));
}

#[test]
fn test_quiet_suppresses_logs() {
    let site = TestSite::from_fixture(&SiteFixture::grandparent_chain()).unwrap();

    Command::cargo_bin("layout-chain")
        .unwrap()
        .args(["--quiet", "build", "--root"])
        .arg(site.root())
        .env("RUST_LOG", "debug")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}
