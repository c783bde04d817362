use layout_chain::config::LayoutsOptions;
use layout_chain::core::{LayoutError, LayoutRef};
use layout_chain::locator::Ineligible;
use layout_chain::plugin::LayoutsPlugin;
use layout_chain::site::Site;
use layout_chain::test_utils::{SiteFixture, TestSite};
use serde_json::json;

use crate::common::FileAssert;

/// Content is rendered through parent and grandparent, with data inherited down the chain
#[tokio::test]
async fn test_grandparent_chain_renders_end_to_end() {
    let test_site = TestSite::from_fixture(&SiteFixture::grandparent_chain()).unwrap();
    let mut site = Site::read(test_site.root(), "src").await.unwrap();

    let summary = LayoutsPlugin::new(LayoutsOptions::new()).run(&mut site).await.unwrap();

    assert_eq!(summary.layouts, 2);
    assert_eq!(summary.layouts_rendered, 1);
    assert_eq!(summary.files_rendered, 1);

    let index = site.files["index.md"].text().unwrap();
    assert!(index.contains("<title>Grandparent</title>"), "got: {index}");
    assert!(index.contains("<body class=\"docs\"><p>Hello</p></body>"), "got: {index}");
    assert!(index.trim_end().ends_with("</html>"), "got: {index}");
}

/// Expressions left in a layout can read data from any of its ancestors
#[tokio::test]
async fn test_content_render_sees_grandparent_data() {
    let fixture = SiteFixture::new("ancestor_data")
        .with_file("layouts/grand.html", "---\ntheme: dark\n---\n<html>{{ contents }}</html>")
        .with_file("layouts/parent.html", "---\nlayout: grand.html\n---\n<p class=\"{{ theme }}\">{{ contents }}</p>")
        .with_file("src/index.md", "---\nlayout: parent.html\n---\nHi");
    let test_site = TestSite::from_fixture(&fixture).unwrap();
    let mut site = Site::read(test_site.root(), "src").await.unwrap();

    let summary = LayoutsPlugin::new(LayoutsOptions::new()).run(&mut site).await.unwrap();

    assert_eq!(summary.files_rendered, 1);
    let index = site.files["index.md"].text().unwrap();
    assert_eq!(index.trim_end(), "<html><p class=\"dark\">Hi</p></html>");
}

/// A cycle fails the pass before any content file is touched
#[tokio::test]
async fn test_cycle_aborts_without_rendering() {
    let test_site = TestSite::from_fixture(&SiteFixture::cyclic()).unwrap();
    let mut site = Site::read(test_site.root(), "src").await.unwrap();
    let before = site.files.clone();

    let err = LayoutsPlugin::new(LayoutsOptions::new()).run(&mut site).await.unwrap_err();

    assert_eq!(
        err,
        LayoutError::CircularDependency {
            layout: "a.html".to_string(),
            chain: "a.html → b.html → a.html".to_string(),
        }
    );
    assert_eq!(site.files, before);
}

/// Layouts inside the source tree are found, resolved, cleaned up and not written
#[tokio::test]
async fn test_in_source_layouts() {
    let test_site = TestSite::from_fixture(&SiteFixture::in_source_layouts()).unwrap();
    let metadata = json!({"site_name": "Demo"}).as_object().cloned().unwrap();
    let mut site = Site::read(test_site.root(), "src").await.unwrap().with_metadata(metadata);

    let plugin = LayoutsPlugin::new(LayoutsOptions::new().with_directory("src/layouts"));
    let summary = plugin.run(&mut site).await.unwrap();

    assert_eq!(summary.files_rendered, 2);
    assert!(summary.skipped.contains(&("robots.txt".to_string(), Ineligible::NoLayout)));
    assert!(summary.skipped.contains(&("layouts/base.html".to_string(), Ineligible::InLayoutDirectory)));

    let post = site.files["posts/first.md"].text().unwrap();
    assert!(post.contains("<html>Demo|<article>First post</article></html>"), "got: {post}");
    let about = site.files["about.md"].text().unwrap();
    assert!(about.contains("<html>Demo|About</html>"), "got: {about}");
    assert_eq!(site.files["robots.txt"].text(), Some("User-agent: *"));

    let layout = &site.files["layouts/partials/post.html"];
    assert!(layout.layout.is_none());
    assert!(layout.text().unwrap().contains("<html>Demo|<article>{{ contents }}</article></html>"));

    let written = site.write("build", Some("layouts")).await.unwrap();
    assert_eq!(written, 3);
    FileAssert::exists(test_site.root().join("build/posts/first.md"));
    FileAssert::not_exists(test_site.root().join("build/layouts"));
}

/// A content file naming an unknown layout fails with a suggestion
#[tokio::test]
async fn test_missing_layout_is_fatal() {
    let fixture = SiteFixture::new("missing")
        .with_file("layouts/page.html", "<div>{{ contents }}</div>")
        .with_file("src/a.md", "---\nlayout: pgae.html\n---\nA");
    let test_site = TestSite::from_fixture(&fixture).unwrap();
    let mut site = Site::read(test_site.root(), "src").await.unwrap();

    let err = LayoutsPlugin::new(LayoutsOptions::new()).run(&mut site).await.unwrap_err();

    assert_eq!(
        err,
        LayoutError::MissingLayout {
            name: "pgae.html".to_string(),
            referenced_by: "a.md".to_string(),
            suggestion: Some("page.html".to_string()),
        }
    );
    assert_eq!(site.files["a.md"].layout, Some(LayoutRef::Named("pgae.html".to_string())));
}

/// The default layout applies to content without one, never to layouts
#[tokio::test]
async fn test_default_layout() {
    let fixture = SiteFixture::new("default")
        .with_file("layouts/base.html", "[{{ contents }}]")
        .with_file("layouts/page.html", "<p>{{ contents }}</p>")
        .with_file("src/plain.md", "plain")
        .with_file("src/raw.md", "---\nlayout: false\n---\nraw");
    let test_site = TestSite::from_fixture(&fixture).unwrap();
    let mut site = Site::read(test_site.root(), "src").await.unwrap();

    let options = LayoutsOptions::new().with_default("page.html");
    let summary = LayoutsPlugin::new(options).run(&mut site).await.unwrap();

    assert_eq!(summary.layouts_rendered, 0);
    assert_eq!(site.files["plain.md"].text(), Some("<p>plain</p>"));
    assert!(site.files["raw.md"].text().unwrap().contains("raw"));
    assert!(!site.files["raw.md"].text().unwrap().contains("<p>"));
}

/// Nothing to render is an error
#[tokio::test]
async fn test_no_eligible_files() {
    let fixture = SiteFixture::new("nothing")
        .with_file("layouts/base.html", "{{ contents }}")
        .with_file("src/a.md", "---\nlayout: base.html\n---\nA");
    let test_site = TestSite::from_fixture(&fixture).unwrap();
    let mut site = Site::read(test_site.root(), "src").await.unwrap();

    let options = LayoutsOptions::new().with_pattern(["**/*.txt"]).unwrap();
    let err = LayoutsPlugin::new(options).run(&mut site).await.unwrap_err();

    assert_eq!(err, LayoutError::NoEligibleFiles);
}

/// Two layouts with the same base name are rejected
#[tokio::test]
async fn test_duplicate_layout_names() {
    let fixture = SiteFixture::new("duplicates")
        .with_file("layouts/a/base.html", "{{ contents }}")
        .with_file("layouts/b/base.html", "{{ contents }}")
        .with_file("src/a.md", "---\nlayout: base.html\n---\nA");
    let test_site = TestSite::from_fixture(&fixture).unwrap();
    let mut site = Site::read(test_site.root(), "src").await.unwrap();

    let err = LayoutsPlugin::new(LayoutsOptions::new()).run(&mut site).await.unwrap_err();

    assert!(matches!(err, LayoutError::DuplicateLayout { ref name, .. } if name == "base.html"));
}

/// A missing layout directory yields an empty collection, so references fail at render time
#[tokio::test]
async fn test_missing_layout_directory() {
    let fixture = SiteFixture::new("no_layouts").with_file("src/a.md", "---\nlayout: base.html\n---\nA");
    let test_site = TestSite::from_fixture(&fixture).unwrap();
    let mut site = Site::read(test_site.root(), "src").await.unwrap();

    let plugin = LayoutsPlugin::new(LayoutsOptions::new().with_directory("does-not-exist"));
    let (collection, forest) = plugin.resolve(&site).await.unwrap();
    assert!(collection.layouts.is_empty());
    assert!(forest.is_empty());

    let err = plugin.run(&mut site).await.unwrap_err();
    assert!(matches!(err, LayoutError::MissingLayout { .. }));
}

/// Siblings at the same depth all see their fully rendered parent
#[tokio::test]
async fn test_siblings_render_against_resolved_parent() {
    let fixture = SiteFixture::new("siblings")
        .with_file("layouts/root.html", "R({{ contents }})")
        .with_file("layouts/mid.html", "---\nlayout: root.html\n---\nM({{ contents }})")
        .with_file("layouts/left.html", "---\nlayout: mid.html\n---\nL({{ contents }})")
        .with_file("layouts/right.html", "---\nlayout: mid.html\n---\nX({{ contents }})")
        .with_file("src/l.md", "---\nlayout: left.html\n---\nl")
        .with_file("src/r.md", "---\nlayout: right.html\n---\nr");
    let test_site = TestSite::from_fixture(&fixture).unwrap();
    let mut site = Site::read(test_site.root(), "src").await.unwrap();

    let summary = LayoutsPlugin::new(LayoutsOptions::new()).run(&mut site).await.unwrap();

    assert_eq!(summary.layouts_rendered, 3);
    assert!(site.files["l.md"].text().unwrap().contains("R(M(L(l)))"));
    assert!(site.files["r.md"].text().unwrap().contains("R(M(X(r)))"));
}
