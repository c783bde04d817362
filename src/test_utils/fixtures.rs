//! Canned site trees for tests.
//!
//! Paths are relative to the build root, so layouts can be placed inside the
//! source directory (`src/layouts/...`) or next to it (`layouts/...`).

/// A set of files to lay out under a build root.
#[derive(Clone, Debug)]
pub struct SiteFixture {
    pub name: String,
    pub files: Vec<(String, String)>,
}

impl SiteFixture {
    /// Empty fixture.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: Vec::new(),
        }
    }

    /// Builder: add one file.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.push((path.into(), content.into()));
        self
    }

    /// Three-level chain in a `layouts/` directory next to `src/`:
    /// `grandparent.html` ← `parent.html` ← `index.md`.
    pub fn grandparent_chain() -> Self {
        Self::new("grandparent_chain")
            .with_file(
                "layouts/grandparent.html",
                "---\ntitle: Grandparent\n---\n<html><title>{{ title }}</title>{{ contents }}</html>",
            )
            .with_file(
                "layouts/parent.html",
                "---\nlayout: grandparent.html\nsection: docs\n---\n<body class=\"{{ section }}\">{{ contents }}</body>",
            )
            .with_file("src/index.md", "---\nlayout: parent.html\n---\n<p>Hello</p>")
    }

    /// Layouts inside the source tree, including one in a nested folder.
    pub fn in_source_layouts() -> Self {
        Self::new("in_source_layouts")
            .with_file("src/layouts/base.html", "<html>{{ site_name }}|{{ contents }}</html>")
            .with_file(
                "src/layouts/partials/post.html",
                "---\nlayout: base.html\n---\n<article>{{ contents }}</article>",
            )
            .with_file("src/posts/first.md", "---\nlayout: post.html\n---\nFirst post")
            .with_file("src/about.md", "---\nlayout: base.html\n---\nAbout")
            .with_file("src/robots.txt", "User-agent: *")
    }

    /// Two layouts extending each other.
    pub fn cyclic() -> Self {
        Self::new("cyclic")
            .with_file("layouts/a.html", "---\nlayout: b.html\n---\nA{{ contents }}")
            .with_file("layouts/b.html", "---\nlayout: a.html\n---\nB{{ contents }}")
            .with_file("src/index.md", "---\nlayout: a.html\n---\nHello")
    }
}
