//! Markdown-style site files: YAML front matter on top of a text payload.
//!
//! See [`frontmatter::FrontmatterParser`] for how raw bytes become
//! [`FileRecord`](crate::core::FileRecord)s.

pub mod frontmatter;

pub use frontmatter::FrontmatterParser;
