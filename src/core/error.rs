//! Error handling for layout-chain
//!
//! The error system follows two rules:
//! 1. **Strongly-typed errors** ([`LayoutError`]) for every failure a build pass can hit
//! 2. **User-friendly messages** ([`ErrorContext`]) with details and suggestions for the CLI
//!
//! # Error Categories
//!
//! - **Configuration**: [`LayoutError::InvalidPattern`], [`LayoutError::ConfigError`]
//! - **Selection**: [`LayoutError::NoEligibleFiles`], [`LayoutError::DuplicateLayout`]
//! - **Structure**: [`LayoutError::CircularDependency`], [`LayoutError::MissingLayout`]
//! - **Rendering**: [`LayoutError::NoTransformer`], [`LayoutError::RenderFailed`]
//! - **File system**: [`LayoutError::FileSystemError`]
//! - **Anything else**: [`LayoutError::Other`]
//!
//! Per-file ineligibility is deliberately *not* an error: those files are skipped
//! and only traced (see [`crate::locator::Ineligible`]).
//!
//! # Examples
//!
//! ```rust,no_run
//! use layout_chain::core::{LayoutError, user_friendly_error};
//!
//! let error = LayoutError::CircularDependency {
//!     layout: "a.hbs".to_string(),
//!     chain: "a.hbs → b.hbs → a.hbs".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // colored error with a suggestion
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Result alias for the core engine.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// The main error type for a layout build pass.
///
/// Every variant is fatal for the whole pass: there is no partial completion mode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The `pattern` option is not a string or a list of strings, or a glob is malformed.
    #[error("Invalid pattern option: {reason}")]
    InvalidPattern {
        /// What was wrong with the option
        reason: String,
    },

    /// Configuration could not be loaded or has an invalid value.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem
        message: String,
    },

    /// Filtering left zero content files to render.
    #[error("No valid files to process")]
    NoEligibleFiles,

    /// A layout transitively declares itself as its own parent.
    #[error("Circular layout dependency detected at '{layout}': {chain}")]
    CircularDependency {
        /// The layout whose visit closed the cycle
        layout: String,
        /// The cycle rendered as `a → b → a`
        chain: String,
    },

    /// A layout reference points at nothing in the layout collection.
    #[error("Layout '{name}' referenced by '{referenced_by}' could not be found")]
    MissingLayout {
        /// The unresolved layout name
        name: String,
        /// The file (content or layout) holding the reference
        referenced_by: String,
        /// Closest existing layout name, if any is similar enough
        suggestion: Option<String>,
    },

    /// Two layout paths reduce to the same base name.
    #[error("Layouts '{first}' and '{second}' both resolve to the name '{name}'")]
    DuplicateLayout {
        /// The shared base name
        name: String,
        /// Path of the layout registered first
        first: String,
        /// Path of the conflicting layout
        second: String,
    },

    /// No transformer accepts the extension of a layout needed at render time.
    #[error("No transformer registered for extension '{extension}' (layout '{layout}')")]
    NoTransformer {
        /// Extension derived from the layout name
        extension: String,
        /// The layout that needed a transformer
        layout: String,
    },

    /// The transformer failed while rendering a file.
    #[error("Failed to render '{file}' with layout '{layout}': {reason}")]
    RenderFailed {
        /// File being rendered
        file: String,
        /// Layout used as the template
        layout: String,
        /// Transformer error message
        reason: String,
    },

    /// Any other failure, carrying its full error chain.
    #[error("{message}")]
    Other {
        /// The error chain, outermost first
        message: String,
    },

    /// A file system operation on the site failed.
    #[error("File system error: {operation} ({path})")]
    FileSystemError {
        /// The attempted operation
        operation: String,
        /// The path involved
        path: String,
    },
}

/// Error wrapper carrying user-facing details and a suggestion.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: LayoutError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context without details or suggestions.
    #[must_use]
    pub const fn new(error: LayoutError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr: error in red, details in yellow, suggestion in green.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] suitable for CLI display.
///
/// Known [`LayoutError`] variants get tailored suggestions; anything else is
/// wrapped as [`LayoutError::Other`] carrying the full error chain.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(layout_error) = error.downcast_ref::<LayoutError>() {
        return create_error_context(layout_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        if io_error.kind() == std::io::ErrorKind::NotFound {
            return ErrorContext::new(LayoutError::FileSystemError {
                operation: "file access".to_string(),
                path: "unknown".to_string(),
            })
            .with_suggestion("Check that the source directory exists and the path is correct");
        }
    }

    ErrorContext::new(LayoutError::Other {
        message: format!("{error:#}"),
    })
}

fn create_error_context(error: LayoutError) -> ErrorContext {
    match &error {
        LayoutError::InvalidPattern {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Set `pattern` to a glob string or a list of glob strings, e.g. \"**/*.md\""),
        LayoutError::NoEligibleFiles => ErrorContext::new(error)
            .with_details(
                "A file is eligible when it matches `pattern`, lives outside the layout directory, \
                 names a layout with an extension (or a default is configured), is valid UTF-8, \
                 and a transformer exists for the layout's extension",
            )
            .with_suggestion("Run with --verbose to see why each file was skipped"),
        LayoutError::CircularDependency {
            ..
        } => ErrorContext::new(error)
            .with_details("Layouts must form a forest: no layout may be its own ancestor")
            .with_suggestion("Remove the `layout` key from one of the layouts in the cycle"),
        LayoutError::MissingLayout {
            suggestion,
            ..
        } => {
            let hint = match suggestion {
                Some(candidate) => format!("Did you mean '{candidate}'?"),
                None => "Check the layout name and the configured layout directory".to_string(),
            };
            ErrorContext::new(error.clone()).with_suggestion(hint)
        }
        LayoutError::DuplicateLayout {
            ..
        } => ErrorContext::new(error)
            .with_details("Layouts are addressed by base name, so names must be unique")
            .with_suggestion("Rename one of the layout files"),
        LayoutError::NoTransformer {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Use a layout extension handled by a registered transformer (e.g. .html, .tera, .njk)"),
        LayoutError::RenderFailed {
            ..
        } => ErrorContext::new(error)
            .with_details("Template engine errors abort the whole pass"),
        LayoutError::ConfigError {
            ..
        }
        | LayoutError::FileSystemError {
            ..
        }
        | LayoutError::Other {
            ..
        } => ErrorContext::new(error),
    }
}
