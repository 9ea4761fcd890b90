//! Public error types
//!
//! Three failure families: configuration mistakes (fix the request and
//! retry), loading failures (no partial chart) and rendering/filtering
//! failures (no partial manifest). Nothing is retried or logged here;
//! everything is returned to the caller with context.

use thiserror::Error;

use capstan_core::CoreError;

/// Errors from loading a chart out of a virtual filesystem
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("could not walk chart directory: {0}")]
    Walk(#[source] CoreError),

    #[error("could not read chart file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: CoreError,
    },

    #[error("could not load chart from files: {source}")]
    Parse {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Errors from rendering a template request
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("invalid configuration: {message}")]
    Config { message: String },

    #[error("could not render chart: {source}")]
    Render {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("could not filter manifest files: {0}")]
    Filter(#[from] FilterError),
}

impl TemplateError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Errors from the manifest post-processor
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// A non-empty document without a `# Source:` header means the renderer
    /// output format changed; never skipped silently.
    #[error("document {index} has no \"# Source:\" header")]
    MissingSourceHeader { index: usize },

    /// A filter entry that matched nothing is a caller mistake (typo),
    /// distinguished from a chart that rendered nothing.
    #[error("file {file:?} didn't match any rendered document")]
    UnmatchedFile { file: String },
}
