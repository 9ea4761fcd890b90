//! Engine error types

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Main engine error type
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid chart: {message}")]
    InvalidChart { message: String },

    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    #[error("core error: {0}")]
    Core(#[from] capstan_core::CoreError),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Template-specific error with source information
#[derive(Error, Debug, Diagnostic, Clone)]
#[error("{message}")]
#[diagnostic(code(capstan::template::render))]
pub struct TemplateError {
    /// Error message
    pub message: String,

    /// Template source code
    #[source_code]
    pub src: NamedSource<String>,

    /// Error location in source
    #[label("error occurred here")]
    pub span: Option<SourceSpan>,
}

impl TemplateError {
    /// Create a new template error from a MiniJinja error
    pub fn from_minijinja(
        err: minijinja::Error,
        template_name: &str,
        template_source: &str,
    ) -> Self {
        let span = err
            .line()
            .and_then(|line| calculate_span(template_source, line));

        Self {
            message: format!("{}: {}", template_name, err),
            src: NamedSource::new(template_name, template_source.to_string()),
            span,
        }
    }

    /// Create a template error without source attribution
    pub fn simple(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            src: NamedSource::new("<template>", String::new()),
            span: None,
        }
    }
}

/// Span covering one (1-indexed) line of the template source
fn calculate_span(source: &str, line: usize) -> Option<SourceSpan> {
    let mut offset = 0;
    for (idx, content) in source.split_inclusive('\n').enumerate() {
        if idx + 1 == line {
            let len = content.trim_end_matches(['\n', '\r']).len();
            return Some(SourceSpan::new(offset.into(), len));
        }
        offset += content.len();
    }
    None
}
