//! Chart parsing from buffered files
//!
//! `ParsedChart` is the engine-side chart tree: Chart.yaml metadata, default
//! values, template sources and bundled CRD files, built from one batch of
//! `ChartFile`s in a single pass.

use capstan_core::{ChartFile, ChartMetadata, Values};

use crate::error::{EngineError, Result};

/// Extensions treated as template files under templates/
const TEMPLATE_EXTENSIONS: &[&str] = &["yaml", "yml", "j2", "jinja2", "txt", "json"];

/// Extensions treated as CRD files under crds/
const CRD_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// One template source, named by its chart-root-relative path
#[derive(Debug, Clone)]
pub struct TemplateFile {
    /// Path relative to the chart root (e.g. `templates/deployment.yaml`)
    pub name: String,

    /// Template source text
    pub source: String,
}

impl TemplateFile {
    /// File name without directories
    pub fn file_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Helper templates (files starting with `_`) are importable but never
    /// rendered on their own.
    pub fn is_helper(&self) -> bool {
        self.file_name().starts_with('_')
    }

    /// NOTES.txt is post-install text, not a manifest.
    pub fn is_notes(&self) -> bool {
        self.file_name().eq_ignore_ascii_case("NOTES.txt")
    }
}

/// A CRD file bundled under crds/
///
/// CRD files are not templated and are emitted before regular templates.
#[derive(Debug, Clone)]
pub struct CrdFile {
    /// Path relative to the chart root (e.g. `crds/foo.yaml`)
    pub path: String,

    /// Raw YAML content
    pub content: String,
}

/// The engine's parsed chart tree
#[derive(Debug, Clone)]
pub struct ParsedChart {
    /// Validated Chart.yaml metadata
    pub metadata: ChartMetadata,

    /// Default values from values.yaml (empty when absent)
    pub values: Values,

    /// Template files, sorted by path
    pub templates: Vec<TemplateFile>,

    /// CRD files, sorted by path
    pub crds: Vec<CrdFile>,
}

impl ParsedChart {
    /// Build a chart tree from buffered files.
    ///
    /// `Chart.yaml` must be present at the root and valid; `values.yaml` is
    /// optional but must parse when present. Files that are neither
    /// metadata, values, templates nor CRDs (README, .helmignore, ...) are
    /// ignored.
    pub fn from_files(files: &[ChartFile]) -> Result<Self> {
        let mut metadata = None;
        let mut values = Values::new();
        let mut templates = Vec::new();
        let mut crds = Vec::new();

        for file in files {
            if file.path == "Chart.yaml" {
                metadata = Some(ChartMetadata::from_yaml(file.as_str()?)?);
            } else if file.path == "values.yaml" {
                values = Values::from_yaml(file.as_str()?)?;
            } else if let Some(rest) = file.path.strip_prefix("templates/") {
                if has_extension(rest, TEMPLATE_EXTENSIONS) {
                    templates.push(TemplateFile {
                        name: file.path.clone(),
                        source: file.as_str()?.to_string(),
                    });
                }
            } else if let Some(rest) = file.path.strip_prefix("crds/") {
                if has_extension(rest, CRD_EXTENSIONS) {
                    crds.push(CrdFile {
                        path: file.path.clone(),
                        content: file.as_str()?.to_string(),
                    });
                }
            }
        }

        let metadata = metadata.ok_or_else(|| EngineError::InvalidChart {
            message: "Chart.yaml not found at chart root".to_string(),
        })?;

        // Sort for deterministic rendering order.
        templates.sort_by(|a, b| a.name.cmp(&b.name));
        crds.sort_by(|a, b| a.path.cmp(&b.path));

        Ok(Self {
            metadata,
            values,
            templates,
            crds,
        })
    }

    /// Chart name from metadata
    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}

fn has_extension(path: &str, extensions: &[&str]) -> bool {
    path.rsplit_once('.')
        .is_some_and(|(_, ext)| extensions.contains(&ext.to_ascii_lowercase().as_str()))
}
