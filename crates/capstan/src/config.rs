//! Render request configuration

use once_cell::sync::Lazy;
use regex::Regex;

use capstan_core::{RenderOptions, Values};

use crate::error::TemplateError;
use crate::loader::Chart;

/// Release names are DNS-1123 labels, capped so generated resource names
/// stay within Kubernetes limits.
const RELEASE_NAME_MAX_LEN: usize = 53;

static RELEASE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").unwrap());

/// Configuration for one template rendering
///
/// Only `chart` and `release_name` are required; everything else has a
/// documented default.
#[derive(Debug, Clone, Default)]
pub struct TemplateConfig {
    /// Name of the release (required)
    pub release_name: String,

    /// The loaded chart (required). Use [`crate::load_chart`].
    pub chart: Option<Chart>,

    /// Custom values overriding the chart defaults (default: none)
    pub values: Option<Values>,

    /// Namespace used to render the chart (default: empty)
    pub namespace: String,

    /// Also render the CRDs bundled under crds/ (default: false)
    pub include_crds: bool,

    /// Restrict output to these chart-root-relative files, e.g.
    /// `templates/configmap.yaml` (default: empty, render everything).
    /// Handy for specific use cases like unit tests for charts.
    pub show_files: Vec<String>,

    /// Append hook manifests after the main documents (default: false)
    pub enable_hooks: bool,
}

impl TemplateConfig {
    /// Check everything that can be rejected before rendering starts.
    pub(crate) fn validate(&self) -> Result<(), TemplateError> {
        if self.release_name.is_empty() {
            return Err(TemplateError::config("release name is required"));
        }

        if self.release_name.len() > RELEASE_NAME_MAX_LEN
            || !RELEASE_NAME_RE.is_match(&self.release_name)
        {
            return Err(TemplateError::config(format!(
                "invalid release name {:?}: must be a lowercase DNS-1123 label of at most {} characters",
                self.release_name, RELEASE_NAME_MAX_LEN
            )));
        }

        Ok(())
    }

    /// The renderer-side request this configuration amounts to.
    ///
    /// Hook execution is always suppressed renderer-side; whether hook
    /// manifests are appended is decided by the post-processor, keeping
    /// hook inclusion orthogonal to the other flags.
    pub(crate) fn render_options(&self) -> RenderOptions {
        RenderOptions {
            release_name: self.release_name.clone(),
            namespace: self.namespace.clone(),
            include_crds: self.include_crds,
            disable_hooks: false,
            values: self.values.clone().unwrap_or_else(Values::new),
        }
    }
}
