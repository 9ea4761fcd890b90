//! Request/response vocabulary of the chart renderer contract

use crate::values::Values;

/// Parameters for one dry-run, client-only render
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Release name
    pub release_name: String,

    /// Target namespace
    pub namespace: String,

    /// Render CRD files bundled under crds/
    pub include_crds: bool,

    /// Drop hook documents entirely instead of returning them
    pub disable_hooks: bool,

    /// Values overriding the chart defaults
    pub values: Values,
}

/// The renderer's output: one concatenated manifest plus separated hooks
#[derive(Debug, Clone, Default)]
pub struct RenderedRelease {
    /// Concatenated multi-document manifest text. Every document is preceded
    /// by a `---` separator line and a `# Source: <path>` header line.
    pub manifest: String,

    /// Hook documents, excluded from the main manifest
    pub hooks: Vec<HookManifest>,
}

/// One hook document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookManifest {
    /// Source path of the template that produced the hook
    pub path: String,

    /// Rendered hook body
    pub manifest: String,

    /// Ordering weight (annotation, default 0)
    pub weight: i32,
}
