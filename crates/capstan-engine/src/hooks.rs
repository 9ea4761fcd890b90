//! Hook detection on rendered documents
//!
//! A rendered document becomes a hook when its metadata carries a hook
//! annotation. Capstan reads its own `capstan.io/*` annotations and accepts
//! the `helm.sh/*` equivalents so existing Helm charts keep working.

/// Capstan-native annotations
pub mod annotations {
    /// Hook phase annotation (comma-separated phases)
    pub const HOOK: &str = "capstan.io/hook";
    /// Hook weight for ordering
    pub const HOOK_WEIGHT: &str = "capstan.io/hook-weight";
}

/// Helm-compatible annotations (for migration)
pub mod helm {
    /// Hook phase annotation
    pub const HOOK: &str = "helm.sh/hook";
    /// Hook weight for ordering
    pub const HOOK_WEIGHT: &str = "helm.sh/hook-weight";
}

/// Hook attributes recovered from a document's annotations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookInfo {
    /// Lifecycle phases (e.g. `pre-install`), as written in the annotation
    pub phases: Vec<String>,

    /// Ordering weight (default 0)
    pub weight: i32,
}

/// Inspect a rendered document for a hook annotation.
///
/// Documents that do not parse as YAML mappings (plain text templates) are
/// never hooks.
pub fn detect(document: &str) -> Option<HookInfo> {
    let parsed: serde_yaml::Value = serde_yaml::from_str(document).ok()?;
    let annotations = parsed.get("metadata")?.get("annotations")?;

    let phases = get_annotation(annotations, annotations::HOOK, helm::HOOK)?;
    let phases: Vec<String> = phases
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let weight = get_annotation(annotations, annotations::HOOK_WEIGHT, helm::HOOK_WEIGHT)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);

    Some(HookInfo { phases, weight })
}

/// Get annotation value, preferring Capstan over Helm
fn get_annotation<'a>(
    annotations: &'a serde_yaml::Value,
    capstan_key: &str,
    helm_key: &str,
) -> Option<&'a str> {
    annotations
        .get(capstan_key)
        .or_else(|| annotations.get(helm_key))
        .and_then(|v| v.as_str())
}
