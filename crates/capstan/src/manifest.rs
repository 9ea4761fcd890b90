//! Manifest post-processing: file filtering and hook appending

use std::collections::BTreeMap;

use capstan_core::manifest::{SOURCE_PREFIX, source_path, split_documents, strip_chart_prefix};
use capstan_core::HookManifest;

use crate::error::FilterError;

/// Keep only the documents rendered from the requested files.
///
/// Documents are matched by the path in their `# Source:` header, with the
/// chart-name prefix stripped. Every requested file must match at least one
/// document, so a typo in the filter list fails the whole render instead of
/// silently producing less output. Kept documents are reassembled in their
/// original order, each behind a `---` separator line.
pub(crate) fn filter_files(rendered: &str, files: &[String]) -> Result<String, FilterError> {
    let mut match_counts: BTreeMap<&str, usize> =
        files.iter().map(|f| (f.as_str(), 0)).collect();

    let mut kept = Vec::new();
    let mut index = 0;

    for document in split_documents(rendered) {
        let document = document.trim();
        if document.is_empty() {
            continue;
        }

        let path = source_path(document)
            .ok_or(FilterError::MissingSourceHeader { index })?;
        index += 1;

        let path = strip_chart_prefix(path);
        if let Some(count) = match_counts.get_mut(path) {
            *count += 1;
            kept.push(document);
        }
    }

    // Surjection check, reported in request order.
    for file in files {
        if match_counts.get(file.as_str()) == Some(&0) {
            return Err(FilterError::UnmatchedFile { file: file.clone() });
        }
    }

    let mut out = String::new();
    for document in kept {
        out.push_str("\n---\n");
        out.push_str(document);
    }

    Ok(out.trim().to_string())
}

/// Append hook documents after the main manifest block.
///
/// Each hook becomes its own document with a synthesized source header, in
/// the order the renderer returned them. Hooks are never subject to the
/// file filter.
pub(crate) fn append_hooks(manifest: String, hooks: &[HookManifest]) -> String {
    let mut out = manifest;

    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }

    for hook in hooks {
        out.push_str("---\n");
        out.push_str(SOURCE_PREFIX);
        out.push(' ');
        out.push_str(&hook.path);
        out.push('\n');
        out.push_str(hook.manifest.trim());
        out.push('\n');
    }

    out
}
