//! Multi-document manifest text utilities
//!
//! Rendered manifests are plain text carrying two fixed conventions: a
//! document separator line (`---`) and a source header line
//! (`# Source: <path>`) naming the template file each document came from.
//! These helpers are deliberately line-based, not a YAML parser.

/// Marker prefixing the source header line of every rendered document.
pub const SOURCE_PREFIX: &str = "# Source:";

/// Is this line a document separator?
fn is_separator(line: &str) -> bool {
    line.trim_end() == "---"
}

/// Split a manifest into document chunks on separator lines.
///
/// Chunks are returned verbatim, including the leading/empty chunk produced
/// when the manifest starts with a separator; callers trim and drop
/// whitespace-only chunks.
pub fn split_documents(manifest: &str) -> Vec<&str> {
    let mut documents = Vec::new();
    let mut start = 0;
    let mut offset = 0;

    for line in manifest.split_inclusive('\n') {
        let content = line.strip_suffix('\n').unwrap_or(line);
        let content = content.strip_suffix('\r').unwrap_or(content);

        if is_separator(content) {
            documents.push(&manifest[start..offset]);
            start = offset + line.len();
        }

        offset += line.len();
    }

    documents.push(&manifest[start..]);
    documents
}

/// Extract the source path from a document's `# Source:` header line.
///
/// Returns `None` when no line of the document starts with the marker.
pub fn source_path(document: &str) -> Option<&str> {
    document
        .lines()
        .find_map(|line| line.strip_prefix(SOURCE_PREFIX))
        .map(str::trim)
}

/// Drop the chart-name prefix from a rendered source path.
///
/// The renderer prefixes every template path with the chart name
/// (`test-chart/templates/something.yaml`); stripping everything up to and
/// including the first `/` recovers the path relative to the chart root.
/// Paths without a `/` are returned unchanged.
pub fn strip_chart_prefix(path: &str) -> &str {
    match path.split_once('/') {
        Some((_, rest)) => rest,
        None => path,
    }
}
