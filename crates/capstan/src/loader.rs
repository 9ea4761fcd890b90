//! Chart loading from a virtual filesystem

use std::sync::Arc;

use capstan_core::{ChartFile, ChartFs, ChartMetadata, EntryKind};
use capstan_engine::{Engine, ParsedChart};

use crate::error::LoadError;
use crate::renderer::Renderer;

/// A loaded chart
///
/// An opaque handle over the engine's parsed chart tree. Immutable after
/// loading; rendering never mutates it, so one `Chart` can be cloned and
/// shared across any number of concurrent render calls.
#[derive(Debug, Clone)]
pub struct Chart {
    tree: Arc<ParsedChart>,
}

impl Chart {
    pub(crate) fn new(tree: ParsedChart) -> Self {
        Self {
            tree: Arc::new(tree),
        }
    }

    /// Chart.yaml metadata of the loaded chart
    pub fn metadata(&self) -> &ChartMetadata {
        &self.tree.metadata
    }

    pub(crate) fn tree(&self) -> &ParsedChart {
        &self.tree
    }
}

/// Load a chart through a specific renderer.
///
/// Walks the filesystem from its root: directories contribute nothing
/// themselves, symbolic links are skipped without being followed, every
/// other entry is read fully into memory. The collected files go to the
/// renderer's `parse_chart` in one batch. Any walk, read or parse failure
/// aborts loading.
pub fn load_chart_with<R: Renderer>(renderer: &R, fs: &dyn ChartFs) -> Result<R::Chart, LoadError> {
    let mut files = Vec::new();

    for entry in fs.entries().map_err(LoadError::Walk)? {
        match entry.kind {
            EntryKind::Dir | EntryKind::Symlink => continue,
            EntryKind::File => {}
        }

        let data = fs.read(&entry.path).map_err(|source| LoadError::Read {
            path: entry.path.clone(),
            source,
        })?;

        files.push(ChartFile::new(entry.path, data));
    }

    tracing::debug!(files = files.len(), "buffered chart files");

    renderer.parse_chart(files).map_err(|source| LoadError::Parse {
        source: Box::new(source),
    })
}

/// Load a chart from a virtual filesystem.
///
/// Chart files must be at the root of the filesystem: `./Chart.yaml`,
/// `./values.yaml`, `./templates/...`. Use [`capstan_core::DirFs`] for a
/// chart directory on disk and [`capstan_core::MemoryFs`] for charts built
/// in memory.
pub fn load_chart(fs: &dyn ChartFs) -> Result<Chart, LoadError> {
    let tree = load_chart_with(&Engine::strict(), fs)?;
    Ok(Chart::new(tree))
}

/// Same as [`load_chart`] but panics on any loading error.
///
/// Intended for call sites that treat load failure as non-recoverable,
/// like tests and example programs.
pub fn must_load_chart(fs: &dyn ChartFs) -> Chart {
    match load_chart(fs) {
        Ok(chart) => chart,
        Err(err) => panic!("could not load chart: {}", err),
    }
}
