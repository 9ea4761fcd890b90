//! Capstan Core - shared types for in-process chart rendering
//!
//! This crate provides the vocabulary used throughout Capstan:
//! - `ChartFile` / `ChartMetadata`: buffered chart files and the Chart.yaml model
//! - `Values`: configuration values with deep merge support
//! - `ReleaseInfo` / `TemplateContext`: what templates see at render time
//! - `ChartFs`: the virtual-filesystem boundary charts are loaded through
//! - `RenderOptions` / `RenderedRelease`: the renderer contract vocabulary
//! - `manifest`: multi-document manifest text utilities

pub mod chart;
pub mod context;
pub mod error;
pub mod fs;
pub mod manifest;
pub mod release;
pub mod render;
pub mod values;

pub use chart::{ChartFile, ChartInfo, ChartKind, ChartMetadata, Maintainer};
pub use context::{Capabilities, KubeVersion, TemplateContext};
pub use error::CoreError;
pub use fs::{ChartFs, DirFs, EntryKind, FsEntry, MemoryFs};
pub use release::ReleaseInfo;
pub use render::{HookManifest, RenderOptions, RenderedRelease};
pub use values::Values;
