//! Capstan renders Helm-style chart manifests in-process, without the need
//! of a helm executable and without executing an external command.
//!
//! A chart is loaded once from a virtual filesystem and can then be rendered
//! any number of times with different release parameters and values:
//!
//! ```
//! use capstan::{MemoryFs, TemplateConfig, load_chart, template};
//!
//! let fs = MemoryFs::new()
//!     .with_text_file("Chart.yaml", "apiVersion: v2\nname: demo\nversion: 0.1.0")
//!     .with_text_file("values.yaml", "someValue: something")
//!     .with_text_file("templates/cm.yaml", "something: {{ values.someValue }}");
//!
//! let chart = load_chart(&fs).unwrap();
//!
//! let manifest = template(TemplateConfig {
//!     release_name: "test".to_string(),
//!     chart: Some(chart),
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! assert_eq!(
//!     manifest,
//!     "---\n# Source: demo/templates/cm.yaml\nsomething: something"
//! );
//! ```
//!
//! Rendering is delegated to a [`Renderer`], by default the MiniJinja-based
//! [`Engine`]. This crate owns chart loading and the text-level
//! post-processing of the rendered manifest (file filtering, hook
//! appending).

mod config;
mod error;
mod loader;
mod manifest;
mod renderer;
mod template;

pub use config::TemplateConfig;
pub use error::{FilterError, LoadError, TemplateError};
pub use loader::{Chart, load_chart, load_chart_with, must_load_chart};
pub use renderer::Renderer;
pub use template::{template, template_with};

// The pieces callers need to build filesystems, values and custom engines.
pub use capstan_core::{
    ChartFile, ChartFs, ChartMetadata, DirFs, HookManifest, MemoryFs, RenderOptions,
    RenderedRelease, Values,
};
pub use capstan_engine::{Engine, EngineBuilder};
