//! Capstan Engine - chart rendering on MiniJinja
//!
//! This crate is the default renderer collaborator for Capstan:
//! - `ParsedChart`: a chart tree parsed from buffered files
//! - `Engine`: dry-run, client-only template evaluation with
//!   Kubernetes-flavoured filters and functions
//! - hook detection via `capstan.io/hook` (and `helm.sh/hook`) annotations

pub mod chart;
pub mod engine;
pub mod error;
pub mod filters;
pub mod functions;
pub mod hooks;

pub use chart::{CrdFile, ParsedChart, TemplateFile};
pub use engine::{Engine, EngineBuilder};
pub use error::{EngineError, TemplateError};
