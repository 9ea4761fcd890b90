//! The chart-renderer contract
//!
//! Loading and post-processing never look inside the renderer: it is a
//! capability that turns buffered chart files into an opaque chart tree and
//! a chart tree plus render options into manifest text. The default
//! implementation is `capstan_engine::Engine`; tests inject fakes returning
//! canned text.

use capstan_core::{ChartFile, RenderOptions, RenderedRelease};
use capstan_engine::{Engine, EngineError, ParsedChart};

/// A chart-rendering capability
pub trait Renderer {
    /// The renderer's parsed chart tree
    type Chart;

    /// The renderer's error type
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct a chart tree from one batch of buffered files, validating
    /// chart metadata and embedded values.
    fn parse_chart(&self, files: Vec<ChartFile>) -> Result<Self::Chart, Self::Error>;

    /// Perform one dry-run, client-only render.
    fn render(
        &self,
        chart: &Self::Chart,
        options: &RenderOptions,
    ) -> Result<RenderedRelease, Self::Error>;
}

impl Renderer for Engine {
    type Chart = ParsedChart;
    type Error = EngineError;

    fn parse_chart(&self, files: Vec<ChartFile>) -> Result<ParsedChart, EngineError> {
        ParsedChart::from_files(&files)
    }

    fn render(
        &self,
        chart: &ParsedChart,
        options: &RenderOptions,
    ) -> Result<RenderedRelease, EngineError> {
        Engine::render(self, chart, options)
    }
}
