//! The template operation: render a chart to manifest text

use capstan_engine::Engine;

use crate::config::TemplateConfig;
use crate::error::TemplateError;
use crate::manifest;
use crate::renderer::Renderer;

/// Run `helm template`-style rendering on a loaded chart, without a helm
/// binary and without executing an external command.
///
/// The chart renders in dry-run, client-only fashion: no cluster is
/// contacted and no release state is persisted. The returned manifest has
/// no leading or trailing whitespace; a chart producing no manifests at all
/// renders to an empty string.
pub fn template(config: TemplateConfig) -> Result<String, TemplateError> {
    let Some(chart) = config.chart.clone() else {
        return Err(TemplateError::config("chart is required"));
    };

    template_with(&Engine::strict(), chart.tree(), &config)
}

/// Same as [`template`], but through a caller-supplied renderer.
///
/// The `chart` handle accompanies the renderer explicitly; the config's own
/// `chart` field is not consulted here.
pub fn template_with<R: Renderer>(
    renderer: &R,
    chart: &R::Chart,
    config: &TemplateConfig,
) -> Result<String, TemplateError> {
    config.validate()?;

    let rendered = renderer
        .render(chart, &config.render_options())
        .map_err(|source| TemplateError::Render {
            source: Box::new(source),
        })?;

    let mut output = rendered.manifest;

    if !config.show_files.is_empty() {
        output = manifest::filter_files(&output, &config.show_files)?;
    }

    if config.enable_hooks && !rendered.hooks.is_empty() {
        output = manifest::append_hooks(output, &rendered.hooks);
    }

    tracing::debug!(
        bytes = output.len(),
        hooks = rendered.hooks.len(),
        "rendered chart manifest"
    );

    Ok(output.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    use capstan_core::{HookManifest, RenderOptions, RenderedRelease};

    /// Renderer returning canned text, for exercising the post-processor
    /// without any template evaluation.
    struct FakeRenderer {
        manifest: &'static str,
        hooks: Vec<HookManifest>,
    }

    impl FakeRenderer {
        fn new(manifest: &'static str) -> Self {
            Self {
                manifest,
                hooks: Vec::new(),
            }
        }
    }

    impl Renderer for FakeRenderer {
        type Chart = ();
        type Error = Infallible;

        fn parse_chart(
            &self,
            _files: Vec<capstan_core::ChartFile>,
        ) -> Result<Self::Chart, Self::Error> {
            Ok(())
        }

        fn render(
            &self,
            _chart: &Self::Chart,
            _options: &RenderOptions,
        ) -> Result<RenderedRelease, Self::Error> {
            Ok(RenderedRelease {
                manifest: self.manifest.to_string(),
                hooks: self.hooks.clone(),
            })
        }
    }

    const CANNED: &str = "\
---
# Source: c/templates/a.yaml
a: 1
---
# Source: c/templates/b.yaml
b: 2
";

    fn config(release_name: &str) -> TemplateConfig {
        TemplateConfig {
            release_name: release_name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_template_requires_chart() {
        let err = template(config("test")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: chart is required"
        );
    }

    #[test]
    fn test_template_with_requires_release_name() {
        let renderer = FakeRenderer::new(CANNED);
        let err = template_with(&renderer, &(), &config("")).unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid configuration: release name is required"
        );
    }

    #[test]
    fn test_template_with_passthrough_is_trimmed() {
        let renderer = FakeRenderer::new(CANNED);
        let out = template_with(&renderer, &(), &config("test")).unwrap();

        assert_eq!(out, CANNED.trim());
    }

    #[test]
    fn test_template_with_empty_manifest() {
        let renderer = FakeRenderer::new("");
        let out = template_with(&renderer, &(), &config("test")).unwrap();

        assert_eq!(out, "");
    }

    #[test]
    fn test_template_with_filter() {
        let renderer = FakeRenderer::new(CANNED);
        let mut config = config("test");
        config.show_files = vec!["templates/b.yaml".to_string()];

        let out = template_with(&renderer, &(), &config).unwrap();
        assert_eq!(out, "---\n# Source: c/templates/b.yaml\nb: 2");
    }

    #[test]
    fn test_template_with_filter_typo_fails() {
        let renderer = FakeRenderer::new(CANNED);
        let mut config = config("test");
        config.show_files = vec!["templates/typo.yaml".to_string()];

        let err = template_with(&renderer, &(), &config).unwrap_err();
        assert!(matches!(err, TemplateError::Filter(_)));
    }

    #[test]
    fn test_template_with_hooks_appended_after_filter() {
        let mut renderer = FakeRenderer::new(CANNED);
        renderer.hooks = vec![HookManifest {
            path: "c/templates/hook.yaml".to_string(),
            manifest: "kind: Job".to_string(),
            weight: 0,
        }];

        let mut config = config("test");
        config.show_files = vec!["templates/a.yaml".to_string()];
        config.enable_hooks = true;

        let out = template_with(&renderer, &(), &config).unwrap();
        assert_eq!(
            out,
            "---\n# Source: c/templates/a.yaml\na: 1\n\
             ---\n# Source: c/templates/hook.yaml\nkind: Job"
        );
    }

    #[test]
    fn test_template_with_hooks_ignored_by_default() {
        let mut renderer = FakeRenderer::new(CANNED);
        renderer.hooks = vec![HookManifest {
            path: "c/templates/hook.yaml".to_string(),
            manifest: "kind: Job".to_string(),
            weight: 0,
        }];

        let out = template_with(&renderer, &(), &config("test")).unwrap();
        assert!(!out.contains("kind: Job"));
    }
}
