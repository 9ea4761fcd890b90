//! Template engine based on MiniJinja

use minijinja::Environment;

use capstan_core::manifest::split_documents;
use capstan_core::{
    ChartKind, HookManifest, ReleaseInfo, RenderOptions, RenderedRelease, TemplateContext,
};

use crate::chart::ParsedChart;
use crate::error::{EngineError, Result, TemplateError};
use crate::filters;
use crate::functions;
use crate::hooks;

/// Template engine builder
pub struct EngineBuilder {
    strict_mode: bool,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self { strict_mode: true }
    }

    /// Set strict mode (fail on undefined variables)
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict_mode = strict;
        self
    }

    /// Build the engine
    pub fn build(self) -> Engine {
        Engine::new(self.strict_mode)
    }
}

/// The chart template engine
pub struct Engine {
    strict_mode: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Engine {
    /// Create a new engine
    pub fn new(strict_mode: bool) -> Self {
        Self { strict_mode }
    }

    /// Engine that fails on undefined variables
    pub fn strict() -> Self {
        Self::new(true)
    }

    /// Engine that renders undefined variables as empty
    pub fn lenient() -> Self {
        Self::new(false)
    }

    /// Create a builder
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Create a configured MiniJinja environment
    fn create_environment(&self) -> Environment<'static> {
        let mut env = Environment::new();

        if self.strict_mode {
            env.set_undefined_behavior(minijinja::UndefinedBehavior::Strict);
        } else {
            env.set_undefined_behavior(minijinja::UndefinedBehavior::Lenient);
        }

        env.add_filter("toyaml", filters::toyaml);
        env.add_filter("tojson", filters::tojson);
        env.add_filter("b64encode", filters::b64encode);
        env.add_filter("b64decode", filters::b64decode);
        env.add_filter("quote", filters::quote);
        env.add_filter("squote", filters::squote);
        env.add_filter("indent", filters::indent);
        env.add_filter("nindent", filters::nindent);
        env.add_filter("required", filters::required);
        env.add_filter("sha256", filters::sha256);
        env.add_filter("trunc", filters::trunc);
        env.add_filter("trimprefix", filters::trimprefix);
        env.add_filter("trimsuffix", filters::trimsuffix);

        env.add_function("fail", functions::fail);
        env.add_function("coalesce", functions::coalesce);
        env.add_function("ternary", functions::ternary);
        env.add_function("now", functions::now);
        env.add_function("printf", functions::printf);

        env
    }

    /// Render a single template string
    pub fn render_string(
        &self,
        template: &str,
        context: &TemplateContext,
        template_name: &str,
    ) -> Result<String> {
        let mut env = self.create_environment();

        env.add_template_owned(template_name.to_string(), template.to_string())
            .map_err(|e| TemplateError::from_minijinja(e, template_name, template))?;

        let tmpl = env
            .get_template(template_name)
            .map_err(|e| TemplateError::from_minijinja(e, template_name, template))?;

        let ctx = minijinja::context! {
            values => &context.values,
            release => &context.release,
            chart => &context.chart,
            capabilities => &context.capabilities,
        };

        Ok(tmpl
            .render(ctx)
            .map_err(|e| TemplateError::from_minijinja(e, template_name, template))?)
    }

    /// Render a whole chart: one dry-run, client-only pass.
    ///
    /// Values are the chart defaults deep-merged with the request overrides.
    /// Every template renders against the same context; each rendered file is
    /// split into documents and every document gets its own
    /// `# Source: <chart-name>/<template-path>` header. Hook documents are
    /// diverted to the hook list (or dropped under `disable_hooks`). With
    /// `include_crds`, the files under crds/ are emitted first, sorted, with
    /// unprefixed `crds/...` source paths.
    pub fn render(&self, chart: &ParsedChart, options: &RenderOptions) -> Result<RenderedRelease> {
        if chart.metadata.kind == ChartKind::Library {
            return Err(EngineError::InvalidChart {
                message: "library charts are not installable".to_string(),
            });
        }

        let mut values = chart.values.clone();
        values.merge(&options.values);

        let release = ReleaseInfo::for_install(&options.release_name, &options.namespace);
        let context = TemplateContext::new(values, release, &chart.metadata);

        // One environment holding every template, so `_`-prefixed helpers
        // are importable from the rendered ones.
        let mut env = self.create_environment();
        for template in &chart.templates {
            env.add_template_owned(template.name.clone(), template.source.clone())
                .map_err(|e| TemplateError::from_minijinja(e, &template.name, &template.source))?;
        }

        let ctx = minijinja::context! {
            values => &context.values,
            release => &context.release,
            chart => &context.chart,
            capabilities => &context.capabilities,
        };

        let mut manifest = String::new();
        let mut hooks = Vec::new();

        if options.include_crds {
            for crd in &chart.crds {
                let content = crd.content.trim();
                if content.is_empty() {
                    continue;
                }
                push_document(&mut manifest, &crd.path, content);
            }
        }

        for template in &chart.templates {
            if template.is_helper() || template.is_notes() {
                continue;
            }

            let tmpl = env
                .get_template(&template.name)
                .map_err(|e| TemplateError::from_minijinja(e, &template.name, &template.source))?;

            let rendered = tmpl
                .render(&ctx)
                .map_err(|e| TemplateError::from_minijinja(e, &template.name, &template.source))?;

            let source = format!("{}/{}", chart.name(), template.name);

            for document in split_documents(&rendered) {
                let document = document.trim();
                if document.is_empty() {
                    continue;
                }

                if let Some(hook) = hooks::detect(document) {
                    if !options.disable_hooks {
                        hooks.push(HookManifest {
                            path: source.clone(),
                            manifest: document.to_string(),
                            weight: hook.weight,
                        });
                    }
                    continue;
                }

                push_document(&mut manifest, &source, document);
            }
        }

        hooks.sort_by(|a, b| a.weight.cmp(&b.weight).then_with(|| a.path.cmp(&b.path)));

        Ok(RenderedRelease { manifest, hooks })
    }
}

/// Append one document with its separator and source header
fn push_document(out: &mut String, source: &str, body: &str) {
    out.push_str("---\n");
    out.push_str(capstan_core::manifest::SOURCE_PREFIX);
    out.push(' ');
    out.push_str(source);
    out.push('\n');
    out.push_str(body);
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use capstan_core::{ChartFile, ChartMetadata, Values};

    fn test_chart(files: Vec<ChartFile>) -> ParsedChart {
        let mut all = vec![ChartFile::new(
            "Chart.yaml",
            "apiVersion: v2\nname: test-chart\nversion: 0.1.0",
        )];
        all.extend(files);
        ParsedChart::from_files(&all).unwrap()
    }

    fn render_options(values: Values) -> RenderOptions {
        RenderOptions {
            release_name: "test".to_string(),
            namespace: String::new(),
            include_crds: false,
            disable_hooks: false,
            values,
        }
    }

    fn create_test_context() -> TemplateContext {
        let metadata = ChartMetadata::from_yaml(
            "apiVersion: v2\nname: test-chart\nversion: 0.1.0\nappVersion: \"2.0\"",
        )
        .unwrap();
        let values = Values::from_yaml("replicas: 3\nimage:\n  repository: nginx").unwrap();
        let release = ReleaseInfo::for_install("myapp", "default");

        TemplateContext::new(values, release, &metadata)
    }

    #[test]
    fn test_render_string_simple() {
        let engine = Engine::strict();
        let ctx = create_test_context();

        let result = engine
            .render_string("replicas: {{ values.replicas }}", &ctx, "test.yaml")
            .unwrap();

        assert_eq!(result, "replicas: 3");
    }

    #[test]
    fn test_render_string_release_info() {
        let engine = Engine::strict();
        let ctx = create_test_context();

        let result = engine
            .render_string(
                "name: {{ release.name }}\nnamespace: {{ release.namespace }}",
                &ctx,
                "test.yaml",
            )
            .unwrap();

        assert!(result.contains("name: myapp"));
        assert!(result.contains("namespace: default"));
    }

    #[test]
    fn test_render_string_with_filters() {
        let engine = Engine::strict();
        let ctx = create_test_context();

        let result = engine
            .render_string("image: {{ values.image | toyaml | nindent(2) }}", &ctx, "t.yaml")
            .unwrap();

        assert!(result.contains("repository: nginx"));
    }

    #[test]
    fn test_render_string_undefined_strict() {
        let engine = Engine::strict();
        let ctx = create_test_context();

        assert!(
            engine
                .render_string("x: {{ values.missing_key }}", &ctx, "t.yaml")
                .is_err()
        );
    }

    #[test]
    fn test_render_string_undefined_lenient() {
        let engine = Engine::lenient();
        let ctx = create_test_context();

        let result = engine
            .render_string("x: {{ values.missing_key }}", &ctx, "t.yaml")
            .unwrap();
        assert_eq!(result, "x: ");
    }

    #[test]
    fn test_render_assembles_documents() {
        let chart = test_chart(vec![
            ChartFile::new("values.yaml", "someValue: something"),
            ChartFile::new(
                "templates/something.yaml",
                "something: {{ values.someValue }}",
            ),
        ]);

        let rendered = Engine::strict()
            .render(&chart, &render_options(Values::new()))
            .unwrap();

        assert_eq!(
            rendered.manifest,
            "---\n# Source: test-chart/templates/something.yaml\nsomething: something\n"
        );
        assert!(rendered.hooks.is_empty());
    }

    #[test]
    fn test_render_value_override() {
        let chart = test_chart(vec![
            ChartFile::new("values.yaml", "someValue: something"),
            ChartFile::new(
                "templates/something.yaml",
                "something: {{ values.someValue }}",
            ),
        ]);

        let overrides = Values::from_yaml("someValue: otherthing").unwrap();
        let rendered = Engine::strict()
            .render(&chart, &render_options(overrides))
            .unwrap();

        assert!(rendered.manifest.contains("something: otherthing"));
        assert!(!rendered.manifest.contains("something: something"));
    }

    #[test]
    fn test_render_crds_prepended_when_included() {
        let chart = test_chart(vec![
            ChartFile::new("templates/something.yaml", "something: something"),
            ChartFile::new("crds/something.yaml", "this-is: a CRD"),
        ]);

        let mut options = render_options(Values::new());
        let rendered = Engine::strict().render(&chart, &options).unwrap();
        assert!(!rendered.manifest.contains("a CRD"));

        options.include_crds = true;
        let rendered = Engine::strict().render(&chart, &options).unwrap();
        assert_eq!(
            rendered.manifest,
            "---\n# Source: crds/something.yaml\nthis-is: a CRD\n\
             ---\n# Source: test-chart/templates/something.yaml\nsomething: something\n"
        );
    }

    #[test]
    fn test_render_multi_document_template() {
        let chart = test_chart(vec![ChartFile::new(
            "templates/pair.yaml",
            "first: 1\n---\nsecond: 2\n",
        )]);

        let rendered = Engine::strict()
            .render(&chart, &render_options(Values::new()))
            .unwrap();

        assert_eq!(
            rendered.manifest,
            "---\n# Source: test-chart/templates/pair.yaml\nfirst: 1\n\
             ---\n# Source: test-chart/templates/pair.yaml\nsecond: 2\n"
        );
    }

    #[test]
    fn test_render_hooks_diverted() {
        let chart = test_chart(vec![
            ChartFile::new("templates/main.yaml", "kind: ConfigMap\nmetadata:\n  name: cm"),
            ChartFile::new(
                "templates/hook.yaml",
                "kind: Job\nmetadata:\n  name: migrate\n  annotations:\n    capstan.io/hook: pre-install",
            ),
        ]);

        let rendered = Engine::strict()
            .render(&chart, &render_options(Values::new()))
            .unwrap();

        assert!(!rendered.manifest.contains("kind: Job"));
        assert_eq!(rendered.hooks.len(), 1);
        assert_eq!(rendered.hooks[0].path, "test-chart/templates/hook.yaml");
        assert!(rendered.hooks[0].manifest.contains("kind: Job"));
    }

    #[test]
    fn test_render_hooks_dropped_when_disabled() {
        let chart = test_chart(vec![ChartFile::new(
            "templates/hook.yaml",
            "kind: Job\nmetadata:\n  name: migrate\n  annotations:\n    capstan.io/hook: pre-install",
        )]);

        let mut options = render_options(Values::new());
        options.disable_hooks = true;
        let rendered = Engine::strict().render(&chart, &options).unwrap();

        assert!(rendered.manifest.is_empty());
        assert!(rendered.hooks.is_empty());
    }

    #[test]
    fn test_render_hooks_sorted_by_weight() {
        let chart = test_chart(vec![
            ChartFile::new(
                "templates/a.yaml",
                "kind: Job\nmetadata:\n  name: late\n  annotations:\n    capstan.io/hook: post-install\n    capstan.io/hook-weight: \"5\"",
            ),
            ChartFile::new(
                "templates/b.yaml",
                "kind: Job\nmetadata:\n  name: early\n  annotations:\n    capstan.io/hook: pre-install\n    capstan.io/hook-weight: \"-5\"",
            ),
        ]);

        let rendered = Engine::strict()
            .render(&chart, &render_options(Values::new()))
            .unwrap();

        assert_eq!(rendered.hooks.len(), 2);
        assert!(rendered.hooks[0].manifest.contains("early"));
        assert!(rendered.hooks[1].manifest.contains("late"));
    }

    #[test]
    fn test_render_helper_import() {
        let chart = test_chart(vec![
            ChartFile::new(
                "templates/_helpers.j2",
                "{% macro fullname(release, chart) %}{{ release }}-{{ chart }}{% endmacro %}",
            ),
            ChartFile::new(
                "templates/cm.yaml",
                "{% from \"templates/_helpers.j2\" import fullname %}name: {{ fullname(release.name, chart.name) }}",
            ),
        ]);

        let rendered = Engine::strict()
            .render(&chart, &render_options(Values::new()))
            .unwrap();

        assert!(rendered.manifest.contains("name: test-test-chart"));
        // The helper itself produced no document.
        assert_eq!(rendered.manifest.matches("# Source:").count(), 1);
    }

    #[test]
    fn test_render_skips_empty_output() {
        let chart = test_chart(vec![ChartFile::new(
            "templates/maybe.yaml",
            "{% if values.enabled is defined %}on: true{% endif %}",
        )]);

        let rendered = Engine::lenient()
            .render(&chart, &render_options(Values::new()))
            .unwrap();

        assert_eq!(rendered.manifest, "");
    }

    #[test]
    fn test_render_library_chart_rejected() {
        let files = vec![ChartFile::new(
            "Chart.yaml",
            "apiVersion: v2\nname: common\nversion: 1.0.0\ntype: library",
        )];
        let chart = ParsedChart::from_files(&files).unwrap();

        let err = Engine::strict()
            .render(&chart, &render_options(Values::new()))
            .unwrap_err();

        assert!(err.to_string().contains("library charts are not installable"));
    }

    #[test]
    fn test_render_notes_excluded() {
        let chart = test_chart(vec![
            ChartFile::new("templates/NOTES.txt", "Thanks for installing {{ chart.name }}"),
            ChartFile::new("templates/cm.yaml", "kind: ConfigMap"),
        ]);

        let rendered = Engine::strict()
            .render(&chart, &render_options(Values::new()))
            .unwrap();

        assert!(!rendered.manifest.contains("Thanks for installing"));
        assert!(rendered.manifest.contains("kind: ConfigMap"));
    }

    #[test]
    fn test_render_template_error_carries_name() {
        let chart = test_chart(vec![ChartFile::new(
            "templates/broken.yaml",
            "x: {{ values.missing }}",
        )]);

        let err = Engine::strict()
            .render(&chart, &render_options(Values::new()))
            .unwrap_err();

        assert!(err.to_string().contains("templates/broken.yaml"));
    }
}
