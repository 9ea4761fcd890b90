//! Render a chart assembled entirely in memory.

use capstan::{MemoryFs, TemplateConfig, Values, must_load_chart, template};

const CHART: &str = "\
apiVersion: v2
name: example-memory
version: 0.1.0";

const CONFIGMAP: &str = r#"apiVersion: v1
kind: ConfigMap
metadata:
  name: {{ printf("%s-%s", chart.name, release.name) | trunc(63) | trimsuffix("-") }}
  namespace: {{ release.namespace }}
  labels:{{ values.labels | toyaml | nindent(4) }}
data:
  something: something
"#;

fn main() {
    let fs = MemoryFs::new()
        .with_text_file("Chart.yaml", CHART)
        .with_text_file("templates/configmap.yaml", CONFIGMAP);

    let chart = must_load_chart(&fs);

    let manifest = template(TemplateConfig {
        release_name: "test".to_string(),
        chart: Some(chart),
        namespace: "no-kube-system".to_string(),
        values: Some(Values::from_yaml("labels:\n  example-from: capstan").expect("valid values")),
        ..Default::default()
    })
    .expect("render should succeed");

    println!("{}", manifest);
}
