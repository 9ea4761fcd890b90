//! Render a chart directory from disk.
//!
//! ```sh
//! cargo run --example disk -- --chart-path ./my-chart --name test --crds
//! ```

use clap::Parser;

use capstan::{DirFs, TemplateConfig, load_chart, template};

#[derive(Parser)]
#[command(about = "Render a chart directory without a helm binary")]
struct Args {
    /// Path to the chart directory
    #[arg(long)]
    chart_path: std::path::PathBuf,

    /// Release name
    #[arg(long, default_value = "test")]
    name: String,

    /// Namespace used to render the chart
    #[arg(long, default_value = "")]
    namespace: String,

    /// Also render bundled CRDs
    #[arg(long)]
    crds: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let chart = load_chart(&DirFs::new(&args.chart_path))?;

    let manifest = template(TemplateConfig {
        release_name: args.name,
        chart: Some(chart),
        namespace: args.namespace,
        include_crds: args.crds,
        ..Default::default()
    })?;

    println!("{}", manifest);

    Ok(())
}
