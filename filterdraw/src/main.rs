//! filterdraw CLI
//!
//! Render synthesized analog filter designs as schematics.
//!
//! # Usage
//!
//! ```bash
//! # SVG to stdout
//! filterdraw render design.json
//!
//! # JSON scene to a file, with a custom style
//! filterdraw render design.json --format json --style style.yaml -o scene.json
//!
//! # Print the default style
//! filterdraw style
//!
//! # Layout diagnostics
//! RUST_LOG=filterdraw_layout=debug filterdraw render design.json
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use filterdraw::{
    config::StyleConfig,
    render::{render_file, OutputFormat, Overrides},
};
use filterdraw_layout::{LayoutConfig, Topology};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "filterdraw")]
#[command(about = "Render analog filter designs as schematic diagrams")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a design file
    Render {
        /// Path to the design JSON
        design: PathBuf,

        /// Topology (ladder-t, ladder-pi, lattice, sallen-key); overrides the design
        #[arg(short, long)]
        topology: Option<Topology>,

        /// Source impedance in ohms; overrides the design
        #[arg(long)]
        source: Option<f64>,

        /// Load impedance in ohms; overrides the design
        #[arg(long)]
        load: Option<f64>,

        /// Path to a YAML style file
        #[arg(short, long)]
        style: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
        format: OutputFormat,

        /// Output path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the default style as YAML
    Style,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            design,
            topology,
            source,
            load,
            style,
            format,
            output,
        } => {
            let overrides = Overrides { topology, source, load };
            render(&design, &overrides, style.as_deref(), format, output.as_deref())?;
        }
        Commands::Style => {
            print!("{}", StyleConfig::default_yaml()?);
        }
    }

    Ok(())
}

fn render(
    design_path: &Path,
    overrides: &Overrides,
    style: Option<&Path>,
    format: OutputFormat,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let cfg = match style {
        Some(path) => StyleConfig::load(path)
            .with_context(|| format!("loading style {}", path.display()))?,
        None => LayoutConfig::default(),
    };

    let (design, encoded) = render_file(design_path, overrides, &cfg, format)?;
    let topology = design
        .topology
        .map_or_else(|| "none".to_string(), |t| t.to_string());

    match output {
        Some(path) => {
            std::fs::write(path, &encoded)
                .with_context(|| format!("writing {}", path.display()))?;
            eprintln!(
                "{} {} ({}, {} components) → {}",
                "✓".green(),
                design_path.display(),
                topology,
                design.components.len(),
                path.display()
            );
        }
        None => {
            print!("{encoded}");
            eprintln!(
                "{} {} ({}, {} components) as {}",
                "✓".green(),
                design_path.display(),
                topology,
                design.components.len(),
                format.extension()
            );
        }
    }

    if design.components.is_empty() || design.topology.is_none() {
        eprintln!("  {} Nothing to lay out, wrote placeholder", "⚠".yellow());
    }

    Ok(())
}
