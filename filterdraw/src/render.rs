//! Design file → encoded scene.

use filterdraw_layout::{render_design, svg, to_json, Design, DesignError, LayoutConfig, Scene, Topology};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to read design {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid design {path}: {source}")]
    Design {
        path: PathBuf,
        source: DesignError,
    },
}

/// Output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Svg,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Json => "json",
        }
    }

    pub fn encode(self, scene: &Scene) -> String {
        match self {
            OutputFormat::Svg => svg::to_svg(scene),
            OutputFormat::Json => to_json(scene),
        }
    }
}

/// Command-line values that replace the matching design fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub topology: Option<Topology>,
    pub source: Option<f64>,
    pub load: Option<f64>,
}

impl Overrides {
    pub fn apply(&self, design: &mut Design) {
        if let Some(topology) = self.topology {
            design.topology = Some(topology);
        }
        if let Some(source) = self.source {
            design.source_impedance = Some(source);
        }
        if let Some(load) = self.load {
            design.load_impedance = Some(load);
        }
    }
}

/// Read and validate a design file.
pub fn load_design(path: &Path) -> Result<Design, RenderError> {
    let json = std::fs::read_to_string(path).map_err(|source| RenderError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Design::from_json(&json).map_err(|source| RenderError::Design {
        path: path.to_path_buf(),
        source,
    })
}

/// Load, override, lay out and encode a design file.
pub fn render_file(
    path: &Path,
    overrides: &Overrides,
    cfg: &LayoutConfig,
    format: OutputFormat,
) -> Result<(Design, String), RenderError> {
    let mut design = load_design(path)?;
    overrides.apply(&mut design);
    tracing::debug!(
        path = %path.display(),
        components = design.components.len(),
        topology = ?design.topology,
        "rendering design"
    );
    let scene = render_design(&design, cfg);
    Ok((design, format.encode(&scene)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use filterdraw_layout::Impedances;

    #[test]
    fn overrides_replace_only_given_fields() {
        let mut design = Design {
            topology: Some(Topology::LadderT),
            source_impedance: Some(50.0),
            load_impedance: Some(75.0),
            ..Design::default()
        };
        Overrides {
            topology: Some(Topology::Lattice),
            source: None,
            load: Some(600.0),
        }
        .apply(&mut design);
        assert_eq!(design.topology, Some(Topology::Lattice));
        assert_eq!(design.impedances(), Impedances { source: Some(50.0), load: Some(600.0) });
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_design(Path::new("/nonexistent/design.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/design.json"));
    }
}
