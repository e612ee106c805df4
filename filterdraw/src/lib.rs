//! # filterdraw
//!
//! Command-line front end for [`filterdraw_layout`]: reads a synthesized
//! filter design (JSON), lays it out, and writes an SVG or JSON scene.
//!
//! ```bash
//! # Render a design to SVG on stdout
//! filterdraw render design.json
//!
//! # Force a topology and terminations, write JSON to a file
//! filterdraw render design.json --topology lattice --source 600 --load 600 \
//!     --format json --output scene.json
//!
//! # Start a style file from the defaults
//! filterdraw style > style.yaml
//! ```

pub mod config;
pub mod render;
