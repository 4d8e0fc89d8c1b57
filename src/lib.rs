//! # Gridpoly
//!
//! Grid-snapping polygon sketcher for floor-plan-like shapes.
//!
//! Vertices are snapped to a configurable rectangular grid. Closed
//! selections can be saved as polygons, subtracted from the saved set
//! (punching holes or splitting shapes), and the saved set can be merged
//! into a minimal set of non-overlapping polygons.
//!
//! ## Architecture
//!
//! Gridpoly is organized as a workspace with multiple crates:
//!
//! 1. **gridpoly-core** - Geometry data model, errors, editor events
//! 2. **gridpoly-settings** - Grid, view and capture configuration files
//! 3. **gridpoly-designer** - Snapping, vertex capture, planar set operations,
//!    the polygon editor and its application context
//! 4. **gridpoly** - Main binary with a line-oriented control surface

pub mod session;

pub use gridpoly_core::{polygon_report, EditorError, GeometryError, Point, PolygonWithHoles, Ring};
pub use gridpoly_designer::{
    Action, EditorContext, GeoKernel, GridSnapper, PlanarOps, PolygonEditor, Renderer, Scene,
};
pub use gridpoly_settings::Config;
pub use session::{Command, CommandError, Session, TextRenderer, USAGE};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date information
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize structured logging with tracing
///
/// Logs go to stderr so stdout stays free for command output. The level
/// defaults to INFO and can be overridden with `RUST_LOG`.
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let json_layer = json.then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_current_span(false)
    });
    let text_layer = (!json).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to initialize logging: {}", err))?;

    Ok(())
}
