//! # Geometry Editor
//!
//! An editable primitive drawn as a translucent surface with its wireframe
//! on top, between axes and a ground grid. Every slider edit rebuilds the
//! model.
//!
//! ```text
//! cargo run --example geometry_editor -- --primitive box
//! ```
//!
//! Left drag orbits, right drag pans, the wheel zooms.

use clap::Parser;
use primview::prelude::*;

#[derive(Parser, Debug, Clone)]
#[command(name = "geometry-editor")]
#[command(about = "Edit a procedural primitive with live sliders", long_about = None)]
struct Cli {
    /// Primitive to edit: circle, box or cone
    #[arg(long, default_value = "circle")]
    primitive: PrimitiveKind,

    /// Disable vsync
    #[arg(long = "no-vsync", default_value = "false")]
    no_vsync: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    primview::init_logging();

    let mut config = ViewerConfig::from_env().with_title(&format!("primview - {}", cli.primitive));
    if cli.no_vsync {
        config = config.with_vsync(false);
    }

    PrimviewApp::new(Scenario::GeometryEditor(cli.primitive), config)?.run()?;
    Ok(())
}
