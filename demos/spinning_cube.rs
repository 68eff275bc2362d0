//! # Spinning Cube
//!
//! One Phong-shaded cube lit by a single directional light, turning a little
//! further every frame.
//!
//! Press `V` to toggle vsync, `Esc` to quit.

fn main() -> anyhow::Result<()> {
    primview::init_logging();
    primview::run(primview::Scenario::SpinningCube)?;
    Ok(())
}
