#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Block Lab
//!
//! The core of a small block-building game: a sparse voxel world that can be
//! picked, mined and built on, with the geometry and draw plan a host renderer
//! needs to show it.
//!
//! ## Key Modules
//!
//! * `engine_state` - The game session and everything it owns: voxels, world
//!   controller, camera, player, inventory and the rendering contract
//! * `config` - JSON configuration with defaults for every field
//! * `error` - Errors of the configuration path
//!
//! ## Architecture
//!
//! The crate owns no window and no GPU device. A host feeds one `FrameInput`
//! per frame into `GameSession::step`, then calls `World::rebuild_if_dirty` to
//! refresh its vertex buffer and `World::draw_plan` to learn which ranges of
//! that buffer to draw with which shader and blend mode.
//!
//! ## Usage
//!
//! ```no_run
//! fn main() {
//!     if let Err(err) = block_lab::run() {
//!         eprintln!("{err}");
//!     }
//! }
//! ```

use cgmath::Point3;
use log::{debug, info, warn};

pub mod config;
pub mod engine_state;
pub mod error;

pub use config::EngineConfig;
pub use engine_state::{CommandOutcome, FrameInput, FrameStats, GameSession, SessionSettings};
pub use error::ConfigError;

use engine_state::rendering::Vertex;
use engine_state::voxels::registry::VoxelRegistry;
use engine_state::voxels::world::World;

/// Builds the world described by `config` and wraps it in a session.
pub fn build_session(config: &EngineConfig) -> GameSession {
    let mut rng = config.rng();
    let mut registry = VoxelRegistry::new();
    config.scene.build(&mut registry, &mut rng);

    let world = World::with_registry(registry, config.world_settings());
    let [x, y, z] = config.spawn;
    GameSession::new(world, config.session_settings(), Point3::new(x, y, z), rng)
}

/// Runs the headless demo: loads the configuration named by the first
/// command-line argument, then simulates the configured number of frames.
pub fn run() -> Result<(), ConfigError> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load(path)?,
        None => {
            info!("No config given, using defaults");
            EngineConfig::default()
        }
    };

    let mut session = build_session(&config);
    let demo = config.demo;
    let started = web_time::Instant::now();
    let mut vertices: Vec<Vertex> = Vec::new();

    for frame in 0..demo.frames {
        let input = demo_input(frame, demo.frame_time_ms);
        if let Some(outcome) = session.step(&input) {
            debug!("Frame {frame}: {outcome:?}");
        }

        let world = session.world_mut();
        if world.is_dirty() {
            vertices.clear();
        }
        if let Some(count) = world.rebuild_if_dirty(&mut vertices) {
            let plan = world.draw_plan();
            if plan.vertex_count() != count {
                warn!(
                    "Draw plan covers {} vertices, rebuild emitted {count}",
                    plan.vertex_count()
                );
            }
            debug!("Frame {frame}: rebuilt {count} vertices in {} draws", plan.len());
        }
    }

    info!(
        "Simulated {} frames in {:?}",
        demo.frames,
        started.elapsed()
    );
    info!("\n{}", session.debug_text());
    Ok(())
}

/// Scripted input for the demo loop: walk and look around, and every second
/// cycle through mining, putting, shooting and slot changes.
fn demo_input(frame: u32, frame_time_ms: f32) -> FrameInput {
    let phase = frame % 240;
    FrameInput {
        elapsed_ms: frame_time_ms,
        move_forward: if phase < 120 { 0.5 } else { -0.5 },
        move_left: 0.0,
        look_delta: Some((2.0, 0.0)),
        jump: phase == 30,
        shoot: phase == 200,
        mine: phase % 60 == 10,
        put: phase % 60 == 40,
        select_slot: (phase == 0).then(|| i64::from(frame / 240 % 6)),
        remove_random: phase == 220,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_input_issues_one_command_per_frame() {
        for frame in 0..480 {
            let input = demo_input(frame, 16.0);
            let commands = [input.shoot, input.mine, input.put]
                .iter()
                .filter(|c| **c)
                .count();
            assert!(commands <= 1, "frame {frame} issues {commands} commands");
        }
    }

    #[test]
    fn seeded_sessions_match() {
        let config = EngineConfig {
            seed: Some(3),
            ..EngineConfig::default()
        };
        let a = build_session(&config);
        let b = build_session(&config);
        assert_eq!(
            a.world().registry().block_count(),
            b.world().registry().block_count()
        );
        assert!(a.world().is_dirty());
    }
}
