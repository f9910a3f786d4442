//! # Engine State Module
//!
//! The per-frame coordinator of the voxel world.
//!
//! ## Key Components
//!
//! * `GameSession` - Owns the world, camera, player and inventory and runs one
//!   frame of game logic per `step`
//! * `camera_state` - Camera position, mouse-look and the aim ray
//! * `player` - Player physics and the block inventory
//! * `rendering` - Vertex layout, geometry tables, render groups, draw plan
//! * `voxels` - Blocks, the registry, scene generation and the world controller
//!
//! ## Frame Order
//!
//! A step runs player physics first, then frame statistics, then picking with
//! the camera ray, then at most one command, and finally the throttled liquid
//! animation. The host calls `World::rebuild_if_dirty` and `World::draw_plan`
//! afterwards through `GameSession::world_mut`.

use std::fmt::Write as _;

use cgmath::{Point2, Point3, Vector3};
use log::{debug, info, trace};

use camera_state::Camera;
use player::{Inventory, ItemKind, PlayerController, PlayerSettings};
use voxels::block::{MaterialKind, Position};
use voxels::world::World;

pub mod camera_state;
pub mod player;
pub mod rendering;
pub mod voxels;

/// Color of a ray shot from the eye.
const SHOT_RAY_COLOR: rendering::Color = rendering::Color {
    x: 1.0,
    y: 1.0,
    z: 1.0,
};

/// Statistics window after which frame and time totals are halved.
const FPS_WINDOW_MS: f32 = 3000.0;

/// How far below the eye the liquid probe sits.
const LIQUID_PROBE_DEPTH: f32 = 2.0;

/// Input gathered by the host for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Time since the previous frame in milliseconds.
    pub elapsed_ms: f32,
    /// Forward walking weight in `[-1, 1]`.
    pub move_forward: f32,
    /// Left strafing weight in `[-1, 1]`.
    pub move_left: f32,
    /// Mouse movement since the previous frame.
    pub look_delta: Option<(f32, f32)>,
    /// Start a jump, or kick upward while swimming.
    pub jump: bool,
    /// Add a debug ray along the aim.
    pub shoot: bool,
    /// Mine the targeted block.
    pub mine: bool,
    /// Put the selected item at the put target.
    pub put: bool,
    /// Remove one random block from the world.
    pub remove_random: bool,
    /// Inventory slot to select; clamped into range.
    pub select_slot: Option<i64>,
}

/// Frame rate over a window that halves once it exceeds three seconds.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FrameStats {
    total_frames: f32,
    total_time_ms: f32,
}

impl FrameStats {
    /// Records one frame.
    pub fn update(&mut self, elapsed_ms: f32) {
        if self.total_time_ms > FPS_WINDOW_MS {
            self.total_frames /= 2.0;
            self.total_time_ms *= 0.5;
        }
        self.total_frames += 1.0;
        self.total_time_ms += elapsed_ms;
    }

    /// Frames per second over the current window; zero before any time passed.
    pub fn fps(&self) -> u32 {
        if self.total_time_ms <= 0.0 {
            return 0;
        }
        (self.total_frames * 1000.0 / self.total_time_ms) as u32
    }
}

/// Tunables of a game session.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SessionSettings {
    /// Size of the pick search cube around the eye.
    pub pick_radius: i32,
    /// Accumulated time between two liquid animation steps.
    pub liquid_animation_interval_ms: f32,
    /// Physics tuning of the player body.
    pub player: PlayerSettings,
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            pick_radius: 5,
            liquid_animation_interval_ms: 100.0,
            player: PlayerSettings::default(),
        }
    }
}

/// What the frame's command did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A debug ray was added from the eye.
    Shot,
    /// The mine target's material, or `None` when nothing was targeted.
    Mined(Option<MaterialKind>),
    /// Whether a block was placed.
    Put(bool),
}

/// One running game: world, camera, player body and inventory.
pub struct GameSession {
    world: World,
    camera: Camera,
    player: PlayerController,
    inventory: Inventory,
    stats: FrameStats,
    settings: SessionSettings,
    liquid_elapsed_ms: f32,
    rng: fastrand::Rng,
}

impl GameSession {
    /// Starts a session with the player's feet at `spawn`.
    ///
    /// The three axis rays are drawn from the origin as orientation markers.
    /// `rng` drives the random block removal.
    pub fn new(
        mut world: World,
        settings: SessionSettings,
        spawn: Point3<f32>,
        rng: fastrand::Rng,
    ) -> Self {
        for axis in [Vector3::unit_x(), Vector3::unit_y(), Vector3::unit_z()] {
            world.add_debug_ray(Point3::new(0.0, 0.0, 0.0), axis, axis);
        }
        let player = PlayerController::new(spawn, settings.player);
        let camera = Camera {
            position: player.eye(),
            ..Camera::default()
        };
        info!(
            "Session started at ({}, {}, {}) with {} blocks",
            spawn.x,
            spawn.y,
            spawn.z,
            world.registry().block_count()
        );
        GameSession {
            world,
            camera,
            player,
            inventory: Inventory::new(),
            stats: FrameStats::default(),
            settings,
            liquid_elapsed_ms: 0.0,
            rng,
        }
    }

    /// The world controller.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access, for rebuilding geometry.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The camera at the player's eye.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The player body.
    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    /// The player's items.
    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Mutable inventory access.
    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    /// Frame rate statistics.
    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Runs one frame of game logic and reports the command it executed.
    pub fn step(&mut self, input: &FrameInput) -> Option<CommandOutcome> {
        self.apply_input(input);
        self.update_player(input.elapsed_ms);
        self.stats.update(input.elapsed_ms);

        let ray = self.camera.aim_ray();
        self.world.update_pick(&ray, self.settings.pick_radius);

        let outcome = self.run_command(input);
        if input.remove_random {
            self.world.remove_random_block(&mut self.rng);
        }
        self.advance_liquid(input.elapsed_ms);
        outcome
    }

    /// Human-readable frame rate, world statistics and inventory.
    pub fn debug_text(&self) -> String {
        let mut text = String::new();
        let _ = writeln!(text, "FPS: {}", self.stats.fps());
        let _ = writeln!(text, "{}", self.world.stats());
        let _ = write!(text, "{}", self.inventory);
        text
    }

    fn apply_input(&mut self, input: &FrameInput) {
        if let Some((dx, dy)) = input.look_delta {
            self.camera.rotate(dx, dy);
        }
        if let Some(slot) = input.select_slot {
            self.inventory.select(slot);
            debug!("Selected slot {}", self.inventory.selected_slot());
        }
        self.player.set_move(input.move_forward, input.move_left);
        self.player
            .set_facing(self.camera.forward(), self.camera.left());
        if input.jump {
            self.player.jump();
        }
    }

    fn update_player(&mut self, elapsed_ms: f32) {
        let column = self.player.column();
        let ground = self.world.ground_height(column);
        let probe = liquid_probe(column, self.camera.position.z);
        let buoyancy = if self.world.is_in_liquid(probe) {
            self.settings.player.buoyancy
        } else {
            0.0
        };
        self.player.update(elapsed_ms, ground, buoyancy);
        self.camera.set_position(self.player.eye());
        trace!(
            "Player at {:?}, ground {ground}, buoyancy {buoyancy}",
            self.player.position()
        );
    }

    fn run_command(&mut self, input: &FrameInput) -> Option<CommandOutcome> {
        if input.shoot {
            self.world
                .add_debug_ray(self.camera.position, self.camera.orientation(), SHOT_RAY_COLOR);
            return Some(CommandOutcome::Shot);
        }
        if input.mine {
            let mined = self.world.do_mine();
            if let Some(item) = mined.and_then(ItemKind::from_material) {
                self.inventory.add(item);
            }
            return Some(CommandOutcome::Mined(mined));
        }
        if input.put {
            let item = self.inventory.selected_item();
            let placed = self.inventory.selected_count() > 0 && self.world.do_put(item.material());
            if placed {
                self.inventory.remove(item);
            }
            return Some(CommandOutcome::Put(placed));
        }
        None
    }

    fn advance_liquid(&mut self, elapsed_ms: f32) {
        let interval = self.settings.liquid_animation_interval_ms;
        self.liquid_elapsed_ms += elapsed_ms;
        if self.liquid_elapsed_ms > interval {
            self.world.advance_liquid_animation(self.liquid_elapsed_ms);
            self.liquid_elapsed_ms -= interval;
        }
    }
}

fn liquid_probe(column: Point2<i32>, eye_z: f32) -> Position {
    Position::new(column.x, column.y, (eye_z - LIQUID_PROBE_DEPTH).round() as i32)
}
