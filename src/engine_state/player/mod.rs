//! # Player Module
//!
//! The player body and what it carries.
//!
//! ## Core Components
//! - `PlayerController`: walking, jumping, gravity and buoyancy against the
//!   ground height the world reports
//! - `Inventory`: item counts credited by mining and spent by putting
//!
//! The controller does not query the world itself; the session samples
//! `World::ground_height` and `World::is_in_liquid` each frame and passes the
//! results in.

use cgmath::{Point3, Vector3};
use serde::{Deserialize, Serialize};

pub mod inventory;

pub use inventory::{Inventory, ItemKind};

/// Physics tuning of the player body.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// Eye height above the feet.
    pub eye_height: f32,
    /// Walking speed in units per second.
    pub move_speed: f32,
    /// Scale applied to gravity and buoyancy when integrating the jump velocity.
    pub jump_scale: f32,
    /// Downward acceleration.
    pub gravity: f32,
    /// Upward acceleration while the body is in liquid.
    pub buoyancy: f32,
    /// Jump velocity when starting from the ground.
    pub ground_jump_velocity: f32,
    /// Jump velocity when kicking off in liquid.
    pub liquid_jump_velocity: f32,
    /// Divisor applied to movement and gravity while in liquid.
    pub liquid_damping: f32,
    /// Lowest vertical velocity while in liquid.
    pub liquid_min_velocity: f32,
    /// Highest vertical velocity while in liquid.
    pub liquid_max_velocity: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        PlayerSettings {
            eye_height: 3.0,
            move_speed: 10.0,
            jump_scale: 5.0,
            gravity: 9.8,
            buoyancy: 8.8,
            ground_jump_velocity: 15.0,
            liquid_jump_velocity: 5.0,
            liquid_damping: 3.0,
            liquid_min_velocity: -3.0,
            liquid_max_velocity: 4.0,
        }
    }
}

/// The player body.
///
/// `position` is the feet; the camera sits `eye_height` above it.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerController {
    position: Point3<f32>,
    settings: PlayerSettings,
    /// (forward, left) movement weights in `[-1, 1]`.
    move_weight: (f32, f32),
    jump_velocity: f32,
    forward_dir: Vector3<f32>,
    left_dir: Vector3<f32>,
    grounded: bool,
    in_liquid: bool,
}

impl PlayerController {
    /// Creates a player standing at `position`, facing +X.
    pub fn new(position: Point3<f32>, settings: PlayerSettings) -> Self {
        PlayerController {
            position,
            settings,
            move_weight: (0.0, 0.0),
            jump_velocity: 0.0,
            forward_dir: Vector3::unit_x(),
            left_dir: -Vector3::unit_y(),
            grounded: false,
            in_liquid: false,
        }
    }

    /// Feet position.
    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    /// Eye position, where the camera belongs.
    pub fn eye(&self) -> Point3<f32> {
        self.position + Vector3::unit_z() * self.settings.eye_height
    }

    /// The grid column under the player.
    pub fn column(&self) -> cgmath::Point2<i32> {
        cgmath::Point2::new(self.position.x.round() as i32, self.position.y.round() as i32)
    }

    /// Whether the feet rested on the ground after the last move.
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Whether the last update ran with buoyancy.
    pub fn is_in_liquid(&self) -> bool {
        self.in_liquid
    }

    /// Current vertical velocity.
    pub fn jump_velocity(&self) -> f32 {
        self.jump_velocity
    }

    /// The tuning the player was created with.
    pub fn settings(&self) -> &PlayerSettings {
        &self.settings
    }

    /// Sets the walking weights, each clamped to `[-1, 1]`.
    ///
    /// # Arguments
    /// * `forward` - Positive walks forward, negative backward
    /// * `left` - Positive strafes left, negative right
    pub fn set_move(&mut self, forward: f32, left: f32) {
        self.move_weight = (forward.clamp(-1.0, 1.0), left.clamp(-1.0, 1.0));
    }

    /// Aligns walking with the camera's horizontal directions.
    pub fn set_facing(&mut self, forward: Vector3<f32>, left: Vector3<f32>) {
        self.forward_dir = forward;
        self.left_dir = left;
    }

    /// Starts a jump from the ground, or a kick while swimming.
    ///
    /// Does nothing in mid-air.
    pub fn jump(&mut self) {
        if self.grounded {
            self.jump_velocity = self.settings.ground_jump_velocity;
        } else if self.in_liquid {
            self.jump_velocity = self.settings.liquid_jump_velocity;
        }
    }

    /// Integrates one frame of movement.
    ///
    /// # Arguments
    /// * `elapsed_ms` - Frame time in milliseconds
    /// * `ground` - Surface height under the player's column
    /// * `buoyancy` - Upward acceleration; non-zero means the body is in liquid
    pub fn update(&mut self, elapsed_ms: f32, ground: f32, buoyancy: f32) {
        let s = self.settings;
        let seconds = elapsed_ms / 1000.0;
        self.in_liquid = buoyancy != 0.0;
        let damping = if self.in_liquid { s.liquid_damping } else { 1.0 };

        let walk = s.move_speed * seconds / damping;
        let delta = self.forward_dir * self.move_weight.0 * walk
            + self.left_dir * self.move_weight.1 * walk
            + Vector3::unit_z() * self.jump_velocity * seconds;

        if self.position.z != ground {
            self.jump_velocity += (buoyancy - s.gravity) * s.jump_scale * seconds * damping;
            if self.in_liquid {
                self.jump_velocity = self
                    .jump_velocity
                    .clamp(s.liquid_min_velocity, s.liquid_max_velocity);
            }
        }

        if delta != Vector3::new(0.0, 0.0, 0.0) {
            self.position += delta;
            if self.position.z <= ground {
                self.position.z = ground;
                if self.jump_velocity < 0.0 {
                    self.jump_velocity = 0.0;
                }
            }
            self.grounded = self.position.z == ground;
        }
    }
}
