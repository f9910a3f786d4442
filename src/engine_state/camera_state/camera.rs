//! # Camera Implementation
//!
//! This module contains the first-person camera of the world:
//! - Position and yaw/pitch orientation in the Z-up world frame
//! - Mouse-look rotation with a clamped pitch
//! - The look, forward and left vectors used by player movement
//! - The aim ray handed to picking
//!
//! ## Frame
//! The world is X forward, Y right, Z up. A yaw of zero looks along +X and a
//! positive yaw turns towards +Y. A positive pitch looks up.

use cgmath::*;

use crate::engine_state::voxels::world::Ray;

/// Degrees of rotation per unit of mouse movement.
pub const LOOK_SENSITIVITY: f32 = 0.2;

/// Pitch limit in degrees in either direction.
pub const PITCH_LIMIT_DEGREES: f32 = 90.0;

/// Pitch a freshly created camera starts with, looking slightly down.
pub const DEFAULT_PITCH_DEGREES: f32 = -30.0;

/// Represents a first-person camera in 3D space.
///
/// # Fields
/// - `position`: The camera's eye position in world space
/// - `yaw`: Horizontal rotation around Z
/// - `pitch`: Vertical rotation, clamped to ±90°
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Camera {
    /// The camera's eye position in world space
    pub position: Point3<f32>,
    /// Horizontal rotation around the Z axis
    pub yaw: Deg<f32>,
    /// Vertical rotation above the horizon
    pub pitch: Deg<f32>,
}

impl Default for Camera {
    fn default() -> Self {
        Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(DEFAULT_PITCH_DEGREES))
    }
}

impl Camera {
    /// Creates a new camera with the specified position and orientation.
    ///
    /// # Arguments
    /// * `position` - Initial eye position. Can be any type that converts to `Point3<f32>`.
    /// * `yaw` - Initial yaw. Can be any type that converts to `Deg<f32>`.
    /// * `pitch` - Initial pitch, clamped to ±90°. Can be any type that converts to `Deg<f32>`.
    ///
    /// # Returns
    /// A new `Camera` instance with the specified position and orientation.
    pub fn new<V: Into<Point3<f32>>, Y: Into<Deg<f32>>, P: Into<Deg<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: clamp_pitch(pitch.into()),
        }
    }

    /// Applies a mouse movement.
    ///
    /// Moving right turns right; moving down looks down.
    ///
    /// # Arguments
    /// * `delta_x` - Horizontal mouse movement
    /// * `delta_y` - Vertical mouse movement, positive downwards
    pub fn rotate(&mut self, delta_x: f32, delta_y: f32) {
        self.yaw += Deg(LOOK_SENSITIVITY * delta_x);
        self.pitch = clamp_pitch(self.pitch - Deg(LOOK_SENSITIVITY * delta_y));
    }

    /// Moves the eye to `position`.
    pub fn set_position(&mut self, position: Point3<f32>) {
        self.position = position;
    }

    /// The normalized direction the camera is looking in.
    pub fn orientation(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = Rad::from(self.yaw).sin_cos();
        let (pitch_sin, pitch_cos) = Rad::from(self.pitch).sin_cos();
        Vector3::new(pitch_cos * yaw_cos, pitch_cos * yaw_sin, pitch_sin).normalize()
    }

    /// The horizontal component of the look direction.
    pub fn forward(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = Rad::from(self.yaw).sin_cos();
        Vector3::new(yaw_cos, yaw_sin, 0.0)
    }

    /// The horizontal direction to the camera's left.
    pub fn left(&self) -> Vector3<f32> {
        self.forward().cross(Vector3::unit_z())
    }

    /// The ray from the eye along the look direction.
    pub fn aim_ray(&self) -> Ray {
        Ray::new(self.position, self.orientation())
    }
}

fn clamp_pitch(pitch: Deg<f32>) -> Deg<f32> {
    Deg(pitch.0.clamp(-PITCH_LIMIT_DEGREES, PITCH_LIMIT_DEGREES))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vector3<f32>, b: Vector3<f32>) {
        assert!((a - b).magnitude() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn zero_angles_look_forward() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(0.0));
        assert_close(camera.orientation(), Vector3::unit_x());
        assert_close(camera.left(), -Vector3::unit_y());
    }

    #[test]
    fn turning_right_looks_towards_plus_y() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Deg(0.0), Deg(0.0));
        camera.rotate(450.0, 0.0);
        assert_close(camera.forward(), Vector3::unit_y());
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = Camera::default();
        assert_eq!(camera.pitch, Deg(DEFAULT_PITCH_DEGREES));
        camera.rotate(0.0, -10_000.0);
        assert_eq!(camera.pitch, Deg(90.0));
        assert_close(camera.orientation(), Vector3::unit_z());
        camera.rotate(0.0, 10_000.0);
        assert_eq!(camera.pitch, Deg(-90.0));
    }

    #[test]
    fn aim_ray_starts_at_eye() {
        let camera = Camera::new(Point3::new(1.0, 2.0, 3.0), Deg(0.0), Deg(0.0));
        let ray = camera.aim_ray();
        assert_eq!(ray.origin, Point3::new(1.0, 2.0, 3.0));
        assert_close(ray.direction, Vector3::unit_x());
    }
}
