//! # Camera State Management
//!
//! This module handles all camera-related functionality:
//! - Camera position and orientation tracking
//! - Mouse-look processing
//! - The aim ray used for block picking
//!
//! ## Core Components
//! - `Camera`: Represents the camera's position and orientation in 3D space

pub mod camera;

pub use camera::Camera;
