//! # Voxel World Core
//!
//! This module contains the voxel world model: the blocks, the sparse registry
//! that stores them and the world controller that picks, mines, places and
//! regenerates geometry on top of it.
//!
//! ## Architecture
//!
//! The voxel system is organized into several key components:
//!
//! * **Block**: Grid positions, the closed material set and the six block faces
//! * **Registry**: Sparse position to block storage, grouped by material
//! * **Generation**: Bulk builders (planes, trees, water boxes, scatter, hills)
//! * **Scene**: Named starting layouts built from the generation helpers
//! * **World**: Pick targeting, mine/put, ground and liquid queries, and the
//!   dirty-driven vertex rebuild
//!
//! ## Data Flow
//!
//! 1. The host computes an aim ray and passes it to `World::update_pick`
//! 2. Mine and put commands mutate the registry and mark it dirty
//! 3. `World::rebuild_if_dirty` regenerates the vertex stream once per change
//! 4. `World::draw_plan` tells the host how to draw that stream
//!
//! ## Thread Safety
//!
//! Nothing here synchronizes. The world is owned and mutated through `&mut`
//! by a single caller; hosts that generate in the background build a private
//! registry and hand it over with `World::with_registry`.

pub mod block;
pub mod generation;
pub mod registry;
pub mod scene;
pub mod world;
