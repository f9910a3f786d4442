//! # World Module
//!
//! This module provides the `World` struct, the controller that sits on top of
//! the `VoxelRegistry` and owns everything a frame needs besides the blocks
//! themselves.
//!
//! ## Responsibilities
//!
//! - Pick targeting: which cell the aim ray would mine and which empty cell a
//!   put would fill
//! - Mine and put transactions against the registry
//! - Ground and liquid queries for player physics
//! - Debug rays and the liquid tint animation
//! - Dirty-driven vertex regeneration and the matching draw plan
//!
//! ## Dirty Tracking
//!
//! The world is dirty when the registry is dirty or when any world-owned
//! overlay changed (targets, rays, liquid tint). `rebuild_if_dirty` is the only
//! place that clears it.

use std::fmt;

use cgmath::{Point2, Point3, Vector3};
use log::{debug, trace};

use crate::engine_state::rendering::{
    emit_block, emit_segment, Color, DrawCommand, DrawPlan, RenderGroup, Vertex,
    VERTICES_PER_SEGMENT,
};

use super::block::{cell_containing, position_center, Block, MaterialKind, Position};
use super::registry::VoxelRegistry;

pub mod collision;
pub mod picking;

pub use picking::Ray;

/// Tint of the block under the mine target.
const MINE_TARGET_COLOR: Color = Color {
    x: 1.0,
    y: 0.0,
    z: 0.0,
};

/// Largest accepted pick search radius; larger requests are clamped to it.
pub const MAX_PICK_RADIUS: i32 = 64;

/// Phase step of one liquid animation tick.
const LIQUID_ANIMATION_STEP: f32 = 1.0 / 64.0;

/// Tunables of the world controller.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WorldSettings {
    /// Highest z the ground scan starts from.
    pub ground_scan_top: i32,
    /// World length of a drawn debug ray.
    pub debug_ray_length: f32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        WorldSettings {
            ground_scan_top: 10,
            debug_ray_length: 100.0,
        }
    }
}

/// A visual-only ray segment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DebugRay {
    /// The ray being visualised.
    pub ray: Ray,
    /// Line colour.
    pub color: Color,
}

/// Diagnostic snapshot of a world.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WorldStats {
    /// How many rebuilds actually emitted geometry.
    pub dirty_frames: u64,
    /// Vertices the next rebuild would emit.
    pub vertex_count: usize,
    /// Blocks stored in the registry.
    pub block_count: usize,
    /// Current mine target.
    pub mine_target: Option<Position>,
    /// Current put target.
    pub put_target: Option<Position>,
    /// Number of debug rays.
    pub ray_count: usize,
    /// Current liquid animation phase in `[0, 1]`.
    pub liquid_phase: f32,
}

fn fmt_target(target: Option<Position>) -> String {
    match target {
        Some(p) => format!("({}, {}, {})", p.x, p.y, p.z),
        None => "-".to_string(),
    }
}

impl fmt::Display for WorldStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dirty Frames: {}", self.dirty_frames)?;
        writeln!(f, "Vertices: {}", self.vertex_count)?;
        writeln!(f, "Blocks: {}", self.block_count)?;
        writeln!(f, "Rays: {}", self.ray_count)?;
        writeln!(f, "Mine: {}", fmt_target(self.mine_target))?;
        writeln!(f, "Put: {}", fmt_target(self.put_target))?;
        write!(f, "Liquid: {:.3}", self.liquid_phase)
    }
}

/// The world controller.
///
/// Owns the block registry exclusively together with the pick state and the
/// render overlays. All operations are synchronous and report routine failure
/// through `bool` and `Option`.
#[derive(Clone, Debug)]
pub struct World {
    registry: VoxelRegistry,
    settings: WorldSettings,
    mine_target: Option<Position>,
    put_target: Option<Position>,
    rays: Vec<DebugRay>,
    liquid_phase: f32,
    liquid_tint: Color,
    dirty: bool,
    dirty_frames: u64,
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldSettings::default())
    }
}

impl World {
    /// Creates an empty world.
    pub fn new(settings: WorldSettings) -> Self {
        Self::with_registry(VoxelRegistry::new(), settings)
    }

    /// Creates a world around an already populated registry.
    ///
    /// The world starts dirty so the first rebuild always emits.
    pub fn with_registry(registry: VoxelRegistry, settings: WorldSettings) -> Self {
        World {
            registry,
            settings,
            mine_target: None,
            put_target: None,
            rays: Vec::new(),
            liquid_phase: 0.0,
            liquid_tint: MaterialKind::Water.render_info().base_color,
            dirty: true,
            dirty_frames: 0,
        }
    }

    /// The block registry.
    pub fn registry(&self) -> &VoxelRegistry {
        &self.registry
    }

    /// Mutable access to the block registry for bulk generation.
    pub fn registry_mut(&mut self) -> &mut VoxelRegistry {
        &mut self.registry
    }

    /// The settings the world was created with.
    pub fn settings(&self) -> &WorldSettings {
        &self.settings
    }

    /// The cell a mine command would remove.
    pub fn mine_target(&self) -> Option<Position> {
        self.mine_target
    }

    /// The empty cell a put command would fill.
    pub fn put_target(&self) -> Option<Position> {
        self.put_target
    }

    /// The current debug rays.
    pub fn debug_rays(&self) -> &[DebugRay] {
        &self.rays
    }

    /// Current tint of liquid blocks.
    pub fn liquid_tint(&self) -> Color {
        self.liquid_tint
    }

    /// Whether the next `rebuild_if_dirty` will emit.
    pub fn is_dirty(&self) -> bool {
        self.dirty || self.registry.is_dirty()
    }

    /// Recomputes the mine and put targets for `ray`.
    ///
    /// Every non-liquid cell in the cube of half-extent `search_radius - 1`
    /// around the cell containing the ray origin is tested. The nearest hit
    /// wins; on equal distance the first cell in x-, y-, z-ascending order is
    /// kept. The put target is the neighbour across the face the ray enters
    /// through, if that cell is empty. A miss clears both targets.
    ///
    /// # Arguments
    /// * `ray` - The aim ray
    /// * `search_radius` - Size of the search cube, clamped to `1..=MAX_PICK_RADIUS`
    pub fn update_pick(&mut self, ray: &Ray, search_radius: i32) {
        let hit = if ray.is_degenerate() {
            None
        } else {
            self.nearest_hit(ray, search_radius)
        };

        let (mine, put) = match hit {
            Some(cell) => {
                let put = picking::entry_face(ray, cell)
                    .map(|side| side.neighbour_of(cell))
                    .filter(|slot| !self.registry.contains(*slot));
                (Some(cell), put)
            }
            None => (None, None),
        };

        if mine != self.mine_target || put != self.put_target {
            trace!("Pick changed: mine {:?} put {:?}", mine, put);
            self.mine_target = mine;
            self.put_target = put;
            self.dirty = true;
        }
    }

    fn nearest_hit(&self, ray: &Ray, search_radius: i32) -> Option<Position> {
        let center = cell_containing(ray.origin);
        let half = search_radius.clamp(1, MAX_PICK_RADIUS) - 1;
        let span = |c: i32| c.saturating_sub(half)..=c.saturating_add(half);

        let mut nearest: Option<(Position, f32)> = None;
        for x in span(center.x) {
            for y in span(center.y) {
                for z in span(center.z) {
                    let cell = Point3::new(x, y, z);
                    match self.registry.try_get_material(cell) {
                        Some(material) if !material.is_liquid() => {}
                        _ => continue,
                    }
                    if let Some(distance) = picking::intersect_cell(ray, cell) {
                        if nearest.map_or(true, |(_, best)| distance < best) {
                            nearest = Some((cell, distance));
                        }
                    }
                }
            }
        }
        nearest.map(|(cell, _)| cell)
    }

    /// Removes the block under the mine target.
    ///
    /// Both targets are cleared afterwards, so a put needs a fresh pick.
    ///
    /// # Returns
    /// The removed block's material, or `None` when there was nothing to mine.
    pub fn do_mine(&mut self) -> Option<MaterialKind> {
        let target = self.mine_target.take()?;
        self.put_target = None;
        self.dirty = true;

        let material = self.registry.try_get_material(target)?;
        self.registry.remove(target);
        debug!("Mined {} at {:?}", material, target);
        Some(material)
    }

    /// Places a block of `material` at the put target.
    ///
    /// # Returns
    /// `false` when there is no put target, the cell became occupied, or the
    /// material cannot be placed. On success both targets are cleared.
    pub fn do_put(&mut self, material: MaterialKind) -> bool {
        if !material.is_placeable() {
            return false;
        }
        let Some(target) = self.put_target else {
            return false;
        };
        if !self.registry.insert(target, material) {
            return false;
        }

        debug!("Put {} at {:?}", material, target);
        self.mine_target = None;
        self.put_target = None;
        self.dirty = true;
        true
    }

    /// Removes one random block, clearing both targets if it was the mine target.
    pub fn remove_random_block(&mut self, rng: &mut fastrand::Rng) -> Option<Block> {
        let block = self.registry.remove_random(rng)?;
        if self.mine_target == Some(block.position) {
            self.mine_target = None;
            self.put_target = None;
        }
        self.dirty = true;
        debug!("Removed {} at {:?}", block.material, block.position);
        Some(block)
    }

    /// Height of the walkable surface in the `column`.
    ///
    /// See [`collision::ground_height`].
    pub fn ground_height(&self, column: Point2<i32>) -> f32 {
        collision::ground_height(&self.registry, column, self.settings.ground_scan_top)
    }

    /// Whether the cell at `position` holds a liquid.
    pub fn is_in_liquid(&self, position: Position) -> bool {
        collision::is_in_liquid(&self.registry, position)
    }

    /// Adds a visual-only ray drawn from `origin` along `direction`.
    pub fn add_debug_ray(&mut self, origin: Point3<f32>, direction: Vector3<f32>, color: Color) {
        self.rays.push(DebugRay {
            ray: Ray::new(origin, direction),
            color,
        });
        self.dirty = true;
    }

    /// Removes every debug ray.
    pub fn clear_debug_rays(&mut self) {
        if !self.rays.is_empty() {
            self.rays.clear();
            self.dirty = true;
        }
    }

    /// Advances the liquid tint by one animation step.
    ///
    /// The phase wraps back into `[0, 1]` and the liquid tint becomes the phase
    /// on every channel. Throttling is the caller's job; each call is one step
    /// regardless of `elapsed_ms`.
    pub fn advance_liquid_animation(&mut self, elapsed_ms: f32) {
        self.liquid_phase += LIQUID_ANIMATION_STEP;
        if self.liquid_phase > 1.0 {
            self.liquid_phase -= 1.0;
        }
        self.liquid_tint = Color::new(self.liquid_phase, self.liquid_phase, self.liquid_phase);
        self.dirty = true;
        trace!("Liquid phase {:.3} after {elapsed_ms} ms", self.liquid_phase);
    }

    /// Vertices a rebuild emits right now.
    pub fn vertex_count(&self) -> usize {
        self.ray_vertex_count() + self.registry.total_vertex_count() + self.preview_vertex_count()
    }

    fn ray_vertex_count(&self) -> usize {
        self.rays.len() * VERTICES_PER_SEGMENT
    }

    fn preview_vertex_count(&self) -> usize {
        if self.put_target.is_some() {
            MaterialKind::PutPreview.render_info().vertices_per_block()
        } else {
            0
        }
    }

    /// Regenerates the full vertex stream into `sink` when anything changed.
    ///
    /// The stream holds the debug rays, then every registry block (the mine
    /// target tinted red, liquids in the animated tint), then the put preview
    /// outline.
    ///
    /// # Returns
    /// The number of vertices emitted, or `None` if nothing was dirty.
    pub fn rebuild_if_dirty<S: Extend<Vertex>>(&mut self, sink: &mut S) -> Option<usize> {
        if !self.is_dirty() {
            return None;
        }

        let vertex_count = self.vertex_count();
        for debug_ray in &self.rays {
            let end = debug_ray.ray.at(self.settings.debug_ray_length);
            emit_segment(debug_ray.ray.origin, end, debug_ray.color, sink);
        }

        let mine_target = self.mine_target;
        let liquid_tint = self.liquid_tint;
        self.registry.emit_vertices_with(sink, |block, base| {
            if Some(block.position) == mine_target {
                MINE_TARGET_COLOR
            } else if block.material.is_liquid() {
                liquid_tint
            } else {
                base
            }
        });

        if let Some(target) = self.put_target {
            let info = MaterialKind::PutPreview.render_info();
            emit_block(info.topology, position_center(target), info.base_color, sink);
        }

        self.dirty = false;
        self.dirty_frames += 1;
        trace!("Rebuilt {} vertices", vertex_count);
        Some(vertex_count)
    }

    /// The ordered draws over the stream the last rebuild produced.
    ///
    /// Debug rays come first, then opaque material groups, then transparent
    /// groups in registration order, then the put preview. Offsets index the
    /// emitted stream; empty regions are left out.
    pub fn draw_plan(&self) -> DrawPlan {
        let mut plan = DrawPlan::new();
        let mut offset = 0;

        let rays = self.ray_vertex_count();
        plan.push(DrawCommand::new(RenderGroup::DebugRays, rays, offset));
        offset += rays;

        let mut delayed = Vec::new();
        for group in self.registry.groups() {
            let command = DrawCommand::new(
                RenderGroup::Material(group.material()),
                group.vertex_count(),
                offset,
            );
            offset += command.vertex_count;
            if group.material().render_info().is_delayed() {
                delayed.push(command);
            } else {
                plan.push(command);
            }
        }
        for command in delayed {
            plan.push(command);
        }

        plan.push(DrawCommand::new(
            RenderGroup::PutPreview,
            self.preview_vertex_count(),
            offset,
        ));
        plan
    }

    /// A diagnostic snapshot.
    pub fn stats(&self) -> WorldStats {
        WorldStats {
            dirty_frames: self.dirty_frames,
            vertex_count: self.vertex_count(),
            block_count: self.registry.block_count(),
            mine_target: self.mine_target,
            put_target: self.put_target,
            ray_count: self.rays.len(),
            liquid_phase: self.liquid_phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::rendering::BlendMode;

    fn grass_at_five() -> World {
        let mut world = World::default();
        world.registry_mut().insert(Point3::new(5, 5, 5), MaterialKind::Grass);
        world
    }

    fn ray_at_front_face() -> Ray {
        Ray::new(Point3::new(8.0, 5.0, 5.0), Vector3::new(-1.0, 0.0, 0.0))
    }

    #[test]
    fn pick_selects_block_and_face_neighbour() {
        let mut world = grass_at_five();
        world.update_pick(&ray_at_front_face(), 5);
        assert_eq!(world.mine_target(), Some(Point3::new(5, 5, 5)));
        assert_eq!(world.put_target(), Some(Point3::new(6, 5, 5)));
    }

    #[test]
    fn pick_out_of_range_misses() {
        let mut world = grass_at_five();
        world.update_pick(&ray_at_front_face(), 3);
        assert_eq!(world.mine_target(), None);
        assert_eq!(world.put_target(), None);
    }

    #[test]
    fn nearest_cell_wins() {
        let mut world = grass_at_five();
        world.registry_mut().insert(Point3::new(3, 5, 5), MaterialKind::Stone);
        world.update_pick(&Ray::new(Point3::new(1.0, 5.0, 5.0), Vector3::new(1.0, 0.0, 0.0)), 6);
        assert_eq!(world.mine_target(), Some(Point3::new(3, 5, 5)));
        assert_eq!(world.put_target(), Some(Point3::new(2, 5, 5)));
    }

    #[test]
    fn picking_passes_through_liquid() {
        let mut world = grass_at_five();
        world.registry_mut().insert(Point3::new(6, 5, 5), MaterialKind::Water);
        world.update_pick(&ray_at_front_face(), 5);
        assert_eq!(world.mine_target(), Some(Point3::new(5, 5, 5)));
        assert_eq!(world.put_target(), None);
    }

    #[test]
    fn degenerate_ray_clears_targets() {
        let mut world = grass_at_five();
        world.update_pick(&ray_at_front_face(), 5);
        world.update_pick(&Ray::new(Point3::new(8.0, 5.0, 5.0), Vector3::new(0.0, 0.0, 0.0)), 5);
        assert_eq!(world.mine_target(), None);
    }

    #[test]
    fn unchanged_pick_keeps_world_clean() {
        let mut world = grass_at_five();
        world.update_pick(&ray_at_front_face(), 5);
        world.rebuild_if_dirty(&mut Vec::new());
        world.update_pick(&ray_at_front_face(), 5);
        assert!(!world.is_dirty());
    }

    #[test]
    fn mine_clears_both_targets() {
        let mut world = grass_at_five();
        world.update_pick(&ray_at_front_face(), 5);
        assert_eq!(world.do_mine(), Some(MaterialKind::Grass));
        assert_eq!(world.put_target(), None);
        assert!(!world.do_put(MaterialKind::Sand));
        assert_eq!(world.do_mine(), None);
    }

    #[test]
    fn put_fills_target_and_rejects_overlay_materials() {
        let mut world = grass_at_five();
        world.update_pick(&ray_at_front_face(), 5);
        assert!(!world.do_put(MaterialKind::PutPreview));
        assert!(!world.do_put(MaterialKind::Water));
        assert!(world.do_put(MaterialKind::Sand));
        assert!(world.registry().contains_of(Point3::new(6, 5, 5), MaterialKind::Sand));
        assert_eq!(world.mine_target(), None);
        assert!(!world.do_put(MaterialKind::Sand));
    }

    #[test]
    fn rebuild_is_idempotent_until_next_change() {
        let mut world = grass_at_five();
        let mut vertices = Vec::new();
        assert_eq!(world.rebuild_if_dirty(&mut vertices), Some(36));
        assert_eq!(world.rebuild_if_dirty(&mut vertices), None);
        assert_eq!(vertices.len(), 36);

        world.add_debug_ray(Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0), Color::new(0.0, 1.0, 0.0));
        vertices.clear();
        assert_eq!(world.rebuild_if_dirty(&mut vertices), Some(38));
        assert_eq!(vertices[1].position, [100.0, 0.0, 0.0]);
        assert_eq!(world.stats().dirty_frames, 2);
    }

    #[test]
    fn mine_target_is_tinted_red() {
        let mut world = grass_at_five();
        world.update_pick(&ray_at_front_face(), 5);
        let mut vertices = Vec::new();
        world.rebuild_if_dirty(&mut vertices);
        assert_eq!(vertices.len(), 36 + 24);
        assert!(vertices[..36].iter().all(|v| v.color == [1.0, 0.0, 0.0]));
        assert!(vertices[36..].iter().all(|v| v.color == [1.0, 1.0, 1.0]));
    }

    #[test]
    fn liquid_phase_wraps() {
        let mut world = World::default();
        for _ in 0..64 {
            world.advance_liquid_animation(100.0);
        }
        assert_eq!(world.stats().liquid_phase, 1.0);
        world.advance_liquid_animation(100.0);
        assert!((world.stats().liquid_phase - 1.0 / 64.0).abs() < 1e-6);
        assert_eq!(world.liquid_tint().x, world.liquid_tint().z);
    }

    #[test]
    fn draw_plan_orders_opaque_before_delayed() {
        let mut world = World::default();
        let registry = world.registry_mut();
        registry.insert(Point3::new(0, 0, 0), MaterialKind::Water);
        registry.insert(Point3::new(1, 0, 0), MaterialKind::Grass);
        registry.insert(Point3::new(2, 0, 0), MaterialKind::Glass);
        registry.insert(Point3::new(3, 0, 0), MaterialKind::Stone);

        let plan = world.draw_plan();
        let groups: Vec<_> = plan.iter().map(|c| c.group).collect();
        assert_eq!(
            groups,
            vec![
                RenderGroup::Material(MaterialKind::Grass),
                RenderGroup::Material(MaterialKind::Stone),
                RenderGroup::Material(MaterialKind::Water),
                RenderGroup::Material(MaterialKind::Glass),
            ]
        );
        let water = plan.commands()[2];
        assert_eq!(water.vertex_offset, 0);
        assert_eq!(water.blend, BlendMode::Transparent);
        assert_eq!(plan.commands()[0].vertex_offset, 36);
        assert_eq!(plan.vertex_count(), world.vertex_count());
    }

    #[test]
    fn huge_search_radius_is_clamped() {
        let mut world = grass_at_five();
        world.update_pick(&ray_at_front_face(), i32::MAX);
        assert_eq!(world.mine_target(), Some(Point3::new(5, 5, 5)));

        let far = Ray::new(Point3::new(500.0, 5.0, 5.0), Vector3::new(-1.0, 0.0, 0.0));
        world.update_pick(&far, i32::MAX);
        assert_eq!(world.mine_target(), None);

        let edge = Ray::new(Point3::new(3.0e9, 3.0e9, -3.0e9), Vector3::new(1.0, 0.0, 0.0));
        world.update_pick(&edge, MAX_PICK_RADIUS);
        assert_eq!(world.mine_target(), None);
    }

    #[test]
    fn removing_the_mine_target_at_random_clears_targets() {
        let mut world = grass_at_five();
        world.update_pick(&ray_at_front_face(), 5);
        let mut rng = fastrand::Rng::with_seed(4);

        let removed = world.remove_random_block(&mut rng);
        assert_eq!(removed.map(|b| b.position), Some(Point3::new(5, 5, 5)));
        assert_eq!(world.mine_target(), None);
        assert_eq!(world.put_target(), None);
        assert!(world.is_dirty());
        assert_eq!(world.remove_random_block(&mut rng), None);
    }

    #[test]
    fn stats_render_as_text() {
        let world = grass_at_five();
        let text = world.stats().to_string();
        assert!(text.contains("Blocks: 1"));
        assert!(text.contains("Mine: -"));
    }
}
