// World controller scenarios exercised through the public API only.

use block_lab::engine_state::rendering::{RenderGroup, Vertex};
use block_lab::engine_state::voxels::block::{MaterialKind, Position};
use block_lab::engine_state::voxels::registry::VoxelRegistry;
use block_lab::engine_state::voxels::world::{Ray, World, WorldSettings};
use cgmath::{Point2, Point3, Vector3};

fn world_with(blocks: &[(Position, MaterialKind)]) -> World {
    let mut registry = VoxelRegistry::new();
    for (position, material) in blocks {
        assert!(registry.insert(*position, *material));
    }
    World::with_registry(registry, WorldSettings::default())
}

#[test]
fn ground_height_stops_at_the_highest_solid_cell() {
    let solid = world_with(&[
        (Position::new(0, 0, 0), MaterialKind::Stone),
        (Position::new(0, 0, 1), MaterialKind::Stone),
        (Position::new(0, 0, 2), MaterialKind::Stone),
    ]);
    assert_eq!(solid.ground_height(Point2::new(0, 0)), 2.5);

    let flooded = world_with(&[
        (Position::new(0, 0, 0), MaterialKind::Stone),
        (Position::new(0, 0, 1), MaterialKind::Stone),
        (Position::new(0, 0, 2), MaterialKind::Water),
    ]);
    assert_eq!(flooded.ground_height(Point2::new(0, 0)), 1.5);
    assert!(flooded.is_in_liquid(Position::new(0, 0, 2)));
}

#[test]
fn mine_then_stale_put_is_rejected() {
    let target = Position::new(5, 5, 5);
    let mut world = world_with(&[(target, MaterialKind::Grass)]);

    let ray = Ray::new(Point3::new(8.0, 5.0, 5.0), Vector3::new(-1.0, 0.0, 0.0));
    world.update_pick(&ray, 5);
    assert_eq!(world.mine_target(), Some(target));
    assert_eq!(world.put_target(), Some(Position::new(6, 5, 5)));

    assert_eq!(world.do_mine(), Some(MaterialKind::Grass));
    assert!(!world.registry().contains(target));
    assert_eq!(world.put_target(), None);
    assert!(!world.do_put(MaterialKind::Sand));
    assert!(world.registry().is_empty());
}

#[test]
fn repicking_after_mine_allows_put() {
    let mut world = world_with(&[
        (Position::new(5, 5, 5), MaterialKind::Grass),
        (Position::new(4, 5, 5), MaterialKind::Stone),
    ]);
    let ray = Ray::new(Point3::new(8.0, 5.0, 5.0), Vector3::new(-1.0, 0.0, 0.0));

    world.update_pick(&ray, 5);
    world.do_mine();
    world.update_pick(&ray, 5);
    assert_eq!(world.mine_target(), Some(Position::new(4, 5, 5)));
    assert!(world.do_put(MaterialKind::Sand));
    assert_eq!(
        world.registry().try_get_material(Position::new(5, 5, 5)),
        Some(MaterialKind::Sand)
    );
}

#[test]
fn mixed_topology_vertex_count() {
    let mut registry = VoxelRegistry::new();
    for x in 0..3 {
        registry.insert(Position::new(x, 0, 0), MaterialKind::Stone);
    }
    registry.insert(Position::new(0, 4, 0), MaterialKind::PutPreview);
    assert_eq!(registry.total_vertex_count(), 132);

    let mut vertices: Vec<Vertex> = Vec::new();
    registry.emit_vertices(&mut vertices);
    assert_eq!(vertices.len(), 132);
}

#[test]
fn rebuild_is_idempotent_until_the_next_change() {
    let mut world = world_with(&[(Position::new(0, 0, 0), MaterialKind::Grass)]);
    let mut vertices: Vec<Vertex> = Vec::new();

    assert_eq!(world.rebuild_if_dirty(&mut vertices), Some(36));
    assert_eq!(world.rebuild_if_dirty(&mut vertices), None);
    assert_eq!(vertices.len(), 36);

    world.add_debug_ray(Point3::new(0.0, 0.0, 0.0), Vector3::unit_z(), Vector3::unit_z());
    assert!(world.is_dirty());
    vertices.clear();
    assert_eq!(world.rebuild_if_dirty(&mut vertices), Some(38));
    assert!(!world.is_dirty());
}

#[test]
fn draw_plan_puts_transparent_groups_after_opaque() {
    let mut world = world_with(&[
        (Position::new(0, 0, 3), MaterialKind::Glass),
        (Position::new(5, 5, 5), MaterialKind::Grass),
    ]);
    world.add_debug_ray(Point3::new(0.0, 0.0, 0.0), Vector3::unit_x(), Vector3::unit_x());
    let ray = Ray::new(Point3::new(8.0, 5.0, 5.0), Vector3::new(-1.0, 0.0, 0.0));
    world.update_pick(&ray, 5);

    let mut vertices: Vec<Vertex> = Vec::new();
    let emitted = world.rebuild_if_dirty(&mut vertices);
    let plan = world.draw_plan();

    let groups: Vec<RenderGroup> = plan.iter().map(|command| command.group).collect();
    assert_eq!(
        groups,
        vec![
            RenderGroup::DebugRays,
            RenderGroup::Material(MaterialKind::Grass),
            RenderGroup::Material(MaterialKind::Glass),
            RenderGroup::PutPreview,
        ]
    );

    let mut by_offset: Vec<_> = plan.iter().collect();
    by_offset.sort_by_key(|command| command.vertex_offset);
    let mut expected_offset = 0;
    for command in by_offset {
        assert_eq!(command.vertex_offset, expected_offset);
        expected_offset = command.end();
    }
    assert_eq!(Some(expected_offset), emitted);
    assert_eq!(vertices.len(), plan.vertex_count());
}
