use approx::{abs_diff_eq, assert_abs_diff_eq};
use verlet2d::{
    BoundaryPolicy, ConstraintDesc, NodeDesc, NodeId, NodeUpdate, StepOptions, Vec2, World,
    WorldConfig,
};

/// Zero air friction kills carried velocity, so only relaxation moves nodes.
fn relaxation_world() -> World<f64> {
    let config = WorldConfig::new()
        .with_air_friction(0.0)
        .without_collisions();
    World::new(config, BoundaryPolicy::Unbounded)
}

fn distance(world: &World<f64>, a: NodeId, b: NodeId) -> f64 {
    world.node(a).unwrap().pos.distance(world.node(b).unwrap().pos)
}

#[test]
fn rigid_rod_reaches_rest_length() {
    let mut world = relaxation_world();
    let a = world.create_node(NodeDesc::new(0.0, 0.0));
    let b = world.create_node(NodeDesc::new(20.0, 0.0));
    world
        .create_constraint(ConstraintDesc::new(a, b).with_rest_length(10.0).with_stiffness(1.0))
        .unwrap();

    world.update(&StepOptions::new());

    assert_abs_diff_eq!(distance(&world, a, b), 10.0, epsilon = 1e-12);
    assert_eq!(world.node(a).unwrap().pos, Vec2::new(5.0, 0.0));
    assert_eq!(world.node(b).unwrap().pos, Vec2::new(15.0, 0.0));
}

#[test]
fn zero_rest_length_falls_back_to_current_distance() {
    let mut world = relaxation_world();
    let a = world.create_node(NodeDesc::new(0.0, 0.0));
    let b = world.create_node(NodeDesc::new(12.0, 0.0));
    let explicit_zero = world
        .create_constraint(ConstraintDesc::new(a, b).with_rest_length(0.0))
        .unwrap();
    let negative = world
        .create_constraint(ConstraintDesc::new(a, b).with_rest_length(-4.0))
        .unwrap();

    assert_eq!(world.constraint(explicit_zero).unwrap().rest_length, 12.0);
    assert_eq!(world.constraint(negative).unwrap().rest_length, 12.0);
}

#[test]
fn soft_rod_converges_over_iterations() {
    let mut world = relaxation_world();
    let a = world.create_node(NodeDesc::new(0.0, 0.0));
    let b = world.create_node(NodeDesc::new(0.0, 30.0));
    world
        .create_constraint(ConstraintDesc::new(a, b).with_rest_length(10.0).with_stiffness(0.5))
        .unwrap();

    world.update(&StepOptions::new().with_constraint_iterations(1));
    let after_one = distance(&world, a, b);
    assert!(!abs_diff_eq!(after_one, 10.0, epsilon = 1e-3));

    world.update(&StepOptions::new().with_constraint_iterations(40));
    assert_abs_diff_eq!(distance(&world, a, b), 10.0, epsilon = 1e-6);
}

#[test]
fn chain_converges_with_enough_iterations() {
    let mut world = relaxation_world();
    let ids: Vec<NodeId> = [0.0, 15.0, 30.0, 45.0]
        .iter()
        .map(|&x| world.create_node(NodeDesc::new(x, 0.0)))
        .collect();
    for pair in ids.windows(2) {
        world
            .create_constraint(
                ConstraintDesc::new(pair[0], pair[1]).with_rest_length(10.0).with_stiffness(1.0),
            )
            .unwrap();
    }

    world.update(&StepOptions::new().with_constraint_iterations(100));

    for pair in ids.windows(2) {
        assert_abs_diff_eq!(distance(&world, pair[0], pair[1]), 10.0, epsilon = 1e-6);
    }
}

#[test]
fn rope_is_slack_until_stretched() {
    let mut world = relaxation_world();
    let a = world.create_node(NodeDesc::new(0.0, 0.0));
    let b = world.create_node(NodeDesc::new(5.0, 0.0));
    world
        .create_constraint(ConstraintDesc::rope(a, b).with_rest_length(10.0).with_stiffness(1.0))
        .unwrap();

    world.update(&StepOptions::new().with_constraint_iterations(5));
    assert_eq!(world.node(a).unwrap().pos, Vec2::new(0.0, 0.0));
    assert_eq!(world.node(b).unwrap().pos, Vec2::new(5.0, 0.0));

    world
        .configure_node(b, NodeUpdate::new().with_position(20.0, 0.0))
        .unwrap();
    world.update(&StepOptions::new());
    assert_abs_diff_eq!(distance(&world, a, b), 10.0, epsilon = 1e-12);
}

#[test]
fn tension_allowed_only_pushes_apart() {
    let mut world = relaxation_world();
    let a = world.create_node(NodeDesc::new(0.0, 0.0));
    let b = world.create_node(NodeDesc::new(20.0, 0.0));
    world
        .create_constraint(
            ConstraintDesc::new(a, b).with_rest_length(10.0).with_stiffness(1.0).allow_tension(),
        )
        .unwrap();

    world.update(&StepOptions::new());
    assert_eq!(distance(&world, a, b), 20.0);

    world
        .configure_node(b, NodeUpdate::new().with_position(4.0, 0.0))
        .unwrap();
    world.update(&StepOptions::new());
    assert_abs_diff_eq!(distance(&world, a, b), 10.0, epsilon = 1e-12);
}

#[test]
fn pinned_anchor_holds_while_bob_converges() {
    let mut world = relaxation_world();
    let anchor = world.create_node(NodeDesc::new(0.0, 0.0).pinned());
    let bob = world.create_node(NodeDesc::new(0.0, 25.0));
    world
        .create_constraint(ConstraintDesc::new(anchor, bob).with_rest_length(10.0).with_stiffness(1.0))
        .unwrap();

    world.update(&StepOptions::new().with_constraint_iterations(60));

    assert_eq!(world.node(anchor).unwrap().pos, Vec2::new(0.0, 0.0));
    assert_abs_diff_eq!(distance(&world, anchor, bob), 10.0, epsilon = 1e-9);
}

#[test]
fn excluded_constraint_is_not_relaxed() {
    let mut world = relaxation_world();
    let a = world.create_node(NodeDesc::new(0.0, 0.0));
    let b = world.create_node(NodeDesc::new(20.0, 0.0));
    let c = world
        .create_constraint(ConstraintDesc::new(a, b).with_rest_length(10.0).with_stiffness(1.0))
        .unwrap();

    world.update(&StepOptions::new().excluding_constraint(c));
    assert_eq!(distance(&world, a, b), 20.0);
}

#[test]
fn randomized_order_still_converges() {
    let config = WorldConfig::new()
        .with_air_friction(0.0)
        .without_collisions()
        .with_seed(7);
    let mut world: World<f64> = World::new(config, BoundaryPolicy::Unbounded);
    let ids: Vec<NodeId> = (0..6)
        .map(|i| world.create_node(NodeDesc::new(i as f64 * 20.0, 0.0)))
        .collect();
    for pair in ids.windows(2) {
        world
            .create_constraint(
                ConstraintDesc::new(pair[0], pair[1]).with_rest_length(10.0).with_stiffness(1.0),
            )
            .unwrap();
    }

    let options = StepOptions::new()
        .with_randomized(true, true)
        .with_constraint_iterations(200);
    world.update(&options);

    for pair in ids.windows(2) {
        assert_abs_diff_eq!(distance(&world, pair[0], pair[1]), 10.0, epsilon = 1e-6);
    }
}
