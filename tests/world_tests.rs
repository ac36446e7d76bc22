use verlet2d::arena::ArenaKey;
use verlet2d::{
    BoundaryPolicy, ConstraintDesc, ConstraintId, ConstraintUpdate, NodeDesc, NodeId, NodeUpdate,
    PhysicsError, PointerRepulsion, StepObserver, StepOptions, Vec2, World, WorldConfig,
};

fn world() -> World<f64> {
    World::new(WorldConfig::new(), BoundaryPolicy::Unbounded)
}

#[test]
fn created_entities_are_counted_and_retrievable() {
    let mut world = world();
    let a = world.create_node(NodeDesc::new(0.0, 0.0));
    let b = world.create_node(NodeDesc::new(3.0, 4.0).with_radius(2.0));
    let c = world.create_constraint(ConstraintDesc::new(a, b)).unwrap();

    assert_eq!(world.node_count(), 2);
    assert_eq!(world.constraint_count(), 1);

    let node = world.node(b).unwrap();
    assert_eq!(node.id, b);
    assert_eq!(node.radius, 2.0);
    assert_eq!(node.mass, 4.0);
    assert!(!node.pinned);

    let constraint = world.constraint(c).unwrap();
    assert_eq!((constraint.start, constraint.end), (a, b));
    assert_eq!(constraint.rest_length, 5.0);
    assert_eq!(constraint.stiffness, 0.3f32 as f64);
    assert!(!constraint.allow_compression && !constraint.allow_tension);
}

#[test]
fn constraint_to_dead_node_is_rejected() {
    let mut world = world();
    let a = world.create_node(NodeDesc::new(0.0, 0.0));
    let b = world.create_node(NodeDesc::new(10.0, 0.0));
    world.delete_node(b);

    let err = world.create_constraint(ConstraintDesc::new(a, b)).unwrap_err();
    assert_eq!(err, PhysicsError::InvalidNodeReference { id: b });

    let never = NodeId::from_index(42);
    let err = world.create_constraint(ConstraintDesc::new(never, a)).unwrap_err();
    assert_eq!(err, PhysicsError::InvalidNodeReference { id: never });
    assert_eq!(world.constraint_count(), 0);
}

#[test]
fn deleting_a_node_cascades_to_its_constraints() {
    let mut world = world();
    let a = world.create_node(NodeDesc::new(0.0, 0.0));
    let b = world.create_node(NodeDesc::new(10.0, 0.0));
    let c = world.create_node(NodeDesc::new(10.0, 10.0));
    let ab = world.create_constraint(ConstraintDesc::new(a, b)).unwrap();
    let bc = world.create_constraint(ConstraintDesc::new(b, c)).unwrap();
    let ca = world.create_constraint(ConstraintDesc::new(c, a)).unwrap();

    let removed = world.delete_node(b).unwrap();
    assert_eq!(removed.id, b);

    assert!(world.node(b).is_none());
    assert!(world.constraint(ab).is_none());
    assert!(world.constraint(bc).is_none());
    assert!(world.constraint(ca).is_some());
    assert_eq!(world.node_count(), 2);
    assert_eq!(world.constraint_count(), 1);

    let fresh = world.create_node(NodeDesc::new(0.0, 0.0));
    assert!(fresh != a && fresh != b && fresh != c);
}

#[test]
fn deletes_are_idempotent() {
    let mut world = world();
    let a = world.create_node(NodeDesc::new(0.0, 0.0));
    let b = world.create_node(NodeDesc::new(10.0, 0.0));
    let ab = world.create_constraint(ConstraintDesc::new(a, b)).unwrap();

    assert!(world.delete_constraint(ab, false).is_some());
    assert!(world.delete_constraint(ab, false).is_none());
    assert!(world.delete_constraint(ConstraintId::from_index(99), true).is_none());
    assert!(world.delete_node(a).is_some());
    assert!(world.delete_node(a).is_none());
    assert!(world.delete_node(NodeId::from_index(99)).is_none());
    assert_eq!(world.node_count(), 1);
}

#[test]
fn constraint_delete_keeps_or_cascades_to_endpoints() {
    let mut world = world();
    let a = world.create_node(NodeDesc::new(0.0, 0.0));
    let b = world.create_node(NodeDesc::new(10.0, 0.0));
    let c = world.create_node(NodeDesc::new(20.0, 0.0));
    let ab = world.create_constraint(ConstraintDesc::new(a, b)).unwrap();
    let bc = world.create_constraint(ConstraintDesc::new(b, c)).unwrap();

    world.delete_constraint(ab, false);
    assert_eq!(world.node_count(), 3);

    world.delete_constraint(bc, true);
    assert!(world.node(b).is_none());
    assert!(world.node(c).is_none());
    assert!(world.node(a).is_some());
    assert_eq!(world.constraint_count(), 0);
}

#[test]
fn operations_on_dead_entities_report_not_found() {
    let mut world = world();
    let a = world.create_node(NodeDesc::new(0.0, 0.0));
    let b = world.create_node(NodeDesc::new(1.0, 0.0));
    let ab = world.create_constraint(ConstraintDesc::new(a, b)).unwrap();
    world.delete_node(a);

    assert_eq!(world.set_velocity(a, 1.0, 1.0), Err(PhysicsError::NodeNotFound { id: a }));
    assert_eq!(world.add_velocity(a, 1.0, 1.0), Err(PhysicsError::NodeNotFound { id: a }));
    assert_eq!(world.drag_node(a, 1.0, 1.0), Err(PhysicsError::NodeNotFound { id: a }));
    assert_eq!(
        world.configure_node(a, NodeUpdate::new().with_radius(3.0)),
        Err(PhysicsError::NodeNotFound { id: a })
    );
    assert_eq!(
        world.configure_constraint(ab, ConstraintUpdate::new().with_stiffness(1.0)),
        Err(PhysicsError::ConstraintNotFound { id: ab })
    );
}

#[test]
fn configure_overwrites_only_given_fields() {
    let mut world = world();
    let a = world.create_node(NodeDesc::new(0.0, 0.0));
    let b = world.create_node(NodeDesc::new(10.0, 0.0));
    let ab = world.create_constraint(ConstraintDesc::new(a, b)).unwrap();

    world
        .configure_node(a, NodeUpdate::new().with_radius(7.0).with_restitution(0.1))
        .unwrap();
    world
        .configure_constraint(ab, ConstraintUpdate::new().with_rest_length(4.0).with_allow_compression(true))
        .unwrap();

    let node = world.node(a).unwrap();
    assert_eq!((node.radius, node.restitution, node.mass), (7.0, 0.1, 25.0));
    let constraint = world.constraint(ab).unwrap();
    assert_eq!(constraint.rest_length, 4.0);
    assert!(constraint.allow_compression);
    assert_eq!(constraint.stiffness, 0.3f32 as f64);
}

#[test]
fn segments_follow_live_constraints() {
    let mut world = world();
    let a = world.create_node(NodeDesc::new(0.0, 0.0));
    let b = world.create_node(NodeDesc::new(10.0, 0.0));
    let c = world.create_node(NodeDesc::new(20.0, 0.0));
    world.create_constraint(ConstraintDesc::new(a, b)).unwrap();
    world.create_constraint(ConstraintDesc::new(b, c)).unwrap();
    world.delete_node(a);

    let segments: Vec<_> = world.segments().collect();
    assert_eq!(segments, vec![(Vec2::new(10.0, 0.0), Vec2::new(20.0, 0.0))]);
    assert_eq!(world.node_ids(), vec![b, c]);
    assert_eq!(world.nodes().count(), 2);
    assert_eq!(world.constraint_ids().len(), 1);
}

#[test]
fn dragging_imparts_velocity() {
    let config = WorldConfig::new().with_air_friction(1.0);
    let mut world: World<f64> = World::new(config, BoundaryPolicy::Unbounded);
    let id = world.create_node(NodeDesc::new(0.0, 0.0));

    world.drag_node(id, 4.0, 0.0).unwrap();
    world.update(&StepOptions::new());

    assert_eq!(world.node(id).unwrap().pos, Vec2::new(8.0, 0.0));
}

#[test]
fn pointer_repulsion_pushes_nearby_nodes() {
    let config = WorldConfig::new().with_air_friction(1.0);
    let mut world: World<f64> = World::new(config, BoundaryPolicy::Unbounded);
    let near = world.create_node(NodeDesc::new(10.0, 0.0));
    let far = world.create_node(NodeDesc::new(500.0, 0.0));
    let mut pointer = PointerRepulsion::new(50.0);
    pointer.set_pointer(0.0, 0.0);

    world.step(&StepOptions::new(), &mut pointer, &mut verlet2d::NoOpStepObserver);

    assert_eq!(world.node(near).unwrap().pos, Vec2::new(50.0, 0.0));
    assert_eq!(world.node(far).unwrap().pos, Vec2::new(500.0, 0.0));
}

#[derive(Default)]
struct PhaseLog {
    integrations: usize,
    interactions: usize,
    collision_passes: usize,
    constraint_iterations: usize,
    completed: usize,
}

impl StepObserver for PhaseLog {
    fn on_integrate(&mut self) {
        self.integrations += 1;
    }
    fn on_interaction(&mut self) {
        self.interactions += 1;
    }
    fn on_collision_pass(&mut self, _pass: usize, _resolved: usize) {
        self.collision_passes += 1;
    }
    fn on_constraint_iteration(&mut self, _iteration: usize, _corrected: usize) {
        self.constraint_iterations += 1;
    }
    fn on_step_complete(&mut self) {
        self.completed += 1;
    }
}

#[test]
fn observer_sees_every_phase() {
    let config = WorldConfig::new().with_collision_passes(5);
    let mut world: World<f64> = World::new(config, BoundaryPolicy::Unbounded);
    world.create_node(NodeDesc::new(0.0, 0.0));
    let options = StepOptions::new().with_constraint_iterations(3);
    let mut log = PhaseLog::default();

    world.step(&options, &mut verlet2d::NoInteraction, &mut log);
    world.step(&options, &mut verlet2d::NoInteraction, &mut log);

    assert_eq!(log.integrations, 2);
    assert_eq!(log.interactions, 2);
    assert_eq!(log.collision_passes, 10);
    assert_eq!(log.constraint_iterations, 6);
    assert_eq!(log.completed, 2);
}

#[test]
fn step_options_default_to_one_sequential_iteration() {
    let options = StepOptions::default();
    assert_eq!(options.constraint_iterations, 1);
    assert!(!options.randomize_nodes && !options.randomize_constraints);
    assert!(options.excluded_nodes.is_empty() && options.excluded_constraints.is_empty());
}
