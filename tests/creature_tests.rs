#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use evo_walkers::simulation::brain::{NeuralNetwork, Topology};
use evo_walkers::simulation::creature::{
    BODY_SCALE, BONE_COUNT, Creature, Joint, MUSCLE_COUNT, PARTICLE_COUNT, Perception, SENSOR_COUNT,
    SenseContext, locomotion_topology,
};
use evo_walkers::simulation::physics::PhysicsWorld;
use evo_walkers::simulation::terrain::{FlatGround, Terrain};
use evo_walkers::simulation::vector::Vector2;
use rand::SeedableRng;
use rand::rngs::StdRng;

const GROUND: FlatGround = FlatGround { level: 400.0 };

fn create_test_creature(seed: u64) -> Creature {
    let mut rng = StdRng::seed_from_u64(seed);
    Creature::new(NeuralNetwork::random(locomotion_topology(8), &mut rng), 0.0)
}

fn embodied(seed: u64) -> (Creature, PhysicsWorld) {
    let mut world = PhysicsWorld::default();
    let mut creature = create_test_creature(seed);
    creature.embody(&mut world, &GROUND);
    (creature, world)
}

fn sensors(creature: &Creature, world: &PhysicsWorld, time: f32) -> Vec<f32> {
    let perception = Perception::locomotion(6.0);
    let ctx = SenseContext {
        world,
        terrain: &GROUND,
        time,
    };
    let body = creature.body().expect("embodied");
    perception.perceive(body, &ctx)
}

#[test]
fn test_body_has_fixed_topology() {
    let (creature, world) = embodied(1);
    let body = creature.body().expect("embodied");

    assert_eq!(world.particles.len(), PARTICLE_COUNT);
    assert_eq!(world.constraints.len(), BONE_COUNT + MUSCLE_COUNT);

    for &i in body.bone_indices() {
        assert!(!world.constraints[i].is_muscle);
        assert_eq!(world.constraints[i].stiffness, 1.0);
    }
    for &i in body.muscle_indices() {
        let muscle = &world.constraints[i];
        assert!(muscle.is_muscle);
        assert_eq!(muscle.stiffness, 0.5);
        assert_eq!(muscle.current_length, muscle.base_length);
    }
}

#[test]
fn test_body_spawns_standing_above_ground() {
    let (creature, world) = embodied(2);
    let body = creature.body().expect("embodied");

    for &joint in &Joint::ALL {
        let p = body.particle(&world, joint);
        assert!(p.pos.y + p.radius <= GROUND.level);
    }

    let head = body.particle(&world, Joint::Head);
    let foot = body.particle(&world, Joint::FootLeft);
    assert!((foot.pos.y - head.pos.y - 4.0 * BODY_SCALE).abs() < 1e-3);
    assert!(head.radius > foot.radius);
    assert!(foot.ground_friction < head.ground_friction);
}

#[test]
fn test_embody_records_start_position() {
    let mut world = PhysicsWorld::default();
    let mut rng = StdRng::seed_from_u64(3);
    let mut creature = Creature::new(NeuralNetwork::random(locomotion_topology(8), &mut rng), 250.0);

    creature.embody(&mut world, &GROUND);

    assert_eq!(creature.start_x, 250.0);
    let torso = creature.body().expect("embodied").particle(&world, Joint::Torso);
    assert_eq!(torso.pos.x, 250.0);
}

#[test]
fn test_two_creatures_share_a_world() {
    let mut world = PhysicsWorld::default();
    let mut a = create_test_creature(4);
    let mut b = create_test_creature(5);
    a.embody(&mut world, &GROUND);
    b.embody(&mut world, &GROUND);

    assert_eq!(world.particles.len(), 2 * PARTICLE_COUNT);
    let a_indices = a.body().expect("embodied").particle_indices();
    let b_indices = b.body().expect("embodied").particle_indices();
    assert!(a_indices.iter().all(|i| !b_indices.contains(i)));
}

#[test]
fn test_sensor_vector_layout() {
    let (creature, world) = embodied(6);
    let values = sensors(&creature, &world, 0.0);

    assert_eq!(values.len(), SENSOR_COUNT);
    // Torso three body units above the feet.
    assert!(values[0] > 0.5 && values[0] < 1.0, "height {}", values[0]);
    // At rest.
    assert_eq!(values[1], 0.0);
    assert_eq!(values[2], 0.0);
    // sin(0)
    assert_eq!(values[3], 0.0);
    // Feet spawn within contact tolerance of the ground.
    assert_eq!(values[4], 1.0);
    assert_eq!(values[5], 1.0);
    // Muscles start at their neutral length.
    for &ratio in &values[6..] {
        assert!((ratio - 1.0).abs() < 1e-6);
    }
}

#[test]
fn test_rhythm_follows_time() {
    let (creature, world) = embodied(7);
    let time = 0.25;
    let values = sensors(&creature, &world, time);
    assert!((values[3] - (time * 6.0f32).sin()).abs() < 1e-6);
}

#[test]
fn test_feet_lose_contact_when_lifted() {
    let (creature, mut world) = embodied(8);
    let foot = creature.body().expect("embodied").particle_index(Joint::FootRight);
    world.particles[foot].pos.y -= 50.0;

    let values = sensors(&creature, &world, 0.0);

    assert_eq!(values[4], 1.0);
    assert_eq!(values[5], 0.0);
}

#[test]
fn test_perception_sizes() {
    let perception = Perception::locomotion(6.0);
    assert_eq!(perception.total_input_size(), SENSOR_COUNT);
    assert_eq!(
        perception.sense_names(),
        vec!["Posture", "Rhythm", "FootContact", "MuscleStretch"]
    );
}

#[test]
fn test_stationary_creature_has_zero_fitness() {
    let (mut creature, world) = embodied(9);
    creature.update_fitness(&world);
    assert_eq!(creature.fitness, 0.0);
}

#[test]
fn test_fitness_is_instantaneous_displacement() {
    let (mut creature, mut world) = embodied(10);
    let torso = creature.body().expect("embodied").particle_index(Joint::Torso);

    world.particles[torso].pos.x += 80.0;
    creature.update_fitness(&world);
    assert!((creature.fitness - 80.0).abs() < 1e-4);

    world.particles[torso].pos.x -= 50.0;
    creature.update_fitness(&world);
    assert!((creature.fitness - 30.0).abs() < 1e-4);

    // Walking backwards never goes negative.
    world.particles[torso].pos.x -= 200.0;
    creature.update_fitness(&world);
    assert_eq!(creature.fitness, 0.0);
}

#[test]
fn test_think_drives_muscles() {
    let (creature, mut world) = embodied(11);
    let perception = Perception::locomotion(6.0);
    let before: Vec<f32> = creature
        .body()
        .expect("embodied")
        .muscles(&world)
        .map(|m| m.current_length)
        .collect();

    assert!(creature.think(&perception, &mut world, &GROUND, 0.1));

    let after: Vec<f32> = creature
        .body()
        .expect("embodied")
        .muscles(&world)
        .map(|m| m.current_length)
        .collect();
    assert_ne!(before, after);
    for muscle in creature.body().expect("embodied").muscles(&world) {
        assert!(muscle.current_length >= 0.7 * muscle.base_length - 1e-4);
        assert!(muscle.current_length <= 1.3 * muscle.base_length + 1e-4);
    }
}

#[test]
fn test_mismatched_brain_skips_actuation() {
    let mut world = PhysicsWorld::default();
    let mut rng = StdRng::seed_from_u64(12);
    let brain = NeuralNetwork::random(Topology::new(10, 8, 7), &mut rng);
    let mut creature = Creature::new(brain, 0.0);
    creature.embody(&mut world, &GROUND);
    let before = world.constraints.clone();

    let acted = creature.think(&Perception::locomotion(6.0), &mut world, &GROUND, 0.0);

    assert!(!acted);
    assert_eq!(world.constraints, before);
}

#[test]
fn test_disembodied_creature_does_nothing() {
    let mut world = PhysicsWorld::default();
    let mut creature = create_test_creature(13);

    assert!(!creature.think(&Perception::locomotion(6.0), &mut world, &GROUND, 0.0));
    creature.update_fitness(&world);
    assert_eq!(creature.fitness, 0.0);
    assert!(creature.check_health(&world));
}

#[test]
fn test_diverged_body_is_retired() {
    let (mut creature, mut world) = embodied(14);
    let knee = creature.body().expect("embodied").particle_index(Joint::KneeLeft);
    creature.fitness = 12.0;
    world.particles[knee].pos = Vector2::new(f32::NAN, 0.0);

    assert!(!creature.check_health(&world));
    assert!(!creature.alive);
    assert_eq!(creature.fitness, 0.0);
}

#[test]
fn test_reset_restores_start_state() {
    let (mut creature, _world) = embodied(15);
    creature.fitness = 40.0;
    creature.alive = false;

    creature.reset();

    assert!(creature.body().is_none());
    assert!(creature.alive);
    assert_eq!(creature.fitness, 0.0);
}

#[test]
fn test_walker_settles_on_hills_without_diverging() {
    let terrain = |x: f32| 400.0 - 20.0 * (x / 100.0).sin();
    let mut world = PhysicsWorld::default();
    let mut creature = create_test_creature(16);
    creature.embody(&mut world, &terrain);
    let perception = Perception::locomotion(6.0);

    for tick in 0..600 {
        creature.think(&perception, &mut world, &terrain, tick as f32 * 0.016);
        world.update(0.016, &terrain);
        creature.update_fitness(&world);
    }

    assert!(creature.check_health(&world));
    for p in &world.particles {
        assert!(p.pos.y + p.radius <= terrain.height(p.pos.x) + 1e-3);
    }
    assert!(creature.fitness >= 0.0);
}
