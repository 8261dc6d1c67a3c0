//! The fixed biped skeleton shared by every creature.
//!
//! Eight particles, ten rigid bones and seven muscles. The layout is not
//! configurable: the brain topology (13 inputs, 7 outputs) depends on it.

use serde::{Deserialize, Serialize};

use super::super::physics::{Constraint, Particle, PhysicsWorld};
use super::super::terrain::Terrain;
use super::super::vector::Vector2;

/// Distance unit of the body layout.
pub const BODY_SCALE: f32 = 30.0;
/// Particles per body.
pub const PARTICLE_COUNT: usize = 8;
/// Rigid bones per body.
pub const BONE_COUNT: usize = 10;
/// Muscles per body, and therefore brain outputs.
pub const MUSCLE_COUNT: usize = 7;
/// Mass of every body particle.
pub const PARTICLE_MASS: f32 = 1.0;
/// Collision radius of the head.
pub const HEAD_RADIUS: f32 = 8.0;
/// Collision radius of every other particle.
pub const JOINT_RADIUS: f32 = 5.0;
/// Feet grip harder than the rest of the body.
pub const FOOT_GROUND_FRICTION: f32 = 0.5;
/// Gap left between the feet and the ground at spawn.
pub const SPAWN_CLEARANCE: f32 = 1.0;

/// Named particles of the skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Joint {
    /// Top of the body.
    Head,
    /// Center of mass used for fitness and posture sensing.
    Torso,
    /// Left hip.
    HipLeft,
    /// Right hip.
    HipRight,
    /// Left knee.
    KneeLeft,
    /// Right knee.
    KneeRight,
    /// Left foot.
    FootLeft,
    /// Right foot.
    FootRight,
}

impl Joint {
    /// All joints in particle order.
    pub const ALL: [Joint; PARTICLE_COUNT] = [
        Joint::Head,
        Joint::Torso,
        Joint::HipLeft,
        Joint::HipRight,
        Joint::KneeLeft,
        Joint::KneeRight,
        Joint::FootLeft,
        Joint::FootRight,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Position relative to the point between the feet, in [`BODY_SCALE`] units.
    fn layout(self) -> Vector2 {
        match self {
            Joint::Head => Vector2::new(0.0, -4.0),
            Joint::Torso => Vector2::new(0.0, -3.0),
            Joint::HipLeft => Vector2::new(-0.5, -2.0),
            Joint::HipRight => Vector2::new(0.5, -2.0),
            Joint::KneeLeft => Vector2::new(-0.5, -1.0),
            Joint::KneeRight => Vector2::new(0.5, -1.0),
            Joint::FootLeft => Vector2::new(-0.5, 0.0),
            Joint::FootRight => Vector2::new(0.5, 0.0),
        }
    }

    fn particle(self, pos: Vector2) -> Particle {
        let particle = Particle::new(pos, PARTICLE_MASS);
        match self {
            Joint::Head => particle.with_radius(HEAD_RADIUS),
            Joint::FootLeft | Joint::FootRight => particle
                .with_radius(JOINT_RADIUS)
                .with_ground_friction(FOOT_GROUND_FRICTION),
            _ => particle.with_radius(JOINT_RADIUS),
        }
    }
}

/// Torso frame plus legs.
pub const BONES: [(Joint, Joint); BONE_COUNT] = [
    (Joint::Head, Joint::Torso),
    (Joint::Torso, Joint::HipLeft),
    (Joint::Torso, Joint::HipRight),
    (Joint::HipLeft, Joint::HipRight),
    (Joint::Head, Joint::HipLeft),
    (Joint::Head, Joint::HipRight),
    (Joint::HipLeft, Joint::KneeLeft),
    (Joint::HipRight, Joint::KneeRight),
    (Joint::KneeLeft, Joint::FootLeft),
    (Joint::KneeRight, Joint::FootRight),
];

/// Muscles in brain output order.
pub const MUSCLES: [(Joint, Joint); MUSCLE_COUNT] = [
    (Joint::Torso, Joint::KneeLeft),
    (Joint::Torso, Joint::KneeRight),
    (Joint::HipLeft, Joint::FootLeft),
    (Joint::HipRight, Joint::FootRight),
    (Joint::Head, Joint::KneeLeft),
    (Joint::Head, Joint::KneeRight),
    (Joint::KneeLeft, Joint::KneeRight),
];

/// Indices of one creature's particles and constraints inside a
/// [`PhysicsWorld`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Body {
    particles: [usize; PARTICLE_COUNT],
    bones: [usize; BONE_COUNT],
    muscles: [usize; MUSCLE_COUNT],
}

impl Body {
    /// Adds a fresh skeleton to `world`, standing on the ground at `spawn_x`.
    pub fn build(world: &mut PhysicsWorld, terrain: &dyn Terrain, spawn_x: f32) -> Self {
        let feet_y = terrain.height(spawn_x) - JOINT_RADIUS - SPAWN_CLEARANCE;
        let anchor = Vector2::new(spawn_x, feet_y);

        let particles = Joint::ALL
            .map(|joint| world.add_particle(joint.particle(anchor + joint.layout().scale(BODY_SCALE))));

        let bones = BONES.map(|(a, b)| {
            let bone = Constraint::bone(&world.particles, particles[a.index()], particles[b.index()]);
            world.add_constraint(bone)
        });

        let muscles = MUSCLES.map(|(a, b)| {
            let muscle = Constraint::muscle(&world.particles, particles[a.index()], particles[b.index()]);
            world.add_constraint(muscle)
        });

        Self {
            particles,
            bones,
            muscles,
        }
    }

    /// World index of a joint's particle.
    pub fn particle_index(&self, joint: Joint) -> usize {
        self.particles[joint.index()]
    }

    /// The particle of `joint`.
    pub fn particle<'w>(&self, world: &'w PhysicsWorld, joint: Joint) -> &'w Particle {
        &world.particles[self.particle_index(joint)]
    }

    /// World indices of all particles, in [`Joint::ALL`] order.
    pub fn particle_indices(&self) -> &[usize; PARTICLE_COUNT] {
        &self.particles
    }

    /// World indices of the bones.
    pub fn bone_indices(&self) -> &[usize; BONE_COUNT] {
        &self.bones
    }

    /// World indices of the muscles, in brain output order.
    pub fn muscle_indices(&self) -> &[usize; MUSCLE_COUNT] {
        &self.muscles
    }

    /// Iterates over the muscle constraints in brain output order.
    pub fn muscles<'w>(&self, world: &'w PhysicsWorld) -> impl Iterator<Item = &'w Constraint> {
        self.muscles.iter().map(move |&i| &world.constraints[i])
    }

    /// `true` while every particle has finite coordinates.
    pub fn is_finite(&self, world: &PhysicsWorld) -> bool {
        self.particles
            .iter()
            .all(|&i| world.particles[i].pos.is_finite() && world.particles[i].old_pos.is_finite())
    }
}
