//! Creatures: a biped body driven by a neural network brain.

mod body;
mod contact;
mod creature;
mod perception;
mod posture;
mod rhythm;
mod sense;
mod stretch;

pub use creature::*;

pub use body::{
    BODY_SCALE, BONE_COUNT, BONES, Body, Joint, MUSCLE_COUNT, MUSCLES, PARTICLE_COUNT,
};
pub use contact::FootContact;
pub use perception::{Perception, SENSOR_COUNT};
pub use posture::Posture;
pub use rhythm::Rhythm;
pub use sense::{Sense, SenseContext};
pub use stretch::MuscleStretch;
