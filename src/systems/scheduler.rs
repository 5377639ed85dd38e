//! Random Activation Scheduler
//!
//! Draws a fresh uniform permutation of the population every tick, so no
//! person is skipped or stepped twice and no fixed ordering can bias the
//! trade dynamics.

use bevy_ecs::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::person::Person;

/// Resource recording the activation order used by the current tick
#[derive(Resource, Debug, Default)]
pub struct StepOrder {
    pub order: Vec<Entity>,
}

/// All person entities in a freshly shuffled order
pub fn shuffled_person_order<R: Rng>(world: &mut World, rng: &mut R) -> Vec<Entity> {
    let mut query = world.query_filtered::<Entity, With<Person>>();
    let mut order: Vec<Entity> = query.iter(world).collect();
    order.shuffle(rng);
    order
}
