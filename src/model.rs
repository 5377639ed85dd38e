//! Model Driver
//!
//! Owns the ECS world and the per-tick schedule. External drivers call
//! `step` repeatedly and read the aggregate views between calls.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::components::bank::Bank;
use crate::components::grid::GridPos;
use crate::components::person::{classify, Loans, Person, PersonId, PersonView, Savings, Wallet};
use crate::config::{ConfigError, SimConfig};
use crate::output::stats::{collect_stats, StatsCollector, TickStats};
use crate::setup;
use crate::systems::step::run_person_steps;
use crate::SimRng;

/// Resource: the simulation clock
#[derive(Resource, Debug, Default)]
pub struct SimulationState {
    pub current_tick: u64,
}

impl SimulationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_tick(&mut self) {
        self.current_tick += 1;
    }
}

/// The bank-reserves economy model: a fixed population of people on a
/// toroidal grid, one bank, one seeded random source.
pub struct BankReservesModel {
    world: World,
    schedule: Schedule,
}

impl BankReservesModel {
    /// Build a model from a validated configuration and a seed. The seed
    /// fully determines every run: placement, wallets, movement, trades,
    /// and activation order.
    pub fn new(config: SimConfig, seed: u64) -> Result<Self, ConfigError> {
        let mut world = setup::build_world(&config)?;

        let mut rng = SmallRng::seed_from_u64(seed);
        setup::spawn_people(&mut world, &config, &mut rng);
        world.insert_resource(SimRng(rng));

        let mut schedule = Schedule::default();
        schedule.add_systems((run_person_steps, collect_stats).chain());

        // baseline data point before the first tick
        collect_stats(&mut world);

        Ok(Self { world, schedule })
    }

    /// Advance the model by exactly one tick.
    pub fn step(&mut self) {
        self.world.resource_mut::<SimulationState>().advance_tick();
        self.schedule.run(&mut self.world);
    }

    /// Advance the model by a number of ticks.
    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.step();
        }
    }

    pub fn tick(&self) -> u64 {
        self.world.resource::<SimulationState>().current_tick
    }

    pub fn bank(&self) -> &Bank {
        self.world.resource::<Bank>()
    }

    /// Read-only views of every person, ordered by id.
    pub fn people(&mut self) -> Vec<PersonView> {
        let rich_threshold = self.world.resource::<SimConfig>().people.rich_threshold;
        let mut query = self
            .world
            .query_filtered::<(&PersonId, &GridPos, &Wallet, &Savings, &Loans), With<Person>>();
        let mut people: Vec<PersonView> = query
            .iter(&self.world)
            .map(|(id, pos, wallet, savings, loans)| PersonView {
                id: id.0,
                position: *pos,
                wallet: wallet.0,
                savings: savings.0,
                loans: loans.0,
                class: classify(savings.0, loans.0, rich_threshold),
            })
            .collect();
        people.sort_by_key(|p| p.id);
        people
    }

    pub fn stats_history(&self) -> &[TickStats] {
        self.world.resource::<StatsCollector>().history()
    }

    pub fn latest_stats(&self) -> Option<&TickStats> {
        self.world.resource::<StatsCollector>().latest()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
