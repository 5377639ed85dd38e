//! Model Setup
//!
//! World resource initialization and population spawning.

use bevy_ecs::prelude::*;
use rand::Rng;

use crate::components::bank::Bank;
use crate::components::grid::{GridPos, ToroidalGrid};
use crate::components::person::{Loans, Person, PersonId, Savings, Wallet};
use crate::config::{ConfigError, SimConfig};
use crate::model::SimulationState;
use crate::output::snapshot::SnapshotGenerator;
use crate::output::stats::StatsCollector;
use crate::systems::scheduler::StepOrder;

/// Build an empty world carrying every model resource.
pub fn build_world(config: &SimConfig) -> Result<World, ConfigError> {
    config.validate()?;

    let mut world = World::new();
    world.insert_resource(SimulationState::default());
    world.insert_resource(ToroidalGrid::new(config.grid.width, config.grid.height));
    world.insert_resource(Bank::new(
        config.bank.reserve_percent,
        config.bank.lending_policy(),
    ));
    world.insert_resource(StepOrder::default());
    world.insert_resource(StatsCollector::new());
    world.insert_resource(SnapshotGenerator::new(config.simulation.snapshot_interval));
    world.insert_resource(config.clone());
    Ok(world)
}

/// Spawn the population at random positions with seeded wallets.
/// Savings and loans always start at zero; the wallet draw spans
/// `1..=rich_threshold + 1` so everyone begins middle class.
pub fn spawn_people<R: Rng>(world: &mut World, config: &SimConfig, rng: &mut R) {
    for i in 0..config.people.init_people {
        let x = rng.gen_range(0..config.grid.width);
        let y = rng.gen_range(0..config.grid.height);
        let wallet = rng.gen_range(1..=config.people.rich_threshold + 1);
        let pos = GridPos::new(x, y);

        let entity = world
            .spawn((
                Person,
                PersonId(i as u32),
                pos,
                Wallet(wallet),
                Savings(0),
                Loans(0),
            ))
            .id();
        world.resource_mut::<ToroidalGrid>().place(entity, pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_build_world_inserts_resources() {
        let config = SimConfig::default();
        let world = build_world(&config).unwrap();
        assert!(world.get_resource::<Bank>().is_some());
        assert!(world.get_resource::<ToroidalGrid>().is_some());
        assert!(world.get_resource::<StatsCollector>().is_some());
        assert_eq!(world.resource::<SimulationState>().current_tick, 0);
    }

    #[test]
    fn test_build_world_rejects_invalid_config() {
        let mut config = SimConfig::default();
        config.people.init_people = 0;
        assert!(build_world(&config).is_err());
    }

    #[test]
    fn test_spawn_people() {
        let config = SimConfig::default();
        let mut world = build_world(&config).unwrap();
        let mut rng = SmallRng::seed_from_u64(42);

        spawn_people(&mut world, &config, &mut rng);

        let mut query =
            world.query_filtered::<(&GridPos, &Wallet, &Savings, &Loans), With<Person>>();
        let mut count = 0;
        for (pos, wallet, savings, loans) in query.iter(&world) {
            assert!(pos.x < config.grid.width);
            assert!(pos.y < config.grid.height);
            assert!(wallet.0 >= 1 && wallet.0 <= config.people.rich_threshold + 1);
            assert_eq!(savings.0, 0);
            assert_eq!(loans.0, 0);
            count += 1;
        }
        assert_eq!(count, config.people.init_people);

        // everyone was registered on the grid
        let grid = world.resource::<ToroidalGrid>();
        let mut placed = 0;
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                placed += grid.occupants(GridPos::new(x, y)).len();
            }
        }
        assert_eq!(placed, config.people.init_people);
    }
}
