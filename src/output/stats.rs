//! Statistics Output
//!
//! Collects the per-tick aggregates the reporting layer consumes and
//! writes the full history as JSON.

use bevy_ecs::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::components::person::{classify, Loans, Person, Savings, Wallet, WealthClass};
use crate::config::SimConfig;
use crate::model::SimulationState;

/// Statistics file name inside the output directory
pub const STATS_FILE_NAME: &str = "stats.json";

/// Model-level aggregates for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TickStats {
    pub tick: u64,
    pub rich: usize,
    pub poor: usize,
    pub middle: usize,
    pub total_savings: i64,
    pub total_wallets: i64,
    pub total_money: i64,
    pub total_loans: i64,
}

/// Resource accumulating the per-tick statistics history
#[derive(Resource, Debug, Default)]
pub struct StatsCollector {
    history: Vec<TickStats>,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, stats: TickStats) {
        self.history.push(stats);
    }

    pub fn history(&self) -> &[TickStats] {
        &self.history
    }

    pub fn latest(&self) -> Option<&TickStats> {
        self.history.last()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

/// Compute the aggregates for the current tick from the person components.
pub fn compute_tick_stats(world: &mut World) -> TickStats {
    let tick = world.resource::<SimulationState>().current_tick;
    let rich_threshold = world.resource::<SimConfig>().people.rich_threshold;

    let mut stats = TickStats {
        tick,
        ..TickStats::default()
    };

    let mut query = world.query_filtered::<(&Wallet, &Savings, &Loans), With<Person>>();
    for (wallet, savings, loans) in query.iter(world) {
        match classify(savings.0, loans.0, rich_threshold) {
            WealthClass::Rich => stats.rich += 1,
            WealthClass::Poor => stats.poor += 1,
            WealthClass::Middle => stats.middle += 1,
        }
        stats.total_wallets += wallet.0;
        stats.total_savings += savings.0;
        stats.total_loans += loans.0;
    }
    stats.total_money = stats.total_wallets + stats.total_savings;
    stats
}

/// System recording the current tick's aggregates into the collector.
pub fn collect_stats(world: &mut World) {
    let stats = compute_tick_stats(world);
    world.resource_mut::<StatsCollector>().record(stats);
}

/// Write the statistics history as pretty JSON into a directory.
pub fn write_stats(dir: &Path, history: &[TickStats]) -> std::io::Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(history)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    let path = dir.join(STATS_FILE_NAME);
    fs::write(&path, json)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::person::PersonId;
    use crate::components::grid::GridPos;

    fn test_world() -> World {
        let mut world = World::new();
        world.insert_resource(SimulationState::default());
        world.insert_resource(SimConfig::default());
        world
    }

    fn spawn_person(world: &mut World, id: u32, wallet: i64, savings: i64, loans: i64) {
        world.spawn((
            Person,
            PersonId(id),
            GridPos::new(0, 0),
            Wallet(wallet),
            Savings(savings),
            Loans(loans),
        ));
    }

    #[test]
    fn test_compute_tick_stats() {
        let mut world = test_world();
        spawn_person(&mut world, 0, 3, 12, 0); // rich
        spawn_person(&mut world, 1, 4, 0, 15); // poor
        spawn_person(&mut world, 2, 5, 5, 5); // middle

        let stats = compute_tick_stats(&mut world);
        assert_eq!(stats.rich, 1);
        assert_eq!(stats.poor, 1);
        assert_eq!(stats.middle, 1);
        assert_eq!(stats.total_wallets, 12);
        assert_eq!(stats.total_savings, 17);
        assert_eq!(stats.total_money, 29);
        assert_eq!(stats.total_loans, 20);
    }

    #[test]
    fn test_collector_records_history() {
        let mut world = test_world();
        world.insert_resource(StatsCollector::new());
        spawn_person(&mut world, 0, 1, 0, 0);

        collect_stats(&mut world);
        world.resource_mut::<SimulationState>().advance_tick();
        collect_stats(&mut world);

        let collector = world.resource::<StatsCollector>();
        assert_eq!(collector.len(), 2);
        assert_eq!(collector.history()[0].tick, 0);
        assert_eq!(collector.latest().unwrap().tick, 1);
    }

    #[test]
    fn test_write_stats_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let history = vec![TickStats::default()];

        let path = write_stats(dir.path(), &history).unwrap();
        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("\"total_money\""));
    }
}
