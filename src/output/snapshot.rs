//! Snapshot Generation
//!
//! Full world snapshots (every agent plus the bank ledger) written as
//! JSON at regular intervals for the external visualization layer.

use bevy_ecs::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::components::bank::Bank;
use crate::components::grid::GridPos;
use crate::components::person::{classify, Loans, Person, PersonId, PersonView, Savings, Wallet, WealthClass};
use crate::config::SimConfig;
use crate::model::SimulationState;
use crate::output::portrayal::{Portrayal, Renderable};

/// Resource tracking snapshot ids and cadence
#[derive(Resource, Debug)]
pub struct SnapshotGenerator {
    next_snapshot_id: u64,
    snapshot_interval: u64,
}

impl SnapshotGenerator {
    pub fn new(snapshot_interval: u64) -> Self {
        Self {
            next_snapshot_id: 1,
            snapshot_interval,
        }
    }

    /// Whether a periodic snapshot is due at this tick
    pub fn should_snapshot(&self, current_tick: u64) -> bool {
        self.snapshot_interval > 0
            && current_tick > 0
            && current_tick % self.snapshot_interval == 0
    }

    pub fn next_id(&mut self) -> String {
        let id = format!("snap_{:06}", self.next_snapshot_id);
        self.next_snapshot_id += 1;
        id
    }

    pub fn snapshot_count(&self) -> u64 {
        self.next_snapshot_id - 1
    }
}

/// The bank's ledger at snapshot time
#[derive(Debug, Clone, Serialize)]
pub struct BankSnapshot {
    pub reserve_percent: u32,
    pub total_deposits: i64,
    pub total_loans: i64,
    pub reserves: i64,
    pub lendable: i64,
}

/// One agent's state at snapshot time
#[derive(Debug, Clone, Serialize)]
pub struct AgentSnapshot {
    pub person_id: u32,
    pub x: u32,
    pub y: u32,
    pub wallet: i64,
    pub savings: i64,
    pub loans: i64,
    pub wealth: i64,
    pub class: WealthClass,
    pub portrayal: Portrayal,
}

/// Complete world snapshot
#[derive(Debug, Clone, Serialize)]
pub struct WorldSnapshot {
    pub snapshot_id: String,
    pub tick: u64,
    pub triggered_by: String,
    pub bank: BankSnapshot,
    pub agents: Vec<AgentSnapshot>,
}

/// Generate a complete world snapshot
pub fn generate_snapshot(world: &mut World, triggered_by: &str) -> WorldSnapshot {
    let tick = world.resource::<SimulationState>().current_tick;
    let rich_threshold = world.resource::<SimConfig>().people.rich_threshold;

    let snapshot_id = world.resource_mut::<SnapshotGenerator>().next_id();

    let bank = {
        let bank = world.resource::<Bank>();
        BankSnapshot {
            reserve_percent: bank.reserve_percent(),
            total_deposits: bank.total_deposits(),
            total_loans: bank.total_loans(),
            reserves: bank.reserves(),
            lendable: bank.lendable(),
        }
    };

    let mut query = world
        .query_filtered::<(&PersonId, &GridPos, &Wallet, &Savings, &Loans), With<Person>>();
    let mut agents: Vec<AgentSnapshot> = query
        .iter(world)
        .map(|(id, pos, wallet, savings, loans)| {
            let view = PersonView {
                id: id.0,
                position: *pos,
                wallet: wallet.0,
                savings: savings.0,
                loans: loans.0,
                class: classify(savings.0, loans.0, rich_threshold),
            };
            AgentSnapshot {
                person_id: view.id,
                x: view.position.x,
                y: view.position.y,
                wallet: view.wallet,
                savings: view.savings,
                loans: view.loans,
                wealth: view.wealth(),
                class: view.class,
                portrayal: view.portrayal(),
            }
        })
        .collect();
    agents.sort_by_key(|a| a.person_id);

    WorldSnapshot {
        snapshot_id,
        tick,
        triggered_by: triggered_by.to_string(),
        bank,
        agents,
    }
}

/// Write a snapshot into a directory, named after its id.
pub fn write_snapshot_to_dir(snapshot: &WorldSnapshot, dir: &Path) -> std::io::Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(snapshot)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    let path = dir.join(format!("{}.json", snapshot.snapshot_id));
    fs::write(&path, json)?;
    Ok(path)
}
