//! Bank Reserves Economy Simulation
//!
//! A discrete-time, stochastic agent-based model of a minimal economy:
//! people wander a toroidal grid, trade with whoever shares their cell,
//! and settle any cash shortfall against a single fractional-reserve bank.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod components;
pub mod config;
pub mod model;
pub mod output;
pub mod setup;
pub mod systems;

pub use components::bank::{Bank, LendingPolicy};
pub use components::grid::{GridPos, ToroidalGrid};
pub use components::person::{
    classify, Loans, Person, PersonId, PersonView, Savings, Wallet, WealthClass,
};
pub use config::{ConfigError, SimConfig};
pub use model::{BankReservesModel, SimulationState};

/// Seeded random number generator resource
#[derive(Resource)]
pub struct SimRng(pub SmallRng);
