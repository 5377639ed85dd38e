//! Person Step Pipeline
//!
//! One person's tick is a five-stage pipeline: move, discover co-located
//! peers, roll the trade gate, draw trade terms, settle both sides
//! against the bank. Steps run strictly one person at a time, so a
//! person stepping later in the tick sees every earlier move and trade.

use bevy_ecs::prelude::*;
use rand::Rng;

use crate::components::bank::Bank;
use crate::components::grid::{GridPos, ToroidalGrid};
use crate::components::person::{Loans, Savings};
use crate::systems::scheduler::{shuffled_person_order, StepOrder};
use crate::SimRng;

/// The two possible trade amounts, each drawn with equal probability
const TRADE_AMOUNT_HIGH: i64 = 5;
const TRADE_AMOUNT_LOW: i64 = 2;

/// How a signed trade amount resolves against a person's savings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CashFlow {
    /// A receipt goes straight into savings; the wallet is bypassed
    Deposit(i64),
    /// A payment fully covered by savings
    Withdraw(i64),
    /// A payment that exhausts savings and borrows the rest
    WithdrawAndBorrow { withdrawn: i64, shortfall: i64 },
}

/// Resolve a signed trade amount against the current savings balance.
/// Pure bookkeeping; the caller applies the outcome to the components
/// and the bank.
pub fn resolve_cash_flow(delta: i64, savings: i64) -> CashFlow {
    if delta >= 0 {
        return CashFlow::Deposit(delta);
    }
    let owed = -delta;
    if savings >= owed {
        CashFlow::Withdraw(owed)
    } else {
        CashFlow::WithdrawAndBorrow {
            withdrawn: savings,
            shortfall: owed - savings,
        }
    }
}

/// Apply one side of a trade to a person and the bank.
pub fn settle_cash_flow(world: &mut World, entity: Entity, delta: i64) {
    world.resource_scope(|world, mut bank: Mut<Bank>| {
        let balance = world.get::<Savings>(entity).map(|s| s.0).unwrap_or(0);
        match resolve_cash_flow(delta, balance) {
            CashFlow::Deposit(amount) => {
                if let Some(mut savings) = world.get_mut::<Savings>(entity) {
                    savings.0 += amount;
                }
                bank.deposit(amount);
            }
            CashFlow::Withdraw(amount) => {
                if let Some(mut savings) = world.get_mut::<Savings>(entity) {
                    savings.0 -= amount;
                }
                bank.withdraw(amount);
            }
            CashFlow::WithdrawAndBorrow {
                withdrawn,
                shortfall,
            } => {
                if withdrawn > 0 {
                    if let Some(mut savings) = world.get_mut::<Savings>(entity) {
                        savings.0 -= withdrawn;
                    }
                    bank.withdraw(withdrawn);
                }
                let granted = bank.request_loan(shortfall);
                if let Some(mut loans) = world.get_mut::<Loans>(entity) {
                    loans.0 += granted;
                }
            }
        }
    });
}

/// Run one person's full five-stage step.
pub fn step_person<R: Rng>(world: &mut World, entity: Entity, rng: &mut R) {
    // 1. Move to a uniformly chosen cell of the Moore neighborhood
    let Some(pos) = world.get::<GridPos>(entity).copied() else {
        return;
    };
    let destination = {
        let grid = world.resource::<ToroidalGrid>();
        let hood = grid.neighborhood(pos, true);
        hood[rng.gen_range(0..hood.len())]
    };
    world
        .resource_mut::<ToroidalGrid>()
        .relocate(entity, pos, destination);
    if let Some(mut grid_pos) = world.get_mut::<GridPos>(entity) {
        *grid_pos = destination;
    }

    // 2. Discover co-located peers; alone means no trade this tick
    let peers: Vec<Entity> = world
        .resource::<ToroidalGrid>()
        .occupants(destination)
        .iter()
        .copied()
        .filter(|e| *e != entity)
        .collect();
    if peers.is_empty() {
        return;
    }

    // 3. Trade gate
    if !rng.gen_bool(0.5) {
        return;
    }

    // 4. Trade terms: one uniform partner, amount and direction each 50/50
    let partner = peers[rng.gen_range(0..peers.len())];
    let amount = if rng.gen_bool(0.5) {
        TRADE_AMOUNT_HIGH
    } else {
        TRADE_AMOUNT_LOW
    };
    let self_pays = rng.gen_bool(0.5);
    let (own_delta, partner_delta) = if self_pays {
        (-amount, amount)
    } else {
        (amount, -amount)
    };

    // 5. Settlement: each side resolves independently against the bank
    settle_cash_flow(world, entity, own_delta);
    settle_cash_flow(world, partner, partner_delta);
    tracing::trace!(?entity, ?partner, amount, self_pays, "trade settled");
}

/// Step the whole population once, in a fresh random order.
pub fn step_all_people<R: Rng>(world: &mut World, rng: &mut R) {
    let order = shuffled_person_order(world, rng);
    world.resource_mut::<StepOrder>().order = order.clone();
    for entity in order {
        step_person(world, entity, rng);
    }
}

/// System wrapper driving the pipeline from the model's seeded RNG.
pub fn run_person_steps(world: &mut World) {
    // Take the RNG out of the world to avoid borrow conflicts
    let mut sim_rng = world.remove_resource::<SimRng>().unwrap();
    step_all_people(world, &mut sim_rng.0);
    world.insert_resource(sim_rng);
}
