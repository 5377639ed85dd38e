//! Bank
//!
//! The single central bank. Sole owner of the aggregate deposit and loan
//! totals; every settlement updates them incrementally through the
//! operations here. All money values are i64 dollars.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

/// How the bank answers loan requests that exceed its lendable capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LendingPolicy {
    /// Grant every request in full. The reserve ratio affects reported
    /// statistics only.
    #[default]
    Unconstrained,
    /// Cap grants at the lendable capacity; an underfunded request is
    /// granted partially, possibly at zero.
    ReserveCapped,
}

/// Resource: the model's single fractional-reserve bank
#[derive(Resource, Debug, Clone)]
pub struct Bank {
    reserve_percent: u32,
    total_deposits: i64,
    total_loans: i64,
    policy: LendingPolicy,
}

impl Bank {
    pub fn new(reserve_percent: u32, policy: LendingPolicy) -> Self {
        assert!(reserve_percent <= 100, "reserve_percent must be within 0-100");
        Self {
            reserve_percent,
            total_deposits: 0,
            total_loans: 0,
            policy,
        }
    }

    pub fn reserve_percent(&self) -> u32 {
        self.reserve_percent
    }

    pub fn policy(&self) -> LendingPolicy {
        self.policy
    }

    /// Sum of all savings currently held
    pub fn total_deposits(&self) -> i64 {
        self.total_deposits
    }

    /// Sum of all loans currently outstanding
    pub fn total_loans(&self) -> i64 {
        self.total_loans
    }

    /// Fraction of deposits that must remain unlent
    pub fn reserves(&self) -> i64 {
        self.total_deposits * self.reserve_percent as i64 / 100
    }

    /// Capacity left for new loans. May go negative under the
    /// unconstrained policy; existing loans are never called back.
    pub fn lendable(&self) -> i64 {
        self.total_deposits - self.reserves() - self.total_loans
    }

    /// Take a deposit into savings
    pub fn deposit(&mut self, amount: i64) {
        assert!(amount >= 0, "amount must be non-negative");
        self.total_deposits += amount;
    }

    /// Release savings to fund a payment. The caller guarantees the
    /// amount is covered by the depositor's savings.
    pub fn withdraw(&mut self, amount: i64) {
        assert!(amount >= 0, "amount must be non-negative");
        self.total_deposits -= amount;
    }

    /// Evaluate a loan request and return the granted amount.
    pub fn request_loan(&mut self, amount: i64) -> i64 {
        assert!(amount >= 0, "amount must be non-negative");
        let lendable = self.lendable();
        let granted = match self.policy {
            LendingPolicy::Unconstrained => amount,
            LendingPolicy::ReserveCapped => amount.min(lendable.max(0)),
        };
        self.total_loans += granted;
        tracing::debug!(requested = amount, granted, lendable, "loan request");
        granted
    }
}
