//! Person Components
//!
//! Components for individual people: identity and money balances, plus the
//! pure wealth classification used by both reporting and visualization.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::grid::GridPos;

/// Marker component identifying an entity as a person
#[derive(Component, Debug, Clone, Default)]
pub struct Person;

/// Unique identifier for a person
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonId(pub u32);

/// Liquid cash on hand. Seeded once at spawn; trades settle through
/// savings and loans, so the wallet never changes afterwards.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet(pub i64);

/// Cash held at the bank, counted toward its total deposits
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Savings(pub i64);

/// Amount owed to the bank. Only grows; the model has no repayment path.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loans(pub i64);

/// Loan balance above which a person counts as poor
pub const POOR_LOAN_THRESHOLD: i64 = 10;

/// Wealth classification derived from the money balances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WealthClass {
    Rich,
    Poor,
    Middle,
}

/// Classify a person from their balances.
///
/// Evaluated in strict priority order: savings above the rich threshold
/// wins over a large loan balance, so no person is ever counted twice.
/// Computed on demand and never stored.
pub fn classify(savings: i64, loans: i64, rich_threshold: i64) -> WealthClass {
    if savings > rich_threshold {
        WealthClass::Rich
    } else if loans > POOR_LOAN_THRESHOLD {
        WealthClass::Poor
    } else {
        WealthClass::Middle
    }
}

/// Read-only view of one person, consumed by the reporting and
/// visualization layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonView {
    pub id: u32,
    pub position: GridPos,
    pub wallet: i64,
    pub savings: i64,
    pub loans: i64,
    pub class: WealthClass,
}

impl PersonView {
    /// Total wealth as reported per agent (wallet plus savings)
    pub fn wealth(&self) -> i64 {
        self.wallet + self.savings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_rich_boundary() {
        assert_eq!(classify(11, 0, 10), WealthClass::Rich);
        assert_eq!(classify(10, 0, 10), WealthClass::Middle);
    }

    #[test]
    fn test_classify_poor_boundary() {
        assert_eq!(classify(0, 11, 10), WealthClass::Poor);
        assert_eq!(classify(0, 10, 10), WealthClass::Middle);
    }

    #[test]
    fn test_classify_middle() {
        assert_eq!(classify(5, 5, 10), WealthClass::Middle);
        assert_eq!(classify(0, 0, 10), WealthClass::Middle);
    }

    #[test]
    fn test_classify_priority_order() {
        // Rich wins when both predicates hold
        assert_eq!(classify(20, 20, 10), WealthClass::Rich);
    }

    #[test]
    fn test_person_view_wealth() {
        let view = PersonView {
            id: 0,
            position: GridPos::new(3, 4),
            wallet: 7,
            savings: 5,
            loans: 2,
            class: WealthClass::Middle,
        };
        assert_eq!(view.wealth(), 12);
    }
}
