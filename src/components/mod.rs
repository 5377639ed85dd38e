//! Simulation Components
//!
//! Components and resources for people, the bank, and the spatial grid.

pub mod bank;
pub mod grid;
pub mod person;

pub use bank::{Bank, LendingPolicy};
pub use grid::{GridPos, ToroidalGrid};
pub use person::{
    classify, Loans, Person, PersonId, PersonView, Savings, Wallet, WealthClass,
    POOR_LOAN_THRESHOLD,
};
