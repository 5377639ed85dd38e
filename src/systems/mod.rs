//! ECS Systems
//!
//! Random-activation scheduling and the per-person step pipeline.

pub mod scheduler;
pub mod step;

pub use scheduler::{shuffled_person_order, StepOrder};
pub use step::{
    resolve_cash_flow, run_person_steps, settle_cash_flow, step_all_people, step_person,
    CashFlow,
};
