//! Household chore tracker.
//!
//! Tracks the residents of a single household and the chores ("activities")
//! assigned to them: a points-based scoring system with category-derived
//! values, a three-state activity lifecycle, periodic reports, and JSON
//! persistence with a backup-before-write policy.
//!
//! The crate is synchronous and single-threaded by design; data volumes are
//! household-scale. The public surface is [`domain::ChoreManager`] plus the
//! report functions in [`domain::reports`].

pub mod domain;
pub mod storage;

pub use domain::models::{
    Activity, ActivityCategory, ActivityStatus, PerformanceTier, Residence, ResidenceStats,
    Resident, ValidationError,
};
pub use domain::{AddResidentCommand, ChoreManager, CreateActivityCommand, SystemSummary};
pub use storage::JsonStore;
