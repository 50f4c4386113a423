//! # Domain Module
//!
//! Business logic for the chore tracker: the entities (residents, activities,
//! the residence aggregate), the coordinating manager, and report generation.
//! It operates independently of any UI framework; the presentation layer
//! calls the manager's operations and renders the plain structures returned.
//!
//! ## Module Organization
//!
//! - **models**: domain entities and their invariants
//! - **commands**: input structs carried from the presentation boundary
//! - **manager**: the coordinator holding the residence and activity list
//! - **reports**: pure, read-only report functions over the current state

pub mod commands;
pub mod manager;
pub mod models;
pub mod reports;

pub use commands::{AddResidentCommand, CreateActivityCommand, SystemSummary};
pub use manager::ChoreManager;
