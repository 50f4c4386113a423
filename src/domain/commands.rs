//! Domain-level command types.
//!
//! These structs carry user input into the coordinator. The presentation
//! layer builds them from raw form values and renders whatever the
//! coordinator returns; it never touches the internal collections.

use super::models::ActivityCategory;

/// Input for registering a new resident.
#[derive(Debug, Clone)]
pub struct AddResidentCommand {
    pub name: String,
}

/// Input for creating a new activity.
#[derive(Debug, Clone)]
pub struct CreateActivityCommand {
    pub category: ActivityCategory,
    pub name: String,
    pub description: String,
    /// Optional id of the resident responsible for the chore.
    pub assignee_id: Option<String>,
}

/// Counts shown on the system overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemSummary {
    pub total_residents: usize,
    pub total_activities: usize,
    pub pending_activities: usize,
    pub finalized_activities: usize,
    pub available_residents: usize,
}
