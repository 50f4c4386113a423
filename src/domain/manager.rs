//! Coordinator for the chore tracking system.

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};

use super::commands::{AddResidentCommand, CreateActivityCommand, SystemSummary};
use super::models::{
    Activity, ActivityCategory, ActivityStatus, Residence, Resident,
};
use super::reports::{
    self, CategoryStatistics, DailyProductivity, MonthlyHistory, PerformanceReport,
};
use crate::storage::JsonStore;

/// Runtime aggregate combining one residence with the flat, insertion-ordered
/// activity list (the single source of truth for all task queries) plus the
/// JSON store used for persistence.
///
/// All mutating operations are synchronous and run to completion; lookups are
/// linear scans, which is fine at household scale.
pub struct ChoreManager {
    residence: Residence,
    activities: Vec<Activity>,
    store: JsonStore,
}

impl ChoreManager {
    pub fn new(residence: Residence, store: JsonStore) -> Self {
        ChoreManager {
            residence,
            activities: Vec::new(),
            store,
        }
    }

    pub fn residence(&self) -> &Residence {
        &self.residence
    }

    pub fn residents(&self) -> &[Resident] {
        &self.residence.residents
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    // === Resident management ===

    /// Registers a new resident. Fails on an invalid name or when a resident
    /// with the same name already lives here. Returns the created resident
    /// for the caller to render.
    pub fn add_resident(&mut self, command: AddResidentCommand) -> Result<Resident> {
        info!("Adding resident: name={}", command.name);

        let resident = Resident::new(&command.name).context("Invalid resident name")?;
        let created = resident.clone();
        if !self.residence.add_resident(resident) {
            warn!("Duplicate resident rejected: {}", command.name);
            return Err(anyhow!("A resident named '{}' already exists", created.name));
        }

        info!("Added resident: {} with id: {}", created.name, created.id);
        Ok(created)
    }

    /// Removes a resident. Their activities keep the now-dangling assignee
    /// id and are treated as unassigned from here on.
    pub fn remove_resident(&mut self, resident_id: &str) -> bool {
        let removed = self.residence.remove_resident(resident_id);
        if removed {
            info!("Removed resident: {}", resident_id);
        } else {
            warn!("Resident not found for removal: {}", resident_id);
        }
        removed
    }

    pub fn resident_by_id(&self, resident_id: &str) -> Option<&Resident> {
        self.residence.resident_by_id(resident_id)
    }

    pub fn resident_by_name(&self, name: &str) -> Option<&Resident> {
        self.residence.resident_by_name(name)
    }

    pub fn set_resident_availability(&mut self, resident_id: &str, available: bool) -> bool {
        match self.residence.resident_by_id_mut(resident_id) {
            Some(resident) => {
                resident.set_availability(available);
                true
            }
            None => false,
        }
    }

    /// Zeroes every resident's points for a new scoring period.
    pub fn reset_all_points(&mut self) {
        info!("Resetting points for all residents");
        self.residence.reset_all_points();
    }

    // === Activity management ===

    /// Creates a new pending activity. The assignee id, when present, is
    /// stored as given; it is validated only at assignment/finalization time.
    pub fn create_activity(&mut self, command: CreateActivityCommand) -> Result<Activity> {
        info!(
            "Creating activity: category={}, name={}",
            command.category, command.name
        );

        let activity = Activity::new(
            command.category,
            &command.name,
            &command.description,
            command.assignee_id,
        )
        .context("Invalid activity")?;
        let created = activity.clone();
        self.activities.push(activity);

        info!("Created activity: {} with id: {}", created.name, created.id);
        Ok(created)
    }

    /// Assigns a resident to an activity, overwriting any prior assignment.
    /// Returns false when either id is unresolvable.
    pub fn assign_resident(&mut self, activity_id: &str, resident_id: &str) -> bool {
        if self.residence.resident_by_id(resident_id).is_none() {
            warn!("Cannot assign unknown resident: {}", resident_id);
            return false;
        }
        match self.activities.iter_mut().find(|a| a.id == activity_id) {
            Some(activity) => {
                activity.assignee_id = Some(resident_id.to_string());
                info!("Assigned {} to activity {}", resident_id, activity_id);
                true
            }
            None => {
                warn!("Cannot assign on unknown activity: {}", activity_id);
                false
            }
        }
    }

    /// Finalizes a pending activity and, in the same call, credits the
    /// assigned resident's points and history. A second call is a no-op
    /// because the activity is no longer pending, so the credit happens at
    /// most once. A dangling assignee id finalizes without crediting anyone.
    pub fn finalize_activity(&mut self, activity_id: &str) -> bool {
        let Some(activity) = self.activities.iter_mut().find(|a| a.id == activity_id) else {
            warn!("Activity not found for finalize: {}", activity_id);
            return false;
        };
        if !activity.finalize() {
            debug!("Finalize rejected, activity not pending: {}", activity_id);
            return false;
        }
        let points = activity.points;
        let assignee_id = activity.assignee_id.clone();

        if let Some(assignee_id) = assignee_id {
            match self.residence.resident_by_id_mut(&assignee_id) {
                Some(resident) => {
                    resident.complete_task(activity_id, points);
                    info!(
                        "Finalized activity {} crediting {} points to {}",
                        activity_id, points, assignee_id
                    );
                }
                None => warn!(
                    "Finalized activity {} with dangling assignee {}",
                    activity_id, assignee_id
                ),
            }
        } else {
            info!("Finalized unassigned activity {}", activity_id);
        }
        true
    }

    /// Cancels a pending activity. No points change hands.
    pub fn cancel_activity(&mut self, activity_id: &str) -> bool {
        match self.activities.iter_mut().find(|a| a.id == activity_id) {
            Some(activity) => activity.cancel(),
            None => {
                warn!("Activity not found for cancel: {}", activity_id);
                false
            }
        }
    }

    /// Returns a terminal activity to pending. Points already credited for a
    /// previous finalization are not clawed back.
    pub fn reopen_activity(&mut self, activity_id: &str) -> bool {
        match self.activities.iter_mut().find(|a| a.id == activity_id) {
            Some(activity) => activity.reopen(),
            None => {
                warn!("Activity not found for reopen: {}", activity_id);
                false
            }
        }
    }

    /// Deletes an activity permanently and unconditionally.
    pub fn delete_activity(&mut self, activity_id: &str) -> bool {
        let before = self.activities.len();
        self.activities.retain(|a| a.id != activity_id);
        let deleted = self.activities.len() != before;
        if deleted {
            info!("Deleted activity: {}", activity_id);
        } else {
            warn!("Activity not found for delete: {}", activity_id);
        }
        deleted
    }

    pub fn activity_by_id(&self, activity_id: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == activity_id)
    }

    /// Activities filtered by category; `None` lists everything.
    pub fn activities_by_category(&self, category: Option<ActivityCategory>) -> Vec<&Activity> {
        self.activities
            .iter()
            .filter(|a| category.map_or(true, |c| a.category == c))
            .collect()
    }

    pub fn activities_by_status(&self, status: ActivityStatus) -> Vec<&Activity> {
        self.activities.iter().filter(|a| a.status == status).collect()
    }

    pub fn pending_activities(&self) -> Vec<&Activity> {
        self.activities_by_status(ActivityStatus::Pending)
    }

    pub fn summary(&self) -> SystemSummary {
        SystemSummary {
            total_residents: self.residence.len(),
            total_activities: self.activities.len(),
            pending_activities: self.pending_activities().len(),
            finalized_activities: self.activities_by_status(ActivityStatus::Finalized).len(),
            available_residents: self.residence.available_residents().len(),
        }
    }

    // === Reports ===

    pub fn performance_report(&self) -> PerformanceReport {
        reports::performance_report(&self.residence, &self.activities)
    }

    pub fn category_statistics(&self) -> CategoryStatistics {
        reports::category_statistics(&self.activities)
    }

    /// Monthly history; `None` defaults to the current month/year.
    pub fn monthly_history(&self, month: Option<u32>, year: Option<i32>) -> MonthlyHistory {
        reports::monthly_history(&self.residence, &self.activities, month, year)
    }

    pub fn daily_productivity(&self, days: u32) -> DailyProductivity {
        reports::daily_productivity(&self.activities, days)
    }

    // === Persistence ===

    /// Persists the residence and activity list, blocking until the backup
    /// copy and the write complete.
    pub fn save(&self) -> Result<()> {
        self.store.save(&self.residence, &self.activities)
    }

    /// Loads persisted state, replacing the in-memory model. Returns false
    /// when no data is available, in which case the current state is kept.
    pub fn load(&mut self) -> Result<bool> {
        match self.store.load()? {
            Some((residence, activities)) => {
                info!(
                    "Loaded {} residents and {} activities",
                    residence.len(),
                    activities.len()
                );
                self.residence = residence;
                self.activities = activities;
                Ok(true)
            }
            None => {
                info!("No saved data available, keeping current state");
                Ok(false)
            }
        }
    }
}
