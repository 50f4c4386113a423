//! Domain model for a household activity (chore).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{ActivityCategory, ActivityStatus};
use super::ValidationError;

/// A unit of household work. Carries a category-derived points value fixed at
/// creation and a three-state lifecycle: `Pending` -> `Finalized` or
/// `Canceled`, with an explicit reopen path back to `Pending`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub category: ActivityCategory,
    pub name: String,
    pub description: String,
    pub status: ActivityStatus,
    pub created_at: DateTime<Utc>,
    /// Set when the activity reaches a terminal state, cleared on reopen.
    pub completed_at: Option<DateTime<Utc>>,
    /// Non-owning reference to the assigned resident. May dangle after a
    /// resident is removed; consumers treat an unresolvable id as unassigned.
    pub assignee_id: Option<String>,
    pub points: u32,
}

impl Activity {
    /// Creates a pending activity. The name must be at least 3 characters
    /// after trimming; the points value comes from the category table.
    pub fn new(
        category: ActivityCategory,
        name: &str,
        description: &str,
        assignee_id: Option<String>,
    ) -> Result<Activity, ValidationError> {
        let name = name.trim();
        if name.chars().count() < 3 {
            return Err(ValidationError::TaskNameTooShort);
        }
        Ok(Activity {
            id: Activity::generate_id(),
            category,
            name: name.to_string(),
            description: description.trim().to_string(),
            status: ActivityStatus::Pending,
            created_at: Utc::now(),
            completed_at: None,
            assignee_id,
            points: category.points(),
        })
    }

    /// Generate a unique id for an activity.
    pub fn generate_id() -> String {
        let hex = Uuid::new_v4().simple().to_string();
        format!("activity::{}", &hex[..8])
    }

    pub fn is_pending(&self) -> bool {
        self.status == ActivityStatus::Pending
    }

    pub fn is_finalized(&self) -> bool {
        self.status == ActivityStatus::Finalized
    }

    pub fn is_canceled(&self) -> bool {
        self.status == ActivityStatus::Canceled
    }

    /// Marks the activity finalized. Only allowed from `Pending`; any other
    /// source state is a no-op reported as `false`.
    pub fn finalize(&mut self) -> bool {
        if self.status != ActivityStatus::Pending {
            return false;
        }
        self.status = ActivityStatus::Finalized;
        self.completed_at = Some(Utc::now());
        true
    }

    /// Marks the activity canceled. Only allowed from `Pending`.
    pub fn cancel(&mut self) -> bool {
        if self.status != ActivityStatus::Pending {
            return false;
        }
        self.status = ActivityStatus::Canceled;
        self.completed_at = Some(Utc::now());
        true
    }

    /// Returns a terminal activity to `Pending`, clearing the completion
    /// timestamp. Only allowed from `Finalized` or `Canceled`.
    pub fn reopen(&mut self) -> bool {
        if self.status == ActivityStatus::Pending {
            return false;
        }
        self.status = ActivityStatus::Pending;
        self.completed_at = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(category: ActivityCategory) -> Activity {
        Activity::new(category, "Wash the dishes", "after dinner", None).unwrap()
    }

    #[test]
    fn test_new_activity_defaults() {
        let a = activity(ActivityCategory::Kitchen);
        assert!(a.id.starts_with("activity::"));
        assert_eq!(a.status, ActivityStatus::Pending);
        assert!(a.completed_at.is_none());
        assert_eq!(a.points, 15);
    }

    #[test]
    fn test_points_follow_category_table() {
        let expected = [
            (ActivityCategory::Kitchen, 15),
            (ActivityCategory::Cleaning, 10),
            (ActivityCategory::Garden, 12),
            (ActivityCategory::Laundry, 8),
            (ActivityCategory::Maintenance, 20),
        ];
        for (category, points) in expected {
            assert_eq!(activity(category).points, points);
        }
    }

    #[test]
    fn test_name_validation() {
        assert!(Activity::new(ActivityCategory::Garden, "  ab ", "", None).is_err());
        assert!(Activity::new(ActivityCategory::Garden, "", "", None).is_err());
        let a = Activity::new(ActivityCategory::Garden, "  Water plants  ", "", None).unwrap();
        assert_eq!(a.name, "Water plants");
    }

    #[test]
    fn test_finalize_only_from_pending() {
        let mut a = activity(ActivityCategory::Cleaning);
        assert!(a.finalize());
        assert!(a.is_finalized());
        assert!(a.completed_at.is_some());

        assert!(!a.finalize());
        assert!(!a.cancel());
    }

    #[test]
    fn test_cancel_only_from_pending() {
        let mut a = activity(ActivityCategory::Laundry);
        assert!(a.cancel());
        assert!(a.is_canceled());
        assert!(a.completed_at.is_some());
        assert!(!a.finalize());
    }

    #[test]
    fn test_reopen_clears_completion_and_allows_refinalize() {
        let mut a = activity(ActivityCategory::Maintenance);
        assert!(!a.reopen());

        a.finalize();
        assert!(a.reopen());
        assert!(a.is_pending());
        assert!(a.completed_at.is_none());
        assert!(a.finalize());

        a.reopen();
        assert!(a.cancel());
        assert!(a.reopen());
        assert!(a.is_pending());
    }

    #[test]
    fn test_points_unchanged_by_transitions() {
        let mut a = activity(ActivityCategory::Maintenance);
        a.finalize();
        a.reopen();
        a.cancel();
        assert_eq!(a.points, 20);
    }
}
