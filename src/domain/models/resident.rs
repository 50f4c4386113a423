//! Domain model for a resident of the household.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::{validate_person_name, ValidationError};

/// A person tracked by the system, with a point balance earned by finalizing
/// activities and an availability flag for new assignments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resident {
    pub id: String,
    pub name: String,
    pub registered_at: DateTime<Utc>,
    pub points: u32,
    pub available: bool,
    /// Ids of finalized activities credited to this resident. Append-only;
    /// an id is never recorded twice.
    pub task_history: Vec<String>,
}

/// Display tier derived purely from a resident's current point total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PerformanceTier {
    New,
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl PerformanceTier {
    /// Tier thresholds: >=100 Expert, >=50 Advanced, >=20 Intermediate,
    /// >=5 Beginner, else New.
    pub fn from_points(points: u32) -> PerformanceTier {
        match points {
            100.. => PerformanceTier::Expert,
            50.. => PerformanceTier::Advanced,
            20.. => PerformanceTier::Intermediate,
            5.. => PerformanceTier::Beginner,
            _ => PerformanceTier::New,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PerformanceTier::New => "New",
            PerformanceTier::Beginner => "Beginner",
            PerformanceTier::Intermediate => "Intermediate",
            PerformanceTier::Advanced => "Advanced",
            PerformanceTier::Expert => "Expert",
        }
    }
}

impl fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-resident performance figures computed on demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSummary {
    pub total_points: u32,
    pub total_tasks: usize,
    pub tasks_per_day: f64,
    pub points_per_task: f64,
    pub days_registered: i64,
    pub available: bool,
}

impl Resident {
    /// Creates a resident with a fresh id, zero points and an empty history.
    /// The name is validated (2-50 letters/spaces) and stored title-cased.
    pub fn new(name: &str) -> Result<Resident, ValidationError> {
        let name = validate_person_name(name)?;
        Ok(Resident {
            id: Resident::generate_id(),
            name,
            registered_at: Utc::now(),
            points: 0,
            available: true,
            task_history: Vec::new(),
        })
    }

    /// Generate a unique id for a resident.
    pub fn generate_id() -> String {
        let hex = Uuid::new_v4().simple().to_string();
        format!("resident::{}", &hex[..8])
    }

    /// Records a finalized activity and credits its points. Idempotent per
    /// activity id: a task already in the history is ignored.
    pub fn complete_task(&mut self, task_id: &str, points: u32) {
        if self.task_history.iter().any(|t| t == task_id) {
            return;
        }
        self.task_history.push(task_id.to_string());
        self.points += points;
    }

    /// Zeroes the point balance for a new period. The task history stays.
    pub fn reset_points(&mut self) {
        self.points = 0;
    }

    pub fn set_availability(&mut self, available: bool) {
        self.available = available;
    }

    pub fn tier(&self) -> PerformanceTier {
        PerformanceTier::from_points(self.points)
    }

    pub fn tasks_completed(&self) -> usize {
        self.task_history.len()
    }

    /// Whole days since registration, never less than 1.
    pub fn days_registered(&self) -> i64 {
        (Utc::now() - self.registered_at).num_days().max(1)
    }

    pub fn performance_summary(&self) -> PerformanceSummary {
        let days = self.days_registered();
        let tasks = self.tasks_completed();
        let tasks_per_day = tasks as f64 / days as f64;
        let points_per_task = if tasks > 0 {
            self.points as f64 / tasks as f64
        } else {
            0.0
        };
        PerformanceSummary {
            total_points: self.points,
            total_tasks: tasks,
            tasks_per_day: (tasks_per_day * 100.0).round() / 100.0,
            points_per_task: (points_per_task * 10.0).round() / 10.0,
            days_registered: days,
            available: self.available,
        }
    }

    /// The ids of the most recently completed tasks, up to `limit`.
    pub fn recent_history(&self, limit: usize) -> &[String] {
        let start = self.task_history.len().saturating_sub(limit);
        &self.task_history[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_resident_defaults() {
        let r = Resident::new("ana clara").unwrap();
        assert_eq!(r.name, "Ana Clara");
        assert!(r.id.starts_with("resident::"));
        assert_eq!(r.points, 0);
        assert!(r.available);
        assert!(r.task_history.is_empty());
        assert_eq!(r.tier(), PerformanceTier::New);
    }

    #[test]
    fn test_invalid_names_rejected() {
        assert!(Resident::new("").is_err());
        assert!(Resident::new("a").is_err());
        assert!(Resident::new("Ana123").is_err());
        assert!(Resident::new(&"x".repeat(51)).is_err());
    }

    #[test]
    fn test_complete_task_is_idempotent_per_id() {
        let mut r = Resident::new("Bruno").unwrap();
        r.complete_task("activity::1", 15);
        r.complete_task("activity::1", 15);
        assert_eq!(r.points, 15);
        assert_eq!(r.task_history, vec!["activity::1".to_string()]);

        r.complete_task("activity::2", 8);
        assert_eq!(r.points, 23);
        assert_eq!(r.tasks_completed(), 2);
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(PerformanceTier::from_points(0), PerformanceTier::New);
        assert_eq!(PerformanceTier::from_points(4), PerformanceTier::New);
        assert_eq!(PerformanceTier::from_points(5), PerformanceTier::Beginner);
        assert_eq!(PerformanceTier::from_points(19), PerformanceTier::Beginner);
        assert_eq!(PerformanceTier::from_points(20), PerformanceTier::Intermediate);
        assert_eq!(PerformanceTier::from_points(50), PerformanceTier::Advanced);
        assert_eq!(PerformanceTier::from_points(99), PerformanceTier::Advanced);
        assert_eq!(PerformanceTier::from_points(100), PerformanceTier::Expert);
    }

    #[test]
    fn test_reset_points_keeps_history() {
        let mut r = Resident::new("Carla").unwrap();
        r.complete_task("activity::1", 20);
        r.reset_points();
        assert_eq!(r.points, 0);
        assert_eq!(r.tasks_completed(), 1);
        assert_eq!(r.tier(), PerformanceTier::New);
    }

    #[test]
    fn test_performance_summary_no_tasks() {
        let r = Resident::new("Davi").unwrap();
        let summary = r.performance_summary();
        assert_eq!(summary.total_tasks, 0);
        assert_eq!(summary.points_per_task, 0.0);
        assert_eq!(summary.days_registered, 1);
    }

    #[test]
    fn test_recent_history_limit() {
        let mut r = Resident::new("Elisa").unwrap();
        for i in 0..7 {
            r.complete_task(&format!("activity::{i}"), 1);
        }
        let recent = r.recent_history(5);
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0], "activity::2");
        assert_eq!(r.recent_history(20).len(), 7);
    }
}
