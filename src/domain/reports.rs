//! Report generation over the coordinator's state.
//!
//! Every function here is pure and read-only: it takes the residence and the
//! activity list explicitly and recomputes from the full snapshot on each
//! call. Nothing is cached and nothing is mutated.

use chrono::{DateTime, Datelike, Duration, Utc};
use log::debug;
use serde::Serialize;

use super::models::{
    Activity, ActivityCategory, PerformanceSummary, PerformanceTier, Residence, ResidenceStats,
};

/// Performance report entry for one resident.
#[derive(Debug, Clone, Serialize)]
pub struct ResidentPerformance {
    pub id: String,
    pub name: String,
    pub points: u32,
    pub tasks_completed: usize,
    pub tier: PerformanceTier,
    pub available: bool,
    pub summary: PerformanceSummary,
    /// Activities assigned to this resident created in the current month.
    pub tasks_this_month: usize,
    /// Up to 3 most frequent categories among the resident's finalized
    /// activities; ties keep first-encounter order.
    pub favorite_categories: Vec<ActivityCategory>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PerformanceReport {
    pub generated_at: DateTime<Utc>,
    pub total_residents: usize,
    pub residence_stats: ResidenceStats,
    /// Sorted by points descending; ties keep insertion order.
    pub residents: Vec<ResidentPerformance>,
}

/// Statistics for one activity category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryStats {
    pub category: ActivityCategory,
    pub total: usize,
    pub finalized: usize,
    pub pending: usize,
    pub canceled: usize,
    /// finalized / total * 100, rounded to 1 decimal.
    pub completion_pct: f64,
    pub total_points: u32,
    /// Average over ALL the category's activities, not just finalized ones.
    pub average_points: f64,
    /// Up to 5 activity names in encounter order.
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryStatistics {
    pub generated_at: DateTime<Utc>,
    pub total_activities: usize,
    /// Categories in first-encounter order; categories with no activities
    /// are absent.
    pub categories: Vec<CategoryStats>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekSummary {
    /// Week of month: (day - 1) / 7 + 1.
    pub week: u32,
    pub total: usize,
    pub finalized: usize,
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TopResident {
    pub name: String,
    pub finalized_tasks: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub category: ActivityCategory,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyHistory {
    pub month: u32,
    pub year: i32,
    pub month_name: &'static str,
    pub generated_at: DateTime<Utc>,
    pub total_activities: usize,
    pub finalized: usize,
    pub pending: usize,
    pub canceled: usize,
    /// Points of finalized activities created in the period.
    pub total_points: u32,
    /// finalized / total * 100, rounded to 1 decimal; 0 for an empty month.
    pub completion_rate: f64,
    pub weeks: Vec<WeekSummary>,
    /// Top 5 residents by finalized-task count in the period.
    pub top_residents: Vec<TopResident>,
    /// Top 5 categories by activity count in the period.
    pub top_categories: Vec<CategoryCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DaySummary {
    /// Calendar day key, "%d/%m". Day and month only, so keys are ambiguous
    /// across year boundaries; the filter window itself uses full timestamps.
    pub day: String,
    pub created: usize,
    pub finalized: usize,
    pub points: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyProductivity {
    pub period_days: u32,
    pub generated_at: DateTime<Utc>,
    /// Days in encounter order of the underlying activities.
    pub days: Vec<DaySummary>,
    pub total_activities: usize,
    /// created count / period days, rounded to 1 decimal.
    pub average_per_day: f64,
}

/// Full performance report: residence-wide statistics plus one entry per
/// resident, ordered by points descending.
pub fn performance_report(residence: &Residence, activities: &[Activity]) -> PerformanceReport {
    let now = Utc::now();
    let mut entries: Vec<ResidentPerformance> = residence
        .residents
        .iter()
        .map(|resident| {
            let tasks_this_month = activities
                .iter()
                .filter(|a| {
                    a.assignee_id.as_deref() == Some(resident.id.as_str())
                        && a.created_at.month() == now.month()
                        && a.created_at.year() == now.year()
                })
                .count();
            ResidentPerformance {
                id: resident.id.clone(),
                name: resident.name.clone(),
                points: resident.points,
                tasks_completed: resident.tasks_completed(),
                tier: resident.tier(),
                available: resident.available,
                summary: resident.performance_summary(),
                tasks_this_month,
                favorite_categories: favorite_categories(&resident.id, activities),
            }
        })
        .collect();
    entries.sort_by(|a, b| b.points.cmp(&a.points));

    debug!("Generated performance report for {} residents", entries.len());
    PerformanceReport {
        generated_at: now,
        total_residents: residence.len(),
        residence_stats: residence.statistics(),
        residents: entries,
    }
}

/// Activities grouped by category with counts, completion percentage, points
/// totals and example names.
pub fn category_statistics(activities: &[Activity]) -> CategoryStatistics {
    let mut categories: Vec<CategoryStats> = Vec::new();
    for activity in activities {
        let idx = match categories.iter().position(|c| c.category == activity.category) {
            Some(idx) => idx,
            None => {
                categories.push(CategoryStats {
                    category: activity.category,
                    total: 0,
                    finalized: 0,
                    pending: 0,
                    canceled: 0,
                    completion_pct: 0.0,
                    total_points: 0,
                    average_points: 0.0,
                    examples: Vec::new(),
                });
                categories.len() - 1
            }
        };
        let entry = &mut categories[idx];
        entry.total += 1;
        entry.total_points += activity.points;
        if entry.examples.len() < 5 {
            entry.examples.push(activity.name.clone());
        }
        if activity.is_finalized() {
            entry.finalized += 1;
        } else if activity.is_pending() {
            entry.pending += 1;
        } else {
            entry.canceled += 1;
        }
    }
    for entry in &mut categories {
        entry.completion_pct = round1(entry.finalized as f64 / entry.total as f64 * 100.0);
        entry.average_points = round1(entry.total_points as f64 / entry.total as f64);
    }

    CategoryStatistics {
        generated_at: Utc::now(),
        total_activities: activities.len(),
        categories,
    }
}

/// History of the activities created in a given month, grouped into weeks of
/// the month. Defaults to the current month and year.
pub fn monthly_history(
    residence: &Residence,
    activities: &[Activity],
    month: Option<u32>,
    year: Option<i32>,
) -> MonthlyHistory {
    let now = Utc::now();
    let month = month.unwrap_or_else(|| now.month());
    let year = year.unwrap_or_else(|| now.year());

    let in_month: Vec<&Activity> = activities
        .iter()
        .filter(|a| a.created_at.month() == month && a.created_at.year() == year)
        .collect();

    let finalized = in_month.iter().filter(|a| a.is_finalized()).count();
    let pending = in_month.iter().filter(|a| a.is_pending()).count();
    let canceled = in_month.iter().filter(|a| a.is_canceled()).count();
    let total_points: u32 = in_month
        .iter()
        .filter(|a| a.is_finalized())
        .map(|a| a.points)
        .sum();
    let completion_rate = if in_month.is_empty() {
        0.0
    } else {
        round1(finalized as f64 / in_month.len() as f64 * 100.0)
    };

    let mut weeks: Vec<WeekSummary> = Vec::new();
    for activity in &in_month {
        let week = (activity.created_at.day() - 1) / 7 + 1;
        let idx = match weeks.iter().position(|w| w.week == week) {
            Some(idx) => idx,
            None => {
                weeks.push(WeekSummary {
                    week,
                    total: 0,
                    finalized: 0,
                    activities: Vec::new(),
                });
                weeks.len() - 1
            }
        };
        let entry = &mut weeks[idx];
        entry.total += 1;
        if activity.is_finalized() {
            entry.finalized += 1;
        }
        entry.activities.push(activity.name.clone());
    }
    weeks.sort_by_key(|w| w.week);

    let finalized_assignees = in_month
        .iter()
        .filter(|a| a.is_finalized())
        .filter_map(|a| a.assignee_id.clone());
    let top_residents: Vec<TopResident> = tally_in_order(finalized_assignees)
        .into_iter()
        .take(5)
        .filter_map(|(resident_id, count)| {
            residence.resident_by_id(&resident_id).map(|r| TopResident {
                name: r.name.clone(),
                finalized_tasks: count,
            })
        })
        .collect();

    let top_categories: Vec<CategoryCount> = tally_in_order(in_month.iter().map(|a| a.category))
        .into_iter()
        .take(5)
        .map(|(category, count)| CategoryCount { category, count })
        .collect();

    debug!(
        "Generated monthly history for {:02}/{}: {} activities",
        month,
        year,
        in_month.len()
    );
    MonthlyHistory {
        month,
        year,
        month_name: month_name(month),
        generated_at: now,
        total_activities: in_month.len(),
        finalized,
        pending,
        canceled,
        total_points,
        completion_rate,
        weeks,
        top_residents,
        top_categories,
    }
}

/// Productivity of the last `days` days, grouped by calendar day of creation.
pub fn daily_productivity(activities: &[Activity], days: u32) -> DailyProductivity {
    let now = Utc::now();
    let cutoff = now - Duration::days(i64::from(days));

    let recent: Vec<&Activity> = activities
        .iter()
        .filter(|a| a.created_at >= cutoff)
        .collect();

    let mut day_summaries: Vec<DaySummary> = Vec::new();
    for activity in &recent {
        let key = activity.created_at.format("%d/%m").to_string();
        let idx = match day_summaries.iter().position(|d| d.day == key) {
            Some(idx) => idx,
            None => {
                day_summaries.push(DaySummary {
                    day: key,
                    created: 0,
                    finalized: 0,
                    points: 0,
                });
                day_summaries.len() - 1
            }
        };
        let entry = &mut day_summaries[idx];
        entry.created += 1;
        if activity.is_finalized() {
            entry.finalized += 1;
            entry.points += activity.points;
        }
    }

    let average = if days == 0 {
        0.0
    } else {
        round1(recent.len() as f64 / f64::from(days))
    };
    DailyProductivity {
        period_days: days,
        generated_at: now,
        days: day_summaries,
        total_activities: recent.len(),
        average_per_day: average,
    }
}

/// Up to 3 most frequent categories among a resident's finalized activities.
fn favorite_categories(resident_id: &str, activities: &[Activity]) -> Vec<ActivityCategory> {
    let finalized = activities
        .iter()
        .filter(|a| a.is_finalized() && a.assignee_id.as_deref() == Some(resident_id))
        .map(|a| a.category);
    tally_in_order(finalized)
        .into_iter()
        .take(3)
        .map(|(category, _)| category)
        .collect()
}

/// Counts occurrences preserving first-encounter order, then sorts by count
/// descending. The sort is stable, so equal counts keep encounter order.
fn tally_in_order<T: PartialEq>(items: impl IntoIterator<Item = T>) -> Vec<(T, usize)> {
    let mut counts: Vec<(T, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(existing, _)| *existing == item) {
            Some((_, count)) => *count += 1,
            None => counts.push((item, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}
