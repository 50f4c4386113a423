//! Fixed enumerations: activity categories and lifecycle states.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a household activity. Each category carries a fixed points
/// value credited to the assignee when the activity is finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityCategory {
    Kitchen,
    Cleaning,
    Garden,
    Laundry,
    Maintenance,
}

impl ActivityCategory {
    /// All categories, in their fixed presentation order.
    pub const ALL: [ActivityCategory; 5] = [
        ActivityCategory::Kitchen,
        ActivityCategory::Cleaning,
        ActivityCategory::Garden,
        ActivityCategory::Laundry,
        ActivityCategory::Maintenance,
    ];

    /// Points an activity of this category is worth.
    pub fn points(&self) -> u32 {
        match self {
            ActivityCategory::Kitchen => 15,
            ActivityCategory::Cleaning => 10,
            ActivityCategory::Garden => 12,
            ActivityCategory::Laundry => 8,
            ActivityCategory::Maintenance => 20,
        }
    }

    /// Fallback points when reconstructing an activity whose category could
    /// not be resolved to a stored points value.
    pub const DEFAULT_POINTS: u32 = 10;

    pub fn label(&self) -> &'static str {
        match self {
            ActivityCategory::Kitchen => "Kitchen",
            ActivityCategory::Cleaning => "Cleaning",
            ActivityCategory::Garden => "Garden",
            ActivityCategory::Laundry => "Laundry",
            ActivityCategory::Maintenance => "Maintenance",
        }
    }

    /// Name used in the persisted JSON schema (legacy format).
    pub fn storage_name(&self) -> &'static str {
        match self {
            ActivityCategory::Kitchen => "COZINHA",
            ActivityCategory::Cleaning => "LIMPEZA",
            ActivityCategory::Garden => "JARDIM",
            ActivityCategory::Laundry => "ROUPAS",
            ActivityCategory::Maintenance => "MANUTENCAO",
        }
    }

    /// Resolves a category from its storage name or label. Legacy files may
    /// carry display labels with an emoji prefix, so matching is by
    /// case-insensitive containment of the known names.
    pub fn parse(s: &str) -> Option<ActivityCategory> {
        let wanted = s.trim();
        Self::ALL.into_iter().find(|c| {
            wanted.eq_ignore_ascii_case(c.storage_name())
                || wanted.eq_ignore_ascii_case(c.label())
                || legacy_label_matches(wanted, *c)
        })
    }
}

impl fmt::Display for ActivityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Legacy display labels ("Cozinha", "🧹 Limpeza", ...) written by the
/// original system's UI layer.
fn legacy_label_matches(s: &str, category: ActivityCategory) -> bool {
    let legacy = match category {
        ActivityCategory::Kitchen => "Cozinha",
        ActivityCategory::Cleaning => "Limpeza",
        ActivityCategory::Garden => "Jardim",
        ActivityCategory::Laundry => "Roupas",
        ActivityCategory::Maintenance => "Manutenção",
    };
    s.to_lowercase().contains(&legacy.to_lowercase())
}

/// Lifecycle state of an activity. `Pending` is the initial state; the other
/// two are terminal until explicitly reopened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityStatus {
    Pending,
    Finalized,
    Canceled,
}

impl ActivityStatus {
    pub const ALL: [ActivityStatus; 3] = [
        ActivityStatus::Pending,
        ActivityStatus::Finalized,
        ActivityStatus::Canceled,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ActivityStatus::Pending => "Pending",
            ActivityStatus::Finalized => "Finalized",
            ActivityStatus::Canceled => "Canceled",
        }
    }

    /// Name used in the persisted JSON schema (legacy format).
    pub fn storage_name(&self) -> &'static str {
        match self {
            ActivityStatus::Pending => "PENDENTE",
            ActivityStatus::Finalized => "FINALIZADA",
            ActivityStatus::Canceled => "CANCELADA",
        }
    }

    pub fn parse(s: &str) -> Option<ActivityStatus> {
        let wanted = s.trim();
        Self::ALL.into_iter().find(|st| {
            wanted.eq_ignore_ascii_case(st.storage_name()) || wanted.eq_ignore_ascii_case(st.label())
        })
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_points_table() {
        assert_eq!(ActivityCategory::Kitchen.points(), 15);
        assert_eq!(ActivityCategory::Cleaning.points(), 10);
        assert_eq!(ActivityCategory::Garden.points(), 12);
        assert_eq!(ActivityCategory::Laundry.points(), 8);
        assert_eq!(ActivityCategory::Maintenance.points(), 20);
    }

    #[test]
    fn test_category_parse_storage_and_label() {
        assert_eq!(ActivityCategory::parse("COZINHA"), Some(ActivityCategory::Kitchen));
        assert_eq!(ActivityCategory::parse("laundry"), Some(ActivityCategory::Laundry));
        assert_eq!(ActivityCategory::parse("🧹 Limpeza"), Some(ActivityCategory::Cleaning));
        assert_eq!(ActivityCategory::parse("unknown"), None);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(ActivityStatus::parse("PENDENTE"), Some(ActivityStatus::Pending));
        assert_eq!(ActivityStatus::parse("Finalized"), Some(ActivityStatus::Finalized));
        assert_eq!(ActivityStatus::parse("CANCELADA"), Some(ActivityStatus::Canceled));
        assert_eq!(ActivityStatus::parse(""), None);
    }
}
