//! Domain model for the residence, the aggregate owning all residents.

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::resident::Resident;
use super::{validate_house_name, ValidationError};

/// The household instance. Owns its residents; no two residents may share an
/// id or a case-insensitive name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Residence {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub residents: Vec<Resident>,
}

/// Aggregate statistics over the residents. All fields are zero when the
/// residence is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResidenceStats {
    pub total_residents: usize,
    pub total_points: u32,
    /// Average points per resident, rounded to 1 decimal.
    pub average_points: f64,
    pub total_tasks: usize,
    /// Residents with a non-zero point balance.
    pub active_residents: usize,
    pub available_residents: usize,
    pub unavailable_residents: usize,
}

impl Residence {
    /// Creates an empty residence. The house name must be 2-50 characters
    /// after trimming.
    pub fn new(name: &str) -> Result<Residence, ValidationError> {
        let name = validate_house_name(name)?;
        Ok(Residence {
            id: Residence::generate_id(),
            name,
            created_at: Utc::now(),
            residents: Vec::new(),
        })
    }

    /// Generate a unique id for a residence.
    pub fn generate_id() -> String {
        let hex = Uuid::new_v4().simple().to_string();
        format!("residence::{}", &hex[..8])
    }

    /// Adds a resident, rejecting duplicates by id or case-insensitive name.
    pub fn add_resident(&mut self, resident: Resident) -> bool {
        if self.resident_by_id(&resident.id).is_some() {
            debug!("Rejected duplicate resident id: {}", resident.id);
            return false;
        }
        if self.resident_by_name(&resident.name).is_some() {
            debug!("Rejected duplicate resident name: {}", resident.name);
            return false;
        }
        self.residents.push(resident);
        true
    }

    /// Removes a resident by id. Activities referencing the removed resident
    /// keep their assignee id; consumers treat it as unassigned.
    pub fn remove_resident(&mut self, resident_id: &str) -> bool {
        let before = self.residents.len();
        self.residents.retain(|r| r.id != resident_id);
        self.residents.len() != before
    }

    pub fn resident_by_id(&self, resident_id: &str) -> Option<&Resident> {
        self.residents.iter().find(|r| r.id == resident_id)
    }

    pub fn resident_by_id_mut(&mut self, resident_id: &str) -> Option<&mut Resident> {
        self.residents.iter_mut().find(|r| r.id == resident_id)
    }

    /// Case-insensitive exact match on the trimmed name.
    pub fn resident_by_name(&self, name: &str) -> Option<&Resident> {
        let wanted = name.trim().to_lowercase();
        self.residents.iter().find(|r| r.name.to_lowercase() == wanted)
    }

    /// Residents ordered by points descending. The sort is stable, so ties
    /// keep their insertion order.
    pub fn rank_residents(&self) -> Vec<&Resident> {
        let mut ranked: Vec<&Resident> = self.residents.iter().collect();
        ranked.sort_by(|a, b| b.points.cmp(&a.points));
        ranked
    }

    pub fn statistics(&self) -> ResidenceStats {
        if self.residents.is_empty() {
            return ResidenceStats::default();
        }
        let total_points: u32 = self.residents.iter().map(|r| r.points).sum();
        let total_tasks: usize = self.residents.iter().map(|r| r.tasks_completed()).sum();
        let available = self.residents.iter().filter(|r| r.available).count();
        let average = total_points as f64 / self.residents.len() as f64;
        ResidenceStats {
            total_residents: self.residents.len(),
            total_points,
            average_points: (average * 10.0).round() / 10.0,
            total_tasks,
            active_residents: self.residents.iter().filter(|r| r.points > 0).count(),
            available_residents: available,
            unavailable_residents: self.residents.len() - available,
        }
    }

    pub fn available_residents(&self) -> Vec<&Resident> {
        self.residents.iter().filter(|r| r.available).collect()
    }

    pub fn unavailable_residents(&self) -> Vec<&Resident> {
        self.residents.iter().filter(|r| !r.available).collect()
    }

    /// Zeroes every resident's points for a new scoring period.
    pub fn reset_all_points(&mut self) {
        for resident in &mut self.residents {
            resident.reset_points();
        }
    }

    pub fn set_all_availability(&mut self, available: bool) {
        for resident in &mut self.residents {
            resident.set_availability(available);
        }
    }

    pub fn len(&self) -> usize {
        self.residents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn residence_with(names: &[&str]) -> Residence {
        let mut residence = Residence::new("Casa Teste").unwrap();
        for name in names {
            assert!(residence.add_resident(Resident::new(name).unwrap()));
        }
        residence
    }

    #[test]
    fn test_house_name_validation() {
        assert!(Residence::new("x").is_err());
        assert!(Residence::new(&"x".repeat(51)).is_err());
        assert_eq!(Residence::new("  Sunny House  ").unwrap().name, "Sunny House");
    }

    #[test]
    fn test_duplicate_name_rejected_case_insensitive() {
        let mut residence = residence_with(&["Ana Clara"]);
        assert!(!residence.add_resident(Resident::new("ANA CLARA").unwrap()));
        assert_eq!(residence.len(), 1);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut residence = Residence::new("Casa").unwrap();
        let first = Resident::new("Ana").unwrap();
        let mut clone = Resident::new("Bia").unwrap();
        clone.id = first.id.clone();
        assert!(residence.add_resident(first));
        assert!(!residence.add_resident(clone));
    }

    #[test]
    fn test_lookup_by_name_is_case_insensitive() {
        let residence = residence_with(&["Ana Clara", "Bruno"]);
        assert!(residence.resident_by_name("  ana clara ").is_some());
        assert!(residence.resident_by_name("carla").is_none());
    }

    #[test]
    fn test_remove_resident() {
        let mut residence = residence_with(&["Ana", "Bruno"]);
        let id = residence.residents[0].id.clone();
        assert!(residence.remove_resident(&id));
        assert!(!residence.remove_resident(&id));
        assert_eq!(residence.len(), 1);
    }

    #[test]
    fn test_ranking_is_stable_on_ties() {
        let mut residence = residence_with(&["Ana", "Bruno", "Carla", "Davi"]);
        let points = [10, 30, 30, 5];
        for (resident, p) in residence.residents.iter_mut().zip(points) {
            resident.points = p;
        }
        let ranked = residence.rank_residents();
        let ordered: Vec<(u32, &str)> = ranked
            .iter()
            .map(|r| (r.points, r.name.as_str()))
            .collect();
        assert_eq!(
            ordered,
            vec![(30, "Bruno"), (30, "Carla"), (10, "Ana"), (5, "Davi")]
        );
    }

    #[test]
    fn test_statistics_empty_residence_is_zeroed() {
        let residence = Residence::new("Casa Vazia").unwrap();
        assert_eq!(residence.statistics(), ResidenceStats::default());
    }

    #[test]
    fn test_statistics_values() {
        let mut residence = residence_with(&["Ana", "Bruno", "Carla"]);
        residence.residents[0].complete_task("activity::1", 10);
        residence.residents[1].complete_task("activity::2", 15);
        residence.residents[2].set_availability(false);

        let stats = residence.statistics();
        assert_eq!(stats.total_residents, 3);
        assert_eq!(stats.total_points, 25);
        assert_eq!(stats.average_points, 8.3);
        assert_eq!(stats.total_tasks, 2);
        assert_eq!(stats.active_residents, 2);
        assert_eq!(stats.available_residents, 2);
        assert_eq!(stats.unavailable_residents, 1);
    }

    #[test]
    fn test_reset_all_points() {
        let mut residence = residence_with(&["Ana", "Bruno"]);
        residence.residents[0].complete_task("activity::1", 30);
        residence.reset_all_points();
        assert!(residence.residents.iter().all(|r| r.points == 0));
        assert_eq!(residence.residents[0].tasks_completed(), 1);
    }
}
