//! JSON file persistence for the chore tracker.
//!
//! The on-disk schema is the legacy format: a metadata envelope wrapping the
//! residence and activity list, with Portuguese field names. Wire structs
//! mirror that schema via serde renames and are converted to and from the
//! domain models here, so the rest of the crate never sees the legacy keys.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::models::{
    Activity, ActivityCategory, ActivityStatus, Residence, Resident,
};

const FILE_VERSION: &str = "1.0";
const SYSTEM_NAME: &str = "Tarefas Domésticas";
const RESIDENT_KIND: &str = "Morador";

/// Store for a single JSON data file with a one-generation backup.
///
/// Before every save the current file is copied to `<path>.backup`. A load
/// that fails to parse restores that backup over the primary and retries
/// once; if that also fails the store reports "no data" instead of erroring.
pub struct JsonStore {
    path: PathBuf,
    backup_path: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredFile {
    metadata: StoredMetadata,
    #[serde(rename = "dados")]
    payload: StoredPayload,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredMetadata {
    #[serde(rename = "versao")]
    version: String,
    #[serde(rename = "data_salvamento")]
    saved_at: String,
    #[serde(rename = "sistema")]
    system: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredPayload {
    #[serde(rename = "residencia")]
    residence: StoredResidence,
    #[serde(rename = "atividades", default)]
    activities: Vec<StoredActivity>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredResidence {
    id: String,
    #[serde(rename = "nome_casa")]
    name: String,
    #[serde(rename = "data_criacao")]
    created_at: String,
    #[serde(rename = "moradores", default)]
    residents: Vec<StoredResident>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredResident {
    id: String,
    #[serde(rename = "nome")]
    name: String,
    #[serde(rename = "data_cadastro")]
    registered_at: String,
    /// Legacy subclass marker; always "Morador". Ignored on read.
    #[serde(rename = "tipo", default)]
    kind: String,
    #[serde(rename = "pontos_realizadas", default)]
    points: u32,
    #[serde(rename = "disponivel", default = "default_true")]
    available: bool,
    #[serde(rename = "historico_tarefas", default)]
    task_history: Vec<String>,
    /// Derived display value; recomputed from points on read.
    #[serde(rename = "nivel_performance", default)]
    tier: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredActivity {
    #[serde(rename = "id_atividade")]
    id: String,
    #[serde(rename = "categoria")]
    category: String,
    #[serde(rename = "nome_tarefa")]
    name: String,
    #[serde(rename = "descricao", default)]
    description: String,
    #[serde(rename = "situacao")]
    status: String,
    #[serde(rename = "data_criacao")]
    created_at: String,
    #[serde(rename = "data_finalizacao")]
    completed_at: Option<String>,
    #[serde(rename = "responsavel_id")]
    assignee_id: Option<String>,
    #[serde(rename = "pontos_tarefa")]
    points: Option<u32>,
}

fn default_true() -> bool {
    true
}

impl JsonStore {
    /// Creates a store for the given path, creating parent directories as
    /// needed. The backup lives next to the primary as `<path>.backup`.
    pub fn new(path: impl Into<PathBuf>) -> Result<JsonStore> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create data directory {:?}", parent))?;
            }
        }
        let mut backup_name = path.as_os_str().to_owned();
        backup_name.push(".backup");
        let backup_path = PathBuf::from(backup_name);
        Ok(JsonStore { path, backup_path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saves the residence and activities, pretty-printed UTF-8 JSON. Copies
    /// the current file to the backup first; blocks until both complete.
    pub fn save(&self, residence: &Residence, activities: &[Activity]) -> Result<()> {
        self.backup_current();

        let file = StoredFile {
            metadata: StoredMetadata {
                version: FILE_VERSION.to_string(),
                saved_at: Utc::now().to_rfc3339(),
                system: SYSTEM_NAME.to_string(),
            },
            payload: StoredPayload {
                residence: to_stored_residence(residence),
                activities: activities.iter().map(to_stored_activity).collect(),
            },
        };
        let json = serde_json::to_string_pretty(&file).context("Failed to encode data file")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write data file {:?}", self.path))?;

        info!(
            "Saved {} residents and {} activities to {:?}",
            residence.len(),
            activities.len(),
            self.path
        );
        Ok(())
    }

    /// Loads the persisted state. Returns `Ok(None)` when the file does not
    /// exist or could not be read even after restoring the backup.
    pub fn load(&self) -> Result<Option<(Residence, Vec<Activity>)>> {
        if !self.path.exists() {
            info!("Data file {:?} does not exist, starting fresh", self.path);
            return Ok(None);
        }

        match self.load_file() {
            Ok(data) => Ok(Some(data)),
            Err(e) => {
                warn!("Failed to load {:?}: {:#}", self.path, e);
                if !self.restore_backup() {
                    return Ok(None);
                }
                match self.load_file() {
                    Ok(data) => {
                        info!("Recovered data from backup {:?}", self.backup_path);
                        Ok(Some(data))
                    }
                    Err(e) => {
                        warn!("Backup restore also failed: {:#}", e);
                        Ok(None)
                    }
                }
            }
        }
    }

    /// Loads and checks the persisted payload for the required fields.
    pub fn verify_integrity(&self) -> bool {
        match self.load() {
            Ok(Some((residence, _))) => !residence.id.is_empty(),
            _ => false,
        }
    }

    fn load_file(&self) -> Result<(Residence, Vec<Activity>)> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read data file {:?}", self.path))?;
        let value: serde_json::Value =
            serde_json::from_str(&text).context("Failed to decode JSON")?;

        // Current files wrap the payload in a "dados" envelope; files written
        // before the envelope existed are the payload directly.
        let payload_value = value.get("dados").cloned().unwrap_or(value);
        let payload: StoredPayload =
            serde_json::from_value(payload_value).context("Unexpected data file structure")?;

        let residence = from_stored_residence(payload.residence)?;
        let activities = payload
            .activities
            .into_iter()
            .map(from_stored_activity)
            .collect::<Result<Vec<_>>>()?;
        Ok((residence, activities))
    }

    fn backup_current(&self) {
        if self.path.exists() {
            if let Err(e) = fs::copy(&self.path, &self.backup_path) {
                warn!("Failed to write backup {:?}: {}", self.backup_path, e);
            }
        }
    }

    fn restore_backup(&self) -> bool {
        if !self.backup_path.exists() {
            warn!("No backup available at {:?}", self.backup_path);
            return false;
        }
        match fs::copy(&self.backup_path, &self.path) {
            Ok(_) => true,
            Err(e) => {
                warn!("Failed to restore backup: {}", e);
                false
            }
        }
    }
}

fn to_stored_residence(residence: &Residence) -> StoredResidence {
    StoredResidence {
        id: residence.id.clone(),
        name: residence.name.clone(),
        created_at: residence.created_at.to_rfc3339(),
        residents: residence.residents.iter().map(to_stored_resident).collect(),
    }
}

fn to_stored_resident(resident: &Resident) -> StoredResident {
    StoredResident {
        id: resident.id.clone(),
        name: resident.name.clone(),
        registered_at: resident.registered_at.to_rfc3339(),
        kind: RESIDENT_KIND.to_string(),
        points: resident.points,
        available: resident.available,
        task_history: resident.task_history.clone(),
        tier: resident.tier().label().to_string(),
    }
}

fn to_stored_activity(activity: &Activity) -> StoredActivity {
    StoredActivity {
        id: activity.id.clone(),
        category: activity.category.storage_name().to_string(),
        name: activity.name.clone(),
        description: activity.description.clone(),
        status: activity.status.storage_name().to_string(),
        created_at: activity.created_at.to_rfc3339(),
        completed_at: activity.completed_at.map(|t| t.to_rfc3339()),
        assignee_id: activity.assignee_id.clone(),
        points: Some(activity.points),
    }
}

fn from_stored_residence(stored: StoredResidence) -> Result<Residence> {
    let residents = stored
        .residents
        .into_iter()
        .map(from_stored_resident)
        .collect::<Result<Vec<_>>>()?;
    Ok(Residence {
        id: stored.id,
        name: stored.name,
        created_at: parse_timestamp(&stored.created_at)?,
        residents,
    })
}

fn from_stored_resident(stored: StoredResident) -> Result<Resident> {
    Ok(Resident {
        id: stored.id,
        name: stored.name,
        registered_at: parse_timestamp(&stored.registered_at)?,
        points: stored.points,
        available: stored.available,
        task_history: stored.task_history,
    })
}

fn from_stored_activity(stored: StoredActivity) -> Result<Activity> {
    let category = ActivityCategory::parse(&stored.category)
        .ok_or_else(|| anyhow!("Unknown activity category: {}", stored.category))?;
    let status = ActivityStatus::parse(&stored.status)
        .ok_or_else(|| anyhow!("Unknown activity status: {}", stored.status))?;
    let completed_at = match stored.completed_at {
        Some(ref s) => Some(parse_timestamp(s)?),
        None => None,
    };
    Ok(Activity {
        id: stored.id,
        category,
        name: stored.name,
        description: stored.description,
        status,
        created_at: parse_timestamp(&stored.created_at)?,
        completed_at,
        assignee_id: stored.assignee_id,
        points: stored.points.unwrap_or_else(|| category.points()),
    })
}

/// Parses an RFC 3339 timestamp, falling back to the offset-less ISO 8601
/// form written by the legacy implementation (interpreted as UTC).
fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Ok(t.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .with_context(|| format!("Failed to parse timestamp: {}", s))
}
