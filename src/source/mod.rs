mod api;
mod rest;

pub use api::{ApiSource, IncidentQuery, OncallQuery, PdApi, RawIncident, RawOncall, RawTeam, RawUser};
pub use rest::{RestClient, DEFAULT_API_URL};

use crate::model::{Incident, OncallShift};
use anyhow::Result;
use chrono::{DateTime, Utc};

/// Statuts d'incidents retenus dans les rapports.
pub const INCIDENT_STATUSES: &[&str] = &["triggered", "acknowledged", "resolved"];

/// Fournit des incidents normalisés, d'où qu'ils viennent.
pub trait IncidentSource {
    fn incidents_for_team(&self, team_id: &str, since: DateTime<Utc>) -> Result<Vec<Incident>>;
}

/// Fournit des créneaux d'astreinte normalisés.
pub trait OncallSource {
    fn shifts_for_user(&self, user_id: &str, since: DateTime<Utc>) -> Result<Vec<OncallShift>>;
}
