use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Incident PagerDuty normalisé (valeur immuable, sans identité propre).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    pub number: u32,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub resolved_at: DateTime<Utc>,
}

impl Incident {
    /// URL de l'incident sur le compte PagerDuty.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}/incidents/{}", base_url.trim_end_matches('/'), self.number)
    }

    /// Durée `resolved_at - created_at` rendue en "2h15m30s".
    ///
    /// `resolved_at < created_at` n'est pas une erreur : la durée s'affiche
    /// simplement avec un signe.
    pub fn duration(&self) -> String {
        format_duration(self.resolved_at - self.created_at)
    }
}

/// Créneau d'astreinte normalisé.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OncallShift {
    pub user: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub schedule: String,
}

/// Rend une durée en unités h/m/s ("2h0m30s", "1m30s", "45s", "0s").
pub fn format_duration(d: Duration) -> String {
    let total = d.num_seconds();
    if total == 0 {
        return "0s".to_string();
    }
    let sign = if total < 0 { "-" } else { "" };
    let total = total.unsigned_abs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    if hours > 0 {
        format!("{sign}{hours}h{minutes}m{seconds}s")
    } else if minutes > 0 {
        format!("{sign}{minutes}m{seconds}s")
    } else {
        format!("{sign}{seconds}s")
    }
}
