use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::warn;

/// Fuseau local par défaut pour l'affichage.
pub const DEFAULT_ZONE: &str = "Europe/Berlin";

const FALLBACK: Tz = chrono_tz::Europe::Berlin;

/// Double affichage d'un instant : UTC puis heure locale d'un fuseau IANA.
#[derive(Debug, Clone, Copy)]
pub struct TimeFormatter {
    zone: Tz,
}

impl Default for TimeFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_ZONE)
    }
}

impl TimeFormatter {
    /// Résout un identifiant IANA (ex. "US/Arizona"). Un identifiant inconnu
    /// retombe sur [`DEFAULT_ZONE`] au lieu d'échouer.
    pub fn new(zone: &str) -> Self {
        let zone = zone.parse::<Tz>().unwrap_or_else(|_| {
            warn!(zone, fallback = DEFAULT_ZONE, "unknown timezone identifier");
            FALLBACK
        });
        Self { zone }
    }

    /// Ex. `"2021-08-15 14:30 UTC (07:30 MST)"`.
    pub fn format(&self, t: DateTime<Utc>) -> String {
        let local = t.with_timezone(&self.zone);
        format!(
            "{} ({})",
            t.format("%Y-%m-%d %H:%M UTC"),
            local.format("%H:%M %Z")
        )
    }
}
