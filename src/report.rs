use crate::io;
use crate::model::{Incident, OncallShift};
use crate::render;
use crate::source::{IncidentSource, OncallSource};
use crate::timefmt::TimeFormatter;
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::Path;

/// URL de base du compte PagerDuty (liens d'incidents dans le Markdown).
pub const DEFAULT_BASE_URL: &str = "https://pagerduty.com";

const INCIDENT_HEADER: &[&str] = &["Incident", "Description", "Created", "Resolved", "Duration"];
const ONCALL_HEADER: &[&str] = &["User", "Schedule", "Start", "End"];

/// Rapport Markdown des incidents d'une équipe depuis une source.
pub fn incident_report(
    source: &dyn IncidentSource,
    team_id: &str,
    since: DateTime<Utc>,
    fmt: &TimeFormatter,
    base_url: &str,
) -> Result<String> {
    let incidents = source.incidents_for_team(team_id, since)?;
    let rows = incident_rows(&incidents, fmt, base_url);
    Ok(render::markdown_table(INCIDENT_HEADER, &rows)?)
}

/// Rapport Markdown des incidents d'un export CSV (déjà filtré côté export,
/// pas de notion d'équipe ni de fenêtre de temps ici).
pub fn csv_report<P: AsRef<Path>>(path: P, fmt: &TimeFormatter, base_url: &str) -> Result<String> {
    let incidents = io::read_incidents_csv(path)?;
    let rows = incident_rows(&incidents, fmt, base_url);
    Ok(render::markdown_table(INCIDENT_HEADER, &rows)?)
}

/// Table bordée des astreintes d'un utilisateur.
pub fn oncall_report(
    source: &dyn OncallSource,
    user_id: &str,
    since: DateTime<Utc>,
    fmt: &TimeFormatter,
) -> Result<String> {
    let shifts = source.shifts_for_user(user_id, since)?;
    let rows = oncall_rows(&shifts, fmt);
    Ok(render::bordered_table(ONCALL_HEADER, &rows)?)
}

/// Projette des incidents en lignes d'affichage, numéro rendu en lien
/// Markdown vers le compte.
pub fn incident_rows(
    incidents: &[Incident],
    fmt: &TimeFormatter,
    base_url: &str,
) -> Vec<Vec<String>> {
    incidents
        .iter()
        .map(|i| {
            vec![
                format!("[{}]({})", i.number, i.url(base_url)),
                i.description.clone(),
                fmt.format(i.created_at),
                fmt.format(i.resolved_at),
                i.duration(),
            ]
        })
        .collect()
}

pub fn oncall_rows(shifts: &[OncallShift], fmt: &TimeFormatter) -> Vec<Vec<String>> {
    shifts
        .iter()
        .map(|s| {
            vec![
                s.user.clone(),
                s.schedule.clone(),
                fmt.format(s.start),
                fmt.format(s.end),
            ]
        })
        .collect()
}
