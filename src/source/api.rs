use super::{IncidentSource, OncallSource, INCIDENT_STATUSES};
use crate::model::{Incident, OncallShift};
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::warn;

/// Format des horodatages échangés avec l'API PagerDuty.
pub(crate) const API_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Debug, Clone)]
pub struct RawTeam {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct RawUser {
    pub id: String,
    pub name: String,
}

/// Incident brut renvoyé par le collaborateur API, horodatages non parsés.
#[derive(Debug, Clone)]
pub struct RawIncident {
    pub number: u32,
    pub description: String,
    pub created_at: String,
    pub last_status_change_at: String,
}

#[derive(Debug, Clone)]
pub struct RawOncall {
    pub schedule: String,
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone)]
pub struct IncidentQuery {
    pub team_id: String,
    pub statuses: Vec<String>,
    pub since: String,
}

#[derive(Debug, Clone)]
pub struct OncallQuery {
    pub user_id: String,
    pub since: String,
}

/// Collaborateur API PagerDuty. Authentification, pagination et relances
/// restent de son ressort.
pub trait PdApi {
    fn team(&self, team_id: &str) -> Result<RawTeam>;
    fn user(&self, user_id: &str) -> Result<RawUser>;
    fn list_incidents(&self, query: &IncidentQuery) -> Result<Vec<RawIncident>>;
    fn list_oncalls(&self, query: &OncallQuery) -> Result<Vec<RawOncall>>;
}

/// Source adossée à l'API : un lookup d'équipe ou d'utilisateur raté est
/// fatal, un enregistrement invalide est journalisé puis sauté.
pub struct ApiSource<C> {
    client: C,
}

impl<C: PdApi> ApiSource<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

impl<C: PdApi> IncidentSource for ApiSource<C> {
    fn incidents_for_team(&self, team_id: &str, since: DateTime<Utc>) -> Result<Vec<Incident>> {
        let team = self
            .client
            .team(team_id)
            .with_context(|| format!("looking up team {team_id}"))?;
        println!(
            "Getting incidents for team '{}', with ID '{}':",
            team.name, team_id
        );

        let query = IncidentQuery {
            team_id: team_id.to_string(),
            statuses: INCIDENT_STATUSES.iter().map(|s| s.to_string()).collect(),
            since: since.format(API_TIMESTAMP).to_string(),
        };
        let raw = self
            .client
            .list_incidents(&query)
            .with_context(|| format!("listing incidents for team {team_id}"))?;

        let mut out = Vec::with_capacity(raw.len());
        for inc in raw {
            let created_at = match parse_api_timestamp(&inc.created_at) {
                Ok(t) => t,
                Err(err) => {
                    warn!(incident = inc.number, %err, "skipping incident: bad created_at");
                    continue;
                }
            };
            let resolved_at = match parse_api_timestamp(&inc.last_status_change_at) {
                Ok(t) => t,
                Err(err) => {
                    warn!(incident = inc.number, %err, "skipping incident: bad last_status_change_at");
                    continue;
                }
            };
            out.push(Incident {
                number: inc.number,
                description: inc.description,
                created_at,
                resolved_at,
            });
        }
        Ok(out)
    }
}

impl<C: PdApi> OncallSource for ApiSource<C> {
    fn shifts_for_user(&self, user_id: &str, since: DateTime<Utc>) -> Result<Vec<OncallShift>> {
        let user = self
            .client
            .user(user_id)
            .with_context(|| format!("looking up user {user_id}"))?;
        let since_str = since.format(API_TIMESTAMP).to_string();
        println!(
            "Getting on-call times for user '{}', with ID '{}' since {}:",
            user.name, user_id, since_str
        );

        let query = OncallQuery {
            user_id: user_id.to_string(),
            since: since_str,
        };
        let raw = self
            .client
            .list_oncalls(&query)
            .with_context(|| format!("listing on-call shifts for user {user_id}"))?;

        let mut out = Vec::with_capacity(raw.len());
        for oc in raw {
            let start = match parse_api_timestamp(&oc.start) {
                Ok(t) => t,
                Err(err) => {
                    warn!(schedule = %oc.schedule, %err, "skipping shift: bad start");
                    continue;
                }
            };
            let end = match parse_api_timestamp(&oc.end) {
                Ok(t) => t,
                Err(err) => {
                    warn!(schedule = %oc.schedule, %err, "skipping shift: bad end");
                    continue;
                }
            };
            out.push(OncallShift {
                user: user.name.clone(),
                start,
                end,
                schedule: oc.schedule,
            });
        }
        Ok(out)
    }
}

fn parse_api_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(raw.trim(), API_TIMESTAMP)
        .with_context(|| format!("invalid timestamp: {raw}"))?;
    Ok(naive.and_utc())
}
