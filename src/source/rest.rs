use super::api::{IncidentQuery, OncallQuery, PdApi, RawIncident, RawOncall, RawTeam, RawUser};
use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use serde::Deserialize;

/// URL par défaut de l'API REST v2.
pub const DEFAULT_API_URL: &str = "https://api.pagerduty.com";

/// Liaison REST minimaliste : une page par listing, pas de relance, pas de
/// cache. Le jeton part dans l'en-tête `Authorization`.
pub struct RestClient {
    http: Client,
    base_url: String,
    token: String,
}

impl RestClient {
    pub fn new<S: Into<String>>(token: S) -> Result<Self> {
        Self::with_base_url(token, DEFAULT_API_URL)
    }

    pub fn with_base_url<S: Into<String>, U: Into<String>>(token: S, base_url: U) -> Result<Self> {
        let http = Client::builder().build().context("building HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn get<T: for<'de> Deserialize<'de>>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .http
            .get(&url)
            .header("Authorization", format!("Token token={}", self.token))
            .header("Accept", "application/vnd.pagerduty+json;version=2")
            .query(query)
            .send()
            .with_context(|| format!("GET {url}"))?;
        let status = resp.status();
        let body = resp
            .text()
            .with_context(|| format!("reading body of GET {url}"))?;
        if !status.is_success() {
            bail!("GET {url}: HTTP {status}");
        }
        serde_json::from_str(&body).with_context(|| format!("decoding body of GET {url}"))
    }
}

#[derive(Deserialize)]
struct TeamEnvelope {
    team: NamedBody,
}

#[derive(Deserialize)]
struct UserEnvelope {
    user: NamedBody,
}

#[derive(Deserialize)]
struct NamedBody {
    id: String,
    #[serde(default)]
    name: String,
}

#[derive(Deserialize)]
struct IncidentsEnvelope {
    incidents: Vec<IncidentBody>,
}

#[derive(Deserialize)]
struct IncidentBody {
    incident_number: u32,
    #[serde(default)]
    description: String,
    created_at: String,
    last_status_change_at: String,
}

#[derive(Deserialize)]
struct OncallsEnvelope {
    oncalls: Vec<OncallBody>,
}

#[derive(Deserialize)]
struct OncallBody {
    schedule: Option<SummaryBody>,
    start: String,
    end: String,
}

#[derive(Deserialize)]
struct SummaryBody {
    #[serde(default)]
    summary: String,
}

impl PdApi for RestClient {
    fn team(&self, team_id: &str) -> Result<RawTeam> {
        let env: TeamEnvelope = self.get(&format!("/teams/{team_id}"), &[])?;
        Ok(RawTeam {
            id: env.team.id,
            name: env.team.name,
        })
    }

    fn user(&self, user_id: &str) -> Result<RawUser> {
        let env: UserEnvelope = self.get(&format!("/users/{user_id}"), &[])?;
        Ok(RawUser {
            id: env.user.id,
            name: env.user.name,
        })
    }

    fn list_incidents(&self, query: &IncidentQuery) -> Result<Vec<RawIncident>> {
        let mut params: Vec<(&str, &str)> = vec![
            ("team_ids[]", query.team_id.as_str()),
            ("since", query.since.as_str()),
        ];
        for status in &query.statuses {
            params.push(("statuses[]", status));
        }
        let env: IncidentsEnvelope = self.get("/incidents", &params)?;
        Ok(env
            .incidents
            .into_iter()
            .map(|i| RawIncident {
                number: i.incident_number,
                description: i.description,
                created_at: i.created_at,
                last_status_change_at: i.last_status_change_at,
            })
            .collect())
    }

    fn list_oncalls(&self, query: &OncallQuery) -> Result<Vec<RawOncall>> {
        let params = [
            ("user_ids[]", query.user_id.as_str()),
            ("since", query.since.as_str()),
        ];
        let env: OncallsEnvelope = self.get("/oncalls", &params)?;
        Ok(env
            .oncalls
            .into_iter()
            .map(|o| RawOncall {
                schedule: o.schedule.map(|s| s.summary).unwrap_or_default(),
                start: o.start,
                end: o.end,
            })
            .collect())
    }
}
