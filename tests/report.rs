#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use chrono::{TimeZone, Utc};
use pdrapport::source::{
    IncidentQuery, OncallQuery, PdApi, RawIncident, RawOncall, RawTeam, RawUser,
};
use pdrapport::{incident_report, oncall_report, ApiSource, TimeFormatter};

/// Collaborateur API factice : une équipe TEAM1 et un utilisateur USER1.
#[derive(Default)]
struct FakeApi {
    incidents: Vec<RawIncident>,
    oncalls: Vec<RawOncall>,
}

impl PdApi for FakeApi {
    fn team(&self, team_id: &str) -> Result<RawTeam> {
        if team_id != "TEAM1" {
            bail!("HTTP 404: no such team {team_id}");
        }
        Ok(RawTeam {
            id: team_id.to_string(),
            name: "Paiements".to_string(),
        })
    }

    fn user(&self, user_id: &str) -> Result<RawUser> {
        if user_id != "USER1" {
            bail!("HTTP 404: no such user {user_id}");
        }
        Ok(RawUser {
            id: user_id.to_string(),
            name: "Alice Martin".to_string(),
        })
    }

    fn list_incidents(&self, query: &IncidentQuery) -> Result<Vec<RawIncident>> {
        assert_eq!(query.team_id, "TEAM1");
        assert_eq!(query.statuses, ["triggered", "acknowledged", "resolved"]);
        Ok(self.incidents.clone())
    }

    fn list_oncalls(&self, query: &OncallQuery) -> Result<Vec<RawOncall>> {
        assert_eq!(query.user_id, "USER1");
        Ok(self.oncalls.clone())
    }
}

fn arizona() -> TimeFormatter {
    TimeFormatter::new("US/Arizona")
}

#[test]
fn incident_report_renders_markdown() {
    let api = FakeApi {
        incidents: vec![RawIncident {
            number: 4321,
            description: "Server on fire".into(),
            created_at: "2021-08-15T14:30:45Z".into(),
            last_status_change_at: "2021-08-15T16:46:15Z".into(),
        }],
        ..FakeApi::default()
    };
    let source = ApiSource::new(api);
    let since = Utc.with_ymd_and_hms(2021, 8, 1, 0, 0, 0).unwrap();

    let out = incident_report(
        &source,
        "TEAM1",
        since,
        &arizona(),
        "https://pagerduty.com",
    )
    .unwrap();

    insta::assert_snapshot!(out, @r"
    | Incident | Description | Created | Resolved | Duration |
    | --- | --- | --- | --- | --- |
    | [4321](https://pagerduty.com/incidents/4321) | Server on fire | 2021-08-15 14:30 UTC (07:30 MST) | 2021-08-15 16:46 UTC (09:46 MST) | 2h15m30s |
    ");
}

#[test]
fn records_with_bad_timestamps_are_skipped() {
    let api = FakeApi {
        incidents: vec![
            RawIncident {
                number: 1,
                description: "kept".into(),
                created_at: "2021-08-15T14:30:45Z".into(),
                last_status_change_at: "2021-08-15T15:30:45Z".into(),
            },
            RawIncident {
                number: 2,
                description: "dropped".into(),
                created_at: "not-a-time".into(),
                last_status_change_at: "2021-08-15T15:30:45Z".into(),
            },
        ],
        ..FakeApi::default()
    };
    let source = ApiSource::new(api);
    let since = Utc.with_ymd_and_hms(2021, 8, 1, 0, 0, 0).unwrap();

    let out = incident_report(
        &source,
        "TEAM1",
        since,
        &arizona(),
        "https://pagerduty.com",
    )
    .unwrap();

    // en-tête + séparateur + une seule ligne de données
    assert_eq!(out.lines().count(), 3);
    assert!(out.contains("kept"));
    assert!(!out.contains("dropped"));
}

#[test]
fn unknown_team_is_fatal() {
    let source = ApiSource::new(FakeApi::default());
    let since = Utc.with_ymd_and_hms(2021, 8, 1, 0, 0, 0).unwrap();

    let err = incident_report(
        &source,
        "NOPE",
        since,
        &arizona(),
        "https://pagerduty.com",
    )
    .unwrap_err();
    assert!(format!("{err:#}").contains("looking up team NOPE"));
}

#[test]
fn oncall_report_renders_bordered_table() {
    let api = FakeApi {
        oncalls: vec![RawOncall {
            schedule: "Primary".into(),
            start: "2021-08-15T18:00:00Z".into(),
            end: "2021-08-16T09:00:00Z".into(),
        }],
        ..FakeApi::default()
    };
    let source = ApiSource::new(api);
    let since = Utc.with_ymd_and_hms(2021, 8, 1, 0, 0, 0).unwrap();

    let out = oncall_report(&source, "USER1", since, &arizona()).unwrap();
    assert!(out.starts_with('+'));
    assert!(out.contains("Alice Martin"));
    assert!(out.contains("Primary"));
    assert!(out.contains("2021-08-15 18:00 UTC (11:00 MST)"));
}

#[test]
fn unknown_user_is_fatal() {
    let source = ApiSource::new(FakeApi::default());
    let since = Utc.with_ymd_and_hms(2021, 8, 1, 0, 0, 0).unwrap();

    let err = oncall_report(&source, "NOPE", since, &arizona()).unwrap_err();
    assert!(format!("{err:#}").contains("looking up user NOPE"));
}
