#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("pdrapport-cli").unwrap();
    // jamais de réseau dans ces tests
    cmd.env_remove("PD_TOKEN");
    cmd
}

#[test]
fn version_prints_crate_version() {
    cli()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn csv_report_renders_markdown() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "incident_number,description,created_on,resolved_on").unwrap();
    writeln!(
        file,
        "17,Disk full,2021-08-15T14:30:45+00:00,2021-08-15T16:46:15+00:00"
    )
    .unwrap();

    cli()
        .args(["--zone", "US/Arizona", "incidents", "--csv"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("| Incident | Description | Created | Resolved | Duration |"))
        .stdout(predicate::str::contains(
            "| [17](https://pagerduty.com/incidents/17) | Disk full | 2021-08-15 14:30 UTC (07:30 MST) | 2021-08-15 16:46 UTC (09:46 MST) | 2h15m30s |",
        ));
}

#[test]
fn unreadable_csv_is_fatal() {
    cli()
        .args(["incidents", "--csv", "definitely/not/here.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reading"));
}

#[test]
fn bad_since_duration_is_fatal() {
    cli()
        .args(["incidents", "--team-id", "TEAM1", "--since", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid since duration"));
}

#[test]
fn missing_token_is_fatal() {
    cli()
        .args(["incidents", "--team-id", "TEAM1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing API token"));
}

#[test]
fn team_id_and_csv_are_exclusive() {
    cli()
        .args(["incidents"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exactly one of --team-id and --csv"));
}
