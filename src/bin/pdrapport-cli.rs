#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use clap::{Parser, Subcommand};
use pdrapport::{
    report,
    source::{ApiSource, RestClient, DEFAULT_API_URL},
    timefmt::{TimeFormatter, DEFAULT_ZONE},
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// Variable d'environnement portant le jeton API.
const PD_TOKEN_ENV: &str = "PD_TOKEN";

/// CLI minimaliste de rapports PagerDuty
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs
    #[arg(long, global = true)]
    log: bool,

    /// Fuseau IANA pour l'affichage local des horodatages
    #[arg(long, global = true, default_value = DEFAULT_ZONE)]
    zone: String,

    /// URL de base du compte (liens d'incidents)
    #[arg(long, global = true, default_value = report::DEFAULT_BASE_URL)]
    base_url: String,

    /// URL de base de l'API REST
    #[arg(long, global = true, default_value = DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rapport Markdown des incidents d'une équipe (API ou export CSV)
    Incidents {
        /// Équipe PagerDuty à interroger
        #[arg(long, conflicts_with = "csv")]
        team_id: Option<String>,

        /// Export CSV d'incidents à lire à la place de l'API
        #[arg(long)]
        csv: Option<String>,

        /// Fenêtre de temps, ex. "168h" ou "7d"
        #[arg(long, default_value = "168h")]
        since: String,
    },

    /// Table bordée des astreintes d'un utilisateur
    Oncall {
        #[arg(long)]
        user_id: String,

        /// Date de début, format AAAA-MM-JJ
        #[arg(long)]
        since: String,
    },

    /// Affiche la version puis quitte
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let fmt = TimeFormatter::new(&cli.zone);

    match cli.cmd {
        Commands::Incidents {
            team_id,
            csv,
            since,
        } => {
            let out = match (team_id, csv) {
                (None, Some(path)) => report::csv_report(expand_home(&path), &fmt, &cli.base_url)?,
                (Some(team), None) => {
                    let since = Utc::now() - parse_since_duration(&since)?;
                    let source = ApiSource::new(rest_client(&cli.api_url)?);
                    report::incident_report(&source, &team, since, &fmt, &cli.base_url)?
                }
                _ => bail!("exactly one of --team-id and --csv is required"),
            };
            println!("{out}");
        }
        Commands::Oncall { user_id, since } => {
            let since = parse_since_date(&since)?;
            let source = ApiSource::new(rest_client(&cli.api_url)?);
            let out = report::oncall_report(&source, &user_id, since, &fmt)?;
            println!("{out}");
        }
        Commands::Version => println!("{}", env!("CARGO_PKG_VERSION")),
    }

    Ok(())
}

fn rest_client(api_url: &str) -> Result<RestClient> {
    let token = std::env::var(PD_TOKEN_ENV)
        .with_context(|| format!("missing API token: set {PD_TOKEN_ENV}"))?;
    RestClient::with_base_url(token, api_url)
}

/// "168h" ou "7d" → durée.
fn parse_since_duration(raw: &str) -> Result<Duration> {
    let raw = raw.trim();
    if let Some(hours) = raw.strip_suffix('h') {
        let hours: i64 = hours
            .parse()
            .with_context(|| format!("invalid since duration: {raw}"))?;
        return Ok(Duration::hours(hours));
    }
    if let Some(days) = raw.strip_suffix('d') {
        let days: i64 = days
            .parse()
            .with_context(|| format!("invalid since duration: {raw}"))?;
        return Ok(Duration::days(days));
    }
    bail!("invalid since duration: {raw} (expected e.g. \"168h\" or \"7d\")");
}

/// "2021-08-15" → minuit UTC.
fn parse_since_date(raw: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("invalid since date: {raw} (expected YYYY-MM-DD)"))?;
    let midnight = date.and_hms_opt(0, 0, 0).context("invalid midnight conversion")?;
    Ok(Utc.from_utc_datetime(&midnight))
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return Path::new(&home).join(rest);
        }
    }
    PathBuf::from(path)
}
