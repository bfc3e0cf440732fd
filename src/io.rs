use crate::model::Incident;
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use csv::ReaderBuilder;
use std::fs;
use std::path::Path;
use tracing::warn;

/// En-têtes requis d'un export CSV PagerDuty (ordre des colonnes libre).
const NUMBER_HEADER: &str = "incident_number";
const DESCRIPTION_HEADER: &str = "description";
const CREATED_HEADER: &str = "created_on";
const RESOLVED_HEADER: &str = "resolved_on";

/// Format des horodatages dans l'export CSV.
const CSV_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Lit un export CSV d'incidents : lecture complète en mémoire (le fichier
/// est refermé avant parsing), puis [`parse_records`].
pub fn read_incidents_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Incident>> {
    let path = path.as_ref();
    let data =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .from_reader(data.as_bytes());
    let mut rows: Vec<Vec<String>> = Vec::new();
    for rec in rdr.records() {
        let rec = rec.with_context(|| format!("parsing {} as CSV", path.display()))?;
        rows.push(rec.iter().map(str::to_string).collect());
    }
    parse_records(&rows)
}

struct Columns {
    number: usize,
    description: usize,
    created: usize,
    resolved: usize,
}

fn resolve_columns(header: &[String]) -> Result<Columns> {
    let find = |name: &str| {
        header
            .iter()
            .position(|h| h.trim() == name)
            .with_context(|| format!("missing required column: {name}"))
    };
    Ok(Columns {
        number: find(NUMBER_HEADER)?,
        description: find(DESCRIPTION_HEADER)?,
        created: find(CREATED_HEADER)?,
        resolved: find(RESOLVED_HEADER)?,
    })
}

/// Parse des lignes tabulaires : ligne 0 = en-tête, colonnes résolues par
/// nom, en-têtes inconnus ignorés. Une ligne de données invalide est
/// journalisée puis sautée, le parsing continue ; l'ordre d'entrée est
/// conservé. Seuls une entrée vide ou un en-tête requis absent sont fatals.
pub fn parse_records(rows: &[Vec<String>]) -> Result<Vec<Incident>> {
    let Some((header, data)) = rows.split_first() else {
        bail!("empty CSV input: header row required");
    };
    let cols = resolve_columns(header)?;

    let mut out = Vec::with_capacity(data.len());
    for (idx, row) in data.iter().enumerate() {
        match parse_row(row, &cols) {
            Ok(incident) => out.push(incident),
            Err(err) => warn!(row = idx + 1, %err, "skipping unparsable row"),
        }
    }
    Ok(out)
}

fn parse_row(row: &[String], cols: &Columns) -> Result<Incident> {
    let cell = |idx: usize| {
        row.get(idx)
            .map(String::as_str)
            .with_context(|| format!("row too short: no column {idx}"))
    };
    let number = cell(cols.number)?
        .trim()
        .parse::<u32>()
        .context("incident number")?;
    let description = cell(cols.description)?.to_string();
    let created_at = parse_csv_timestamp(cell(cols.created)?).context("created_on")?;
    let resolved_at = parse_csv_timestamp(cell(cols.resolved)?).context("resolved_on")?;
    Ok(Incident {
        number,
        description,
        created_at,
        resolved_at,
    })
}

fn parse_csv_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    let dt = DateTime::parse_from_str(raw.trim(), CSV_TIMESTAMP)
        .with_context(|| format!("invalid timestamp: {raw}"))?;
    Ok(dt.with_timezone(&Utc))
}
