#![forbid(unsafe_code)]
//! Pdrapport — rapports d'incidents et d'astreintes PagerDuty (sans BD).
//!
//! - Sources : API REST v2 ou export CSV.
//! - Normalisation en enregistrements `Incident` / `OncallShift`.
//! - Tout en UTC ; affichage double UTC + heure locale.
//! - Rendu Markdown (incidents) ou table bordée (astreintes).

pub mod io;
pub mod model;
pub mod render;
pub mod report;
pub mod source;
pub mod timefmt;

pub use model::{format_duration, Incident, OncallShift};
pub use render::{bordered_table, markdown_table, RenderError};
pub use report::{csv_report, incident_report, oncall_report, DEFAULT_BASE_URL};
pub use source::{
    ApiSource, IncidentSource, OncallSource, PdApi, RawIncident, RawOncall, RawTeam, RawUser,
    RestClient,
};
pub use timefmt::{TimeFormatter, DEFAULT_ZONE};
