use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Interés de apoyo a un proyecto (`nexus_supports`)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SupportRecord {
    pub project: String,
    /// Instante ISO-8601 en UTC con milisegundos
    pub at: String,
}

impl SupportRecord {
    pub fn now(project: &str) -> Self {
        Self {
            project: project.to_string(),
            at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
