use serde::Serialize;
use tabled::Tabled;

use crate::domain::deployment::dto::deployment_summary::DeploymentSummary;

/// Display row for one deployment, with its actions bound at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct DeploymentRow {
    #[tabled(rename = "NAME")]
    pub name: String,
    #[tabled(rename = "REPLICAS")]
    pub replicas: i32,
}

/// An operator intent against one rendered row.
///
/// Scale targets are widened to `i64` so `r ± 1` never overflows; values the
/// server cannot hold are its to reject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    Scale { name: String, target: i64 },
    Delete { name: String },
}

impl DeploymentRow {
    pub fn scale_up(&self) -> RowAction {
        RowAction::Scale {
            name: self.name.clone(),
            target: i64::from(self.replicas) + 1,
        }
    }

    /// No floor at zero: `0 → -1` is sent and left for the server to reject.
    pub fn scale_down(&self) -> RowAction {
        RowAction::Scale {
            name: self.name.clone(),
            target: i64::from(self.replicas) - 1,
        }
    }

    pub fn delete(&self) -> RowAction {
        RowAction::Delete {
            name: self.name.clone(),
        }
    }
}

impl From<&DeploymentSummary> for DeploymentRow {
    fn from(d: &DeploymentSummary) -> Self {
        Self {
            name: d.name.clone(),
            replicas: d.replicas,
        }
    }
}

/// Full re-render: one row per deployment, server order preserved.
pub fn render_rows(deployments: &[DeploymentSummary]) -> Vec<DeploymentRow> {
    deployments.iter().map(DeploymentRow::from).collect()
}
