//! Output formatting utilities

use anyhow::Result;
use colored::*;
use tabled::{Table, Tabled};

use crate::core::client::kube_resources::{Deployment, Pod};
use crate::core::state::runtime::notifications::{NotificationEvent, Severity};
use crate::domain::console::view::DeploymentRow;

/// Table row for pod display
#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct PodRow {
    #[tabled(rename = "NAME")]
    pub name: String,
    #[tabled(rename = "PHASE")]
    pub phase: String,
    #[tabled(rename = "NODE")]
    pub node: String,
}

impl From<&Pod> for PodRow {
    fn from(pod: &Pod) -> Self {
        Self {
            name: pod.metadata.name.clone().unwrap_or_default(),
            phase: pod
                .status
                .as_ref()
                .and_then(|s| s.phase.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            node: pod
                .spec
                .as_ref()
                .and_then(|s| s.node_name.clone())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

pub fn format_rows(namespace: &str, rows: &[DeploymentRow]) -> String {
    if rows.is_empty() {
        format!("No deployments in namespace {}", namespace)
    } else {
        Table::new(rows.to_vec()).to_string()
    }
}

pub fn print_rows(namespace: &str, rows: &[DeploymentRow]) {
    if rows.is_empty() {
        println!("{}", format_rows(namespace, rows).dimmed());
    } else {
        println!("{}", format_rows(namespace, rows));
    }
}

pub fn print_pods(namespace: &str, pods: &[Pod]) {
    if pods.is_empty() {
        println!("{}", format!("No pods in namespace {}", namespace).dimmed());
        return;
    }

    let rows: Vec<PodRow> = pods.iter().map(PodRow::from).collect();
    println!("{}", Table::new(rows));
}

pub fn print_deployment(deployment: &Deployment) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(deployment)?);
    Ok(())
}

/// Print a notification the moment it becomes visible
pub fn print_notification(event: &NotificationEvent) {
    match event.severity {
        Severity::Success => println!("{} {}", "✓".green(), event.message),
        Severity::Error => println!("{} {}", "✗".red(), event.message.red()),
    }
}

/// Print a hint that does not come from an action outcome
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}
