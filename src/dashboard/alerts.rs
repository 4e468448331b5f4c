use chrono::{DateTime, Utc};
use serde::Serialize;

use super::DashboardError;

pub const DELETE_ERROR_ALERT_ID: &str = "app-config-delete-error";
pub const DELETE_DONE_ALERT_ID: &str = "app-config-delete-done";
pub const FETCH_ERROR_ALERT_ID: &str = "clusters-fetch-error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Success,
}

impl Severity {
    pub fn css_class(self) -> &'static str {
        match self {
            Severity::Error => "alert-error",
            Severity::Warning => "alert-warning",
            Severity::Success => "alert-success",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub severity: Severity,
    pub id: String,
    pub title: String,
    pub message: String,
    pub raised_at: DateTime<Utc>,
}

/// User-visible notifications. An alert replaces any earlier one with the same id.
#[derive(Debug, Default)]
pub struct AlertSink {
    alerts: Vec<Alert>,
}

impl AlertSink {
    pub fn show(&mut self, severity: Severity, id: &str, title: &str, message: String) {
        self.alerts.retain(|a| a.id != id);
        self.alerts.push(Alert {
            severity,
            id: id.to_string(),
            title: title.to_string(),
            message,
            raised_at: Utc::now(),
        });
    }

    pub fn report(&mut self, err: &DashboardError) {
        match err {
            DashboardError::DeletionFailed { cluster, .. } => self.show(
                Severity::Error,
                DELETE_ERROR_ALERT_ID,
                "Error deleting application config",
                format!(
                    "There was an error deleting the application config of cluster \"{}\"",
                    cluster
                ),
            ),
            DashboardError::FetchFailed(_) => self.show(
                Severity::Warning,
                FETCH_ERROR_ALERT_ID,
                "Could not refresh clusters",
                "The cluster list could not be loaded; showing the last known state".to_string(),
            ),
            DashboardError::Unavailable => {}
        }
    }

    pub fn dismiss(&mut self, id: &str) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|a| a.id != id);
        self.alerts.len() != before
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }
}
