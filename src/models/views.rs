use serde::Serialize;

use crate::dashboard::alerts::Alert;
use crate::models::api::ServerStatus;

/// Everything the dashboard page shows, computed by the controller on each render.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardPage {
    pub online_count: usize,
    pub offline_count: usize,
    pub show_offline_only: bool,
    pub columns: Vec<Column>,
    pub rows: Vec<ClusterRowView>,
    pub empty_message: String,
    pub new_cluster: Option<NewClusterAction>,
    pub alerts: Vec<Alert>,
    pub last_updated: String,
    pub fetch_error: Option<String>,
    /// A fetch or delete is outstanding; the page keeps polling while set.
    pub busy: bool,
}

impl DashboardPage {
    #[cfg(test)]
    pub fn has_actions_column(&self) -> bool {
        self.columns.iter().any(|c| c.id == ACTIONS_COLUMN)
    }
}

pub const ACTIONS_COLUMN: &str = "actions";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    pub id: &'static str,
    pub header: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClusterRowView {
    pub name: String,
    pub overview_url: String,
    pub version: String,
    pub status: ServerStatus,
    pub status_class: String,
    pub read_only: bool,
    pub broker_count: u64,
    pub online_partition_count: u64,
    pub topic_count: u64,
    pub production: String,
    pub consumption: String,
    pub actions: Option<RowActionsView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RowActionsView {
    pub settings_url: String,
    pub enabled: bool,
    pub delete_path: String,
    pub dialog: Option<DeleteDialogView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeleteDialogView {
    pub cluster: String,
    pub message: String,
    pub confirm_path: String,
    pub cancel_path: String,
    /// Buttons are disabled until the delete call resolves.
    pub in_flight: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewClusterAction {
    pub url: String,
    pub enabled: bool,
}
