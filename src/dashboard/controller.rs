use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::clients::ClientError;
use crate::helpers::{human_rate, human_time};
use crate::models::api::{ApplicationInfo, AuthenticationInfo, ClusterSummary, ServerStatus};
use crate::models::views::*;

use super::DashboardError;
use super::alerts::{AlertSink, DELETE_DONE_ALERT_ID, FETCH_ERROR_ALERT_ID, Severity};
use super::delete_flow::{DeleteFlowState, DeleteFlows, FlowEffect, FlowEvent};
use super::filter::project;
use super::navigation::Navigation;
use super::permissions::{self, CLUSTER_CONFIG_RESOURCE, Capabilities, UserContext};
use super::store::{ClusterSummaryStore, FetchOutcome, FetchTicket};

const CLUSTER_COLUMNS: [Column; 7] = [
    Column { id: "name", header: "Cluster name" },
    Column { id: "version", header: "Version" },
    Column { id: "brokerCount", header: "Brokers count" },
    Column { id: "onlinePartitionCount", header: "Partitions" },
    Column { id: "topicCount", header: "Topics" },
    Column { id: "bytesInPerSec", header: "Production" },
    Column { id: "bytesOutPerSec", header: "Consumption" },
];

/// Orders session loads the way `FetchTicket` orders cluster listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SessionTicket(u64);

/// Operator interactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {
    ToggleOfflineOnly,
    Refresh,
    RequestDelete(String),
    CancelDelete(String),
    ConfirmDelete(String),
    DismissAlert(String),
}

/// Results of I/O the controller asked for.
#[derive(Debug)]
pub enum Completion {
    ClustersFetched {
        ticket: FetchTicket,
        result: Result<Vec<ClusterSummary>, ClientError>,
    },
    SessionLoaded {
        ticket: SessionTicket,
        user: Result<AuthenticationInfo, ClientError>,
        app: Result<ApplicationInfo, ClientError>,
    },
    DeleteSucceeded {
        cluster: String,
    },
    DeleteFailed {
        cluster: String,
        error: ClientError,
    },
}

/// I/O the runtime must perform on the controller's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchClusters(FetchTicket),
    LoadSession(SessionTicket),
    DeleteAppConfig(String),
}

pub struct DashboardController {
    store: ClusterSummaryStore,
    show_offline_only: bool,
    flows: DeleteFlows,
    user: UserContext,
    capabilities: Capabilities,
    sessions_issued: u64,
    session_applied: u64,
    dynamic_config_override: Option<bool>,
    alerts: AlertSink,
    navigation: Navigation,
}

impl DashboardController {
    pub fn new(navigation: Navigation, dynamic_config_override: Option<bool>) -> Self {
        Self {
            store: ClusterSummaryStore::new(),
            show_offline_only: false,
            flows: DeleteFlows::default(),
            user: UserContext::default(),
            capabilities: Capabilities::default(),
            sessions_issued: 0,
            session_applied: 0,
            dynamic_config_override,
            alerts: AlertSink::default(),
            navigation,
        }
    }

    pub fn start(&mut self) -> Vec<Command> {
        let mut commands = vec![self.load_session()];
        if let Some(ticket) = self.store.fetch() {
            commands.push(Command::FetchClusters(ticket));
        }
        commands
    }

    pub fn handle_user(&mut self, event: UserEvent) -> Vec<Command> {
        let commands = match event {
            UserEvent::ToggleOfflineOnly => {
                self.show_offline_only = !self.show_offline_only;
                Vec::new()
            }
            UserEvent::Refresh => {
                vec![Command::FetchClusters(self.store.refetch()), self.load_session()]
            }
            UserEvent::RequestDelete(cluster) => {
                if self.actions_enabled() && self.is_visible(&cluster) {
                    self.transition(&cluster, FlowEvent::Request)
                } else {
                    debug!("ignoring delete request for cluster {:?}: no action available", cluster);
                    Vec::new()
                }
            }
            UserEvent::CancelDelete(cluster) => self.transition(&cluster, FlowEvent::Cancel),
            UserEvent::ConfirmDelete(cluster) => {
                if self.actions_enabled() {
                    self.transition(&cluster, FlowEvent::Confirm)
                } else {
                    debug!("ignoring delete confirmation for cluster {:?}: not permitted", cluster);
                    Vec::new()
                }
            }
            UserEvent::DismissAlert(id) => {
                self.alerts.dismiss(&id);
                Vec::new()
            }
        };

        self.sync_flows();
        commands
    }

    pub fn handle_completion(&mut self, completion: Completion) -> Vec<Command> {
        let commands = match completion {
            Completion::ClustersFetched { ticket, result } => {
                match self.store.complete(ticket, result) {
                    FetchOutcome::Applied { clusters } => {
                        debug!("cluster snapshot replaced ({} clusters)", clusters);
                        self.alerts.dismiss(FETCH_ERROR_ALERT_ID);
                    }
                    FetchOutcome::Failed(err) => {
                        warn!("{}", err);
                        self.alerts.report(&err);
                    }
                    FetchOutcome::Stale => debug!("discarding stale cluster listing {:?}", ticket),
                }
                Vec::new()
            }
            Completion::SessionLoaded { ticket, user, app } => {
                if ticket.0 < self.session_applied {
                    debug!("discarding stale session {:?}", ticket);
                    return Vec::new();
                }
                self.session_applied = ticket.0;
                match user {
                    Ok(info) => self.user = info.into(),
                    Err(e) => warn!("loading user info: {}", e),
                }
                match app {
                    Ok(info) => self.capabilities = Capabilities::from(&info),
                    Err(e) => warn!("loading application info: {}", e),
                }
                Vec::new()
            }
            Completion::DeleteSucceeded { cluster } => {
                let commands = self.transition(&cluster, FlowEvent::Succeeded);
                if !commands.is_empty() {
                    info!("deleted application config of cluster {:?}", cluster);
                    self.alerts.show(
                        Severity::Success,
                        DELETE_DONE_ALERT_ID,
                        "Application config deleted",
                        format!("Cluster \"{}\" was removed", cluster),
                    );
                }
                commands
            }
            Completion::DeleteFailed { cluster, error } => {
                if self.flows.apply(&cluster, FlowEvent::Failed) == Some(FlowEffect::ReportFailure) {
                    let err = DashboardError::DeletionFailed { cluster, source: error };
                    warn!("{}", err);
                    self.alerts.report(&err);
                } else {
                    debug!("dropping delete failure for cluster {:?}: no pending flow", cluster);
                }
                Vec::new()
            }
        };

        self.sync_flows();
        commands
    }

    fn load_session(&mut self) -> Command {
        self.sessions_issued += 1;
        Command::LoadSession(SessionTicket(self.sessions_issued))
    }

    fn transition(&mut self, cluster: &str, event: FlowEvent) -> Vec<Command> {
        match self.flows.apply(cluster, event) {
            None => {
                debug!(
                    "ignoring {:?} for cluster {:?} in state {:?}",
                    event,
                    cluster,
                    self.flows.state(cluster)
                );
                Vec::new()
            }
            Some(FlowEffect::IssueDelete) => {
                info!("deleting application config of cluster {:?}", cluster);
                vec![Command::DeleteAppConfig(cluster.to_string())]
            }
            Some(FlowEffect::Refetch) => vec![Command::FetchClusters(self.store.refetch())],
            Some(FlowEffect::None) | Some(FlowEffect::ReportFailure) => Vec::new(),
        }
    }

    /// Drops flows of rows that are no longer rendered with an action cell.
    fn sync_flows(&mut self) {
        if !self.actions_enabled() {
            self.flows.retain_rows(&HashSet::new());
            return;
        }
        let view = project(self.store.snapshot(), self.show_offline_only);
        let visible: HashSet<&str> = view.list.iter().map(|c| c.name.as_str()).collect();
        self.flows.retain_rows(&visible);
    }

    fn is_visible(&self, cluster: &str) -> bool {
        project(self.store.snapshot(), self.show_offline_only)
            .list
            .iter()
            .any(|c| c.name == cluster)
    }

    pub fn has_dynamic_config(&self) -> bool {
        self.dynamic_config_override
            .unwrap_or(self.capabilities.has_dynamic_config)
    }

    pub fn can_act(&self) -> bool {
        permissions::can_act(&self.user, CLUSTER_CONFIG_RESOURCE)
    }

    fn actions_enabled(&self) -> bool {
        self.has_dynamic_config() && self.can_act()
    }

    #[cfg(test)]
    pub fn flow_state(&self, cluster: &str) -> DeleteFlowState {
        self.flows.state(cluster)
    }

    pub fn render(&self) -> DashboardPage {
        let view = project(self.store.snapshot(), self.show_offline_only);
        let has_dynamic_config = self.has_dynamic_config();
        let can_act = self.can_act();

        let mut columns = CLUSTER_COLUMNS.to_vec();
        if has_dynamic_config {
            columns.push(Column {
                id: ACTIONS_COLUMN,
                header: "",
            });
        }

        let rows = view
            .list
            .iter()
            .map(|c| self.build_row(c, has_dynamic_config, can_act))
            .collect();

        let empty_message = if self.store.is_fetched() {
            "No clusters found"
        } else {
            "Loading..."
        };

        DashboardPage {
            online_count: view.online_count,
            offline_count: view.offline_count,
            show_offline_only: self.show_offline_only,
            columns,
            rows,
            empty_message: empty_message.to_string(),
            new_cluster: has_dynamic_config.then(|| NewClusterAction {
                url: self.navigation.new_cluster_config(),
                enabled: can_act,
            }),
            alerts: self.alerts.alerts().to_vec(),
            last_updated: human_time(self.store.last_updated()),
            fetch_error: self.store.last_error().map(str::to_string),
            busy: self.store.is_pending() || self.flows.any_in_flight(),
        }
    }

    fn build_row(&self, c: &ClusterSummary, has_dynamic_config: bool, can_act: bool) -> ClusterRowView {
        let actions = has_dynamic_config.then(|| {
            let state = self.flows.state(&c.name);
            RowActionsView {
                settings_url: self.navigation.cluster_config(&c.name),
                enabled: can_act,
                delete_path: self.navigation.delete_request(&c.name),
                dialog: state.dialog_open().then(|| DeleteDialogView {
                    cluster: c.name.clone(),
                    message: format!(
                        "Are you sure you want to delete cluster \"{}\"? This cannot be undone.",
                        c.name
                    ),
                    confirm_path: self.navigation.delete_confirm(&c.name),
                    cancel_path: self.navigation.delete_cancel(&c.name),
                    in_flight: state == DeleteFlowState::InFlight,
                }),
            }
        });

        ClusterRowView {
            name: c.name.clone(),
            overview_url: self.navigation.cluster_overview(&c.name),
            version: c.version.clone(),
            status: c.status,
            status_class: match c.status {
                ServerStatus::Online => "badge-success",
                ServerStatus::Offline => "badge-neutral",
            }
            .to_string(),
            read_only: c.read_only,
            broker_count: c.broker_count,
            online_partition_count: c.online_partition_count,
            topic_count: c.topic_count,
            production: human_rate(c.bytes_in_per_sec),
            consumption: human_rate(c.bytes_out_per_sec),
            actions,
        }
    }
}
