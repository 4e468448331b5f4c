pub mod alerts;
pub mod controller;
pub mod delete_flow;
pub mod filter;
pub mod navigation;
pub mod permissions;
pub mod runtime;
pub mod store;

use thiserror::Error;

use crate::clients::ClientError;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("cluster listing unavailable: {0}")]
    FetchFailed(#[source] ClientError),
    #[error("deleting application config of cluster {cluster:?} failed: {source}")]
    DeletionFailed {
        cluster: String,
        #[source]
        source: ClientError,
    },
    #[error("dashboard is not running")]
    Unavailable,
}
