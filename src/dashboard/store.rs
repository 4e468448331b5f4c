use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::warn;

use crate::clients::ClientError;
use crate::models::api::ClusterSummary;

use super::DashboardError;

/// One fetch result. Shared read-only; a refetch swaps in a new one.
pub type ClusterSnapshot = Arc<[ClusterSummary]>;

/// Identifies an issued fetch so late responses can be ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

#[derive(Debug)]
pub enum FetchOutcome {
    Applied { clusters: usize },
    Failed(DashboardError),
    /// A newer snapshot was already applied.
    Stale,
}

#[derive(Debug)]
pub struct ClusterSummaryStore {
    snapshot: ClusterSnapshot,
    fetched: bool,
    issued: u64,
    applied: u64,
    pending: usize,
    last_error: Option<String>,
    last_updated: Option<DateTime<Utc>>,
}

impl Default for ClusterSummaryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ClusterSummaryStore {
    pub fn new() -> Self {
        Self {
            snapshot: Arc::from(Vec::new()),
            fetched: false,
            issued: 0,
            applied: 0,
            pending: 0,
            last_error: None,
            last_updated: None,
        }
    }

    /// Initial load. Issues nothing once a fetch is pending or has succeeded.
    pub fn fetch(&mut self) -> Option<FetchTicket> {
        if self.fetched || self.pending > 0 {
            return None;
        }
        Some(self.refetch())
    }

    pub fn refetch(&mut self) -> FetchTicket {
        self.issued += 1;
        self.pending += 1;
        FetchTicket(self.issued)
    }

    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<ClusterSummary>, ClientError>,
    ) -> FetchOutcome {
        self.pending = self.pending.saturating_sub(1);

        if ticket.0 < self.applied {
            return FetchOutcome::Stale;
        }

        match result {
            Ok(clusters) => {
                let clusters = dedup_by_name(clusters);
                let count = clusters.len();
                self.snapshot = Arc::from(clusters);
                self.applied = ticket.0;
                self.fetched = true;
                self.last_error = None;
                self.last_updated = Some(Utc::now());
                FetchOutcome::Applied { clusters: count }
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                FetchOutcome::Failed(DashboardError::FetchFailed(e))
            }
        }
    }

    pub fn snapshot(&self) -> &ClusterSnapshot {
        &self.snapshot
    }

    pub fn is_fetched(&self) -> bool {
        self.fetched
    }

    pub fn is_pending(&self) -> bool {
        self.pending > 0
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }
}

fn dedup_by_name(clusters: Vec<ClusterSummary>) -> Vec<ClusterSummary> {
    let mut seen = HashSet::new();
    clusters
        .into_iter()
        .filter(|c| {
            let first = seen.insert(c.name.clone());
            if !first {
                warn!("dropping duplicate cluster {:?} from listing", c.name);
            }
            first
        })
        .collect()
}
