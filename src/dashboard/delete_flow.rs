//! Per-row delete confirmation.
//!
//! Each cluster row owns at most one flow, keyed by cluster name:
//!
//! ```text
//! Idle --request--> ConfirmPending --confirm--> InFlight --succeeded/failed--> Idle
//!                        |
//!                        +--cancel--> Idle
//! ```
//!
//! Transitions return the effect the caller must carry out. A flow in `InFlight`
//! outlives its row until the completion arrives so a name can never have two
//! deletes outstanding.

use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteFlowState {
    #[default]
    Idle,
    ConfirmPending,
    InFlight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEvent {
    Request,
    Cancel,
    Confirm,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEffect {
    None,
    IssueDelete,
    Refetch,
    ReportFailure,
}

impl DeleteFlowState {
    /// `None` when the event is not allowed in this state.
    pub fn next(self, event: FlowEvent) -> Option<(DeleteFlowState, FlowEffect)> {
        use DeleteFlowState::*;

        match (self, event) {
            (Idle, FlowEvent::Request) => Some((ConfirmPending, FlowEffect::None)),
            (ConfirmPending, FlowEvent::Cancel) => Some((Idle, FlowEffect::None)),
            (ConfirmPending, FlowEvent::Confirm) => Some((InFlight, FlowEffect::IssueDelete)),
            (InFlight, FlowEvent::Succeeded) => Some((Idle, FlowEffect::Refetch)),
            (InFlight, FlowEvent::Failed) => Some((Idle, FlowEffect::ReportFailure)),
            _ => None,
        }
    }

    pub fn dialog_open(self) -> bool {
        matches!(self, DeleteFlowState::ConfirmPending | DeleteFlowState::InFlight)
    }
}

#[derive(Debug, Default)]
pub struct DeleteFlows {
    flows: HashMap<String, DeleteFlowState>,
}

impl DeleteFlows {
    pub fn state(&self, cluster: &str) -> DeleteFlowState {
        self.flows.get(cluster).copied().unwrap_or_default()
    }

    /// Applies `event` to the flow of `cluster`. Only `Request` creates a flow;
    /// every other event for an unknown cluster is dropped.
    pub fn apply(&mut self, cluster: &str, event: FlowEvent) -> Option<FlowEffect> {
        let state = match event {
            FlowEvent::Request => self.flows.entry(cluster.to_string()).or_default(),
            _ => self.flows.get_mut(cluster)?,
        };

        let (next, effect) = state.next(event)?;
        *state = next;
        Some(effect)
    }

    /// Destroys flows whose rows are no longer rendered, except those awaiting a response.
    pub fn retain_rows(&mut self, visible: &HashSet<&str>) {
        self.flows.retain(|name, state| {
            *state == DeleteFlowState::InFlight || visible.contains(name.as_str())
        });
    }

    pub fn any_in_flight(&self) -> bool {
        self.flows.values().any(|s| *s == DeleteFlowState::InFlight)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.flows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use DeleteFlowState::*;

    const ALL_EVENTS: [FlowEvent; 5] = [
        FlowEvent::Request,
        FlowEvent::Cancel,
        FlowEvent::Confirm,
        FlowEvent::Succeeded,
        FlowEvent::Failed,
    ];

    fn allowed(state: DeleteFlowState) -> Vec<FlowEvent> {
        ALL_EVENTS
            .into_iter()
            .filter(|e| state.next(*e).is_some())
            .collect()
    }

    #[test]
    fn test_transition_table() {
        assert_eq!(allowed(Idle), [FlowEvent::Request]);
        assert_eq!(allowed(ConfirmPending), [FlowEvent::Cancel, FlowEvent::Confirm]);
        assert_eq!(allowed(InFlight), [FlowEvent::Succeeded, FlowEvent::Failed]);

        assert_eq!(Idle.next(FlowEvent::Request), Some((ConfirmPending, FlowEffect::None)));
        assert_eq!(ConfirmPending.next(FlowEvent::Cancel), Some((Idle, FlowEffect::None)));
        assert_eq!(
            ConfirmPending.next(FlowEvent::Confirm),
            Some((InFlight, FlowEffect::IssueDelete))
        );
        assert_eq!(InFlight.next(FlowEvent::Succeeded), Some((Idle, FlowEffect::Refetch)));
        assert_eq!(InFlight.next(FlowEvent::Failed), Some((Idle, FlowEffect::ReportFailure)));
    }

    #[test]
    fn test_dialog_closed_after_any_response() {
        assert!(!Idle.dialog_open());
        assert!(ConfirmPending.dialog_open());
        assert!(InFlight.dialog_open());

        for outcome in [FlowEvent::Succeeded, FlowEvent::Failed] {
            let (next, _) = InFlight.next(outcome).unwrap();
            assert!(!next.dialog_open());
        }
    }

    #[test]
    fn test_confirm_while_in_flight_ignored() {
        let mut flows = DeleteFlows::default();
        flows.apply("b", FlowEvent::Request);
        assert_eq!(flows.apply("b", FlowEvent::Confirm), Some(FlowEffect::IssueDelete));

        assert_eq!(flows.apply("b", FlowEvent::Confirm), None);
        assert_eq!(flows.apply("b", FlowEvent::Request), None);
        assert_eq!(flows.apply("b", FlowEvent::Cancel), None);
        assert_eq!(flows.state("b"), InFlight);
    }

    #[test]
    fn test_flows_are_independent_per_row() {
        let mut flows = DeleteFlows::default();
        flows.apply("a", FlowEvent::Request);
        flows.apply("a", FlowEvent::Confirm);
        flows.apply("b", FlowEvent::Request);

        assert_eq!(flows.state("a"), InFlight);
        assert_eq!(flows.state("b"), ConfirmPending);
        assert_eq!(flows.state("c"), Idle);
    }

    #[test]
    fn test_completion_for_unknown_flow_is_noop() {
        let mut flows = DeleteFlows::default();
        assert_eq!(flows.apply("gone", FlowEvent::Succeeded), None);
        assert_eq!(flows.apply("gone", FlowEvent::Failed), None);
        assert_eq!(flows.len(), 0);
    }

    #[test]
    fn test_retain_rows_keeps_in_flight() {
        let mut flows = DeleteFlows::default();
        flows.apply("pending", FlowEvent::Request);
        flows.apply("sent", FlowEvent::Request);
        flows.apply("sent", FlowEvent::Confirm);
        flows.apply("shown", FlowEvent::Request);

        flows.retain_rows(&HashSet::from(["shown"]));

        assert_eq!(flows.state("pending"), Idle);
        assert_eq!(flows.state("sent"), InFlight);
        assert_eq!(flows.state("shown"), ConfirmPending);
        assert_eq!(flows.len(), 2);
        assert!(flows.any_in_flight());

        assert_eq!(flows.apply("sent", FlowEvent::Succeeded), Some(FlowEffect::Refetch));
        flows.retain_rows(&HashSet::new());
        assert_eq!(flows.len(), 0);
    }
}
