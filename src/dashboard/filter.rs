use crate::models::api::ClusterSummary;

/// Filtered list plus online/offline counters for one snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateView<'a> {
    pub list: Vec<&'a ClusterSummary>,
    pub online_count: usize,
    pub offline_count: usize,
}

/// Counters always cover the whole snapshot; only `list` honours the toggle.
pub fn project(snapshot: &[ClusterSummary], show_offline_only: bool) -> AggregateView<'_> {
    let offline: Vec<&ClusterSummary> = snapshot.iter().filter(|c| c.is_offline()).collect();
    let offline_count = offline.len();

    let list = if show_offline_only {
        offline
    } else {
        snapshot.iter().collect()
    };

    AggregateView {
        list,
        online_count: snapshot.len() - offline_count,
        offline_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::store::tests::cluster;
    use crate::models::api::ServerStatus::{Offline, Online};

    fn names<'a>(view: &AggregateView<'a>) -> Vec<&'a str> {
        view.list.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_counts_and_toggle() {
        let snapshot = vec![cluster("a", Online), cluster("b", Offline)];

        let all = project(&snapshot, false);
        assert_eq!(all.online_count, 1);
        assert_eq!(all.offline_count, 1);
        assert_eq!(names(&all), ["a", "b"]);

        let offline = project(&snapshot, true);
        assert_eq!(names(&offline), ["b"]);
        assert_eq!(offline.online_count, 1);
        assert_eq!(offline.offline_count, 1);
    }

    #[test]
    fn test_counts_sum_to_snapshot_len() {
        let snapshots = [
            vec![],
            vec![cluster("a", Online)],
            vec![cluster("a", Offline), cluster("b", Offline)],
            vec![
                cluster("a", Online),
                cluster("b", Offline),
                cluster("c", Online),
                cluster("d", Offline),
                cluster("e", Online),
            ],
        ];

        for s in &snapshots {
            for flag in [false, true] {
                let v = project(s, flag);
                assert_eq!(v.online_count + v.offline_count, s.len());
            }
        }
    }

    #[test]
    fn test_offline_only_preserves_order() {
        let snapshot = vec![
            cluster("z", Offline),
            cluster("m", Online),
            cluster("a", Offline),
            cluster("q", Offline),
        ];

        let view = project(&snapshot, true);
        assert!(view.list.iter().all(|c| c.status == Offline));
        assert_eq!(names(&view), ["z", "a", "q"]);
    }

    #[test]
    fn test_toggle_twice_restores_list() {
        let snapshot = vec![cluster("a", Online), cluster("b", Offline), cluster("c", Online)];

        let mut flag = false;
        let original = project(&snapshot, flag);
        flag = !flag;
        let _ = project(&snapshot, flag);
        flag = !flag;

        assert_eq!(project(&snapshot, flag), original);
        assert_eq!(original.list.len(), snapshot.len());
    }
}
