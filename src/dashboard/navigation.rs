use crate::helpers::join_path;

// Console routes that take a cluster name; the upstream UI owns everything else.
const CONSOLE_CLUSTERS: &str = "/ui/clusters";

/// Resolves where cluster links and form posts point.
#[derive(Debug, Clone)]
pub struct Navigation {
    ui_base_url: String,
}

impl Navigation {
    pub fn new(ui_base_url: &str) -> Self {
        Self {
            ui_base_url: ui_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn cluster_overview(&self, cluster: &str) -> String {
        join_path(&self.ui_base_url, &["ui", "clusters", cluster, "all-topics"])
    }

    pub fn cluster_config(&self, cluster: &str) -> String {
        join_path(&self.ui_base_url, &["ui", "clusters", cluster, "config"])
    }

    pub fn new_cluster_config(&self) -> String {
        join_path(&self.ui_base_url, &["ui", "clusters", "create-new-cluster"])
    }

    pub fn delete_request(&self, cluster: &str) -> String {
        join_path(CONSOLE_CLUSTERS, &[cluster, "delete"])
    }

    pub fn delete_confirm(&self, cluster: &str) -> String {
        join_path(CONSOLE_CLUSTERS, &[cluster, "delete", "confirm"])
    }

    pub fn delete_cancel(&self, cluster: &str) -> String {
        join_path(CONSOLE_CLUSTERS, &[cluster, "delete", "cancel"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_links() {
        let nav = Navigation::new("http://kafka-ui:8080/");
        assert_eq!(
            nav.cluster_config("prod"),
            "http://kafka-ui:8080/ui/clusters/prod/config"
        );
        assert_eq!(
            nav.cluster_overview("prod"),
            "http://kafka-ui:8080/ui/clusters/prod/all-topics"
        );
        assert_eq!(
            nav.new_cluster_config(),
            "http://kafka-ui:8080/ui/clusters/create-new-cluster"
        );
    }

    #[test]
    fn test_console_paths_encode_names() {
        let nav = Navigation::new("http://kafka-ui:8080");
        assert_eq!(nav.delete_request("eu west"), "/ui/clusters/eu%20west/delete");
        assert_eq!(nav.delete_confirm("a/b"), "/ui/clusters/a%2Fb/delete/confirm");
        assert_eq!(nav.delete_cancel("b"), "/ui/clusters/b/delete/cancel");
    }
}
