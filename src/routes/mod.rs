pub mod api;
pub mod ui;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Dashboard UI
        .route("/ui/", get(ui::handle_dashboard))
        .route("/ui/toggle-offline", post(ui::handle_toggle_offline))
        .route("/ui/refresh", post(ui::handle_refresh))
        .route("/ui/clusters/{name}/delete", post(ui::handle_request_delete))
        .route(
            "/ui/clusters/{name}/delete/cancel",
            post(ui::handle_cancel_delete),
        )
        .route(
            "/ui/clusters/{name}/delete/confirm",
            post(ui::handle_confirm_delete),
        )
        .route("/ui/alerts/{id}/dismiss", post(ui::handle_dismiss_alert))
        // JSON view of the same page model
        .route("/api/dashboard", get(api::handle_dashboard))
        // Health
        .route("/healthz", get(api::handle_healthz))
        // Static files
        .nest_service("/ui/static", ServeDir::new("static"))
        // Root redirect
        .route(
            "/",
            get(|| async { axum::response::Redirect::to("/ui/") }),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Arc;
    use tokio::sync::mpsc;

    use crate::AppState;
    use crate::config::Config;
    use crate::dashboard::controller::{Command, Completion, DashboardController, UserEvent};
    use crate::dashboard::navigation::Navigation;
    use crate::dashboard::runtime::{DashboardHandle, DashboardMsg};
    use crate::dashboard::store::tests::cluster;
    use crate::models::api::ServerStatus::{Offline, Online};
    use crate::models::views::DashboardPage;

    pub(crate) fn state(tx: mpsc::Sender<DashboardMsg>) -> AppState {
        let config = Config::from_yaml("api:\n  base_url: http://kafka-ui:8080\n").unwrap();
        AppState {
            dashboard: DashboardHandle::from_sender(tx),
            config: Arc::new(config),
        }
    }

    /// A handle whose actor has already stopped.
    pub(crate) fn stopped_state() -> AppState {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        state(tx)
    }

    /// Clusters `a` (online) and `<b>` (offline), optionally with a delete dialog open.
    pub(crate) fn loaded_page(dynamic_config: bool, dialog_for: Option<&str>) -> DashboardPage {
        let mut c = DashboardController::new(
            Navigation::new("http://kafka-ui:8080"),
            Some(dynamic_config),
        );
        for command in c.start() {
            if let Command::FetchClusters(ticket) = command {
                c.handle_completion(Completion::ClustersFetched {
                    ticket,
                    result: Ok(vec![cluster("a", Online), cluster("<b>", Offline)]),
                });
            }
        }
        if let Some(name) = dialog_for {
            c.handle_user(UserEvent::RequestDelete(name.to_string()));
        }
        c.render()
    }
}
