use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::AppState;

pub async fn handle_dashboard(State(state): State<AppState>) -> Response {
    match state.dashboard.page().await {
        Ok(page) => Json(page).into_response(),
        Err(e) => (StatusCode::SERVICE_UNAVAILABLE, e.to_string()).into_response(),
    }
}

pub async fn handle_healthz() -> &'static str {
    "ok\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::runtime::DashboardMsg;
    use crate::routes::tests::{loaded_page, state, stopped_state};
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_dashboard_json() {
        let (tx, mut rx) = mpsc::channel(1);
        tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                if let DashboardMsg::Render { reply } = msg {
                    let _ = reply.send(loaded_page(true, Some("a")));
                }
            }
        });

        let resp = handle_dashboard(State(state(tx))).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let page: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(page["online_count"], 1);
        assert_eq!(page["offline_count"], 1);
        assert_eq!(page["columns"].as_array().unwrap().len(), 8);
        assert_eq!(page["rows"][0]["status"], "ONLINE");
        assert_eq!(page["rows"][0]["actions"]["dialog"]["cluster"], "a");
    }

    #[tokio::test]
    async fn test_dashboard_json_unavailable() {
        let resp = handle_dashboard(State(stopped_state())).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(handle_healthz().await, "ok\n");
    }
}
