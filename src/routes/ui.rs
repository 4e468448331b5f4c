use askama::Template;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::AppState;
use crate::dashboard::controller::UserEvent;
use crate::models::views::DashboardPage;

const DASHBOARD_PATH: &str = "/ui/";

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    title: String,
    console_name: String,
    upstream_url: String,
    page: DashboardPage,
}

fn render_template(tmpl: &impl Template) -> Response {
    match tmpl.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("template error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

pub async fn handle_dashboard(State(state): State<AppState>) -> Response {
    let page = match state.dashboard.page().await {
        Ok(page) => page,
        Err(e) => return (StatusCode::SERVICE_UNAVAILABLE, e.to_string()).into_response(),
    };

    let tmpl = DashboardTemplate {
        title: "Dashboard".to_string(),
        console_name: state.config.console_name.clone(),
        upstream_url: state.config.ui_base_url().to_string(),
        page,
    };

    render_template(&tmpl)
}

// --- Form posts (post/redirect/get back to the dashboard) ---

async fn dispatch(state: &AppState, event: UserEvent) -> Response {
    match state.dashboard.send(event).await {
        Ok(()) => Redirect::to(DASHBOARD_PATH).into_response(),
        Err(e) => (StatusCode::SERVICE_UNAVAILABLE, e.to_string()).into_response(),
    }
}

pub async fn handle_toggle_offline(State(state): State<AppState>) -> Response {
    dispatch(&state, UserEvent::ToggleOfflineOnly).await
}

pub async fn handle_refresh(State(state): State<AppState>) -> Response {
    dispatch(&state, UserEvent::Refresh).await
}

pub async fn handle_request_delete(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    dispatch(&state, UserEvent::RequestDelete(name)).await
}

pub async fn handle_cancel_delete(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    dispatch(&state, UserEvent::CancelDelete(name)).await
}

pub async fn handle_confirm_delete(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    dispatch(&state, UserEvent::ConfirmDelete(name)).await
}

pub async fn handle_dismiss_alert(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    dispatch(&state, UserEvent::DismissAlert(id)).await
}
