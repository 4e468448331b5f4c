use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

use crate::helpers::join_path;
use crate::models::api::{ApplicationInfo, AuthenticationInfo, ClusterSummary};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("building HTTP client: {0}")]
    Build(#[source] reqwest::Error),
    #[error("{method} {path}: {source}")]
    Transport {
        method: Method,
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{method} {path} returned {status}: {body}")]
    Status {
        method: Method,
        path: String,
        status: StatusCode,
        body: String,
    },
    #[error("decoding response of {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

/// The upstream management API as the dashboard sees it.
pub trait ManagementApi: Send + Sync + 'static {
    fn list_clusters(&self) -> impl Future<Output = Result<Vec<ClusterSummary>, ClientError>> + Send;

    fn delete_app_config(
        &self,
        cluster: &str,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    fn user_info(&self) -> impl Future<Output = Result<AuthenticationInfo, ClientError>> + Send;

    fn app_info(&self) -> impl Future<Output = Result<ApplicationInfo, ClientError>> + Send;
}

pub struct ApiClient {
    pub base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self { base_url, http })
    }

    async fn send(&self, method: Method, segments: &[&str]) -> Result<reqwest::Response, ClientError> {
        let url = join_path(&self.base_url, segments);
        let path = join_path("", segments);

        let resp = self
            .http
            .request(method.clone(), &url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| ClientError::Transport {
                method: method.clone(),
                path: path.clone(),
                source,
            })?;

        let status = resp.status();
        if status.as_u16() >= 400 {
            let body = truncate_body(resp.text().await.unwrap_or_default());
            return Err(ClientError::Status {
                method,
                path,
                status,
                body,
            });
        }
        Ok(resp)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ClientError> {
        let resp = self.send(Method::GET, segments).await?;
        resp.json().await.map_err(|source| ClientError::Decode {
            path: join_path("", segments),
            source,
        })
    }
}

const MAX_ERROR_BODY: usize = 512;

/// Keeps error bodies (often whole proxy HTML pages) short enough for logs and alerts.
fn truncate_body(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY {
        let mut end = MAX_ERROR_BODY;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        body.truncate(end);
        body.push_str("...");
    }
    body
}

impl ManagementApi for ApiClient {
    async fn list_clusters(&self) -> Result<Vec<ClusterSummary>, ClientError> {
        self.get_json(&["api", "clusters"]).await
    }

    async fn delete_app_config(&self, cluster: &str) -> Result<(), ClientError> {
        self.send(Method::DELETE, &["api", "config", "clusters", cluster])
            .await?;
        Ok(())
    }

    async fn user_info(&self) -> Result<AuthenticationInfo, ClientError> {
        self.get_json(&["api", "authorization"]).await
    }

    async fn app_info(&self) -> Result<ApplicationInfo, ClientError> {
        self.get_json(&["api", "info"]).await
    }
}
