use serde::{Deserialize, Deserializer, Serialize};

// Wire types of the upstream management API. Field names follow its camelCase JSON.

/// Treats an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

// --- Clusters ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServerStatus {
    Online,
    /// Anything the upstream reports that is not ONLINE, including INITIALIZING.
    #[default]
    #[serde(other)]
    Offline,
}

impl ServerStatus {
    pub fn label(self) -> &'static str {
        match self {
            ServerStatus::Online => "Online",
            ServerStatus::Offline => "Offline",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSummary {
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: ServerStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub broker_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub online_partition_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub topic_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bytes_in_per_sec: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bytes_out_per_sec: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub read_only: bool,
}

impl ClusterSummary {
    pub fn is_offline(&self) -> bool {
        self.status == ServerStatus::Offline
    }
}

// --- Authorization ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResourceType {
    ApplicationConfig,
    ClusterConfig,
    Topic,
    Consumer,
    Schema,
    Connect,
    Ksql,
    Acl,
    Audit,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticationInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub rbac_enabled: bool,
    #[serde(default)]
    pub user_info: Option<UserInfo>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct UserInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub permissions: Vec<UserPermission>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserPermission {
    pub resource: ResourceType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub actions: Vec<String>,
}

// --- Application info ---

pub const FEATURE_DYNAMIC_CONFIG: &str = "DYNAMIC_CONFIG";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInfo {
    #[serde(default, deserialize_with = "null_as_default")]
    pub enabled_features: Vec<String>,
}

impl ApplicationInfo {
    pub fn has_feature(&self, feature: &str) -> bool {
        self.enabled_features.iter().any(|f| f == feature)
    }
}
