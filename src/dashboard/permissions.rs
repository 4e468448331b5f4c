use crate::models::api::{ApplicationInfo, AuthenticationInfo, FEATURE_DYNAMIC_CONFIG, ResourceType};

/// Resource every gated action on the cluster list requires.
pub const CLUSTER_CONFIG_RESOURCE: ResourceType = ResourceType::ApplicationConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permission {
    pub resource: ResourceType,
    pub actions: Vec<String>,
}

/// The current actor as reported by the authorization service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserContext {
    pub rbac_enabled: bool,
    pub username: Option<String>,
    pub permissions: Vec<Permission>,
}

impl From<AuthenticationInfo> for UserContext {
    fn from(info: AuthenticationInfo) -> Self {
        let (username, permissions) = match info.user_info {
            Some(u) => (
                Some(u.username).filter(|n| !n.is_empty()),
                u.permissions
                    .into_iter()
                    .map(|p| Permission {
                        resource: p.resource,
                        actions: p.actions,
                    })
                    .collect(),
            ),
            None => (None, Vec::new()),
        };

        Self {
            rbac_enabled: info.rbac_enabled,
            username,
            permissions,
        }
    }
}

/// Without RBAC everything is allowed; with it, any permission on the resource suffices.
pub fn can_act(user: &UserContext, required: ResourceType) -> bool {
    if !user.rbac_enabled {
        return true;
    }
    user.permissions.iter().any(|p| p.resource == required)
}

/// Feature availability, independent of who is asking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub has_dynamic_config: bool,
}

impl From<&ApplicationInfo> for Capabilities {
    fn from(info: &ApplicationInfo) -> Self {
        Self {
            has_dynamic_config: info.has_feature(FEATURE_DYNAMIC_CONFIG),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_RESOURCES: [ResourceType; 10] = [
        ResourceType::ApplicationConfig,
        ResourceType::ClusterConfig,
        ResourceType::Topic,
        ResourceType::Consumer,
        ResourceType::Schema,
        ResourceType::Connect,
        ResourceType::Ksql,
        ResourceType::Acl,
        ResourceType::Audit,
        ResourceType::Unknown,
    ];

    fn perm(resource: ResourceType) -> Permission {
        Permission {
            resource,
            actions: vec!["VIEW".to_string()],
        }
    }

    #[test]
    fn test_rbac_disabled_allows_everything() {
        let permission_sets = [vec![], vec![perm(ResourceType::Topic)], vec![perm(ResourceType::Acl)]];
        for permissions in permission_sets {
            let user = UserContext {
                rbac_enabled: false,
                username: None,
                permissions,
            };
            for r in ALL_RESOURCES {
                assert!(can_act(&user, r));
            }
        }
    }

    #[test]
    fn test_rbac_requires_matching_resource() {
        let user = UserContext {
            rbac_enabled: true,
            username: Some("bob".to_string()),
            permissions: vec![perm(ResourceType::Topic), perm(ResourceType::Schema)],
        };
        assert!(!can_act(&user, CLUSTER_CONFIG_RESOURCE));
        assert!(can_act(&user, ResourceType::Topic));

        let empty = UserContext {
            rbac_enabled: true,
            ..Default::default()
        };
        assert!(!can_act(&empty, CLUSTER_CONFIG_RESOURCE));
    }

    #[test]
    fn test_any_action_on_resource_matches() {
        let user = UserContext {
            rbac_enabled: true,
            username: None,
            permissions: vec![Permission {
                resource: ResourceType::ApplicationConfig,
                actions: Vec::new(),
            }],
        };
        assert!(can_act(&user, CLUSTER_CONFIG_RESOURCE));
    }

    #[test]
    fn test_user_context_from_authorization() {
        let info: AuthenticationInfo = serde_json::from_str(
            r#"{"rbacEnabled":true,"userInfo":{"username":"","permissions":[{"resource":"APPLICATIONCONFIG","actions":["EDIT"]}]}}"#,
        )
        .unwrap();

        let user = UserContext::from(info);
        assert!(user.rbac_enabled);
        assert_eq!(user.username, None);
        assert_eq!(user.permissions.len(), 1);
        assert!(can_act(&user, CLUSTER_CONFIG_RESOURCE));

        let anonymous = UserContext::from(AuthenticationInfo::default());
        assert!(!anonymous.rbac_enabled);
        assert!(anonymous.permissions.is_empty());
    }
}
