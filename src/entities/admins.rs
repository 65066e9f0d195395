use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 管理员角色
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    #[sea_orm(string_value = "superadmin")]
    SuperAdmin,
    #[sea_orm(string_value = "admin")]
    Admin,
}

/// 后台操作所需的权限
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ManageTokens,
    ManagePrizes,
    ViewResults,
    ManageAdmins,
}

impl AdminRole {
    pub fn capabilities(&self) -> &'static [Capability] {
        match self {
            AdminRole::SuperAdmin => &[
                Capability::ManageTokens,
                Capability::ManagePrizes,
                Capability::ViewResults,
                Capability::ManageAdmins,
            ],
            AdminRole::Admin => &[
                Capability::ManageTokens,
                Capability::ManagePrizes,
                Capability::ViewResults,
            ],
        }
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "admins")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    pub password_hash: String,
    pub role: AdminRole,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_superadmin_manages_admins() {
        assert!(AdminRole::SuperAdmin.can(Capability::ManageAdmins));
        assert!(!AdminRole::Admin.can(Capability::ManageAdmins));
    }

    #[test]
    fn test_both_roles_manage_tokens_and_prizes() {
        for role in [AdminRole::SuperAdmin, AdminRole::Admin] {
            assert!(role.can(Capability::ManageTokens));
            assert!(role.can(Capability::ManagePrizes));
            assert!(role.can(Capability::ViewResults));
        }
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&AdminRole::SuperAdmin).unwrap(),
            "\"superadmin\""
        );
        assert_eq!(
            serde_json::from_str::<AdminRole>("\"admin\"").unwrap(),
            AdminRole::Admin
        );
        assert!(serde_json::from_str::<AdminRole>("\"root\"").is_err());
    }
}
